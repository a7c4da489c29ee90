//! The theme descriptor: the parsed contents of a theme's `info.json`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};

/// Metadata describing a theme, parsed from the `info.json` file at the
/// theme directory's root.
///
/// Three fields are required: [`application`](ThemeInfo::application),
/// [`identifier`](ThemeInfo::identifier) and [`name`](ThemeInfo::name).
/// Unknown fields are ignored so descriptors can carry extra data for
/// other tools.
///
/// # Example descriptor
///
/// ```json
/// {
///     "application": "gallery",
///     "identifier": "aurora",
///     "name": "Aurora Dusk",
///     "author": "A. Painter",
///     "version": "2.0"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeInfo {
    /// The application identifier this theme targets, or `"*"` for any.
    pub application: String,
    /// Unique short name used in URLs and template namespaces.
    pub identifier: String,
    /// Human-readable display name.
    pub name: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional author attribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Optional project or author website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Optional license name (the full text lives in `license.txt`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Optional theme version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ThemeInfo {
    /// Parses a descriptor from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Metadata`] when the JSON is malformed or a
    /// required field is missing, and [`ThemeError::InvalidIdentifier`]
    /// when the identifier contains characters outside ASCII
    /// alphanumerics, `-` and `_`.
    pub fn from_json(source: &str, origin: &Path) -> Result<Self> {
        let info: ThemeInfo =
            serde_json::from_str(source).map_err(|e| ThemeError::Metadata {
                path: origin.to_path_buf(),
                reason: e.to_string(),
            })?;
        info.validate()?;
        Ok(info)
    }

    /// Reads and parses the descriptor file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| ThemeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&source, path)
    }

    fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.identifier) {
            return Err(ThemeError::InvalidIdentifier {
                identifier: self.identifier.clone(),
            });
        }
        Ok(())
    }
}

/// Returns true for identifiers that are safe to embed in URLs and
/// template names: non-empty ASCII alphanumerics, `-` and `_`.
pub fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
