//! The `Theme` type: one discovered theme directory.
//!
//! A theme is a directory with a descriptor plus template and static-asset
//! roots:
//!
//! ```text
//! aurora/
//!     info.json        descriptor (required)
//!     license.txt      full license text (optional)
//!     templates/       templates the theme provides
//!     static/          assets served under the theme's static URL prefix
//! ```
//!
//! [`Theme::from_dir`] reads the descriptor and resolves the sub-paths; the
//! sub-directories themselves are not required to exist, since a theme may
//! ship only templates or only assets.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Result, ThemeError};
use crate::info::ThemeInfo;

/// Name of the descriptor file inside a theme directory.
pub const THEME_INFO_FILENAME: &str = "info.json";

/// Name of the optional license text file inside a theme directory.
pub const THEME_LICENSE_FILENAME: &str = "license.txt";

/// One discovered theme: descriptor metadata plus resolved paths.
#[derive(Debug, Clone)]
pub struct Theme {
    info: ThemeInfo,
    path: PathBuf,
    templates_path: PathBuf,
    static_path: PathBuf,
    license_text: Option<String>,
}

impl Theme {
    /// Loads a theme from a directory.
    ///
    /// Reads `info.json`, resolves the `templates/` and `static/` roots and
    /// reads `license.txt` when present. The directory path is canonicalized
    /// so later joins produce absolute paths.
    ///
    /// The descriptor's identifier is authoritative. When it differs from
    /// the directory name a warning is logged, since the two are expected
    /// to match by convention.
    ///
    /// # Errors
    ///
    /// Fails when the directory is unreadable, the descriptor is missing or
    /// malformed, or the identifier is invalid.
    pub fn from_dir<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = fs::canonicalize(path.as_ref()).map_err(|e| ThemeError::Io {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;

        let info = ThemeInfo::from_file(&path.join(THEME_INFO_FILENAME))?;

        if let Some(dir_name) = path.file_name().and_then(|n| n.to_str()) {
            if dir_name != info.identifier {
                warn!(
                    directory = dir_name,
                    identifier = %info.identifier,
                    "theme identifier differs from its directory name"
                );
            }
        }

        let license_text = read_optional(&path.join(THEME_LICENSE_FILENAME))?;

        Ok(Self {
            templates_path: path.join("templates"),
            static_path: path.join("static"),
            info,
            path,
            license_text,
        })
    }

    /// The unique short name used in URLs and template namespaces.
    pub fn identifier(&self) -> &str {
        &self.info.identifier
    }

    /// The human-readable display name.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// The application identifier this theme targets (`"*"` for any).
    pub fn application(&self) -> &str {
        &self.info.application
    }

    /// The full parsed descriptor.
    pub fn info(&self) -> &ThemeInfo {
        &self.info
    }

    /// Absolute path of the theme directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path of the theme's template root (`<path>/templates`).
    pub fn templates_path(&self) -> &Path {
        &self.templates_path
    }

    /// Absolute path of the theme's static-asset root (`<path>/static`).
    pub fn static_path(&self) -> &Path {
        &self.static_path
    }

    /// Full license text from `license.txt`, when the theme ships one.
    pub fn license_text(&self) -> Option<&str> {
        self.license_text.as_deref()
    }

    /// True when this theme may be registered for the given application:
    /// its `application` field is `"*"` or equals `app_identifier`.
    pub fn matches_application(&self, app_identifier: &str) -> bool {
        self.info.application == "*" || self.info.application == app_identifier
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ThemeError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
