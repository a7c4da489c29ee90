//! Error types for theme discovery and rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while discovering themes or rendering through them.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// No theme with the given identifier is registered.
    #[error("unknown theme: \"{identifier}\"")]
    UnknownTheme { identifier: String },

    /// A theme-scoped helper was called while no theme was active.
    ///
    /// Raised when `theme_static()` or `theme()` is evaluated in a template
    /// that was neither rendered through a theme nor included from one.
    #[error("no active theme in the current render context")]
    NoActiveTheme,

    /// The theme descriptor (`info.json`) is missing a field or malformed.
    #[error("invalid theme descriptor at {}: {reason}", path.display())]
    Metadata { path: PathBuf, reason: String },

    /// The descriptor declares an identifier that is not usable in URLs
    /// and template names.
    #[error("invalid theme identifier: \"{identifier}\"")]
    InvalidIdentifier { identifier: String },

    /// Filesystem access failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template lookup or rendering failed.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Result type for theme operations.
pub type Result<T> = std::result::Result<T, ThemeError>;
