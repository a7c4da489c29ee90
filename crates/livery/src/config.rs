//! Configuration for the theming extension.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for a [`Themes`](crate::setup::Themes) instance.
///
/// Built with chained setters; serde-derived so host applications can embed
/// it in their own configuration files. Only the application identifier is
/// required.
///
/// # Example
///
/// ```rust,ignore
/// use livery::ThemesConfig;
///
/// let config = ThemesConfig::new("gallery")
///     .with_app_root("/srv/gallery")
///     .with_theme_path("/etc/gallery/themes");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemesConfig {
    /// Identifier themes must be bound to (their `application` field),
    /// unless they declare `"*"`.
    app_identifier: String,

    /// Application root; packaged themes live in `<app_root>/themes/` and
    /// application templates default to `<app_root>/templates/`.
    #[serde(default = "default_app_root")]
    app_root: PathBuf,

    /// Additional theme search paths, scanned after the packaged themes.
    #[serde(default)]
    theme_paths: Vec<PathBuf>,

    /// Application template root override.
    #[serde(default)]
    template_dir: Option<PathBuf>,

    /// URL prefix theme static assets are served under.
    #[serde(default = "default_static_prefix")]
    static_prefix: String,
}

fn default_app_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_static_prefix() -> String {
    "/_themes".to_string()
}

impl ThemesConfig {
    /// Creates a configuration with defaults for everything but the
    /// application identifier.
    pub fn new(app_identifier: impl Into<String>) -> Self {
        Self {
            app_identifier: app_identifier.into(),
            app_root: default_app_root(),
            theme_paths: Vec::new(),
            template_dir: None,
            static_prefix: default_static_prefix(),
        }
    }

    /// Sets the application root, returning `self` for chaining.
    pub fn with_app_root(mut self, app_root: impl Into<PathBuf>) -> Self {
        self.app_root = app_root.into();
        self
    }

    /// Appends one theme search path, returning `self` for chaining.
    pub fn with_theme_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.theme_paths.push(path.into());
        self
    }

    /// Replaces the theme search paths, returning `self` for chaining.
    pub fn with_theme_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.theme_paths = paths;
        self
    }

    /// Overrides the application template root, returning `self` for
    /// chaining. Defaults to `<app_root>/templates`.
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Sets the static URL prefix, returning `self` for chaining.
    ///
    /// The prefix is normalized to start with `/` and carry no trailing
    /// slash, the shape the router mount expects.
    pub fn with_static_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_matches('/');
        self.static_prefix = format!("/{}", trimmed);
        self
    }

    /// The application identifier.
    pub fn app_identifier(&self) -> &str {
        &self.app_identifier
    }

    /// The application root.
    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    /// The configured theme search paths.
    pub fn theme_paths(&self) -> &[PathBuf] {
        &self.theme_paths
    }

    /// The application template root (explicit override, or
    /// `<app_root>/templates`).
    pub fn template_dir(&self) -> PathBuf {
        self.template_dir
            .clone()
            .unwrap_or_else(|| self.app_root.join("templates"))
    }

    /// The URL prefix theme static assets are served under.
    pub fn static_prefix(&self) -> &str {
        &self.static_prefix
    }

    /// Builds the URL for a static asset inside a theme:
    /// `<static_prefix>/<identifier>/<filename>`.
    ///
    /// Pure string construction; neither the theme nor the file is
    /// verified to exist.
    pub fn static_url(&self, identifier: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            self.static_prefix,
            identifier,
            filename.trim_start_matches('/')
        )
    }
}
