//! Theme discovery: directory scanning and pluggable loaders.
//!
//! [`load_themes_from`] is the single scanning primitive: it inspects the
//! immediate subdirectories of a search path and parses each one as a
//! theme. The [`ThemeLoader`] trait layers discovery sources on top of it;
//! the [`ThemeManager`](crate::manager::ThemeManager) runs a chain of
//! loaders on every refresh.
//!
//! Two loaders cover the common setup:
//!
//! - [`PackagedThemesLoader`]: themes shipped inside the application, under
//!   `<app_root>/themes/`.
//! - [`ThemePathsLoader`]: themes from configured search paths, typically
//!   user- or deployment-provided directories.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, ThemeError};
use crate::theme::Theme;

/// Scans the immediate subdirectories of `path` and parses each as a theme.
///
/// Subdirectories that do not parse (no `info.json`, malformed descriptor,
/// bad identifier) are skipped with a warning; one broken directory must
/// not hide the rest. Plain files in the search path are ignored.
///
/// The result is sorted by identifier.
///
/// # Errors
///
/// Fails when `path` itself cannot be read.
pub fn load_themes_from<P: AsRef<Path>>(path: P) -> Result<Vec<Theme>> {
    let path = path.as_ref();
    let entries = fs::read_dir(path).map_err(|e| ThemeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut themes = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ThemeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let candidate = entry.path();
        if !candidate.is_dir() {
            continue;
        }
        match Theme::from_dir(&candidate) {
            Ok(theme) => {
                debug!(
                    identifier = theme.identifier(),
                    dir = %candidate.display(),
                    "discovered theme"
                );
                themes.push(theme);
            }
            Err(err) => {
                warn!(dir = %candidate.display(), error = %err, "skipping directory, not a loadable theme");
            }
        }
    }

    themes.sort_by(|a, b| a.identifier().cmp(b.identifier()));
    Ok(themes)
}

/// A source of themes, run on every registry refresh.
pub trait ThemeLoader: Send + Sync {
    /// Short human-readable description of the source, used in logging.
    fn describe(&self) -> String;

    /// Discovers the themes this source currently provides.
    fn load(&self) -> Result<Vec<Theme>>;
}

/// Loads themes packaged with the application, from `<app_root>/themes/`.
///
/// A missing `themes/` directory yields an empty set: an application
/// without packaged themes is a normal configuration.
#[derive(Debug, Clone)]
pub struct PackagedThemesLoader {
    themes_dir: PathBuf,
}

impl PackagedThemesLoader {
    /// Creates a loader for the application rooted at `app_root`.
    pub fn new<P: AsRef<Path>>(app_root: P) -> Self {
        Self {
            themes_dir: app_root.as_ref().join("themes"),
        }
    }
}

impl ThemeLoader for PackagedThemesLoader {
    fn describe(&self) -> String {
        format!("packaged themes in {}", self.themes_dir.display())
    }

    fn load(&self) -> Result<Vec<Theme>> {
        if !self.themes_dir.is_dir() {
            return Ok(Vec::new());
        }
        load_themes_from(&self.themes_dir)
    }
}

/// Loads themes from a list of configured search paths, in order.
///
/// Missing paths are skipped with a warning rather than failing the whole
/// refresh; a stale entry in a config file should not take the application
/// down.
#[derive(Debug, Clone)]
pub struct ThemePathsLoader {
    paths: Vec<PathBuf>,
}

impl ThemePathsLoader {
    /// Creates a loader over the given search paths.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl ThemeLoader for ThemePathsLoader {
    fn describe(&self) -> String {
        format!("{} configured theme path(s)", self.paths.len())
    }

    fn load(&self) -> Result<Vec<Theme>> {
        let mut themes = Vec::new();
        for path in &self.paths {
            if !path.is_dir() {
                warn!(path = %path.display(), "configured theme path does not exist");
                continue;
            }
            themes.extend(load_themes_from(path)?);
        }
        Ok(themes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_theme(root: &Path, dir: &str, identifier: &str, name: &str) {
        let theme_dir = root.join(dir);
        fs::create_dir_all(&theme_dir).unwrap();
        fs::write(
            theme_dir.join("info.json"),
            format!(
                r#"{{"application": "*", "identifier": "{}", "name": "{}"}}"#,
                identifier, name
            ),
        )
        .unwrap();
    }

    #[test]
    fn test_load_themes_from_sorted() {
        let tmp = TempDir::new().unwrap();
        write_theme(tmp.path(), "linen", "linen", "Linen");
        write_theme(tmp.path(), "aurora", "aurora", "Aurora");
        write_theme(tmp.path(), "umbra", "umbra", "Umbra");

        let themes = load_themes_from(tmp.path()).unwrap();
        let identifiers: Vec<&str> = themes.iter().map(|t| t.identifier()).collect();
        assert_eq!(identifiers, ["aurora", "linen", "umbra"]);
    }

    #[test]
    fn test_load_themes_from_skips_broken_dirs() {
        let tmp = TempDir::new().unwrap();
        write_theme(tmp.path(), "aurora", "aurora", "Aurora");
        fs::create_dir_all(tmp.path().join("not-a-theme")).unwrap();
        fs::write(tmp.path().join("stray-file.txt"), "ignored").unwrap();
        let broken = tmp.path().join("broken");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join("info.json"), "{malformed").unwrap();

        let themes = load_themes_from(tmp.path()).unwrap();
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].identifier(), "aurora");
    }

    #[test]
    fn test_load_themes_from_missing_root() {
        let result = load_themes_from("/nonexistent/search/path");
        assert!(matches!(result, Err(ThemeError::Io { .. })));
    }

    #[test]
    fn test_packaged_loader() {
        let tmp = TempDir::new().unwrap();
        let themes_dir = tmp.path().join("themes");
        write_theme(&themes_dir, "aurora", "aurora", "Aurora");

        let loader = PackagedThemesLoader::new(tmp.path());
        let themes = loader.load().unwrap();
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].identifier(), "aurora");
    }

    #[test]
    fn test_packaged_loader_without_themes_dir() {
        let tmp = TempDir::new().unwrap();
        let loader = PackagedThemesLoader::new(tmp.path());
        assert!(loader.load().unwrap().is_empty());
    }

    #[test]
    fn test_theme_paths_loader_concatenates_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_theme(first.path(), "aurora", "aurora", "Aurora");
        write_theme(second.path(), "linen", "linen", "Linen");

        let loader = ThemePathsLoader::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        let themes = loader.load().unwrap();
        let identifiers: Vec<&str> = themes.iter().map(|t| t.identifier()).collect();
        assert_eq!(identifiers, ["aurora", "linen"]);
    }

    #[test]
    fn test_theme_paths_loader_skips_missing_path() {
        let present = TempDir::new().unwrap();
        write_theme(present.path(), "aurora", "aurora", "Aurora");

        let loader = ThemePathsLoader::new(vec![
            PathBuf::from("/nonexistent/theme/path"),
            present.path().to_path_buf(),
        ]);
        let themes = loader.load().unwrap();
        assert_eq!(themes.len(), 1);
    }
}
