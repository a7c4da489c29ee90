//! The theme registry: one live mapping from identifier to theme.
//!
//! A [`ThemeManager`] owns a chain of [`ThemeLoader`]s and a mapping of
//! registered themes. [`refresh`](ThemeManager::refresh) rebuilds the
//! mapping from scratch by running every loader in order; nothing is
//! mutated incrementally, so a refresh either fully succeeds or leaves the
//! previous registry in place.
//!
//! Registration rules:
//!
//! - Themes whose `application` binding matches neither `"*"` nor the
//!   manager's application identifier are rejected.
//! - When two sources provide the same identifier, the later loader wins.
//!   The default chain runs packaged themes first and configured search
//!   paths second, so deployment-provided themes override shipped ones.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use tracing::{debug, info};

use crate::error::Result;
use crate::loader::ThemeLoader;
use crate::theme::Theme;

type Registry = BTreeMap<String, Arc<Theme>>;

/// The live theme registry for one application instance.
pub struct ThemeManager {
    app_identifier: String,
    loaders: Vec<Box<dyn ThemeLoader>>,
    themes: RwLock<Registry>,
}

impl ThemeManager {
    /// Creates a manager with an empty registry.
    ///
    /// Call [`refresh`](Self::refresh) to populate it.
    pub fn new(app_identifier: impl Into<String>, loaders: Vec<Box<dyn ThemeLoader>>) -> Self {
        Self {
            app_identifier: app_identifier.into(),
            loaders,
            themes: RwLock::new(Registry::new()),
        }
    }

    /// The application identifier themes must be bound to (or `"*"`).
    pub fn app_identifier(&self) -> &str {
        &self.app_identifier
    }

    /// Rebuilds the registry by running every loader in order.
    ///
    /// # Errors
    ///
    /// Propagates the first loader failure; the previously registered
    /// themes stay in place in that case.
    pub fn refresh(&self) -> Result<()> {
        let mut next = Registry::new();
        for loader in &self.loaders {
            for theme in loader.load()? {
                if !theme.matches_application(&self.app_identifier) {
                    debug!(
                        identifier = theme.identifier(),
                        application = theme.application(),
                        "theme is bound to another application, not registering"
                    );
                    continue;
                }
                let identifier = theme.identifier().to_string();
                if let Some(replaced) = next.insert(identifier, Arc::new(theme)) {
                    debug!(
                        identifier = replaced.identifier(),
                        source = %loader.describe(),
                        "theme overridden by a later source"
                    );
                }
            }
        }
        info!(count = next.len(), "theme registry refreshed");
        *self.write_guard() = next;
        Ok(())
    }

    /// Looks up a theme by identifier.
    pub fn get(&self, identifier: &str) -> Option<Arc<Theme>> {
        self.read_guard().get(identifier).cloned()
    }

    /// All registered themes, sorted by identifier.
    pub fn list(&self) -> Vec<Arc<Theme>> {
        self.read_guard().values().cloned().collect()
    }

    /// All registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        self.read_guard().keys().cloned().collect()
    }

    /// Number of registered themes.
    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    /// True when no theme is registered.
    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Registry> {
        self.themes.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, Registry> {
        self.themes.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for ThemeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeManager")
            .field("app_identifier", &self.app_identifier)
            .field("loaders", &self.loaders.len())
            .field("themes", &self.identifiers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::ThemePathsLoader;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_theme(root: &Path, dir: &str, application: &str, identifier: &str, name: &str) {
        let theme_dir = root.join(dir);
        fs::create_dir_all(&theme_dir).unwrap();
        fs::write(
            theme_dir.join("info.json"),
            format!(
                r#"{{"application": "{}", "identifier": "{}", "name": "{}"}}"#,
                application, identifier, name
            ),
        )
        .unwrap();
    }

    fn path_loader(dir: &TempDir) -> Box<dyn ThemeLoader> {
        Box::new(ThemePathsLoader::new(vec![dir.path().to_path_buf()]))
    }

    #[test]
    fn test_refresh_registers_matching_themes() {
        let tmp = TempDir::new().unwrap();
        write_theme(tmp.path(), "aurora", "gallery", "aurora", "Aurora");
        write_theme(tmp.path(), "linen", "*", "linen", "Linen");
        write_theme(tmp.path(), "elsewhere", "other-app", "elsewhere", "Elsewhere");

        let manager = ThemeManager::new("gallery", vec![path_loader(&tmp)]);
        assert!(manager.is_empty());

        manager.refresh().unwrap();
        assert_eq!(manager.identifiers(), ["aurora", "linen"]);
        assert!(manager.get("elsewhere").is_none());
    }

    #[test]
    fn test_later_loader_wins() {
        let shipped = TempDir::new().unwrap();
        let configured = TempDir::new().unwrap();
        write_theme(shipped.path(), "aurora", "*", "aurora", "Aurora v1");
        write_theme(configured.path(), "aurora", "*", "aurora", "Aurora v2");

        let manager = ThemeManager::new(
            "gallery",
            vec![path_loader(&shipped), path_loader(&configured)],
        );
        manager.refresh().unwrap();

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.get("aurora").unwrap().name(), "Aurora v2");
    }

    #[test]
    fn test_list_sorted_by_identifier() {
        let tmp = TempDir::new().unwrap();
        write_theme(tmp.path(), "umbra", "*", "umbra", "Umbra");
        write_theme(tmp.path(), "aurora", "*", "aurora", "Aurora");

        let manager = ThemeManager::new("gallery", vec![path_loader(&tmp)]);
        manager.refresh().unwrap();

        let themes = manager.list();
        let identifiers: Vec<&str> = themes.iter().map(|t| t.identifier()).collect();
        assert_eq!(identifiers, ["aurora", "umbra"]);
    }

    #[test]
    fn test_refresh_replaces_previous_registry() {
        let tmp = TempDir::new().unwrap();
        write_theme(tmp.path(), "aurora", "*", "aurora", "Aurora");

        let manager = ThemeManager::new("gallery", vec![path_loader(&tmp)]);
        manager.refresh().unwrap();
        assert_eq!(manager.len(), 1);

        fs::remove_dir_all(tmp.path().join("aurora")).unwrap();
        write_theme(tmp.path(), "linen", "*", "linen", "Linen");

        manager.refresh().unwrap();
        assert_eq!(manager.identifiers(), ["linen"]);
    }

    #[test]
    fn test_empty_loader_chain() {
        let manager = ThemeManager::new("gallery", Vec::new());
        manager.refresh().unwrap();
        assert!(manager.is_empty());
        assert!(manager.list().is_empty());
    }
}
