//! The `Themes` facade: wiring discovery, the registry and the template
//! environment into one handle the host application keeps around.

use std::sync::Arc;

use minijinja::value::Value;
use minijinja::{context, Environment};
use serde::Serialize;

use crate::config::ThemesConfig;
use crate::engine::{self, theme_template_name};
use crate::error::{Result, ThemeError};
use crate::loader::{PackagedThemesLoader, ThemeLoader, ThemePathsLoader};
use crate::manager::ThemeManager;
use crate::theme::Theme;

/// The installed theming extension for one application instance.
///
/// Owns the theme registry and the template environment, and exposes the
/// render and URL helpers. Host applications typically build one during
/// startup and share it behind an `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// use livery::{Themes, ThemesConfig};
///
/// let themes = Themes::new(
///     ThemesConfig::new("gallery").with_app_root("/srv/gallery"),
/// )?;
///
/// let page = themes.render_theme("aurora", "index.html", ())?;
/// let css = themes.static_url("aurora", "style.css");
/// ```
pub struct Themes {
    config: ThemesConfig,
    manager: Arc<ThemeManager>,
    env: Environment<'static>,
}

impl Themes {
    /// Builds the extension with the default loader chain: packaged themes
    /// from `<app_root>/themes/`, then the configured search paths (which
    /// therefore override packaged themes with the same identifier).
    ///
    /// Performs the initial registry refresh.
    pub fn new(config: ThemesConfig) -> Result<Self> {
        let loaders: Vec<Box<dyn ThemeLoader>> = vec![
            Box::new(PackagedThemesLoader::new(config.app_root())),
            Box::new(ThemePathsLoader::new(config.theme_paths().to_vec())),
        ];
        Self::with_loaders(config, loaders)
    }

    /// Builds the extension with a custom loader chain.
    pub fn with_loaders(config: ThemesConfig, loaders: Vec<Box<dyn ThemeLoader>>) -> Result<Self> {
        let manager = Arc::new(ThemeManager::new(config.app_identifier(), loaders));
        manager.refresh()?;
        let env = engine::build_environment(&config, Arc::clone(&manager));
        Ok(Self {
            config,
            manager,
            env,
        })
    }

    /// Re-runs discovery and drops cached templates so removals and
    /// renames take effect.
    pub fn refresh(&mut self) -> Result<()> {
        self.manager.refresh()?;
        self.env.clear_templates();
        Ok(())
    }

    /// The configuration this instance was built with.
    pub fn config(&self) -> &ThemesConfig {
        &self.config
    }

    /// The underlying registry.
    pub fn manager(&self) -> &ThemeManager {
        &self.manager
    }

    /// Looks up a theme by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnknownTheme`] when no such theme is
    /// registered.
    pub fn theme(&self, identifier: &str) -> Result<Arc<Theme>> {
        self.manager
            .get(identifier)
            .ok_or_else(|| ThemeError::UnknownTheme {
                identifier: identifier.to_string(),
            })
    }

    /// All registered themes, sorted by identifier.
    pub fn themes_list(&self) -> Vec<Arc<Theme>> {
        self.manager.list()
    }

    /// URL for a static asset inside a theme
    /// (`<static_prefix>/<identifier>/<filename>`).
    pub fn static_url(&self, identifier: &str, filename: &str) -> String {
        self.config.static_url(identifier, filename)
    }

    /// Renders an application template.
    ///
    /// Theme-namespaced names (`_themes/<id>/...`) work here too; no
    /// fallback or theme scoping is applied.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(Value::from_serialize(&ctx))?)
    }

    /// Renders a template through a theme.
    ///
    /// Resolves `_themes/<identifier>/<name>` first and falls back to the
    /// application template `name` when the theme does not provide it.
    /// Either way the render context carries `_theme = <identifier>`, so
    /// `theme_static()` and `theme()` resolve against this theme.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnknownTheme`] for an unregistered
    /// identifier, and [`ThemeError::Template`] for load or render
    /// failures.
    pub fn render_theme<S: Serialize>(
        &self,
        identifier: &str,
        name: &str,
        ctx: S,
    ) -> Result<String> {
        let theme = self.theme(identifier)?;

        let themed = theme_template_name(theme.identifier(), name);
        let template = match self.env.get_template(&themed) {
            Ok(template) => template,
            Err(err) if err.kind() == minijinja::ErrorKind::TemplateNotFound => {
                self.env.get_template(name)?
            }
            Err(err) => return Err(err.into()),
        };

        let ctx = context! { _theme => theme.identifier(), ..Value::from_serialize(&ctx) };
        Ok(template.render(ctx)?)
    }

    /// True when the loader can resolve `name` in either namespace.
    pub fn template_exists(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// The raw source text the loader would use for `name`.
    ///
    /// Tooling hook; rendering goes through [`render`](Self::render) and
    /// [`render_theme`](Self::render_theme).
    pub fn template_source(&self, name: &str) -> Result<String> {
        match engine::resolve_template_source(&self.config, &self.manager, name)? {
            Some(source) => Ok(source),
            None => Err(ThemeError::Template(minijinja::Error::new(
                minijinja::ErrorKind::TemplateNotFound,
                format!("template {:?} is not known", name),
            ))),
        }
    }

    /// The underlying template environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Mutable access to the template environment, for registering extra
    /// filters or functions.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl std::fmt::Debug for Themes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Themes")
            .field("app_identifier", &self.config.app_identifier())
            .field("themes", &self.manager.identifiers())
            .finish()
    }
}
