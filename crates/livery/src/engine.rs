//! MiniJinja environment assembly: loader chaining and theme globals.
//!
//! The environment resolves template names in two namespaces:
//!
//! - `_themes/<identifier>/<relpath>`: the template `<relpath>` inside the
//!   named theme's template root.
//! - anything else: the application's own template directory.
//!
//! Rendering through a theme sets the `_theme` context variable; templates
//! included under a `_themes/...` name carry the theme in their own name.
//! The two globals registered here, `theme()` and `theme_static()`, resolve
//! the active theme from either signal:
//!
//! ```text
//! {% include theme("banner.html") %}      themed include with app fallback
//! <link href="{{ theme_static('style.css') }}" rel="stylesheet">
//! ```
//!
//! Calling either global with no active theme is a usage error and fails
//! the render.

use std::path::PathBuf;
use std::sync::Arc;
use std::{fmt, fs};

use minijinja::value::Kwargs;
use minijinja::{Environment, ErrorKind, State};

use crate::config::ThemesConfig;
use crate::error::ThemeError;
use crate::manager::ThemeManager;
use crate::paths;

/// Namespace prefix under which theme templates are addressable.
pub const THEME_TEMPLATE_PREFIX: &str = "_themes/";

/// Builds the fully addressed name of a template inside a theme.
pub(crate) fn theme_template_name(identifier: &str, name: &str) -> String {
    format!("{}{}/{}", THEME_TEMPLATE_PREFIX, identifier, name)
}

/// Builds the template environment for one [`Themes`](crate::setup::Themes)
/// instance. The loader and the globals hold their own handles onto the
/// registry, so a refresh through the manager is visible without rebuilding
/// the environment.
pub(crate) fn build_environment(
    config: &ThemesConfig,
    manager: Arc<ThemeManager>,
) -> Environment<'static> {
    let mut env = Environment::new();

    let loader_config = config.clone();
    let loader_manager = Arc::clone(&manager);
    env.set_loader(move |name: &str| {
        resolve_template_source(&loader_config, &loader_manager, name)
    });

    let static_config = config.clone();
    env.add_function(
        "theme_static",
        move |state: &State, filename: String| -> Result<String, minijinja::Error> {
            let identifier = active_theme(state).map_err(into_template_error)?;
            Ok(static_config.static_url(&identifier, &filename))
        },
    );

    env.add_function(
        "theme",
        |state: &State, name: String, kwargs: Kwargs| -> Result<String, minijinja::Error> {
            let fallback = kwargs.get::<Option<bool>>("fallback")?.unwrap_or(true);
            kwargs.assert_all_used()?;
            let identifier = active_theme(state).map_err(into_template_error)?;
            let themed = theme_template_name(&identifier, &name);
            if !fallback || state.env().get_template(&themed).is_ok() {
                Ok(themed)
            } else {
                Ok(name)
            }
        },
    );

    env
}

/// Loader callback: maps a template name to its source text.
///
/// Unknown names resolve to `Ok(None)` so the engine reports them as
/// "template not found"; only a real read failure is surfaced as an error.
pub(crate) fn resolve_template_source(
    config: &ThemesConfig,
    manager: &ThemeManager,
    name: &str,
) -> Result<Option<String>, minijinja::Error> {
    let path = match template_path(config, manager, name) {
        Some(path) => path,
        None => return Ok(None),
    };
    if !path.is_file() {
        return Ok(None);
    }
    match fs::read_to_string(&path) {
        Ok(source) => Ok(Some(source)),
        Err(err) => Err(minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("failed to read template {}: {}", path.display(), err),
        )),
    }
}

fn template_path(config: &ThemesConfig, manager: &ThemeManager, name: &str) -> Option<PathBuf> {
    if let Some(rest) = name.strip_prefix(THEME_TEMPLATE_PREFIX) {
        let (identifier, relative) = rest.split_once('/')?;
        let theme = manager.get(identifier)?;
        paths::resolve_within(theme.templates_path(), relative)
    } else {
        paths::resolve_within(&config.template_dir(), name)
    }
}

/// Resolves the theme a template evaluation is scoped to.
///
/// The `_theme` context variable wins; otherwise the enclosing template's
/// own `_themes/<identifier>/...` name identifies it. Neither being
/// present means the helper was used outside any theme context.
pub(crate) fn active_theme(state: &State) -> Result<String, ThemeError> {
    if let Some(value) = state.lookup("_theme") {
        if let Some(identifier) = value.as_str() {
            return Ok(identifier.to_string());
        }
    }
    if let Some(rest) = state.name().strip_prefix(THEME_TEMPLATE_PREFIX) {
        if let Some((identifier, _)) = rest.split_once('/') {
            return Ok(identifier.to_string());
        }
    }
    Err(ThemeError::NoActiveTheme)
}

fn into_template_error(err: impl fmt::Display) -> minijinja::Error {
    minijinja::Error::new(ErrorKind::InvalidOperation, err.to_string())
}
