//! # Livery - Theme Support for Web Applications
//!
//! `livery` lets a web application ship and discover *themes*: directories
//! bundling a metadata descriptor, templates, and static assets. Themes are
//! collected into a registry keyed by identifier, and rendering helpers
//! resolve templates through a theme with fallback to the application's own
//! templates.
//!
//! The template engine is MiniJinja; theme templates live in a
//! `_themes/<identifier>/...` namespace chained in front of the
//! application's template directory. Static-asset URLs are built with the
//! same scheme the companion `livery-axum` crate serves them under.
//!
//! ## Core Concepts
//!
//! - [`Theme`]: one discovered theme directory (descriptor + paths)
//! - [`ThemeManager`]: the registry, rebuilt by running a loader chain
//! - [`ThemeLoader`]: a pluggable discovery source
//! - [`Themes`]: the facade the application keeps: registry + environment
//!   + render/URL helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use livery::{Themes, ThemesConfig};
//!
//! # fn main() -> livery::Result<()> {
//! let themes = Themes::new(
//!     ThemesConfig::new("gallery")
//!         .with_app_root("/srv/gallery")
//!         .with_theme_path("/etc/gallery/themes"),
//! )?;
//!
//! // Render through a theme, falling back to the application template
//! // when the theme does not provide one.
//! let page = themes.render_theme("aurora", "index.html", ())?;
//!
//! // url_for-style static asset URL.
//! assert_eq!(
//!     themes.static_url("aurora", "style.css"),
//!     "/_themes/aurora/style.css",
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Inside templates
//!
//! Two globals are available wherever a render is scoped to a theme
//! (rendered through [`Themes::render_theme`] or included under a
//! `_themes/...` name):
//!
//! ```text
//! {% include theme("banner.html") %}
//! <link rel="stylesheet" href="{{ theme_static('style.css') }}">
//! ```
//!
//! `theme()` resolves to the theme's own copy of a template when it has
//! one, and to the application's copy otherwise. `theme_static()` builds
//! the asset URL for the active theme. Using either outside any theme
//! context fails the render.

pub mod config;
mod engine;
pub mod error;
pub mod info;
pub mod loader;
pub mod manager;
pub mod paths;
pub mod setup;
pub mod theme;

pub use config::ThemesConfig;
pub use engine::THEME_TEMPLATE_PREFIX;
pub use error::{Result, ThemeError};
pub use info::ThemeInfo;
pub use loader::{load_themes_from, PackagedThemesLoader, ThemeLoader, ThemePathsLoader};
pub use manager::ThemeManager;
pub use setup::Themes;
pub use theme::{Theme, THEME_INFO_FILENAME, THEME_LICENSE_FILENAME};
