//! # Livery Axum - Theme Asset Routes
//!
//! Serves the static assets of every registered theme under the
//! configured URL prefix, so that URLs built by
//! [`Themes::static_url`](livery::Themes::static_url) and the
//! `theme_static()` template global resolve.
//!
//! [`static_router`] returns a self-contained [`Router`] mounted at the
//! prefix from [`ThemesConfig`](livery::ThemesConfig); merge it into the
//! host application:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum::Router;
//! use livery::{Themes, ThemesConfig};
//!
//! # fn main() -> livery::Result<()> {
//! let themes = Arc::new(Themes::new(ThemesConfig::new("gallery"))?);
//!
//! let app: Router = Router::new()
//!     // ... application routes ...
//!     .merge(livery_axum::static_router(themes));
//! # Ok(())
//! # }
//! ```
//!
//! Requests name a theme and a path inside its `static/` root:
//! `GET /_themes/aurora/css/site.css`. Unknown themes and paths that try
//! to escape the asset root produce 404; actual file serving (content
//! type, HEAD, ranges) is delegated to tower-http.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{debug, error};

use livery::{paths, Themes};

/// Builds the router serving every registered theme's static assets,
/// mounted at the configured static prefix.
pub fn static_router(themes: Arc<Themes>) -> Router {
    let prefix = themes.config().static_prefix().to_string();
    let routes = Router::new()
        .route("/{identifier}/{*path}", get(serve_theme_asset))
        .with_state(themes);
    Router::new().nest(&prefix, routes)
}

async fn serve_theme_asset(
    State(themes): State<Arc<Themes>>,
    Path((identifier, asset_path)): Path<(String, String)>,
    request: Request,
) -> Response {
    let theme = match themes.theme(&identifier) {
        Ok(theme) => theme,
        Err(_) => {
            debug!(identifier, "static asset request for unknown theme");
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    let full_path = match paths::resolve_within(theme.static_path(), &asset_path) {
        Some(path) => path,
        None => {
            debug!(identifier, path = asset_path, "rejected theme asset path");
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    match ServeFile::new(full_path).oneshot(request).await {
        Ok(response) => response.map(Body::new).into_response(),
        Err(err) => {
            error!(identifier, error = %err, "failed to serve theme asset");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
