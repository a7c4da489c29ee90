//! A small gallery application themed with livery.
//!
//! Ships two packaged themes (`aurora` and `linen`). `/` renders the
//! application's own template, `/t/{identifier}` renders the same page
//! through a theme, and `/themes` lists the registry.
//!
//! ```text
//! RUST_LOG=livery=debug cargo run -p gallery-example
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use livery::{ThemeError, Themes, ThemesConfig};

#[derive(Serialize)]
struct PageContext {
    title: &'static str,
    items: Vec<&'static str>,
}

fn page_context() -> PageContext {
    PageContext {
        title: "Print Gallery",
        items: vec!["Dunes at Noon", "Harbor Lights", "Winter Orchard"],
    }
}

#[derive(Serialize)]
struct ThemeSummary {
    identifier: String,
    name: String,
    author: Option<String>,
}

async fn index(State(themes): State<Arc<Themes>>) -> Result<Html<String>, AppError> {
    Ok(Html(themes.render("index.html", page_context())?))
}

async fn themed(
    State(themes): State<Arc<Themes>>,
    Path(identifier): Path<String>,
) -> Result<Html<String>, AppError> {
    Ok(Html(themes.render_theme(
        &identifier,
        "index.html",
        page_context(),
    )?))
}

async fn list_themes(State(themes): State<Arc<Themes>>) -> Json<Vec<ThemeSummary>> {
    let summaries = themes
        .themes_list()
        .iter()
        .map(|theme| ThemeSummary {
            identifier: theme.identifier().to_string(),
            name: theme.name().to_string(),
            author: theme.info().author.clone(),
        })
        .collect();
    Json(summaries)
}

struct AppError(ThemeError);

impl From<ThemeError> for AppError {
    fn from(err: ThemeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.0 {
            ThemeError::UnknownTheme { identifier } => (
                StatusCode::NOT_FOUND,
                format!("no such theme: {}", identifier),
            )
                .into_response(),
            err => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let themes = Arc::new(Themes::new(
        ThemesConfig::new("gallery").with_app_root(env!("CARGO_MANIFEST_DIR")),
    )?);
    info!(themes = themes.themes_list().len(), "theme registry ready");

    let app = Router::new()
        .route("/", get(index))
        .route("/t/{identifier}", get(themed))
        .route("/themes", get(list_themes))
        .with_state(Arc::clone(&themes))
        .merge(livery_axum::static_router(themes));

    let addr: SocketAddr = ([127, 0, 0, 1], 3000).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "serving the gallery");
    axum::serve(listener, app).await?;
    Ok(())
}
