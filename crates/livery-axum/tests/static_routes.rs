//! Drives the static-asset router with in-memory requests and checks the
//! responses end to end: URL construction, content types, and the guard
//! paths (unknown theme, missing file, traversal attempts).

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use livery::{Themes, ThemesConfig};
use livery_axum::static_router;

const STYLE: &str = "body { background: #2b1b3d; }\n";

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn app() -> (tempfile::TempDir, Arc<Themes>, Router) {
    let tmp = tempfile::TempDir::new().unwrap();
    write(
        &tmp.path().join("themes/aurora/info.json"),
        r#"{"application": "*", "identifier": "aurora", "name": "Aurora"}"#,
    );
    write(&tmp.path().join("themes/aurora/static/style.css"), STYLE);
    write(
        &tmp.path().join("themes/aurora/static/img/logo.svg"),
        "<svg xmlns=\"http://www.w3.org/2000/svg\"/>\n",
    );
    // A file inside the theme but outside its static root must stay
    // unreachable.
    write(&tmp.path().join("themes/aurora/info-backup.json"), "{}");

    let themes = Arc::new(
        Themes::new(ThemesConfig::new("gallery").with_app_root(tmp.path())).unwrap(),
    );
    let router = static_router(Arc::clone(&themes));
    (tmp, themes, router)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn test_serves_theme_asset() {
    let (_tmp, _themes, router) = app();

    let (status, content_type, body) = get(&router, "/_themes/aurora/style.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/css"));
    assert_eq!(body, STYLE);
}

#[tokio::test]
async fn test_serves_nested_asset() {
    let (_tmp, _themes, router) = app();

    let (status, content_type, _) = get(&router, "/_themes/aurora/img/logo.svg").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
}

#[tokio::test]
async fn test_static_url_round_trip() {
    let (_tmp, themes, router) = app();

    // The URL the helper builds is the URL the router serves.
    let url = themes.static_url("aurora", "style.css");
    let (status, _, body) = get(&router, &url).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, STYLE);
}

#[tokio::test]
async fn test_unknown_theme_is_404() {
    let (_tmp, _themes, router) = app();

    let (status, _, _) = get(&router, "/_themes/umbra/style.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_asset_is_404() {
    let (_tmp, _themes, router) = app();

    let (status, _, _) = get(&router, "/_themes/aurora/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_traversal_is_404() {
    let (_tmp, _themes, router) = app();

    let (status, _, _) = get(&router, "/_themes/aurora/../info-backup.json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_custom_static_prefix() {
    let tmp = tempfile::TempDir::new().unwrap();
    write(
        &tmp.path().join("themes/aurora/info.json"),
        r#"{"application": "*", "identifier": "aurora", "name": "Aurora"}"#,
    );
    write(&tmp.path().join("themes/aurora/static/style.css"), STYLE);

    let themes = Arc::new(
        Themes::new(
            ThemesConfig::new("gallery")
                .with_app_root(tmp.path())
                .with_static_prefix("/skins"),
        )
        .unwrap(),
    );
    let router = static_router(Arc::clone(&themes));

    assert_eq!(themes.static_url("aurora", "style.css"), "/skins/aurora/style.css");
    let (status, _, body) = get(&router, "/skins/aurora/style.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, STYLE);
}
