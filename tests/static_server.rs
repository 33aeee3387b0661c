use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use locale_tool::config::ServerConfig;
use locale_tool::server::{build_router, AssetServer, ServerError};
use tower::ServiceExt;

const INDEX: &str = "<!DOCTYPE html><title>Korean Locale Tool</title>";

fn assets() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), INDEX).unwrap();
    std::fs::create_dir(dir.path().join("static")).unwrap();
    std::fs::write(dir.path().join("static").join("app.js"), "console.log('hi');").unwrap();
    dir
}

async fn get(dir: &std::path::Path, uri: &str) -> (StatusCode, String) {
    let app = build_router(dir, "index.html");
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[tokio::test]
async fn existing_file_is_served() {
    let dir = assets();
    let (status, body) = get(dir.path(), "/static/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "console.log('hi');");
}

#[tokio::test]
async fn root_serves_index() {
    let dir = assets();
    let (status, body) = get(dir.path(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, INDEX);
}

#[tokio::test]
async fn unknown_route_falls_back_to_index() {
    let dir = assets();
    let (status, body) = get(dir.path(), "/translate/history/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, INDEX);
}

#[tokio::test]
async fn missing_assets_dir_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        bind_host: "127.0.0.1".to_string(),
        port: 0,
        assets_dir: dir.path().join("missing"),
        ..ServerConfig::default()
    };
    let server = AssetServer::new(&config).unwrap();
    let err = server.run().await.unwrap_err();
    assert!(matches!(err, ServerError::MissingAssets(_)));
}

#[test]
fn invalid_bind_host_is_rejected() {
    let config = ServerConfig {
        bind_host: "not a host".to_string(),
        ..ServerConfig::default()
    };
    assert!(matches!(
        AssetServer::new(&config),
        Err(ServerError::InvalidAddress { .. })
    ));
}

#[tokio::test]
async fn server_stops_on_shutdown_signal() {
    let dir = assets();
    let config = ServerConfig {
        bind_host: "127.0.0.1".to_string(),
        port: 0,
        assets_dir: dir.path().to_path_buf(),
        ..ServerConfig::default()
    };
    let server = AssetServer::new(&config).unwrap();
    let shutdown = server.shutdown_handle();

    let running = tokio::spawn(async move { server.run().await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    shutdown.signal_shutdown();

    let result = tokio::time::timeout(Duration::from_secs(2), running).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));
}
