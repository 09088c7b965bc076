mod common;

use anyhow::Result;
use axum::http::{HeaderName, HeaderValue, Method, header};
use common::offline_server;
use nova_config::TokenMode;
use serde_json::json;

#[tokio::test]
async fn root_reports_service_status() -> Result<()> {
    let server = offline_server(TokenMode::Mock).await?;

    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "status": "ok",
        "message": "NOVA Backend API",
        "version": env!("CARGO_PKG_VERSION"),
    }));
    Ok(())
}

#[tokio::test]
async fn cors_allows_only_configured_origins() -> Result<()> {
    let server = offline_server(TokenMode::Mock).await?;
    let origin = header::ORIGIN;
    let request_method = HeaderName::from_static("access-control-request-method");

    let allowed = server
        .method(Method::OPTIONS, "/api/auth/login")
        .add_header(origin.clone(), HeaderValue::from_static("http://localhost:5173"))
        .add_header(request_method.clone(), HeaderValue::from_static("POST"))
        .await;
    assert_eq!(
        allowed
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );

    let denied = server
        .method(Method::OPTIONS, "/api/auth/login")
        .add_header(origin, HeaderValue::from_static("https://evil.test"))
        .add_header(request_method, HeaderValue::from_static("POST"))
        .await;
    assert!(
        denied
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
    Ok(())
}
