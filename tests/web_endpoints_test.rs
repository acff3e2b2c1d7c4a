mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{StubSource, Window};
use http_body_util::BodyExt;
use std::sync::Arc;
use stromvarsler::config::Config;
use stromvarsler::prices::PriceView;
use stromvarsler::web::{AppState, WELCOME_TEXT, build_router};
use tower::ServiceExt;

fn router(window: Window) -> axum::Router {
    let mut config = Config::default();
    config.provider.include_tomorrow = false;
    build_router(AppState::new(
        config,
        Arc::new(StubSource::every_day(window)),
    ))
}

async fn get(router: axum::Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, body.to_vec())
}

#[tokio::test]
async fn root_returns_welcome_text() {
    let (status, _, body) = get(router(Window::Missing), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), WELCOME_TEXT);
}

#[tokio::test]
async fn health_ok() {
    let (status, _, body) = get(router(Window::Missing), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn prices_returns_hourly_json() {
    let (status, content_type, body) =
        get(router(Window::Prices(vec![1000.0; 24])), "/prices").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("application/json"));

    let views: Vec<PriceView> = serde_json::from_slice(&body).unwrap();
    assert_eq!(views.len(), 24);
    assert_eq!(views[0].time, "00:00");
    assert_eq!(views[0].raw_price, 1.0);
    assert_eq!(views[0].adjusted_price, 0.9438);
    assert_eq!(views[0].raw_price_mva, 1.25);
    assert_eq!(views[0].adjusted_mva, 1.1797);
}

#[tokio::test]
async fn prices_without_data_is_404() {
    let (status, _, body) = get(router(Window::Missing), "/prices").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("NO1"));
}

#[tokio::test]
async fn prices_with_timing_out_upstream_is_500() {
    let (status, _, body) = get(
        router(Window::Fail("request timed out".to_string())),
        "/prices",
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn price_graph_returns_png() {
    let (status, content_type, body) =
        get(router(Window::Prices(vec![300.0; 24])), "/price_graph").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert!(body.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[tokio::test]
async fn price_graph_errors_map_like_prices() {
    let (status, _, _) = get(router(Window::Missing), "/price_graph").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = get(router(Window::Fail("boom".to_string())), "/price_graph").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
