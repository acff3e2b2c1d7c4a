//! Axum-based HTTP surface for current prices and the price chart

use crate::chart::render_price_chart;
use crate::config::Config;
use crate::error::{Result, StromError};
use crate::nordpool::{PriceSource, fetch_prices, local_today};
use crate::prices::{PriceRecord, parse_prices, price_views};
use crate::tariff::Tariff;
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const WELCOME_TEXT: &str =
    "Welcome to the Strømvarsler price API. Use /prices for price data and /price_graph for a chart.";

/// Read-only state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn PriceSource>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn PriceSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
        }
    }
}

/// Map a pipeline error to its HTTP response
fn error_response(err: &StromError) -> Response {
    let status = if err.is_data_unavailable() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let logger = crate::logging::get_logger("web");
    if status.is_server_error() {
        logger.error(&format!("Request failed: {}", err));
    } else {
        logger.warn(&format!("Request without data: {}", err));
    }
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

/// Fetch and parse; an empty result is reported as missing data
async fn current_records(state: &AppState) -> Result<Vec<PriceRecord>> {
    let config = state.config.as_ref();
    let tz = config.tz()?;
    let payload = fetch_prices(state.source.as_ref(), config, local_today(tz)).await?;
    let records = parse_prices(&payload, &config.area, &Tariff::from(&config.tariff), tz);
    if records.is_empty() {
        return Err(StromError::data_unavailable(
            config.area.clone(),
            "no price entries".to_string(),
        ));
    }
    Ok(records)
}

pub async fn welcome() -> impl IntoResponse {
    WELCOME_TEXT
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn prices(State(state): State<AppState>) -> Response {
    match current_records(&state).await {
        Ok(records) => Json(price_views(&records)).into_response(),
        Err(e) => error_response(&e),
    }
}

pub async fn price_graph(State(state): State<AppState>) -> Response {
    let config = state.config.as_ref();
    let rendered = current_records(&state).await.and_then(|records| {
        render_price_chart(
            &records,
            &config.area,
            &config.thresholds,
            &config.chart,
            &config.provider.currency,
        )
    });
    match rendered {
        Ok(png) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Err(e) => error_response(&e),
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/prices", get(prices))
        .route("/price_graph", get(price_graph))
        .route("/api/health", get(health))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let router = build_router(state);

    let logger = crate::logging::get_logger("web");
    logger.info(&format!(
        "Starting web server; requested host={}, port={}",
        host, port
    ));

    let (addr, parsed_ok): (SocketAddr, bool) = match host.parse::<IpAddr>() {
        Ok(ip) => (SocketAddr::new(ip, port), true),
        Err(_) => (([127, 0, 0, 1], port).into(), false),
    };
    if !parsed_ok {
        logger.warn(&format!("Invalid host '{}'; falling back to 127.0.0.1", host));
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| StromError::web(format!("Failed to bind {}: {}", addr, e)))?;
    let local_addr = listener.local_addr()?;
    logger.info(&format!(
        "Web server listening at http://{}:{} (/prices, /price_graph)",
        local_addr.ip(),
        local_addr.port()
    ));

    axum::serve(listener, router).await?;
    Ok(())
}
