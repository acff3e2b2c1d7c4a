use crate::config::ProviderConfig;
use crate::error::{Result, StromError};
use crate::logging::{LogContext, StructuredLogger, get_logger_with_context};
use crate::nordpool::PriceSource;
use crate::nordpool::types::{DayAheadResponse, ProviderPayload};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, USER_AGENT};
use std::time::Duration;

/// HTTP client for the Nord Pool data portal
pub struct NordpoolClient {
    http: reqwest::Client,
    base_url: String,
    currency: String,
    logger: StructuredLogger,
}

impl NordpoolClient {
    /// Create a client with the configured timeout
    pub fn new(cfg: &ProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.clone(),
            currency: cfg.currency.clone(),
            logger: get_logger_with_context(
                LogContext::new("nordpool").with_currency(&cfg.currency),
            ),
        })
    }
}

#[async_trait]
impl PriceSource for NordpoolClient {
    async fn fetch_day(&self, area: &str, date: NaiveDate) -> Result<ProviderPayload> {
        let date_param = date.format("%Y-%m-%d").to_string();
        let logger = self.logger.for_day(date);
        logger.debug(&format!("Requesting day-ahead prices for {}", area));

        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("date", date_param.as_str()),
                ("market", "DayAhead"),
                ("deliveryArea", area),
                ("currency", self.currency.as_str()),
            ])
            .header(ACCEPT, "application/json")
            .header(
                USER_AGENT,
                concat!("stromvarsler/", env!("CARGO_PKG_VERSION")),
            )
            .send()
            .await?;

        let status = resp.status();
        // Prices for the date are not published yet
        if status == StatusCode::NO_CONTENT {
            logger.info(&format!("No prices published for {}", area));
            return Ok(ProviderPayload::default());
        }
        if !status.is_success() {
            logger.error(&format!("Nord Pool API error: {}", status));
            return Err(StromError::transport(format!(
                "provider returned {} for {} {}",
                status, area, date_param
            )));
        }

        let body = resp.bytes().await?;
        let parsed: DayAheadResponse = serde_json::from_slice(&body).map_err(|e| {
            StromError::transport(format!("malformed provider payload: {}", e))
        })?;

        let payload = parsed.into_payload();
        logger.debug(&format!(
            "Received {} hourly prices for {}",
            payload.area(area).map_or(0, |a| a.values.len()),
            area
        ));
        Ok(payload)
    }
}
