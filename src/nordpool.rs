//! Day-ahead price retrieval from Nord Pool
//!
//! Fetches today's window and, once published, tomorrow's, then merges them
//! into a single payload ordered by start time.

pub mod client;
pub mod types;

pub use client::NordpoolClient;
pub use types::{AreaPrices, DayAheadResponse, MultiAreaEntry, ProviderPayload, RawPrice};

use crate::config::Config;
use crate::error::{Result, StromError};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};

/// Anything that can deliver one delivery day of prices for an area
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_day(&self, area: &str, date: NaiveDate) -> Result<ProviderPayload>;
}

/// Delivery dates to request: today, plus tomorrow when enabled
pub fn delivery_dates(today: NaiveDate, include_tomorrow: bool) -> Vec<NaiveDate> {
    let mut dates = vec![today];
    if include_tomorrow && let Some(next) = today.succ_opt() {
        dates.push(next);
    }
    dates
}

/// Current calendar date in the configured timezone
pub fn local_today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Fetch and merge the price windows for `config.area`.
///
/// A window without data (tomorrow before publication) is skipped. Transport
/// failures on any window propagate. If no window carries the area the result
/// is [`StromError::DataUnavailable`].
pub async fn fetch_prices(
    source: &dyn PriceSource,
    config: &Config,
    today: NaiveDate,
) -> Result<ProviderPayload> {
    let area = config.area.as_str();
    let mut merged = ProviderPayload::default();

    for date in delivery_dates(today, config.provider.include_tomorrow) {
        let payload = source.fetch_day(area, date).await?;
        if payload.has_area(area) {
            merged = merged.merge(payload);
        } else {
            debug!("No {} prices for {}", area, date);
        }
    }

    if !merged.has_area(area) {
        return Err(StromError::data_unavailable(
            area.to_string(),
            format!("no entries from {}", today),
        ));
    }

    info!(
        "Fetched {} hourly prices for {}",
        merged.area(area).map_or(0, |a| a.values.len()),
        area
    );
    Ok(merged)
}
