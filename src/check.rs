//! One fetch, classify, render and notify pass

use crate::chart::render_price_chart;
use crate::classify::alert_lines;
use crate::config::Config;
use crate::error::Result;
use crate::logging::{LogContext, get_logger_with_context};
use crate::nordpool::{PriceSource, fetch_prices};
use crate::prices::{PriceRecord, parse_prices};
use crate::pushover::Notifier;
use crate::tariff::Tariff;
use chrono::NaiveDate;

/// What a check pass ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Provider had no prices for the area
    NoData,
    /// Prices found but no hour crossed a threshold
    Quiet,
    /// Alert lines were handed to the notifier
    Alerted { lines: Vec<String> },
    /// Fetch or setup failed; message already logged
    Failed(String),
}

/// Run one pass for `today` (a date in the configured timezone).
///
/// Never returns an error: each failure kind ends in a log line and an outcome.
pub async fn run_check(
    config: &Config,
    source: &dyn PriceSource,
    notifier: &dyn Notifier,
    today: NaiveDate,
) -> CheckOutcome {
    let logger = get_logger_with_context(LogContext::new("check").with_area(&config.area));

    let records = match load_records(config, source, today).await {
        Ok(records) => records,
        Err(e) if e.is_data_unavailable() => {
            logger.warn(&format!("No price data: {}", e));
            return CheckOutcome::NoData;
        }
        Err(e) => {
            logger.error(&format!("Price check failed: {}", e));
            return CheckOutcome::Failed(e.to_string());
        }
    };

    if records.is_empty() {
        logger.warn("No price data found");
        return CheckOutcome::NoData;
    }

    let currency = config.provider.currency.as_str();
    let lines = alert_lines(&records, &config.thresholds, currency);
    let needs_chart = !lines.is_empty() || config.chart.save_path.is_some();
    let chart = if needs_chart {
        match render_price_chart(
            &records,
            &config.area,
            &config.thresholds,
            &config.chart,
            currency,
        ) {
            Ok(png) => Some(png),
            Err(e) => {
                logger.error(&format!("Chart rendering failed: {}", e));
                None
            }
        }
    } else {
        None
    };

    if let (Some(path), Some(png)) = (config.chart.save_path.as_deref(), chart.as_deref()) {
        match tokio::fs::write(path, png).await {
            Ok(()) => logger.debug(&format!("Chart written to {}", path)),
            Err(e) => logger.error(&format!("Could not write chart to {}: {}", path, e)),
        }
    }

    if lines.is_empty() {
        logger.info(&format!(
            "{} hours checked, no thresholds crossed",
            records.len()
        ));
        return CheckOutcome::Quiet;
    }

    let message = lines.join("\n");
    logger.info(&format!("{} alert(s):\n{}", lines.len(), message));
    let attachment = chart.as_deref().filter(|_| config.pushover.attach_chart);
    notifier.notify(&message, attachment).await;

    CheckOutcome::Alerted { lines }
}

async fn load_records(
    config: &Config,
    source: &dyn PriceSource,
    today: NaiveDate,
) -> Result<Vec<PriceRecord>> {
    let tz = config.tz()?;
    let payload = fetch_prices(source, config, today).await?;
    let tariff = Tariff::from(&config.tariff);
    Ok(parse_prices(&payload, &config.area, &tariff, tz))
}
