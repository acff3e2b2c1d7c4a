//! LOW / NORMAL / HIGH classification and alert text

use crate::config::ThresholdConfig;
use crate::prices::{PriceRecord, spans_multiple_days};
use serde::{Deserialize, Serialize};

/// Price level of one hour against the configured thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriceLevel {
    Low,
    Normal,
    High,
}

impl PriceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceLevel::Low => "LOW",
            PriceLevel::Normal => "NORMAL",
            PriceLevel::High => "HIGH",
        }
    }
}

impl std::fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a VAT-inclusive adjusted price; both boundaries are inclusive
pub fn classify_price(price: f64, thresholds: &ThresholdConfig) -> PriceLevel {
    if price <= thresholds.low {
        PriceLevel::Low
    } else if price >= thresholds.high {
        PriceLevel::High
    } else {
        PriceLevel::Normal
    }
}

pub fn classify(record: &PriceRecord, thresholds: &ThresholdConfig) -> PriceLevel {
    classify_price(record.adjusted_price_with_vat, thresholds)
}

/// One hour that crossed a threshold
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub level: PriceLevel,
    pub label: String,
    pub adjusted_price_with_vat: f64,
    pub raw_price_with_vat: f64,
}

impl Alert {
    /// Render as a notification line in the given currency
    pub fn line(&self, currency: &str) -> String {
        let icon = match self.level {
            PriceLevel::High => "🔥",
            _ => "⚡",
        };
        format!(
            "{} {} {}: {:.2} {}/kWh (raw: {:.2})",
            icon,
            self.level,
            self.label,
            self.adjusted_price_with_vat,
            currency,
            self.raw_price_with_vat
        )
    }
}

/// LOW and HIGH hours in timestamp order; labels carry the date when the
/// records span several days.
pub fn alerts(records: &[PriceRecord], thresholds: &ThresholdConfig) -> Vec<Alert> {
    let with_date = spans_multiple_days(records);
    records
        .iter()
        .filter_map(|r| {
            let level = classify(r, thresholds);
            if level == PriceLevel::Normal {
                return None;
            }
            let label = if with_date {
                format!("{} {}", r.date_label(), r.time_label())
            } else {
                r.time_label()
            };
            Some(Alert {
                level,
                label,
                adjusted_price_with_vat: r.adjusted_price_with_vat,
                raw_price_with_vat: r.raw_price_with_vat,
            })
        })
        .collect()
}

/// Notification lines for every LOW/HIGH hour; empty when nothing triggers
pub fn alert_lines(
    records: &[PriceRecord],
    thresholds: &ThresholdConfig,
    currency: &str,
) -> Vec<String> {
    alerts(records, thresholds)
        .iter()
        .map(|a| a.line(currency))
        .collect()
}
