//! Provider payload to per-hour price records

use crate::nordpool::{ProviderPayload, RawPrice};
use crate::tariff::Tariff;
use chrono::{DateTime, LocalResult, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One hour of prices in currency per kWh, localized to the configured timezone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRecord {
    pub timestamp: DateTime<Tz>,
    pub raw_price_per_kwh: f64,
    pub adjusted_price_per_kwh: f64,
    pub raw_price_with_vat: f64,
    pub adjusted_price_with_vat: f64,
}

impl PriceRecord {
    /// Build a record from a provider price in currency per MWh
    pub fn from_raw(raw: &RawPrice, tariff: &Tariff, tz: Tz) -> Self {
        let raw_kwh = raw.value / 1000.0;
        let adjusted = tariff.apply_subsidy(raw_kwh);
        Self {
            timestamp: raw.start.with_timezone(&tz),
            raw_price_per_kwh: raw_kwh,
            adjusted_price_per_kwh: adjusted,
            raw_price_with_vat: tariff.apply_vat(raw_kwh),
            adjusted_price_with_vat: tariff.apply_vat(adjusted),
        }
    }

    /// Local hour as `HH:MM`, or `HH:MM+hh:mm` for an hour that occurs twice
    /// on the autumn clock change
    pub fn time_label(&self) -> String {
        if self.is_repeated_hour() {
            self.timestamp.format("%H:%M%:z").to_string()
        } else {
            self.timestamp.format("%H:%M").to_string()
        }
    }

    fn is_repeated_hour(&self) -> bool {
        matches!(
            self.timestamp
                .timezone()
                .from_local_datetime(&self.timestamp.naive_local()),
            LocalResult::Ambiguous(..)
        )
    }

    /// Local date as `YYYY-MM-DD`
    pub fn date_label(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }
}

/// Convert the payload's entries for `area` into sorted, unique price records.
///
/// An absent area yields an empty vector.
pub fn parse_prices(
    payload: &ProviderPayload,
    area: &str,
    tariff: &Tariff,
    tz: Tz,
) -> Vec<PriceRecord> {
    let Some(prices) = payload.area(area) else {
        return Vec::new();
    };

    let mut records: Vec<PriceRecord> = prices
        .values
        .iter()
        .filter(|raw| {
            let ok = raw.value.is_finite();
            if !ok {
                warn!("Skipping non-finite price for {} at {}", area, raw.start);
            }
            ok
        })
        .map(|raw| PriceRecord::from_raw(raw, tariff, tz))
        .collect();

    records.sort_by_key(|r| r.timestamp);
    records.dedup_by_key(|r| r.timestamp);
    records
}

/// Whether the records cover more than one local calendar day
pub fn spans_multiple_days(records: &[PriceRecord]) -> bool {
    match (records.first(), records.last()) {
        (Some(first), Some(last)) => first.timestamp.date_naive() != last.timestamp.date_naive(),
        _ => false,
    }
}

/// JSON projection of a price record served by `/prices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceView {
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub date: Option<String>,
    pub raw_price: f64,
    pub adjusted_price: f64,
    pub raw_price_mva: f64,
    pub adjusted_mva: f64,
}

/// Project records for the API, adding dates when they span several days
pub fn price_views(records: &[PriceRecord]) -> Vec<PriceView> {
    let with_date = spans_multiple_days(records);
    records
        .iter()
        .map(|r| PriceView {
            time: r.time_label(),
            date: with_date.then(|| r.date_label()),
            raw_price: round4(r.raw_price_per_kwh),
            adjusted_price: round4(r.adjusted_price_per_kwh),
            raw_price_mva: round4(r.raw_price_with_vat),
            adjusted_mva: round4(r.adjusted_price_with_vat),
        })
        .collect()
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TariffConfig;
    use crate::nordpool::AreaPrices;
    use chrono::{Timelike, Utc};
    use std::collections::HashSet;

    fn payload(values: Vec<RawPrice>) -> ProviderPayload {
        ProviderPayload {
            areas: [("NO1".to_string(), AreaPrices { values })].into_iter().collect(),
        }
    }

    fn raw(h: u32, value: f64) -> RawPrice {
        RawPrice {
            start: Utc.with_ymd_and_hms(2025, 1, 15, h, 0, 0).unwrap(),
            value,
        }
    }

    #[test]
    fn converts_mwh_and_localizes() {
        let tariff = Tariff::from(&TariffConfig::default());
        let records = parse_prices(
            &payload(vec![raw(23, 1000.0)]),
            "NO1",
            &tariff,
            chrono_tz::Europe::Oslo,
        );
        assert_eq!(records.len(), 1);
        let r = &records[0];
        // 23:00 UTC in winter is midnight in Oslo
        assert_eq!(r.timestamp.hour(), 0);
        assert_eq!(r.date_label(), "2025-01-16");
        assert_eq!(r.time_label(), "00:00");
        assert!((r.raw_price_per_kwh - 1.0).abs() < 1e-12);
        assert!((r.adjusted_price_with_vat - 1.1796875).abs() < 1e-12);
    }

    #[test]
    fn unknown_area_is_empty() {
        let tariff = Tariff::from(&TariffConfig::default());
        let records = parse_prices(&payload(vec![raw(0, 1.0)]), "SE3", &tariff, chrono_tz::UTC);
        assert!(records.is_empty());
    }

    #[test]
    fn non_finite_values_are_skipped() {
        let tariff = Tariff::from(&TariffConfig::default());
        let records = parse_prices(
            &payload(vec![raw(1, f64::NAN), raw(0, 100.0), raw(0, 200.0)]),
            "NO1",
            &tariff,
            chrono_tz::UTC,
        );
        assert_eq!(records.len(), 1);
        assert!((records[0].raw_price_per_kwh - 0.1).abs() < 1e-12);
    }

    #[test]
    fn views_carry_date_only_across_days() {
        let tariff = Tariff::from(&TariffConfig::default());
        let single = parse_prices(
            &payload(vec![raw(0, 100.0), raw(1, 100.0)]),
            "NO1",
            &tariff,
            chrono_tz::UTC,
        );
        assert!(price_views(&single).iter().all(|v| v.date.is_none()));

        let double = parse_prices(
            &payload(vec![raw(22, 100.0), raw(23, 100.0)]),
            "NO1",
            &tariff,
            chrono_tz::Europe::Oslo,
        );
        let views = price_views(&double);
        assert_eq!(views[0].date.as_deref(), Some("2025-01-15"));
        assert_eq!(views[1].date.as_deref(), Some("2025-01-16"));
        assert_eq!(views[0].raw_price_mva, 0.125);
    }

    #[test]
    fn autumn_clock_change_keeps_labels_unique() {
        let tariff = Tariff::from(&TariffConfig::default());
        let start = Utc.with_ymd_and_hms(2025, 10, 25, 22, 0, 0).unwrap();
        let values = (0..25)
            .map(|h| RawPrice {
                start: start + chrono::TimeDelta::hours(h),
                value: 100.0,
            })
            .collect();
        let records = parse_prices(&payload(values), "NO1", &tariff, chrono_tz::Europe::Oslo);
        assert_eq!(records.len(), 25);

        let labels: Vec<String> = records.iter().map(PriceRecord::time_label).collect();
        assert_eq!(labels[1], "01:00");
        assert_eq!(labels[2], "02:00+02:00");
        assert_eq!(labels[3], "02:00+01:00");
        assert_eq!(labels[4], "03:00");
        let unique: HashSet<&String> = labels.iter().collect();
        assert_eq!(unique.len(), 25);

        let views = price_views(&records);
        assert!(views.iter().all(|v| v.date.is_none()));
        assert_eq!(views[3].time, "02:00+01:00");
    }
}
