use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire format of the Nord Pool data portal `DayAheadPrices` endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAheadResponse {
    #[serde(default)]
    pub multi_area_entries: Vec<MultiAreaEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiAreaEntry {
    pub delivery_start: DateTime<Utc>,
    #[serde(default)]
    pub delivery_end: Option<DateTime<Utc>>,
    /// Price per MWh keyed by area code; null while an area is not cleared
    #[serde(default)]
    pub entry_per_area: BTreeMap<String, Option<f64>>,
}

/// One hourly spot price in currency per MWh, start time in UTC
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPrice {
    pub start: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaPrices {
    pub values: Vec<RawPrice>,
}

/// Provider payload normalized to `{areas: {<AREA>: {values: [{start, value}]}}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderPayload {
    #[serde(default)]
    pub areas: BTreeMap<String, AreaPrices>,
}

impl ProviderPayload {
    /// Prices for one area, if the provider returned any
    pub fn area(&self, area: &str) -> Option<&AreaPrices> {
        self.areas.get(area)
    }

    pub fn has_area(&self, area: &str) -> bool {
        self.areas.get(area).is_some_and(|a| !a.values.is_empty())
    }

    /// Concatenate two windows per area, sorted by start with duplicate starts dropped
    /// (the earlier window wins).
    pub fn merge(mut self, other: ProviderPayload) -> ProviderPayload {
        for (area, prices) in other.areas {
            self.areas
                .entry(area)
                .or_default()
                .values
                .extend(prices.values);
        }
        for prices in self.areas.values_mut() {
            // Stable sort keeps the earlier window first among equal starts
            prices.values.sort_by_key(|p| p.start);
            prices.values.dedup_by_key(|p| p.start);
        }
        self
    }
}

impl DayAheadResponse {
    /// Normalize into hourly prices per area; quarter-hour entries are averaged
    /// into the hour they start in.
    pub fn into_payload(self) -> ProviderPayload {
        let mut buckets: BTreeMap<String, BTreeMap<DateTime<Utc>, (f64, u32)>> = BTreeMap::new();

        for entry in self.multi_area_entries {
            let hour = hour_start(entry.delivery_start);
            for (area, value) in entry.entry_per_area {
                let Some(v) = value.filter(|v| v.is_finite()) else {
                    continue;
                };
                let slot = buckets.entry(area).or_default().entry(hour).or_insert((0.0, 0));
                slot.0 += v;
                slot.1 += 1;
            }
        }

        let areas = buckets
            .into_iter()
            .map(|(area, hours)| {
                let values = hours
                    .into_iter()
                    .map(|(start, (sum, count))| RawPrice {
                        start,
                        value: sum / f64::from(count),
                    })
                    .collect();
                (area, AreaPrices { values })
            })
            .collect();

        ProviderPayload { areas }
    }
}

fn hour_start(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.duration_trunc(TimeDelta::hours(1)).unwrap_or(ts)
}
