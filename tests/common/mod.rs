#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, TimeDelta, TimeZone, Utc};
use chrono_tz::Europe::Oslo;
use std::collections::BTreeMap;
use std::sync::Mutex;
use stromvarsler::error::{Result, StromError};
use stromvarsler::nordpool::{AreaPrices, PriceSource, ProviderPayload, RawPrice};
use stromvarsler::pushover::Notifier;

pub const AREA: &str = "NO1";

/// What the stub provider answers for one delivery date
#[derive(Clone)]
pub enum Window {
    /// Hourly prices in NOK/MWh starting at local midnight
    Prices(Vec<f64>),
    /// Not published yet
    Missing,
    /// Transport failure with this message
    Fail(String),
}

pub struct StubSource {
    days: BTreeMap<NaiveDate, Window>,
    fallback: Window,
    pub calls: Mutex<Vec<NaiveDate>>,
}

impl StubSource {
    pub fn new(days: impl IntoIterator<Item = (NaiveDate, Window)>) -> Self {
        Self {
            days: days.into_iter().collect(),
            fallback: Window::Missing,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer every date the same way
    pub fn every_day(window: Window) -> Self {
        Self {
            days: BTreeMap::new(),
            fallback: window,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PriceSource for StubSource {
    async fn fetch_day(&self, area: &str, date: NaiveDate) -> Result<ProviderPayload> {
        self.calls.lock().unwrap().push(date);
        match self.days.get(&date).unwrap_or(&self.fallback).clone() {
            Window::Prices(values) => Ok(payload_for(area, date, &values)),
            Window::Missing => Ok(ProviderPayload::default()),
            Window::Fail(message) => Err(StromError::transport(message)),
        }
    }
}

/// Payload with consecutive hourly prices from local midnight of `date`
pub fn payload_for(area: &str, date: NaiveDate, values: &[f64]) -> ProviderPayload {
    let midnight = Oslo
        .with_ymd_and_hms(date.year(), date.month(), date.day(), 0, 0, 0)
        .unwrap()
        .with_timezone(&Utc);
    let values = values
        .iter()
        .enumerate()
        .map(|(h, &value)| RawPrice {
            start: midnight + TimeDelta::hours(h as i64),
            value,
        })
        .collect();
    ProviderPayload {
        areas: [(area.to_string(), AreaPrices { values })]
            .into_iter()
            .collect(),
    }
}

pub fn winter_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, Option<Vec<u8>>)>>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &str, image: Option<&[u8]>) {
        self.sent
            .lock()
            .unwrap()
            .push((message.to_string(), image.map(<[u8]>::to_vec)));
    }
}
