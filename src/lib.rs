//! # Strømvarsler - Nord Pool spot price alerts
//!
//! Fetches hourly day-ahead prices for one bidding zone, applies the
//! electricity subsidy clawback and VAT, flags cheap and expensive hours,
//! and reports them through Pushover and a small HTTP API with a PNG chart.
//!
//! ## Architecture
//!
//! - `config`: Configuration management and validation
//! - `logging`: Structured logging and tracing
//! - `tariff`: Subsidy and VAT calculation
//! - `nordpool`: Day-ahead price provider client
//! - `prices`: Provider payload to localized hourly records
//! - `classify`: LOW/NORMAL/HIGH levels and alert text
//! - `chart`: PNG chart rendering
//! - `pushover`: Push notification delivery
//! - `check`: One alerting pass
//! - `web`: HTTP server and REST API
//! - `cli`: Command line arguments

pub mod chart;
pub mod check;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod nordpool;
pub mod prices;
pub mod pushover;
pub mod tariff;
pub mod web;

// Re-export commonly used types
pub use classify::PriceLevel;
pub use config::{Config, ENV_KEYS};
pub use error::{Result, StromError};
pub use prices::PriceRecord;
pub use tariff::Tariff;
