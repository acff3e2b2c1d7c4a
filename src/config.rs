//! Configuration management for Strømvarsler
//!
//! This module handles loading, validation, and management of the application
//! configuration from YAML files with support for environment variable overrides.
//! The configuration is built once at startup and handed to every component by
//! reference.

use crate::error::{Result, StromError};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod defaults;
mod env;

pub use env::ENV_KEYS;

/// Largest accepted chart width or height in pixels
pub const MAX_CHART_SIDE: u32 = 4096;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bidding zone code, e.g. NO1
    pub area: String,

    /// IANA timezone used for local hour labels
    pub timezone: String,

    /// Low/high alert levels in currency per kWh (VAT included)
    pub thresholds: ThresholdConfig,

    /// Subsidy and VAT parameters
    pub tariff: TariffConfig,

    /// Day-ahead price provider settings
    pub provider: ProviderConfig,

    /// Pushover credentials and message options
    pub pushover: PushoverConfig,

    /// Web server binding configuration
    pub web: WebConfig,

    /// Chart rendering options
    pub chart: ChartConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Price levels that trigger alerts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Hours at or below this adjusted price (incl. VAT) are LOW
    pub low: f64,

    /// Hours at or above this adjusted price (incl. VAT) are HIGH
    pub high: f64,
}

/// Tariff parameters: subsidy clawback then VAT
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TariffConfig {
    /// VAT rate as a fraction (0.25 = 25 %)
    pub vat_rate: f64,

    /// Fraction of the excess above the threshold covered by the subsidy
    pub subsidy_coverage: f64,

    /// Spot price (per kWh, excl. VAT) above which the subsidy applies
    pub subsidy_threshold: f64,
}

/// Nord Pool data portal settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Day-ahead prices endpoint
    pub base_url: String,

    /// Currency code requested from the provider
    pub currency: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Also fetch tomorrow's prices when published
    pub include_tomorrow: bool,
}

/// Pushover configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PushoverConfig {
    /// Application token
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token: String,

    /// User or group key
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,

    /// Messages endpoint
    pub api_url: String,

    /// Notification title
    pub title: String,

    /// Notification sound identifier
    pub sound: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Attach the rendered chart to alerts
    pub attach_chart: bool,
}

/// Web server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Bind address
    pub host: String,

    /// TCP port
    pub port: u16,
}

/// Chart configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Also write the chart of each check pass to this file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Path to log file (its directory receives daily rolled files)
    pub file: String,

    /// Number of rolled files to keep
    pub backup_count: u32,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to write a log file at all
    pub file_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

impl PushoverConfig {
    /// Both credentials present
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty() && !self.user.trim().is_empty()
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from `path`, or from the first default location that
    /// exists, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_paths = [
                    "stromvarsler.yaml",
                    "/data/stromvarsler.yaml",
                    "/etc/stromvarsler/config.yaml",
                ];
                match default_paths.iter().find(|p| Path::new(p).exists()) {
                    Some(p) => Self::from_file(p)?,
                    None => Config::default(),
                }
            }
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parsed timezone
    pub fn tz(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|e| {
            StromError::validation("timezone".to_string(), format!("{}: {}", self.timezone, e))
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.area.trim().is_empty() {
            return Err(StromError::validation("area", "Area code cannot be empty"));
        }

        self.tz()?;

        let t = &self.thresholds;
        if !t.low.is_finite() || !t.high.is_finite() {
            return Err(StromError::validation("thresholds", "Must be finite numbers"));
        }
        if t.low >= t.high {
            return Err(StromError::validation(
                "thresholds",
                "Low threshold must be below high threshold",
            ));
        }

        let tariff = &self.tariff;
        if !tariff.vat_rate.is_finite() || tariff.vat_rate < 0.0 {
            return Err(StromError::validation("tariff.vat_rate", "Must be >= 0"));
        }
        if !(0.0..=1.0).contains(&tariff.subsidy_coverage) {
            return Err(StromError::validation(
                "tariff.subsidy_coverage",
                "Must be between 0 and 1",
            ));
        }
        if !tariff.subsidy_threshold.is_finite() {
            return Err(StromError::validation(
                "tariff.subsidy_threshold",
                "Must be a finite number",
            ));
        }

        if self.provider.base_url.trim().is_empty() {
            return Err(StromError::validation(
                "provider.base_url",
                "URL cannot be empty",
            ));
        }
        if self.provider.timeout_seconds == 0 {
            return Err(StromError::validation(
                "provider.timeout_seconds",
                "Must be greater than 0",
            ));
        }
        if self.pushover.timeout_seconds == 0 {
            return Err(StromError::validation(
                "pushover.timeout_seconds",
                "Must be greater than 0",
            ));
        }

        if self.web.port == 0 {
            return Err(StromError::validation(
                "web.port",
                "Port must be greater than 0",
            ));
        }

        if self.chart.width < 200 || self.chart.height < 150 {
            return Err(StromError::validation(
                "chart",
                "Chart must be at least 200x150 pixels",
            ));
        }
        if self.chart.width > MAX_CHART_SIDE || self.chart.height > MAX_CHART_SIDE {
            return Err(StromError::validation(
                "chart",
                "Chart must be at most 4096x4096 pixels",
            ));
        }

        Ok(())
    }
}
