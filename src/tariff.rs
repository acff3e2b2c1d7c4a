//! Subsidy clawback and VAT markup
//!
//! The subsidy is always applied before VAT. VAT on the raw price is computed
//! separately, so the two variants diverge only above the subsidy threshold.

use crate::config::TariffConfig;

/// Tariff calculator built from the `tariff` configuration section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tariff {
    vat_rate: f64,
    subsidy_coverage: f64,
    subsidy_threshold: f64,
}

impl Tariff {
    pub fn new(vat_rate: f64, subsidy_coverage: f64, subsidy_threshold: f64) -> Self {
        Self {
            vat_rate,
            subsidy_coverage,
            subsidy_threshold,
        }
    }

    /// Price per kWh after the state covers `subsidy_coverage` of the excess above the threshold
    pub fn apply_subsidy(&self, price: f64) -> f64 {
        if price > self.subsidy_threshold {
            price - (price - self.subsidy_threshold) * self.subsidy_coverage
        } else {
            price
        }
    }

    /// Price including VAT
    pub fn apply_vat(&self, price: f64) -> f64 {
        price * (1.0 + self.vat_rate)
    }
}

impl From<&TariffConfig> for Tariff {
    fn from(cfg: &TariffConfig) -> Self {
        Self::new(cfg.vat_rate, cfg.subsidy_coverage, cfg.subsidy_threshold)
    }
}
