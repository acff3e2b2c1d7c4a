use super::Config;
use crate::error::{Result, StromError};

/// Environment variables consulted by [`Config::apply_env_overrides`]
pub const ENV_KEYS: [&str; 6] = [
    "PUSHOVER_TOKEN",
    "PUSHOVER_USER",
    "STROMVARSLER_AREA",
    "STROMVARSLER_TIMEZONE",
    "STROMVARSLER_LOW_THRESHOLD",
    "STROMVARSLER_HIGH_THRESHOLD",
];

impl Config {
    /// Overlay values from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary lookup; empty values are ignored
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("PUSHOVER_TOKEN") {
            self.pushover.token = v;
        }
        if let Some(v) = get("PUSHOVER_USER") {
            self.pushover.user = v;
        }
        if let Some(v) = get("STROMVARSLER_AREA") {
            self.area = v.trim().to_uppercase();
        }
        if let Some(v) = get("STROMVARSLER_TIMEZONE") {
            self.timezone = v.trim().to_string();
        }
        if let Some(v) = get("STROMVARSLER_LOW_THRESHOLD") {
            self.thresholds.low = parse_price("STROMVARSLER_LOW_THRESHOLD", &v)?;
        }
        if let Some(v) = get("STROMVARSLER_HIGH_THRESHOLD") {
            self.thresholds.high = parse_price("STROMVARSLER_HIGH_THRESHOLD", &v)?;
        }
        Ok(())
    }
}

fn parse_price(key: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| StromError::validation(key.to_string(), format!("{:?}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn overrides_replace_values() {
        let vars: HashMap<&str, &str> = [
            ("PUSHOVER_TOKEN", "tok"),
            ("PUSHOVER_USER", "usr"),
            ("STROMVARSLER_AREA", "no3"),
            ("STROMVARSLER_LOW_THRESHOLD", "0.1"),
        ]
        .into_iter()
        .collect();

        let mut cfg = Config::default();
        cfg.apply_overrides_from(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(cfg.pushover.token, "tok");
        assert_eq!(cfg.pushover.user, "usr");
        assert_eq!(cfg.area, "NO3");
        assert!((cfg.thresholds.low - 0.1).abs() < f64::EPSILON);
        assert!((cfg.thresholds.high - 0.60).abs() < f64::EPSILON);
    }

    #[test]
    fn bad_number_is_a_validation_error() {
        let mut cfg = Config::default();
        let err = cfg
            .apply_overrides_from(|k| {
                (k == "STROMVARSLER_HIGH_THRESHOLD").then(|| "cheap".to_string())
            })
            .unwrap_err();
        assert!(matches!(err, StromError::Validation { .. }));
    }

    #[test]
    fn empty_values_are_ignored() {
        let mut cfg = Config::default();
        cfg.apply_overrides_from(|_| Some("  ".to_string())).unwrap();
        assert_eq!(cfg.area, "NO1");
    }
}
