use super::*;

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            low: 0.20,
            high: 0.60,
        }
    }
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            vat_rate: 0.25,
            subsidy_coverage: 0.90,
            subsidy_threshold: 0.9375,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dataportal-api.nordpoolgroup.com/api/DayAheadPrices".to_string(),
            currency: "NOK".to_string(),
            timeout_seconds: 10,
            include_tomorrow: true,
        }
    }
}

impl Default for PushoverConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            user: String::new(),
            api_url: "https://api.pushover.net/1/messages.json".to_string(),
            title: "Strømvarsel".to_string(),
            sound: "magic".to_string(),
            timeout_seconds: 10,
            attach_chart: true,
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            save_path: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            file: "/tmp/stromvarsler.log".to_string(),
            backup_count: 5,
            console_output: true,
            file_output: false,
            json_format: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            area: "NO1".to_string(),
            timezone: "Europe/Oslo".to_string(),
            thresholds: ThresholdConfig::default(),
            tariff: TariffConfig::default(),
            provider: ProviderConfig::default(),
            pushover: PushoverConfig::default(),
            web: WebConfig::default(),
            chart: ChartConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
