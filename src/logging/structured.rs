use chrono::NaiveDate;
use std::fmt;
use tracing::{Level, debug, error, info, warn};

/// Price pipeline coordinates attached to every line a component logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    /// Component name (`nordpool`, `pushover`, `check`, `web`)
    pub component: &'static str,
    /// Bidding zone being processed
    pub area: Option<String>,
    /// Delivery date of the price window
    pub delivery_date: Option<NaiveDate>,
    /// Currency the prices are quoted in
    pub currency: Option<String>,
}

impl LogContext {
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            area: None,
            delivery_date: None,
            currency: None,
        }
    }

    pub fn with_area(mut self, area: &str) -> Self {
        self.area = Some(area.to_string());
        self
    }

    pub fn with_delivery_date(mut self, date: NaiveDate) -> Self {
        self.delivery_date = Some(date);
        self
    }

    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = Some(currency.to_string());
        self
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component={}", self.component)?;
        if let Some(area) = &self.area {
            write!(f, ",area={}", area)?;
        }
        if let Some(date) = self.delivery_date {
            write!(f, ",date={}", date.format("%Y-%m-%d"))?;
        }
        if let Some(currency) = &self.currency {
            write!(f, ",currency={}", currency)?;
        }
        Ok(())
    }
}

/// Logger that prefixes its component's pipeline context as a `ctx` field
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    pub(crate) context: LogContext,
}

impl StructuredLogger {
    pub fn new(context: LogContext) -> Self {
        Self { context }
    }

    /// Same component and area, narrowed to one delivery date
    pub fn for_day(&self, date: NaiveDate) -> Self {
        Self::new(self.context.clone().with_delivery_date(date))
    }

    fn emit(&self, level: Level, message: &str) {
        let ctx = &self.context;
        match level {
            Level::ERROR => error!(%ctx, "{}", message),
            Level::WARN => warn!(%ctx, "{}", message),
            Level::INFO => info!(%ctx, "{}", message),
            _ => debug!(%ctx, "{}", message),
        }
    }

    pub fn info(&self, message: &str) {
        self.emit(Level::INFO, message);
    }

    pub fn warn(&self, message: &str) {
        self.emit(Level::WARN, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::ERROR, message);
    }

    pub fn debug(&self, message: &str) {
        self.emit(Level::DEBUG, message);
    }
}

/// Create a logger for a specific component
pub fn get_logger(component: &'static str) -> StructuredLogger {
    StructuredLogger::new(LogContext::new(component))
}

pub fn get_logger_with_context(context: LogContext) -> StructuredLogger {
    StructuredLogger::new(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_renders_only_known_fields() {
        assert_eq!(LogContext::new("web").to_string(), "component=web");

        let ctx = LogContext::new("nordpool")
            .with_area("NO2")
            .with_currency("NOK")
            .with_delivery_date(NaiveDate::from_ymd_opt(2025, 10, 26).unwrap());
        assert_eq!(
            ctx.to_string(),
            "component=nordpool,area=NO2,date=2025-10-26,currency=NOK"
        );
    }

    #[test]
    fn day_logger_keeps_component_context() {
        let base = get_logger_with_context(LogContext::new("nordpool").with_currency("SEK"));
        let day = base.for_day(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(day.context.component, "nordpool");
        assert_eq!(day.context.currency.as_deref(), Some("SEK"));
        assert!(base.context.delivery_date.is_none());
        assert!(day.context.delivery_date.is_some());
        // Logging without a subscriber is a no-op
        day.info("fetched");
        day.debug("details");
    }
}
