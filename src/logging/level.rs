use crate::error::{Result, StromError};
use tracing::Level;

/// Parse log level string to tracing Level
pub fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.trim().to_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" | "WARNING" => Ok(Level::WARN),
        "ERROR" => Ok(Level::ERROR),
        _ => Err(StromError::config(format!(
            "Invalid log level: {}",
            level_str
        ))),
    }
}

/// Default filter directive when `RUST_LOG` is unset; chatty HTTP internals stay at warn
pub fn rust_log_directive(level: Level) -> String {
    format!(
        "stromvarsler={},tower_http={},hyper=warn,reqwest=warn",
        level, level
    )
}
