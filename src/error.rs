//! Error types and handling for Strømvarsler
//!
//! Every fallible step of the price pipeline returns one of these variants so
//! the entry points (the check pass and the HTTP handlers) can map each kind to
//! a log line or a status code instead of unwinding.

use thiserror::Error;

/// Result type alias for Strømvarsler operations
pub type Result<T> = std::result::Result<T, StromError>;

/// Main error type for Strømvarsler
#[derive(Debug, Error)]
pub enum StromError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Price provider unreachable, timed out, non-2xx, or malformed payload
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Provider answered but carried no entry for the configured area/date
    #[error("No price data available for {area}: {message}")]
    DataUnavailable { area: String, message: String },

    /// Chart drawing or PNG encoding failed
    #[error("Render error: {message}")]
    Render { message: String },

    /// Push notification delivery failed
    #[error("Notification error: {message}")]
    Notification { message: String },

    /// HTTP server errors
    #[error("Web server error: {message}")]
    Web { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl StromError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        StromError::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        StromError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        StromError::Transport {
            message: message.into(),
        }
    }

    /// Create a new "no data for area" error
    pub fn data_unavailable<S: Into<String>>(area: S, message: S) -> Self {
        StromError::DataUnavailable {
            area: area.into(),
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render<S: Into<String>>(message: S) -> Self {
        StromError::Render {
            message: message.into(),
        }
    }

    /// Create a new notification error
    pub fn notification<S: Into<String>>(message: S) -> Self {
        StromError::Notification {
            message: message.into(),
        }
    }

    /// Create a new web error
    pub fn web<S: Into<String>>(message: S) -> Self {
        StromError::Web {
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        StromError::Io {
            message: message.into(),
        }
    }

    /// Whether this error means "the provider had nothing for us" rather than a failure
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, StromError::DataUnavailable { .. })
    }
}

impl From<std::io::Error> for StromError {
    fn from(err: std::io::Error) -> Self {
        StromError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for StromError {
    fn from(err: serde_yaml::Error) -> Self {
        StromError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StromError {
    fn from(err: serde_json::Error) -> Self {
        StromError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for StromError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StromError::transport(format!("request timed out: {}", err))
        } else {
            StromError::transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = StromError::config("test config error");
        assert!(matches!(err, StromError::Config { .. }));

        let err = StromError::transport("connection refused");
        assert!(matches!(err, StromError::Transport { .. }));

        let err = StromError::validation("field", "test validation error");
        assert!(matches!(err, StromError::Validation { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = StromError::config("test error");
        assert_eq!(format!("{}", err), "Configuration error: test error");

        let err = StromError::data_unavailable("NO1", "no entries");
        assert_eq!(
            format!("{}", err),
            "No price data available for NO1: no entries"
        );
        assert!(err.is_data_unavailable());
    }
}
