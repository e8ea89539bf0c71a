//! Error types for the Event Registry
//!
//! Registry operations themselves are total: unknown channels and unknown
//! handlers are no-ops. Errors show up in two places only: handler failures
//! captured during a publish (see [`crate::registry::PublishReport`]) and
//! configuration loading.

use thiserror::Error;

/// Unified error type for the registry
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Delivery Errors
    // =========================================================================
    #[error("Handler failed on channel {channel}: {reason}")]
    HandlerFailed { channel: String, reason: String },

    #[error("Handler panicked on channel {channel}: {message}")]
    HandlerPanicked { channel: String, message: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error came out of a handler invocation
    pub fn is_delivery_failure(&self) -> bool {
        matches!(
            self,
            Error::HandlerFailed { .. } | Error::HandlerPanicked { .. }
        )
    }

    /// Channel name carried by a delivery failure
    pub fn channel(&self) -> Option<&str> {
        match self {
            Error::HandlerFailed { channel, .. } => Some(channel),
            Error::HandlerPanicked { channel, .. } => Some(channel),
            _ => None,
        }
    }
}

/// Result type alias for the registry
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_failure_classification() {
        let err = Error::HandlerFailed {
            channel: "news".into(),
            reason: "boom".into(),
        };
        assert!(err.is_delivery_failure());
        assert_eq!(err.channel(), Some("news"));
        assert_eq!(err.to_string(), "Handler failed on channel news: boom");

        let err = Error::HandlerPanicked {
            channel: "login".into(),
            message: "oops".into(),
        };
        assert!(err.is_delivery_failure());
        assert_eq!(err.channel(), Some("login"));

        let err = Error::Configuration("bad config".into());
        assert!(!err.is_delivery_failure());
        assert_eq!(err.channel(), None);
    }
}
