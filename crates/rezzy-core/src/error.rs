//! Error types for the Rezzy client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every Rezzy crate.
///
/// Variants are labeled so callers can tell a bad server payload apart from
/// a transport problem and decide whether a fallback makes sense.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RezzyError {
    /// A bot response was neither an object nor an array of objects.
    #[error("Invalid payload shape: {reason}")]
    InvalidPayloadShape { reason: String },

    /// A conversation turn did not have exactly one key.
    #[error("Malformed conversation turn #{index}: expected 1 key, found {key_count}")]
    MalformedTurn { index: usize, key_count: usize },

    /// A timestamp string could not be parsed.
    #[error("Invalid timestamp: '{value}'")]
    InvalidTimestamp { value: String },

    /// Transport-level failure (connection refused, DNS, reset...).
    #[error("Network failure: {message}")]
    NetworkFailure { message: String },

    /// A backend call exceeded its time bound.
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The backend answered with a non-success status.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// User input rejected before it reached the backend.
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Quiz state transition error
    #[error("Quiz error: {0}")]
    Quiz(String),
}

impl RezzyError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayloadShape {
            reason: reason.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn quiz(message: impl Into<String>) -> Self {
        Self::Quiz(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// True for failures of the network layer itself: connection errors,
    /// timeouts, rate limiting and 5xx responses.
    ///
    /// These are the errors worth retrying or answering from mock data.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::NetworkFailure { .. } | Self::Timeout { .. } => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_malformed_turn(&self) -> bool {
        matches!(self, Self::MalformedTurn { .. })
    }

    pub fn is_invalid_payload(&self) -> bool {
        matches!(self, Self::InvalidPayloadShape { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RezzyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RezzyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RezzyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, RezzyError>`.
pub type Result<T> = std::result::Result<T, RezzyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(RezzyError::network("connection refused").is_transport());
        assert!(RezzyError::Timeout { seconds: 30 }.is_transport());
        assert!(
            RezzyError::Http {
                status: 503,
                message: "unavailable".into()
            }
            .is_transport()
        );
        assert!(
            RezzyError::Http {
                status: 429,
                message: "slow down".into()
            }
            .is_transport()
        );
        assert!(
            !RezzyError::Http {
                status: 404,
                message: "missing".into()
            }
            .is_transport()
        );
        assert!(!RezzyError::invalid_payload("number").is_transport());
    }

    #[test]
    fn test_malformed_turn_message() {
        let err = RezzyError::MalformedTurn {
            index: 2,
            key_count: 0,
        };
        assert!(err.is_malformed_turn());
        assert_eq!(
            err.to_string(),
            "Malformed conversation turn #2: expected 1 key, found 0"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let err: RezzyError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        match err {
            RezzyError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("Expected Serialization error, got {other:?}"),
        }
    }
}
