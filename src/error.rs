//! Error types for the weather-ensemble library.

use thiserror::Error;

/// Result type alias for ensemble operations.
pub type Result<T> = std::result::Result<T, EnsembleError>;

/// Errors that can occur while building an ensemble forecast.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnsembleError {
    /// A source payload does not have the expected structure.
    #[error("invalid {provider} payload: {reason}")]
    InvalidPayload { provider: String, reason: String },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Computation error (e.g., non-finite fused values).
    #[error("computation error: {0}")]
    ComputationError(String),

    /// A result could not be serialized.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for EnsembleError {
    fn from(e: serde_json::Error) -> Self {
        EnsembleError::SerializationError(e.to_string())
    }
}

impl EnsembleError {
    /// Shorthand for an [`EnsembleError::InvalidPayload`].
    pub fn invalid_payload(provider: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            provider: provider.to_string(),
            reason: reason.into(),
        }
    }
}
