//! Error types for NeuroLink
//!
//! The retrieval engine itself is total and never fails; errors here cover
//! the surrounding collaborators (gateway, config, session persistence).

use thiserror::Error;

/// Main error type for the NeuroLink chat client
#[derive(Error, Debug)]
pub enum NeuroError {
    /// Gateway returned a non-success status on both the primary and
    /// fallback routes
    #[error("Gateway error: {status} from {route}")]
    GatewayStatus { status: u16, route: String },

    /// Gateway did not answer within the configured deadline
    #[error("Gateway timed out after {duration_ms}ms")]
    GatewayTimeout { duration_ms: u64 },

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Corpus loading errors
    #[error("Knowledge base error: {0}")]
    KnowledgeError(String),

    /// Generic errors with context
    #[error("NeuroLink error: {0}")]
    Generic(String),
}

/// Result type alias for NeuroLink operations
pub type Result<T> = std::result::Result<T, NeuroError>;

/// Convert anyhow errors to NeuroError
impl From<anyhow::Error> for NeuroError {
    fn from(err: anyhow::Error) -> Self {
        NeuroError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NeuroError::GatewayTimeout { duration_ms: 30000 };
        assert!(err.to_string().contains("30000"));
    }

    #[test]
    fn test_gateway_status_error() {
        let err = NeuroError::GatewayStatus {
            status: 502,
            route: "/api/llm/chat".to_string(),
        };
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("/api/llm/chat"));
    }
}
