//! Error types for the Melissa client.

use thiserror::Error;

/// Result type for Melissa client operations.
pub type Result<T> = std::result::Result<T, MelissaError>;

/// Melissa client errors.
#[derive(Debug, Error)]
pub enum MelissaError {
    /// Transport failure (connection refused, DNS, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the service
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON envelope
    #[error("Parse error: {0}")]
    Parse(String),
}
