use thiserror::Error;

/// Errors talking to the task API deployed behind `api_endpoint`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (connection failed, timeout, etc.)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode {what}: {message}")]
    Decode { what: String, message: String },

    /// A smoke-test expectation did not hold
    #[error("smoke test failed: {0}")]
    Smoke(String),
}
