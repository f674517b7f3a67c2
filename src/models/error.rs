use thiserror::Error;

/// A required environment value is absent or empty. Fatal for the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
}

/// Record-level failures. Each one becomes an `ERROR` outcome for its record.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid message body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Dedupe store write failed: {0}")]
    Store(String),

    #[error("Email send failed: {0}")]
    Send(String),

    #[error("Failed to build request: {0}")]
    Build(String),
}
