use thiserror::Error;

/// Error type that captures wizard, persistence, and backend failures.
#[derive(Debug, Error)]
pub enum AvailabilityError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Something went wrong: {0}")]
    Inconsistent(String),
    #[error("Backend rejected the request ({status}): {message}")]
    Backend { status: u16, message: String },
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}
