use thiserror::Error;

/// Failures talking to the browser host
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Browser query failed: {0}")]
    Browser(String),

    #[error("Failed to decode {what}: {reason}")]
    Decode { what: &'static str, reason: String },
}

