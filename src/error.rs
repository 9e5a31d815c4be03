use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// Caller contract violation detected before any drawing begins.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("font error: {0}")]
    Font(String),

    /// Drawing backend or serialization failure.
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("generation cancelled")]
    Cancelled,

    #[error("render task failed: {0}")]
    Task(String),
}
