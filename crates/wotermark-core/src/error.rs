use thiserror::Error;

#[derive(Error, Debug)]
pub enum WotermarkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid watermark slot: {0}")]
    InvalidSlot(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid processing response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, WotermarkError>;
