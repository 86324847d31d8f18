use thiserror::Error;

/// Wire format errors
#[derive(Error, Debug)]
pub enum WireError {
    #[error("Invalid resource path: {0}")]
    InvalidPath(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

pub type WireResult<T> = std::result::Result<T, WireError>;
