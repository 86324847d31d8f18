use firetest_wire::status::ErrorBody;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the emulator clients.
///
/// Authorization denials get their own variant so callers can keep them
/// distinct from infrastructure failures.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed precondition: {0}")]
    FailedPrecondition(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected status {code}: {message}")]
    Unexpected { code: u16, message: String },
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Returns whether this error is a rules authorization denial.
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }

    /// ## Summary
    /// Classifies a non-success response from the emulator.
    ///
    /// The canonical status name in the `google.rpc.Status` body wins when
    /// present; otherwise the HTTP status code decides.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        if let Ok(ErrorBody { error }) = ErrorBody::parse(body) {
            if let Some(name) = error.status.as_deref() {
                return match name {
                    "PERMISSION_DENIED" => Self::PermissionDenied(error.message),
                    "UNAUTHENTICATED" => Self::Unauthenticated(error.message),
                    "NOT_FOUND" => Self::NotFound(error.message),
                    "INVALID_ARGUMENT" => Self::InvalidArgument(error.message),
                    "FAILED_PRECONDITION" => Self::FailedPrecondition(error.message),
                    "ALREADY_EXISTS" => Self::AlreadyExists(error.message),
                    _ => Self::Unexpected {
                        code: error.code,
                        message: error.message,
                    },
                };
            }
            return Self::from_http_status(status, error.message);
        }

        Self::from_http_status(status, preview(body))
    }

    fn from_http_status(status: StatusCode, message: String) -> Self {
        match status.as_u16() {
            403 => Self::PermissionDenied(message),
            401 => Self::Unauthenticated(message),
            404 => Self::NotFound(message),
            400 => Self::InvalidArgument(message),
            409 => Self::AlreadyExists(message),
            412 => Self::FailedPrecondition(message),
            code => Self::Unexpected { code, message },
        }
    }
}

/// Keeps undecodable bodies short enough for error messages.
fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
