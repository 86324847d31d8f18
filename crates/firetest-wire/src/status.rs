//! The `google.rpc.Status` error envelope the REST surface returns.

use serde::{Deserialize, Serialize};

use crate::error::WireResult;

/// Top-level error body, `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: RpcStatus,
}

/// Status payload inside an error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcStatus {
    /// Numeric code matching the HTTP status.
    pub code: u16,

    #[serde(default)]
    pub message: String,

    /// Canonical status name, e.g. `PERMISSION_DENIED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ErrorBody {
    /// ## Summary
    /// Parses an error envelope from a response body.
    ///
    /// ## Errors
    /// Returns an error if the body is not an `{"error": ...}` JSON object.
    pub fn parse(body: &str) -> WireResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}
