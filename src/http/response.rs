//! Response bodies.

use serde::{Deserialize, Serialize};

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampResponse {
    pub timestamp: String,
    /// `null` when no header or peer address identifies the caller.
    pub ip: Option<String>,
}

/// Error body for requests no route accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    /// Path matches no route.
    pub fn not_found() -> Self {
        Self {
            detail: "Not Found".to_string(),
        }
    }

    /// Path exists but not for this method.
    pub fn method_not_allowed() -> Self {
        Self {
            detail: "Method Not Allowed".to_string(),
        }
    }
}
