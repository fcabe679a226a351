//! API error types
//!
//! Every request site converts failures into [`ApiError`]. Screens then pick
//! what to show with [`ApiError::user_message`]: the server's `detail` when
//! it sent one, otherwise the screen's own fallback text.

use thiserror::Error;

/// Errors that can occur when talking to the back-office API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401 from the server: no session, expired cookie, or bad credentials
    #[error("Unauthorized: {}", .detail.as_deref().unwrap_or("not authenticated"))]
    Unauthorized { detail: Option<String> },

    /// Any other non-success status (validation or business rule failure)
    #[error("Request rejected ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Unreachable(String),

    /// A success response whose body did not match the expected shape
    #[error("Parse error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build an error from a non-success status and the raw response body
    ///
    /// The API reports errors as `{"detail": "..."}`. Non-string details
    /// (such as validation error lists) are dropped so the caller's
    /// fallback message is shown instead.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = detail_from_body(body);
        if status == 401 {
            ApiError::Unauthorized { detail }
        } else {
            ApiError::Rejected { status, detail }
        }
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Unreachable(_) | ApiError::Decode(_) => None,
        }
    }

    /// Server-provided detail message
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail } | ApiError::Rejected { detail, .. } => {
                detail.as_deref()
            }
            ApiError::Unreachable(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Message to surface next to a form or in a banner
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

fn detail_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(|d| d.to_string())
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
