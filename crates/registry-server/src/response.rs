//! Response encoding
//!
//! Every error leaves the server as the same envelope:
//!
//! ```text
//! {"status": "Error", "error": "<message>"}
//! ```
//!
//! Successful responses carry the raw payload with no envelope around it.
//! `axum::Json` sets `Content-Type: application/json` on both.

use std::num::ParseIntError;

use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use registry_core::{ErrorKind, StorageError, ValidationErrors};

/// Value of the `status` field in every error envelope
pub const STATUS_ERROR: &str = "Error";

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub status: String,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            error: message.into(),
        }
    }
}

/// Body of a successful create
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedId {
    pub id: i64,
}

/// Everything a handler can fail with
#[derive(Error, Debug)]
pub enum ApiError {
    /// Create was called with no body
    #[error("request body is empty")]
    EmptyBody,

    /// Body was not a student-shaped JSON object
    #[error("invalid request body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    /// Path id was not an integer
    #[error("invalid id format: {0}")]
    InvalidId(#[source] ParseIntError),

    /// Path segment could not be decoded at all
    #[error("invalid id format: {0}")]
    BadPath(#[source] PathRejection),

    /// One or more fields were rejected
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyBody
            | ApiError::MalformedBody(_)
            | ApiError::InvalidId(_)
            | ApiError::BadPath(_)
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(err) => match err.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        (status, Json(ErrorEnvelope::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry_core::{StudentPayload, Validator};

    #[test]
    fn test_envelope_shape() {
        let json = serde_json::to_value(ErrorEnvelope::new("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"status": "Error", "error": "boom"}));
    }

    #[test]
    fn test_created_id_shape() {
        let json = serde_json::to_value(CreatedId { id: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3}));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::EmptyBody.status(), StatusCode::BAD_REQUEST);

        let parse_err = "abc".parse::<i64>().unwrap_err();
        let err = ApiError::InvalidId(parse_err);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("invalid id format:"));

        let validation = Validator::new()
            .validate(StudentPayload::default())
            .unwrap_err();
        assert_eq!(ApiError::from(validation).status(), StatusCode::BAD_REQUEST);

        let not_found = ApiError::from(StorageError::NotFound { id: 1 });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let conflict = ApiError::from(StorageError::Conflict {
            email: "a@b.c".to_string(),
        });
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let internal = ApiError::from(StorageError::LockPoisoned);
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_storage_message_passes_through() {
        let err = ApiError::from(StorageError::NotFound { id: 12 });
        assert_eq!(err.to_string(), "student with id 12 not found");
    }
}
