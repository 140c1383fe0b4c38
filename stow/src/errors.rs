use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use utoipa::ToSchema;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Destination bucket missing from configuration
    #[error("upload bucket is not configured")]
    BucketNotConfigured,

    /// Decoded payload exceeded the size ceiling
    #[error("payload of {size} bytes exceeds the {limit_bytes} byte limit")]
    PayloadTooLarge { size: usize, limit_bytes: usize },

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// JSON body carried by every failure response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BucketNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            Error::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message placed in the JSON error body.
    ///
    /// A failed invocation is terminal, so internal errors surface their
    /// description to the caller rather than a generic message.
    pub fn user_message(&self) -> String {
        match self {
            Error::BucketNotConfigured => "Upload bucket name not configured".to_string(),
            Error::PayloadTooLarge { limit_bytes, .. } => {
                format!("File too large. Maximum size is {}MB.", limit_bytes / (1024 * 1024))
            }
            Error::Other(e) => format!("Upload failed: {e:#}"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details - different log levels based on severity
        match &self {
            Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::BucketNotConfigured => {
                tracing::error!("Configuration error: {}", self);
            }
            Error::PayloadTooLarge { .. } => {
                tracing::warn!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        let body = ErrorBody {
            error: self.user_message(),
        };

        (status, axum::response::Json(body)).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
