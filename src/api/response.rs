//! Response types for the Award Intake Engine API.
//!
//! This module defines the success body, the error response structures and
//! the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, ErrorKind};
use crate::intake::ProcessedAward;

/// Response body for an accepted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// Correlation ID of the request, as logged.
    pub correlation_id: Uuid,
    /// The processed award. Its identifier is provisional: the API never
    /// advances the serial counter.
    pub award: ProcessedAward,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, code) = match error.kind() {
            ErrorKind::DocumentShape => (StatusCode::BAD_REQUEST, "INVALID_DOCUMENT"),
            ErrorKind::Extraction => (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_FAILED"),
            ErrorKind::NomineeAssembly => (StatusCode::UNPROCESSABLE_ENTITY, "NOMINEE_ASSEMBLY_FAILED"),
            ErrorKind::PolicyViolation => (StatusCode::UNPROCESSABLE_ENTITY, "AWARD_LIMIT_EXCEEDED"),
            ErrorKind::SelfNomination => (StatusCode::UNPROCESSABLE_ENTITY, "SELF_NOMINATION"),
            ErrorKind::Configuration => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            ErrorKind::Io => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let error = match error {
            EngineError::AwardLimitExceeded { breakdown } => ApiError::with_details(
                code,
                format!(
                    "Award amounts exceed the commensurate limit for {}",
                    breakdown.value_extent
                ),
                breakdown.to_string(),
            ),
            other => ApiError::new(code, other.to_string()),
        };

        ApiErrorResponse { status, error }
    }
}
