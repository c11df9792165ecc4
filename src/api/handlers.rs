//! HTTP request handlers for the Award Intake Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::intake::{HeadlessResolver, ProcessedAward, SerialAllocator, process_document};

use super::request::ValidationRequest;
use super::response::{ApiError, ApiErrorResponse, ValidationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/validate", post(validate_handler))
        .with_state(state)
}

/// Handler for POST /validate endpoint.
///
/// Runs one document through the intake pipeline without side effects.
/// Questions that would need an operator are declined.
async fn validate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValidationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let document_name = request.document_name.clone();
    let start_time = Instant::now();
    match validate(&state, request) {
        Ok(award) => {
            info!(
                correlation_id = %correlation_id,
                document = %document_name,
                provisional_id = %award.record.id,
                nominees = award.record.nominees.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Validation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ValidationResponse { correlation_id, award }),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                document = %document_name,
                kind = ?err.kind(),
                error = %err,
                "Validation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Processes a request against a fresh counter snapshot.
fn validate(state: &AppState, request: ValidationRequest) -> EngineResult<ProcessedAward> {
    let document = request.into_document()?;
    let counter = state.counter_store().load()?;
    let allocator = SerialAllocator::new(counter, state.config().fiscal_year_prefix.as_str());
    let today = Local::now().date_naive();
    process_document(&document, &allocator, today, &mut HeadlessResolver)
}
