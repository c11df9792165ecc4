//! HTTP API module for the Award Intake Engine.
//!
//! This module exposes the intake pipeline as a side-effect-free
//! validation endpoint: documents are checked and given a provisional
//! identifier, but nothing is written and the serial counter never moves.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ValidationRequest;
pub use response::{ApiError, ApiErrorResponse, ValidationResponse};
pub use state::AppState;
