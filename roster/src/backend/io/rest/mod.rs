//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the duty roster.
//! This layer handles:
//! - JSON request and response mapping to domain commands
//! - Duty type path segments (`cleaning`, `field-service`)
//! - Error translation from domain errors to HTTP status codes
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: Week buckets, previews, history seeds, saved assignments and settings
//! - **Error Handling**: Duplicate dates answer 409 with the dates that collided
//! - **Logging**: One log line per request
//!
//! Handlers hold no business logic; they translate and delegate.

pub mod assignment_apis;
pub mod generator_apis;
pub mod history_apis;
pub mod mappers;
pub mod settings_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};
use serde_json::Value;
use shared::DutyType;

use crate::backend::AppState;

/// Every API route, relative to `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(generator_apis::router())
        .merge(history_apis::router())
        .merge(assignment_apis::router())
        .merge(settings_apis::router())
}

/// JSON error body shared by all handlers
pub fn error_body(message: &str, code: &str) -> Json<Value> {
    Json(serde_json::json!({
        "error": message,
        "code": code
    }))
}

/// Parse a duty type path segment, answering 400 for unknown values
pub fn parse_duty(segment: &str) -> Result<DutyType, Response> {
    segment
        .parse::<DutyType>()
        .map_err(|message| (StatusCode::BAD_REQUEST, error_body(&message, "UNKNOWN_DUTY")).into_response())
}
