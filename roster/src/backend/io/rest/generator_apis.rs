//! # REST API for Preview Generation
//!
//! Endpoints for computing the week buckets of a window and generating an
//! unsaved preview. Nothing here touches storage.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use log::{info, warn};
use serde::Deserialize;

use super::error_body;
use crate::backend::domain::commands::generation::{GeneratePreviewCommand, WeekWindowQuery};
use crate::backend::domain::models::GenerationError;
use crate::backend::io::rest::mappers::{AssignmentMapper, WeekMapper};
use crate::backend::AppState;
use shared::GeneratePreviewRequest;

/// Query parameters of `GET /api/weeks`
#[derive(Debug, Deserialize)]
pub struct WeekQueryParams {
    pub start_date: Option<String>,
    pub duration_months: Option<u32>,
}

/// Create a router for generation related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/weeks", get(list_weeks))
        .route("/preview", post(generate_preview))
}

/// Week buckets of a generation window, none selected
pub async fn list_weeks(
    State(state): State<AppState>,
    Query(params): Query<WeekQueryParams>,
) -> impl IntoResponse {
    info!("GET /api/weeks - params: {:?}", params);

    let query = WeekWindowQuery {
        start_date: params.start_date,
        duration_months: params.duration_months,
    };

    match state.generator_service.compute_weeks(&query) {
        Ok(weeks) => (StatusCode::OK, Json(WeekMapper::to_week_list_response(&weeks))).into_response(),
        Err(e) => generation_error_response(e),
    }
}

/// Generate a preview batch for review
pub async fn generate_preview(
    State(state): State<AppState>,
    Json(request): Json<GeneratePreviewRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/preview - {} from {:?} for {:?} months",
        request.duty_type, request.start_date, request.duration_months
    );

    let command = GeneratePreviewCommand {
        duty_type: request.duty_type,
        window: WeekWindowQuery {
            start_date: request.start_date,
            duration_months: request.duration_months,
        },
        rotation_text: request.rotation_text,
        selected_weeks: request.selected_weeks,
    };

    match state.generator_service.generate_preview(command) {
        Ok(result) => (StatusCode::OK, Json(AssignmentMapper::to_preview_response(result))).into_response(),
        Err(e) => generation_error_response(e),
    }
}

fn generation_error_response(e: GenerationError) -> Response {
    warn!("Rejected generation request: {}", e);
    (StatusCode::BAD_REQUEST, error_body(&e.to_string(), "INVALID_INPUT")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::io::rest::test_support::{send, setup_test_state};
    use axum::http::Method;
    use serde_json::json;
    use shared::{AssigneeDto, PreviewResponse, WeekListResponse};

    #[tokio::test]
    async fn test_list_weeks() {
        let (state, _env) = setup_test_state().await;
        let app = router().with_state(state);

        let (status, body) = send(
            app,
            Method::GET,
            "/weeks?start_date=2025-09-10&duration_months=1",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: WeekListResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.weeks.len(), 5);
        assert_eq!(response.weeks[0].label, "01/09 to 07/09");
        assert_eq!(response.weeks[4].label, "29/09 to 01/10");
    }

    #[tokio::test]
    async fn test_list_weeks_without_start_date() {
        let (state, _env) = setup_test_state().await;
        let app = router().with_state(state);

        let (status, body) = send(app, Method::GET, "/weeks", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["error"], "Start date is required");
    }

    #[tokio::test]
    async fn test_preview_field_service() {
        let (state, _env) = setup_test_state().await;
        let app = router().with_state(state);

        let request = json!({
            "duty_type": "field-service",
            "start_date": "2025-09-01",
            "duration_months": 1,
            "rotation_text": "Ana\nCaio\n"
        });
        let (status, body) = send(app, Method::POST, "/preview", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        let response: PreviewResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.processed_weeks, 5);
        assert_eq!(response.productive_weeks, 4);
        let leaders: Vec<AssigneeDto> = response.assignments.into_iter().map(|a| a.assignee).collect();
        assert_eq!(
            leaders,
            vec![
                AssigneeDto::Leader("Ana".to_string()),
                AssigneeDto::Leader("Caio".to_string()),
                AssigneeDto::Leader("Ana".to_string()),
                AssigneeDto::Leader("Caio".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_preview_rejects_long_duration() {
        let (state, _env) = setup_test_state().await;
        let app = router().with_state(state);

        let request = json!({
            "duty_type": "cleaning",
            "start_date": "2025-09-01",
            "duration_months": 13
        });
        let (status, body) = send(app, Method::POST, "/preview", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Duration must be between 1 and 12 months, got 13");
    }
}
