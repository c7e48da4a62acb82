//! # REST API for History Seeds
//!
//! Recent distinct assignees of a duty type, used to pre-fill the rotation list.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use serde::Deserialize;

use super::parse_duty;
use crate::backend::domain::commands::history::HistorySeedQuery;
use crate::backend::AppState;
use shared::HistorySeedResponse;

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

/// Create a router for history APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/history/:duty", get(get_history_seed))
}

/// Never fails on a storage error; an unreadable history yields an empty seed
pub async fn get_history_seed(
    State(state): State<AppState>,
    Path(duty): Path<String>,
    Query(params): Query<HistoryParams>,
) -> impl IntoResponse {
    info!("GET /api/history/{} - limit: {:?}", duty, params.limit);

    let duty_type = match parse_duty(&duty) {
        Ok(duty_type) => duty_type,
        Err(response) => return response,
    };

    let seed = state
        .history_service
        .sample_recent(HistorySeedQuery {
            duty_type,
            limit: params.limit,
        })
        .await;

    let response = HistorySeedResponse {
        duty_type,
        seed_text: seed.seed_text(),
        entries: seed.entries,
    };
    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::io::rest::test_support::{send, setup_test_state};
    use axum::http::Method;
    use chrono::NaiveDate;
    use shared::DutyType;

    use crate::backend::storage::csv::test_utils::field_service_draft;
    use crate::backend::storage::{AssignmentStorage, Connection};

    #[tokio::test]
    async fn test_history_seed_for_field_service() {
        let (state, env) = setup_test_state().await;
        let repo = env.connection.create_assignment_repository();
        let dates = [7, 14, 21, 28].map(|d| NaiveDate::from_ymd_opt(2025, 9, d).unwrap());
        repo.insert_many(
            DutyType::FieldService,
            &[
                field_service_draft(dates[0], "Ana"),
                field_service_draft(dates[1], "to be determined"),
                field_service_draft(dates[2], "Caio"),
                field_service_draft(dates[3], "Ana"),
            ],
        )
        .await
        .unwrap();

        let app = router().with_state(state);
        let (status, body) = send(app, Method::GET, "/history/field-service", None).await;

        assert_eq!(status, StatusCode::OK);
        let response: HistorySeedResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.entries, vec!["Caio", "Ana"]);
        assert_eq!(response.seed_text, "Caio\nAna");
    }

    #[tokio::test]
    async fn test_unknown_duty_is_bad_request() {
        let (state, _env) = setup_test_state().await;
        let app = router().with_state(state);

        let (status, body) = send(app, Method::GET, "/history/laundry", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "UNKNOWN_DUTY");
    }
}
