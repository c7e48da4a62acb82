//! # REST API for Saved Assignments
//!
//! Endpoints for saving approved previews, maintaining saved records and
//! listing the next assignments of both duties.
//!
//! A save that hits an existing date answers `409 Conflict` with the
//! offending dates, so the client can tell the user which dates already exist.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use log::{error, info, warn};
use serde::Deserialize;

use super::{error_body, parse_duty};
use crate::backend::domain::commands::assignments::{
    AssignmentListQuery, CreateAssignmentCommand, SaveAssignmentsCommand, UpdateAssignmentCommand,
};
use crate::backend::domain::group_by_month;
use crate::backend::domain::models::{format_dates, SaveError};
use crate::backend::io::rest::mappers::AssignmentMapper;
use crate::backend::AppState;
use shared::{
    AssignmentResponse, CreateAssignmentRequest, DeleteAssignmentResponse, DuplicateDatesResponse,
    SaveAssignmentsRequest, SaveAssignmentsResponse, UpdateAssignmentRequest,
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
}

/// Number of upcoming assignments returned when the request gives none
const DEFAULT_UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct UpcomingParams {
    /// YYYY-MM-DD, today when absent
    pub from: Option<String>,
    pub limit: Option<usize>,
}

/// Create a router for assignment APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assignments/:duty", get(list_assignments).post(save_assignments))
        .route("/assignments/:duty/new", post(create_assignment))
        .route(
            "/assignments/:duty/:id",
            put(update_assignment).delete(delete_assignment),
        )
        .route("/upcoming", get(upcoming_assignments))
}

/// Next assignments of both duties, soonest first
pub async fn upcoming_assignments(
    State(state): State<AppState>,
    Query(params): Query<UpcomingParams>,
) -> impl IntoResponse {
    info!("GET /api/upcoming - from: {:?}, limit: {:?}", params.from, params.limit);

    let from = match params.from.as_deref().map(AssignmentMapper::parse_date).transpose() {
        Ok(from) => from.unwrap_or_else(|| chrono::Local::now().date_naive()),
        Err(message) => return (StatusCode::BAD_REQUEST, error_body(&message, "INVALID_INPUT")).into_response(),
    };
    let limit = params.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT);

    match state.assignment_service.upcoming_assignments(from, limit).await {
        Ok(upcoming) => {
            let response = AssignmentMapper::to_upcoming_response(from, upcoming);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list upcoming assignments: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Error retrieving assignments", "STORAGE_ERROR"),
            )
                .into_response()
        }
    }
}

/// List saved assignments grouped by month
pub async fn list_assignments(
    State(state): State<AppState>,
    Path(duty): Path<String>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    info!("GET /api/assignments/{} - search: {:?}", duty, params.search);

    let duty_type = match parse_duty(&duty) {
        Ok(duty_type) => duty_type,
        Err(response) => return response,
    };

    let query = AssignmentListQuery {
        duty_type,
        search: params.search,
    };

    match state.assignment_service.list_assignments(query).await {
        Ok(records) => {
            let total = records.len();
            let groups = group_by_month(&records);
            let response = AssignmentMapper::to_list_response(duty_type, total, groups);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list {} assignments: {:#}", duty_type, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Error retrieving assignments", "STORAGE_ERROR"),
            )
                .into_response()
        }
    }
}

/// Save an approved preview batch, all or nothing
pub async fn save_assignments(
    State(state): State<AppState>,
    Path(duty): Path<String>,
    Json(request): Json<SaveAssignmentsRequest>,
) -> impl IntoResponse {
    info!("POST /api/assignments/{} - {} records", duty, request.assignments.len());

    let duty_type = match parse_duty(&duty) {
        Ok(duty_type) => duty_type,
        Err(response) => return response,
    };

    let assignments = match request
        .assignments
        .into_iter()
        .map(AssignmentMapper::generated_to_domain)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(assignments) => assignments,
        Err(message) => return (StatusCode::BAD_REQUEST, error_body(&message, "INVALID_INPUT")).into_response(),
    };

    let command = SaveAssignmentsCommand {
        duty_type,
        assignments,
    };

    match state.assignment_service.save_generated(command).await {
        Ok(saved) => {
            let response = SaveAssignmentsResponse {
                success_message: format!("Saved {} {} assignments", saved.len(), duty_type),
                saved: AssignmentMapper::to_dto_list(saved),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => save_error_response(e),
    }
}

/// Add one assignment by hand
pub async fn create_assignment(
    State(state): State<AppState>,
    Path(duty): Path<String>,
    Json(request): Json<CreateAssignmentRequest>,
) -> impl IntoResponse {
    info!("POST /api/assignments/{}/new - request: {:?}", duty, request);

    let duty_type = match parse_duty(&duty) {
        Ok(duty_type) => duty_type,
        Err(response) => return response,
    };

    let date = match AssignmentMapper::parse_date(&request.date) {
        Ok(date) => date,
        Err(message) => return (StatusCode::BAD_REQUEST, error_body(&message, "INVALID_INPUT")).into_response(),
    };

    let command = CreateAssignmentCommand {
        duty_type,
        date,
        assignee: AssignmentMapper::assignee_to_domain(request.assignee),
        annotation: request.annotation,
    };

    match state.assignment_service.create_assignment(command).await {
        Ok(created) => {
            let response = AssignmentResponse {
                success_message: format!("Assignment for {} created", AssignmentMapper::format_date(created.date)),
                assignment: AssignmentMapper::to_dto(created),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => save_error_response(e),
    }
}

/// Partially update one assignment
pub async fn update_assignment(
    State(state): State<AppState>,
    Path((duty, id)): Path<(String, u64)>,
    Json(request): Json<UpdateAssignmentRequest>,
) -> impl IntoResponse {
    info!("PUT /api/assignments/{}/{} - request: {:?}", duty, id, request);

    let duty_type = match parse_duty(&duty) {
        Ok(duty_type) => duty_type,
        Err(response) => return response,
    };

    let date = match request.date.as_deref().map(AssignmentMapper::parse_date).transpose() {
        Ok(date) => date,
        Err(message) => return (StatusCode::BAD_REQUEST, error_body(&message, "INVALID_INPUT")).into_response(),
    };

    let command = UpdateAssignmentCommand {
        duty_type,
        id,
        date,
        day_label: request.day_label,
        month_label: request.month_label,
        assignee: request.assignee.map(AssignmentMapper::assignee_to_domain),
        annotation: request.annotation,
    };

    match state.assignment_service.update_assignment(command).await {
        Ok(updated) => {
            let response = AssignmentResponse {
                success_message: format!("Assignment {} updated", updated.id),
                assignment: AssignmentMapper::to_dto(updated),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => save_error_response(e),
    }
}

pub async fn delete_assignment(
    State(state): State<AppState>,
    Path((duty, id)): Path<(String, u64)>,
) -> impl IntoResponse {
    info!("DELETE /api/assignments/{}/{}", duty, id);

    let duty_type = match parse_duty(&duty) {
        Ok(duty_type) => duty_type,
        Err(response) => return response,
    };

    match state.assignment_service.delete_assignment(duty_type, id).await {
        Ok(()) => {
            let response = DeleteAssignmentResponse {
                deleted: true,
                success_message: format!("Assignment {} deleted", id),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => save_error_response(e),
    }
}

/// Translate a save failure; duplicate dates get their own body and status
fn save_error_response(e: SaveError) -> Response {
    match e {
        SaveError::DuplicateDates(dates) => {
            warn!("Duplicate dates: {}", format_dates(&dates));
            let response = DuplicateDatesResponse {
                error_message: SaveError::DuplicateDates(dates.clone()).to_string(),
                duplicate_dates: dates.iter().map(|date| AssignmentMapper::format_date(*date)).collect(),
            };
            (StatusCode::CONFLICT, Json(response)).into_response()
        }
        SaveError::InvalidBatch(_) | SaveError::InvalidAssignment(_) => {
            warn!("Rejected assignment request: {}", e);
            (StatusCode::BAD_REQUEST, error_body(&e.to_string(), "INVALID_INPUT")).into_response()
        }
        SaveError::NotFound(_) => {
            (StatusCode::NOT_FOUND, error_body(&e.to_string(), "NOT_FOUND")).into_response()
        }
        SaveError::Storage(ref cause) => {
            error!("Storage failure while saving assignments: {:#}", cause);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Error saving assignments", "STORAGE_ERROR"),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::io::rest::test_support::{send, setup_test_state};
    use axum::http::Method;
    use serde_json::{json, Value};
    use shared::{AssigneeDto, AssignmentListResponse, UpcomingAssignmentsResponse};

    fn field_service_batch() -> Value {
        json!({
            "assignments": [
                {
                    "date": "2025-09-07",
                    "day_label": "Sunday, 7 of September of 2025",
                    "month_label": null,
                    "assignee": { "leader": "Ana" },
                    "duty_type": "field-service"
                },
                {
                    "date": "2025-09-14",
                    "day_label": "Sunday, 14 of September of 2025",
                    "month_label": null,
                    "assignee": { "leader": "Caio" },
                    "duty_type": "field-service"
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_save_then_conflict() {
        let (state, _env) = setup_test_state().await;
        let app = router().with_state(state);

        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/assignments/field-service",
            Some(field_service_batch()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let saved: SaveAssignmentsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(saved.saved.len(), 2);

        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/assignments/field-service",
            Some(field_service_batch()),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        let conflict: DuplicateDatesResponse = serde_json::from_value(body).unwrap();
        assert_eq!(conflict.duplicate_dates, vec!["2025-09-07", "2025-09-14"]);
        assert!(conflict.error_message.contains("already exist"));

        let (_, body) = send(app, Method::GET, "/assignments/field-service", None).await;
        let list: AssignmentListResponse = serde_json::from_value(body).unwrap();
        assert_eq!(list.total, 2);
    }

    #[tokio::test]
    async fn test_batch_for_other_duty_is_bad_request() {
        let (state, _env) = setup_test_state().await;
        let app = router().with_state(state);

        let (status, body) = send(
            app,
            Method::POST,
            "/assignments/cleaning",
            Some(field_service_batch()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_create_update_and_delete() {
        let (state, _env) = setup_test_state().await;
        let app = router().with_state(state);

        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/assignments/cleaning/new",
            Some(json!({
                "date": "2025-09-03",
                "assignee": { "group": ["Ana", " Beto "] }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: AssignmentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(created.assignment.day_label, "Wednesday, 3 of September of 2025");
        assert_eq!(created.assignment.month_label.as_deref(), Some("September"));
        assert_eq!(created.assignment.display_name, "Ana, Beto");

        let uri = format!("/assignments/cleaning/{}", created.assignment.id);
        let (status, body) = send(
            app.clone(),
            Method::PUT,
            &uri,
            Some(json!({ "assignee": { "group": ["Caio"] }, "annotation": "bring gloves" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let updated: AssignmentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(updated.assignment.assignee, AssigneeDto::Group(vec!["Caio".to_string()]));
        assert_eq!(updated.assignment.annotation.as_deref(), Some("bring gloves"));

        let (status, _) = send(
            app.clone(),
            Method::PUT,
            &uri,
            Some(json!({ "assignee": { "group": [] } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(app.clone(), Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], true);

        let (status, body) = send(app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_upcoming_across_duties() {
        let (state, _env) = setup_test_state().await;
        let app = router().with_state(state);

        send(
            app.clone(),
            Method::POST,
            "/assignments/field-service",
            Some(field_service_batch()),
        )
        .await;
        send(
            app.clone(),
            Method::POST,
            "/assignments/cleaning/new",
            Some(json!({ "date": "2025-09-10", "assignee": { "group": ["Beto"] } })),
        )
        .await;

        let (status, body) = send(app.clone(), Method::GET, "/upcoming?from=2025-09-08", None).await;
        assert_eq!(status, StatusCode::OK);
        let upcoming: UpcomingAssignmentsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(upcoming.from, "2025-09-08");
        let dates: Vec<&str> = upcoming
            .assignments
            .iter()
            .map(|item| item.assignment.date.as_str())
            .collect();
        assert_eq!(dates, vec!["2025-09-10", "2025-09-14"]);
        assert_eq!(upcoming.assignments[0].duty_type, shared::DutyType::Cleaning);
        assert_eq!(upcoming.assignments[1].assignment.display_name, "Caio");

        let (_, body) = send(app.clone(), Method::GET, "/upcoming?from=2025-09-01&limit=1", None).await;
        let first_only: UpcomingAssignmentsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(first_only.assignments.len(), 1);
        assert_eq!(first_only.assignments[0].assignment.date, "2025-09-07");

        let (status, body) = send(app, Method::GET, "/upcoming?from=soon", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_list_search_filters() {
        let (state, _env) = setup_test_state().await;
        let app = router().with_state(state);

        send(
            app.clone(),
            Method::POST,
            "/assignments/field-service",
            Some(field_service_batch()),
        )
        .await;

        let (status, body) = send(app, Method::GET, "/assignments/field-service?search=cai", None).await;
        assert_eq!(status, StatusCode::OK);
        let list: AssignmentListResponse = serde_json::from_value(body).unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.month_groups.len(), 1);
        assert_eq!(list.month_groups[0].assignments[0].display_name, "Caio");
    }
}
