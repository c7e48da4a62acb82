//! # REST API for Settings
//!
//! Endpoints for the group profile and the field-service meeting details.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{error, info};

use super::error_body;
use crate::backend::io::rest::mappers::SettingsMapper;
use crate::backend::AppState;
use shared::{UpdateSettingsRequest, UpdateSettingsResponse};

/// Create a router for settings APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}

pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/settings");

    match state.settings_service.get_settings().await {
        Ok(settings) => (StatusCode::OK, Json(SettingsMapper::to_dto(settings))).into_response(),
        Err(e) => {
            error!("Failed to read settings: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Error retrieving settings", "STORAGE_ERROR"),
            )
                .into_response()
        }
    }
}

/// Update some settings fields, keeping the others
pub async fn update_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> impl IntoResponse {
    info!("PUT /api/settings - request: {:?}", request);

    let command = SettingsMapper::to_command(request);
    match state.settings_service.update_settings(command).await {
        Ok(settings) => {
            let response = UpdateSettingsResponse {
                settings: SettingsMapper::to_dto(settings),
                success_message: "Settings saved".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to save settings: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Error saving settings", "STORAGE_ERROR"),
            )
                .into_response()
        }
    }
}
