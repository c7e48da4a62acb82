//! # Backend Module
//!
//! Contains all non-UI logic for the duty roster.
//!
//! This module serves as the orchestration layer that brings together:
//! - **Domain**: Week buckets, rotation, preview generation, the persistence gate and settings
//! - **Storage**: CSV files and the YAML config in the data directory
//! - **IO**: The REST API that exposes the domain to clients
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (REST API, mappers)
//!     ↓
//! Domain Layer (generator, history, assignments)
//!     ↓
//! Storage Layer (CSV files, roster_config.yaml)
//! ```

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{bail, Result};
use axum::{http::Method, Router};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::backend::domain::{
    AssignmentService, DateFormatter, GeneratorService, HistoryService, LocaleFormatter,
    SettingsService,
};
use crate::backend::storage::{CsvConnection, RosterConfig, RosterConfigRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub config: RosterConfig,
    pub generator_service: GeneratorService,
    pub history_service: HistoryService<CsvConnection>,
    pub assignment_service: AssignmentService<CsvConnection>,
    pub settings_service: SettingsService<CsvConnection>,
}

/// Initialize the backend in the default data directory
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up data directory");
    let connection = CsvConnection::new_default()?;
    initialize_backend_with(connection)
}

/// Initialize the backend over an existing connection
pub fn initialize_backend_with(connection: CsvConnection) -> Result<AppState> {
    let config = RosterConfigRepository::new(connection.clone()).load_or_create()?;
    if config.max_duration_months == 0 {
        bail!("max_duration_months must be at least 1");
    }
    if config.default_duration_months == 0 || config.default_duration_months > config.max_duration_months {
        bail!(
            "default_duration_months must be between 1 and {}, got {}",
            config.max_duration_months,
            config.default_duration_months
        );
    }

    info!(
        "Setting up domain model (locale {:?}, data in {})",
        config.locale,
        connection.base_directory().display()
    );
    let formatter: Arc<dyn DateFormatter> = Arc::new(LocaleFormatter::new(config.locale));
    let connection = Arc::new(connection);

    let generator_service = GeneratorService::new(
        Arc::clone(&formatter),
        config.default_duration_months,
        config.max_duration_months,
    );
    let history_service = HistoryService::new(
        Arc::clone(&connection),
        formatter.unassigned_leader(),
        config.history_limit,
    );
    let assignment_service = AssignmentService::new(Arc::clone(&connection), formatter);
    let settings_service = SettingsService::new(connection);

    Ok(AppState {
        config,
        generator_service,
        history_service,
        assignment_service,
        settings_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .nest("/api", io::api_router())
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::io::rest::test_support::{send, setup_test_state};
    use crate::backend::storage::csv::test_utils::TestEnvironment;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_routes_are_nested_under_api() {
        let (state, _env) = setup_test_state().await;
        let app = create_router(state);

        let (status, _) = send(
            app.clone(),
            Method::GET,
            "/api/weeks?start_date=2025-09-01&duration_months=2",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(app, Method::GET, "/weeks?start_date=2025-09-01", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_default_config_is_written_on_first_start() {
        let env = TestEnvironment::new().await.unwrap();
        let state = initialize_backend_with(env.connection.clone()).unwrap();
        assert_eq!(state.config.history_limit, 20);
        assert!(env.base_path.join("roster_config.yaml").exists());
    }

    #[tokio::test]
    async fn test_inconsistent_durations_are_rejected() {
        let env = TestEnvironment::new().await.unwrap();
        std::fs::write(
            env.base_path.join("roster_config.yaml"),
            "default_duration_months: 6\nmax_duration_months: 4\n",
        )
        .unwrap();
        assert!(initialize_backend_with(env.connection.clone()).is_err());
    }
}
