//! Group profile and field-service meeting settings.
//!
//! These describe the group the rosters belong to. Generation never reads
//! them.

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::backend::domain::commands::settings::UpdateSettingsCommand;
use crate::backend::domain::models::RosterSettings;
use crate::backend::storage::{Connection, SettingsStorage};

#[derive(Clone)]
pub struct SettingsService<C: Connection> {
    repository: C::SettingsRepository,
}

impl<C: Connection> SettingsService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            repository: connection.create_settings_repository(),
        }
    }

    pub async fn get_settings(&self) -> Result<RosterSettings> {
        self.repository.get_settings().await
    }

    /// Apply the given fields, trimmed, and keep the rest
    pub async fn update_settings(&self, command: UpdateSettingsCommand) -> Result<RosterSettings> {
        let mut settings = self.repository.get_settings().await?;

        let fields = [
            (command.group_name, &mut settings.group.name),
            (command.semester_year, &mut settings.group.semester_year),
            (command.superintendent, &mut settings.group.superintendent),
            (command.assistant, &mut settings.group.assistant),
            (command.meeting_location, &mut settings.field_service.location),
            (command.meeting_time, &mut settings.field_service.meeting_time),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value.trim().to_string();
            }
        }

        self.repository.save_settings(&settings).await?;
        info!("Updated settings");
        Ok(settings)
    }
}
