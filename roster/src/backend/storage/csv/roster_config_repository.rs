//! # CSV Roster Config Repository
//!
//! File-based application settings stored as `roster_config.yaml` at the root
//! of the data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! locale: pt-BR
//! history_limit: 20
//! default_duration_months: 3
//! max_duration_months: 12
//! server_address: 127.0.0.1:3000
//! group:
//!   name: Grupo Centro
//!   semester_year: 2/2025
//!   superintendent: Alonso Gomes
//!   assistant: Clécio Morais
//! field_service:
//!   location: Salão do Reino
//!   meeting_time: 8h30
//! data_format_version: "1.0"
//! created_at: "2025-01-21T19:30:00+00:00"
//! updated_at: "2025-01-21T19:35:00+00:00"
//! ```
//!
//! Missing keys fall back to their defaults, so older files keep loading.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::backend::domain::locale::RosterLocale;
use crate::backend::domain::models::{FieldServiceMeeting, GroupProfile, RosterSettings};
use crate::backend::storage::traits::SettingsStorage;

const CONFIG_FILE_NAME: &str = "roster_config.yaml";

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Language of day and month labels
    pub locale: RosterLocale,
    /// How many recent records the history sampler reads
    pub history_limit: usize,
    /// Window length used when a request gives none
    pub default_duration_months: u32,
    /// Largest window a request may ask for
    pub max_duration_months: u32,
    /// Address the HTTP server binds to
    pub server_address: String,
    pub group: GroupProfile,
    /// Field-service meeting place and time
    pub field_service: FieldServiceMeeting,
    /// Data format version for future migrations
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            locale: RosterLocale::default(),
            history_limit: 20,
            default_duration_months: 3,
            max_duration_months: 12,
            server_address: "127.0.0.1:3000".to_string(),
            group: GroupProfile::default(),
            field_service: FieldServiceMeeting::default(),
            data_format_version: "1.0".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Loads and saves [`RosterConfig`] next to the assignment files
#[derive(Clone)]
pub struct RosterConfigRepository {
    connection: CsvConnection,
}

impl RosterConfigRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn config_path(&self) -> PathBuf {
        self.connection.base_directory().join(CONFIG_FILE_NAME)
    }

    /// Load the config file, creating it with defaults if it doesn't exist
    pub fn load_or_create(&self) -> Result<RosterConfig> {
        let config_path = self.config_path();

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: RosterConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Invalid config file {}", config_path.display()))?;
            debug!("Loaded roster config from {:?}", config_path);
            Ok(config)
        } else {
            let config = RosterConfig::default();
            self.save(&config)?;
            info!("Created default roster config at {:?}", config_path);
            Ok(config)
        }
    }

    /// Save the config, stamping `updated_at`
    pub fn save(&self, config: &RosterConfig) -> Result<()> {
        let config_path = self.config_path();
        let base_dir = self.connection.base_directory();

        if !base_dir.exists() {
            fs::create_dir_all(&base_dir)?;
            info!("Created base data directory: {:?}", base_dir);
        }

        let mut stamped = config.clone();
        stamped.updated_at = Utc::now().to_rfc3339();
        let yaml_content = serde_yaml::to_string(&stamped)?;

        // Write to a temp file, then rename
        let temp_path = config_path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &config_path)?;

        debug!("Saved roster config to {:?}", config_path);
        Ok(())
    }
}

#[async_trait]
impl SettingsStorage for RosterConfigRepository {
    async fn get_settings(&self) -> Result<RosterSettings> {
        let config = self.load_or_create()?;
        Ok(RosterSettings {
            group: config.group,
            field_service: config.field_service,
        })
    }

    async fn save_settings(&self, settings: &RosterSettings) -> Result<()> {
        let lock = self.connection.write_lock();
        let _guard = lock.lock().await;

        let mut config = self.load_or_create()?;
        config.group = settings.group.clone();
        config.field_service = settings.field_service.clone();
        self.save(&config)?;
        info!("Saved settings for group '{}'", config.group.name);
        Ok(())
    }
}
