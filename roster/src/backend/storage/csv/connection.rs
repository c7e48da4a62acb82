use anyhow::{Context, Result};
use log::{debug, info};
use shared::DutyType;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::assignment_repository::AssignmentRepository;
use super::roster_config_repository::RosterConfigRepository;
use crate::backend::storage::traits::Connection;

/// Environment variable that overrides the default data directory
pub const DATA_DIR_ENV: &str = "DUTY_ROSTER_DATA_DIR";

/// CsvConnection manages the data directory and one CSV file per duty type
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    /// Serializes read-check-write cycles so date uniqueness holds across writers
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Create a new CSV connection in the default data directory
    /// This uses `$DUTY_ROSTER_DATA_DIR` when set, else ~/Documents/Duty Roster
    pub fn new_default() -> Result<Self> {
        Self::new(Self::default_data_directory()?)
    }

    /// Resolve the default data directory without creating it
    pub fn default_data_directory() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            let dir = dir.trim();
            if !dir.is_empty() {
                info!("Using data directory from {}: {}", DATA_DIR_ENV, dir);
                return Ok(PathBuf::from(dir));
            }
        }

        let documents_dir = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = documents_dir.join("Duty Roster");
        info!("Using default data directory: {}", data_dir.display());
        Ok(data_dir)
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> PathBuf {
        self.base_directory.clone()
    }

    /// Get the CSV file path holding a duty type's assignments
    pub fn assignments_file_path(&self, duty_type: DutyType) -> PathBuf {
        let file_name = match duty_type {
            DutyType::Cleaning => "cleaning_assignments.csv",
            DutyType::FieldService => "field_service_assignments.csv",
        };
        self.base_directory.join(file_name)
    }

    /// CSV header line for a duty type's file
    pub fn assignments_header(duty_type: DutyType) -> &'static str {
        match duty_type {
            DutyType::Cleaning => "id,date,month_label,day_label,members,observation\n",
            DutyType::FieldService => "id,date,day_label,leader,special_marker\n",
        }
    }

    /// Ensure a duty type's CSV file exists with its header
    pub fn ensure_assignments_file_exists(&self, duty_type: DutyType) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
        }

        let file_path = self.assignments_file_path(duty_type);
        if !file_path.exists() {
            fs::write(&file_path, Self::assignments_header(duty_type))
                .with_context(|| format!("Failed to create {}", file_path.display()))?;
            debug!("Created assignments file: {}", file_path.display());
        }

        Ok(())
    }

    /// Lock held for the whole of a read-check-write cycle
    pub fn write_lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.write_lock)
    }
}

impl Connection for CsvConnection {
    type AssignmentRepository = AssignmentRepository;
    type SettingsRepository = RosterConfigRepository;

    fn create_assignment_repository(&self) -> Self::AssignmentRepository {
        AssignmentRepository::new(self.clone())
    }

    fn create_settings_repository(&self) -> Self::SettingsRepository {
        RosterConfigRepository::new(self.clone())
    }
}
