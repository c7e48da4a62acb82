//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::DutyType;

use crate::backend::domain::models::{
    format_dates, AssignmentDraft, PersistedAssignment, RosterSettings,
};

/// Failure of a write that must keep date uniqueness
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// At least one date is already taken; nothing was written
    #[error("Dates already scheduled: {}", format_dates(.0))]
    DuplicateDates(Vec<NaiveDate>),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Trait defining the interface for assignment storage operations
///
/// Each duty type has its own store; `date` is unique inside it. The domain
/// layer only relies on "insert, failing if the date already exists" and on
/// reading recent history.
#[async_trait]
pub trait AssignmentStorage: Send + Sync {
    /// Insert every draft or none of them.
    /// Fails with `DuplicateDates` if a date exists already or repeats in the batch.
    async fn insert_many(
        &self,
        duty_type: DutyType,
        drafts: &[AssignmentDraft],
    ) -> Result<Vec<PersistedAssignment>, StoreError>;

    /// Most recent assignments, ordered by date descending
    async fn list_recent(&self, duty_type: DutyType, limit: usize) -> Result<Vec<PersistedAssignment>>;

    /// Assignments in chronological order with optional inclusive date bounds
    async fn list_assignments(
        &self,
        duty_type: DutyType,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PersistedAssignment>>;

    /// Retrieve a specific assignment by ID
    async fn get_assignment(&self, duty_type: DutyType, id: u64) -> Result<Option<PersistedAssignment>>;

    /// Replace an existing assignment
    /// Returns false if no assignment has that ID
    async fn update_assignment(
        &self,
        duty_type: DutyType,
        assignment: &PersistedAssignment,
    ) -> Result<bool, StoreError>;

    /// Delete a single assignment
    /// Returns true if the assignment was found and deleted, false otherwise
    async fn delete_assignment(&self, duty_type: DutyType, id: u64) -> Result<bool>;
}

/// Trait defining the interface for the editable settings
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    /// Current settings, defaults when nothing was saved yet
    async fn get_settings(&self) -> Result<RosterSettings>;

    /// Replace the stored settings
    async fn save_settings(&self, settings: &RosterSettings) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides a
/// factory for repositories, so the domain layer never names a backend.
pub trait Connection: Send + Sync + Clone {
    /// The type of AssignmentStorage this connection creates
    type AssignmentRepository: AssignmentStorage + Clone + 'static;

    /// The type of SettingsStorage this connection creates
    type SettingsRepository: SettingsStorage + Clone + 'static;

    /// Create a new assignment repository for this connection
    fn create_assignment_repository(&self) -> Self::AssignmentRepository;

    /// Create a new settings repository for this connection
    fn create_settings_repository(&self) -> Self::SettingsRepository;
}
