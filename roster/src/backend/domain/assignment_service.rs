//! Saved assignment management for the duty roster.
//!
//! This module holds the persistence gate that turns an approved preview into
//! saved records, plus the maintenance operations of the duty pages.
//!
//! ## Key Responsibilities
//!
//! - **Persistence Gate**: All-or-nothing batch saves, duplicate dates reported distinctly
//! - **Manual Records**: Creating a single assignment through the same gate
//! - **Listing**: Chronological listing with search and month grouping
//! - **Maintenance**: Updating and deleting single records
//! - **Upcoming**: The next assignments of both duties, soonest first
//!
//! ## Business Rules
//!
//! - At most one assignment per date inside each duty type
//! - Day and month labels follow the date unless the caller overrides them
//! - Cleaning records edited by hand need at least one member
//! - Blank annotations are stored as no annotation

use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, info, warn};
use shared::DutyType;
use std::sync::Arc;

use crate::backend::domain::commands::assignments::{
    AssignmentListQuery, CreateAssignmentCommand, MonthGroup, SaveAssignmentsCommand,
    UpcomingAssignment, UpdateAssignmentCommand,
};
use crate::backend::domain::locale::DateFormatter;
use crate::backend::domain::materializer::derive_labels;
use crate::backend::domain::models::{
    Assignee, AssignmentDraft, GeneratedAssignment, PersistedAssignment, SaveError,
};
use crate::backend::storage::{AssignmentStorage, Connection, StoreError};

impl From<StoreError> for SaveError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateDates(dates) => SaveError::DuplicateDates(dates),
            StoreError::Other(e) => SaveError::Storage(e),
        }
    }
}

#[derive(Clone)]
pub struct AssignmentService<C: Connection> {
    repository: C::AssignmentRepository,
    formatter: Arc<dyn DateFormatter>,
}

impl<C: Connection> AssignmentService<C> {
    pub fn new(connection: Arc<C>, formatter: Arc<dyn DateFormatter>) -> Self {
        Self {
            repository: connection.create_assignment_repository(),
            formatter,
        }
    }

    /// Save an approved preview batch.
    ///
    /// Either every record is stored or none is. A date that already exists,
    /// or repeats inside the batch, fails with `SaveError::DuplicateDates`.
    pub async fn save_generated(
        &self,
        command: SaveAssignmentsCommand,
    ) -> Result<Vec<PersistedAssignment>, SaveError> {
        let duty_type = command.duty_type;
        if command.assignments.is_empty() {
            return Err(SaveError::InvalidBatch("there are no assignments to save".to_string()));
        }
        for assignment in &command.assignments {
            check_batch_item(duty_type, assignment)?;
        }

        let drafts: Vec<AssignmentDraft> = command
            .assignments
            .into_iter()
            .map(GeneratedAssignment::into_draft)
            .collect();

        match self.repository.insert_many(duty_type, &drafts).await {
            Ok(saved) => {
                info!("✅ Saved {} {} assignments", saved.len(), duty_type);
                Ok(saved)
            }
            Err(e) => {
                warn!("Failed to save {} {} assignments: {}", drafts.len(), duty_type, e);
                Err(e.into())
            }
        }
    }

    /// Add one assignment by hand; labels are derived from its date
    pub async fn create_assignment(
        &self,
        command: CreateAssignmentCommand,
    ) -> Result<PersistedAssignment, SaveError> {
        let duty_type = command.duty_type;
        check_edited_assignee(duty_type, &command.assignee)?;

        let (day_label, month_label) = derive_labels(duty_type, command.date, self.formatter.as_ref());
        let draft = AssignmentDraft {
            date: command.date,
            day_label,
            month_label,
            assignee: command.assignee,
            annotation: command.annotation.and_then(normalize_annotation),
        };

        let saved = self.repository.insert_many(duty_type, &[draft]).await?;
        saved
            .into_iter()
            .next()
            .ok_or_else(|| SaveError::Storage(anyhow::anyhow!("Store returned no record for the insert")))
    }

    /// All assignments of a duty type in date order, optionally filtered.
    ///
    /// The search matches any member or leader name, or the month label,
    /// ignoring case.
    pub async fn list_assignments(&self, query: AssignmentListQuery) -> Result<Vec<PersistedAssignment>> {
        let records = self
            .repository
            .list_assignments(query.duty_type, None, None)
            .await?;

        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase);

        Ok(match needle {
            Some(needle) => records
                .into_iter()
                .filter(|record| matches_search(record, &needle))
                .collect(),
            None => records,
        })
    }

    /// At most `limit` assignments dated `from` or later, across both duties.
    ///
    /// Sorted by date; on a shared date cleaning comes first.
    pub async fn upcoming_assignments(&self, from: NaiveDate, limit: usize) -> Result<Vec<UpcomingAssignment>> {
        let mut upcoming = Vec::new();
        for duty_type in [DutyType::Cleaning, DutyType::FieldService] {
            let records = self
                .repository
                .list_assignments(duty_type, Some(from), None)
                .await?;
            upcoming.extend(
                records
                    .into_iter()
                    .take(limit)
                    .map(|assignment| UpcomingAssignment { duty_type, assignment }),
            );
        }

        upcoming.sort_by_key(|item| item.assignment.date);
        upcoming.truncate(limit);
        debug!("{} upcoming assignments from {}", upcoming.len(), from);
        Ok(upcoming)
    }

    pub async fn get_assignment(&self, duty_type: DutyType, id: u64) -> Result<PersistedAssignment, SaveError> {
        self.repository
            .get_assignment(duty_type, id)
            .await
            .map_err(SaveError::Storage)?
            .ok_or(SaveError::NotFound(id))
    }

    /// Apply a partial update to one assignment
    pub async fn update_assignment(
        &self,
        command: UpdateAssignmentCommand,
    ) -> Result<PersistedAssignment, SaveError> {
        let duty_type = command.duty_type;
        let existing = self.get_assignment(duty_type, command.id).await?;
        let mut updated = existing.clone();

        if let Some(date) = command.date {
            if date != existing.date {
                let (day_label, month_label) = derive_labels(duty_type, date, self.formatter.as_ref());
                updated.date = date;
                updated.day_label = day_label;
                updated.month_label = month_label;
            }
        }

        if let Some(day_label) = command.day_label {
            updated.day_label = day_label;
        }
        if let Some(month_label) = command.month_label {
            if duty_type == DutyType::Cleaning {
                updated.month_label = Some(month_label);
            }
        }

        if let Some(assignee) = command.assignee {
            check_edited_assignee(duty_type, &assignee)?;
            updated.assignee = assignee;
        }

        if let Some(annotation) = command.annotation {
            updated.annotation = normalize_annotation(annotation);
        }

        if self.repository.update_assignment(duty_type, &updated).await? {
            info!("Updated {} assignment {}", duty_type, updated.id);
            Ok(updated)
        } else {
            Err(SaveError::NotFound(command.id))
        }
    }

    pub async fn delete_assignment(&self, duty_type: DutyType, id: u64) -> Result<(), SaveError> {
        if self
            .repository
            .delete_assignment(duty_type, id)
            .await
            .map_err(SaveError::Storage)?
        {
            info!("🗑️ Deleted {} assignment {}", duty_type, id);
            Ok(())
        } else {
            Err(SaveError::NotFound(id))
        }
    }
}

/// Group consecutive records sharing a month label
pub fn group_by_month(records: &[PersistedAssignment]) -> Vec<MonthGroup> {
    records.iter().fold(Vec::new(), |mut groups: Vec<MonthGroup>, record| {
        let month_label = record.month_label.clone().unwrap_or_default();
        match groups.last_mut() {
            Some(group) if group.month_label == month_label => group.assignments.push(record.clone()),
            _ => groups.push(MonthGroup {
                month_label,
                assignments: vec![record.clone()],
            }),
        }
        groups
    })
}

fn matches_search(record: &PersistedAssignment, needle: &str) -> bool {
    record
        .assignee
        .names()
        .iter()
        .any(|name| name.to_lowercase().contains(needle))
        || record
            .month_label
            .as_deref()
            .is_some_and(|label| label.to_lowercase().contains(needle))
}

fn normalize_annotation(annotation: String) -> Option<String> {
    let trimmed = annotation.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn check_batch_item(duty_type: DutyType, assignment: &GeneratedAssignment) -> Result<(), SaveError> {
    if assignment.duty_type != duty_type {
        return Err(SaveError::InvalidBatch(format!(
            "assignment for {} is {}, expected {}",
            assignment.date, assignment.duty_type, duty_type
        )));
    }
    if !assignment.assignee.matches(duty_type) {
        return Err(SaveError::InvalidBatch(format!(
            "assignment for {} has the wrong assignee shape for {}",
            assignment.date, duty_type
        )));
    }
    Ok(())
}

fn check_edited_assignee(duty_type: DutyType, assignee: &Assignee) -> Result<(), SaveError> {
    match (duty_type, assignee) {
        (DutyType::Cleaning, Assignee::Group(names)) if names.is_empty() => Err(
            SaveError::InvalidAssignment("a cleaning assignment needs at least one member".to_string()),
        ),
        (DutyType::FieldService, Assignee::Leader(name)) if name.trim().is_empty() => Err(
            SaveError::InvalidAssignment("a field-service assignment needs a leader".to_string()),
        ),
        (duty_type, assignee) if !assignee.matches(duty_type) => Err(SaveError::InvalidAssignment(
            format!("wrong assignee shape for {}", duty_type),
        )),
        _ => Ok(()),
    }
}
