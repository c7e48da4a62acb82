//! History sampling for seeding the rotation list.
//!
//! Reads the most recent saved assignments of a duty type and turns them into
//! rotation entries, oldest first, so the admin can continue where the last
//! roster stopped. A failed read never blocks generation; it yields no seed.

use log::{debug, error};
use shared::DutyType;
use std::collections::HashSet;
use std::sync::Arc;

use crate::backend::domain::commands::history::{HistorySeed, HistorySeedQuery};
use crate::backend::domain::models::PersistedAssignment;
use crate::backend::storage::{AssignmentStorage, Connection};

#[derive(Clone)]
pub struct HistoryService<C: Connection> {
    repository: C::AssignmentRepository,
    unassigned_leader: String,
    default_limit: usize,
}

impl<C: Connection> HistoryService<C> {
    pub fn new(connection: Arc<C>, unassigned_leader: impl Into<String>, default_limit: usize) -> Self {
        Self {
            repository: connection.create_assignment_repository(),
            unassigned_leader: unassigned_leader.into(),
            default_limit,
        }
    }

    /// Distinct recent assignees of a duty type, oldest first
    pub async fn sample_recent(&self, query: HistorySeedQuery) -> HistorySeed {
        let limit = query
            .limit
            .filter(|limit| *limit > 0)
            .unwrap_or(self.default_limit);

        match self.repository.list_recent(query.duty_type, limit).await {
            Ok(records) => {
                let entries = distinct_assignees(query.duty_type, &records, &self.unassigned_leader);
                debug!(
                    "History for {}: {} records, {} distinct entries",
                    query.duty_type,
                    records.len(),
                    entries.len()
                );
                HistorySeed { entries }
            }
            Err(e) => {
                error!("Failed to read {} history, continuing without seed: {:#}", query.duty_type, e);
                HistorySeed::default()
            }
        }
    }
}

/// De-duplicate assignees of records given newest first.
///
/// Each entry keeps the position of its most recent use; the result is in
/// chronological order. Blank entries and the field-service placeholder are
/// left out.
pub fn distinct_assignees(
    duty_type: DutyType,
    newest_first: &[PersistedAssignment],
    unassigned_leader: &str,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut entries: Vec<String> = newest_first
        .iter()
        .map(|record| record.assignee.joined())
        .filter(|entry| !entry.trim().is_empty())
        .filter(|entry| !(duty_type == DutyType::FieldService && entry == unassigned_leader))
        .filter(|entry| seen.insert(entry.clone()))
        .collect();
    entries.reverse();
    entries
}
