//! # CSV Assignment Repository
//!
//! This module provides a file-based assignment storage implementation
//! using one CSV file per duty type in the data directory.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── roster_config.yaml
//! ├── cleaning_assignments.csv        ← managed here
//! └── field_service_assignments.csv   ← managed here
//! ```
//!
//! ## CSV Format
//!
//! ```csv
//! id,date,month_label,day_label,members,observation
//! 1,2025-09-03,Setembro,"quarta-feira, 3 de setembro de 2025","Ana, Beto",
//! ```
//!
//! ```csv
//! id,date,day_label,leader,special_marker
//! 1,2025-12-14,"domingo, 14 de dezembro de 2025",Alonso,Assembleia de Circuito
//! ```
//!
//! ## Features
//!
//! - Date uniqueness checked under a lock shared by every repository of a connection
//! - All-or-nothing batch inserts
//! - Atomic file writes with temp files
//! - Ids assigned as `max(id) + 1`

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{Reader, WriterBuilder};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use shared::DutyType;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};

use super::connection::CsvConnection;
use crate::backend::domain::models::{split_names, Assignee, AssignmentDraft, PersistedAssignment};
use crate::backend::storage::traits::{AssignmentStorage, StoreError};

/// CSV record structure for cleaning assignments
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CleaningRecord {
    id: u64,
    date: NaiveDate,
    month_label: String,
    day_label: String,
    members: String,
    observation: Option<String>,
}

/// CSV record structure for field-service assignments
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FieldServiceRecord {
    id: u64,
    date: NaiveDate,
    day_label: String,
    leader: String,
    special_marker: Option<String>,
}

impl From<CleaningRecord> for PersistedAssignment {
    fn from(record: CleaningRecord) -> Self {
        PersistedAssignment {
            id: record.id,
            date: record.date,
            day_label: record.day_label,
            month_label: Some(record.month_label),
            assignee: Assignee::Group(split_names(&record.members)),
            annotation: record.observation.filter(|text| !text.is_empty()),
        }
    }
}

impl TryFrom<&PersistedAssignment> for CleaningRecord {
    type Error = anyhow::Error;

    fn try_from(assignment: &PersistedAssignment) -> Result<Self> {
        match &assignment.assignee {
            Assignee::Group(names) => Ok(CleaningRecord {
                id: assignment.id,
                date: assignment.date,
                month_label: assignment.month_label.clone().unwrap_or_default(),
                day_label: assignment.day_label.clone(),
                members: names.join(", "),
                observation: assignment.annotation.clone(),
            }),
            Assignee::Leader(_) => Err(anyhow::anyhow!(
                "Cleaning assignment {} must have a group of names, not a leader",
                assignment.id
            )),
        }
    }
}

impl From<FieldServiceRecord> for PersistedAssignment {
    fn from(record: FieldServiceRecord) -> Self {
        PersistedAssignment {
            id: record.id,
            date: record.date,
            day_label: record.day_label,
            month_label: None,
            assignee: Assignee::Leader(record.leader),
            annotation: record.special_marker.filter(|text| !text.is_empty()),
        }
    }
}

impl TryFrom<&PersistedAssignment> for FieldServiceRecord {
    type Error = anyhow::Error;

    fn try_from(assignment: &PersistedAssignment) -> Result<Self> {
        match &assignment.assignee {
            Assignee::Leader(leader) => Ok(FieldServiceRecord {
                id: assignment.id,
                date: assignment.date,
                day_label: assignment.day_label.clone(),
                leader: leader.clone(),
                special_marker: assignment.annotation.clone(),
            }),
            Assignee::Group(_) => Err(anyhow::anyhow!(
                "Field-service assignment {} must have a leader, not a group",
                assignment.id
            )),
        }
    }
}

/// CSV-based assignment repository, one file per duty type
#[derive(Clone)]
pub struct AssignmentRepository {
    connection: CsvConnection,
}

impl AssignmentRepository {
    /// Create a new CSV assignment repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read all assignments of a duty type, ordered by date ascending
    fn read_assignments(&self, duty_type: DutyType) -> Result<Vec<PersistedAssignment>> {
        self.connection.ensure_assignments_file_exists(duty_type)?;

        let file_path = self.connection.assignments_file_path(duty_type);
        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut assignments: Vec<PersistedAssignment> = match duty_type {
            DutyType::Cleaning => csv_reader
                .deserialize::<CleaningRecord>()
                .map(|row| row.map(PersistedAssignment::from))
                .collect::<Result<_, _>>(),
            DutyType::FieldService => csv_reader
                .deserialize::<FieldServiceRecord>()
                .map(|row| row.map(PersistedAssignment::from))
                .collect::<Result<_, _>>(),
        }
        .with_context(|| format!("Failed to parse {}", file_path.display()))?;

        assignments.sort_by_key(|assignment| assignment.date);
        Ok(assignments)
    }

    /// Write all assignments of a duty type, replacing the file atomically
    fn write_assignments(&self, duty_type: DutyType, assignments: &[PersistedAssignment]) -> Result<()> {
        let file_path = self.connection.assignments_file_path(duty_type);
        let temp_path = file_path.with_extension("csv.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(CsvConnection::assignments_header(duty_type).as_bytes())?;

            let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
            for assignment in assignments {
                match duty_type {
                    DutyType::Cleaning => csv_writer.serialize(CleaningRecord::try_from(assignment)?)?,
                    DutyType::FieldService => {
                        csv_writer.serialize(FieldServiceRecord::try_from(assignment)?)?
                    }
                }
            }
            csv_writer.flush()?;
        }

        // Atomic move from temp to final file
        std::fs::rename(&temp_path, &file_path)?;
        debug!("Wrote {} {} assignments to {}", assignments.len(), duty_type, file_path.display());
        Ok(())
    }
}

/// Dates in `drafts` that are already taken or that repeat inside the batch
fn colliding_dates(existing: &[PersistedAssignment], drafts: &[AssignmentDraft]) -> Vec<NaiveDate> {
    let taken: HashSet<NaiveDate> = existing.iter().map(|assignment| assignment.date).collect();
    let mut seen = HashSet::new();
    let mut collisions: Vec<NaiveDate> = drafts
        .iter()
        .filter(|draft| taken.contains(&draft.date) || !seen.insert(draft.date))
        .map(|draft| draft.date)
        .collect();
    collisions.sort();
    collisions.dedup();
    collisions
}

#[async_trait]
impl AssignmentStorage for AssignmentRepository {
    async fn insert_many(
        &self,
        duty_type: DutyType,
        drafts: &[AssignmentDraft],
    ) -> Result<Vec<PersistedAssignment>, StoreError> {
        let lock = self.connection.write_lock();
        let _guard = lock.lock().await;

        let mut assignments = self.read_assignments(duty_type)?;

        let collisions = colliding_dates(&assignments, drafts);
        if !collisions.is_empty() {
            warn!(
                "Rejecting {} {} assignments: {} dates already taken",
                drafts.len(),
                duty_type,
                collisions.len()
            );
            return Err(StoreError::DuplicateDates(collisions));
        }

        let first_id = assignments.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let inserted: Vec<PersistedAssignment> = drafts
            .iter()
            .cloned()
            .zip(first_id..)
            .map(|(draft, id)| draft.with_id(id))
            .collect();

        assignments.extend(inserted.iter().cloned());
        assignments.sort_by_key(|assignment| assignment.date);
        self.write_assignments(duty_type, &assignments)?;

        info!("Stored {} {} assignments", inserted.len(), duty_type);
        Ok(inserted)
    }

    async fn list_recent(&self, duty_type: DutyType, limit: usize) -> Result<Vec<PersistedAssignment>> {
        let mut assignments = self.read_assignments(duty_type)?;
        assignments.reverse();
        assignments.truncate(limit);
        Ok(assignments)
    }

    async fn list_assignments(
        &self,
        duty_type: DutyType,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PersistedAssignment>> {
        let assignments = self.read_assignments(duty_type)?;
        Ok(assignments
            .into_iter()
            .filter(|a| start_date.map_or(true, |start| a.date >= start))
            .filter(|a| end_date.map_or(true, |end| a.date <= end))
            .collect())
    }

    async fn get_assignment(&self, duty_type: DutyType, id: u64) -> Result<Option<PersistedAssignment>> {
        let assignments = self.read_assignments(duty_type)?;
        Ok(assignments.into_iter().find(|assignment| assignment.id == id))
    }

    async fn update_assignment(
        &self,
        duty_type: DutyType,
        assignment: &PersistedAssignment,
    ) -> Result<bool, StoreError> {
        let lock = self.connection.write_lock();
        let _guard = lock.lock().await;

        let mut assignments = self.read_assignments(duty_type)?;

        if assignments
            .iter()
            .any(|other| other.id != assignment.id && other.date == assignment.date)
        {
            return Err(StoreError::DuplicateDates(vec![assignment.date]));
        }

        let Some(slot) = assignments.iter_mut().find(|a| a.id == assignment.id) else {
            return Ok(false);
        };
        *slot = assignment.clone();

        assignments.sort_by_key(|a| a.date);
        self.write_assignments(duty_type, &assignments)?;
        info!("Updated {} assignment {}", duty_type, assignment.id);
        Ok(true)
    }

    async fn delete_assignment(&self, duty_type: DutyType, id: u64) -> Result<bool> {
        let lock = self.connection.write_lock();
        let _guard = lock.lock().await;

        let mut assignments = self.read_assignments(duty_type)?;
        let before = assignments.len();
        assignments.retain(|assignment| assignment.id != id);

        if assignments.len() == before {
            debug!("No {} assignment {} to delete", duty_type, id);
            return Ok(false);
        }

        self.write_assignments(duty_type, &assignments)?;
        info!("Deleted {} assignment {}", duty_type, id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::{cleaning_draft, field_service_draft, TestEnvironment};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_read_back_cleaning() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AssignmentRepository::new(env.connection.clone());

        let mut draft = cleaning_draft(date(2025, 9, 3), &["Ana", "Beto"]);
        draft.annotation = Some("levar luvas, por favor".to_string());
        let inserted = repo.insert_many(DutyType::Cleaning, &[draft.clone()]).await.unwrap();

        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].id, 1);

        let stored = repo.get_assignment(DutyType::Cleaning, 1).await.unwrap().unwrap();
        assert_eq!(stored, draft.with_id(1));
    }

    #[tokio::test]
    async fn test_field_service_round_trip_keeps_marker() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AssignmentRepository::new(env.connection.clone());

        let mut draft = field_service_draft(date(2025, 12, 14), "Alonso Gomes");
        draft.annotation = Some("Assembleia de Circuito".to_string());
        repo.insert_many(DutyType::FieldService, &[draft.clone()]).await.unwrap();

        let stored = repo.list_assignments(DutyType::FieldService, None, None).await.unwrap();
        assert_eq!(stored, vec![draft.with_id(1)]);
        assert!(repo.list_assignments(DutyType::Cleaning, None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_date_rejects_whole_batch() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AssignmentRepository::new(env.connection.clone());

        repo.insert_many(DutyType::Cleaning, &[cleaning_draft(date(2025, 9, 7), &["Caio"])])
            .await
            .unwrap();

        let batch = vec![
            cleaning_draft(date(2025, 9, 3), &["Ana"]),
            cleaning_draft(date(2025, 9, 7), &["Beto"]),
            cleaning_draft(date(2025, 9, 10), &["Caio"]),
        ];
        let result = repo.insert_many(DutyType::Cleaning, &batch).await;

        match result {
            Err(StoreError::DuplicateDates(dates)) => assert_eq!(dates, vec![date(2025, 9, 7)]),
            other => panic!("expected duplicate dates, got {:?}", other.map(|v| v.len())),
        }
        let stored = repo.list_assignments(DutyType::Cleaning, None, None).await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_date_inside_batch_is_a_duplicate() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AssignmentRepository::new(env.connection.clone());

        let batch = vec![
            field_service_draft(date(2025, 9, 7), "Ana"),
            field_service_draft(date(2025, 9, 7), "Caio"),
        ];
        let result = repo.insert_many(DutyType::FieldService, &batch).await;
        assert!(matches!(result, Err(StoreError::DuplicateDates(ref d)) if d == &vec![date(2025, 9, 7)]));
        assert!(repo.list_recent(DutyType::FieldService, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_same_date_allowed_across_duty_types() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AssignmentRepository::new(env.connection.clone());

        repo.insert_many(DutyType::Cleaning, &[cleaning_draft(date(2025, 9, 7), &["Ana"])])
            .await
            .unwrap();
        repo.insert_many(DutyType::FieldService, &[field_service_draft(date(2025, 9, 7), "Caio")])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_recent_is_date_descending() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AssignmentRepository::new(env.connection.clone());

        // Inserted out of date order on purpose
        let batch = vec![
            field_service_draft(date(2025, 9, 21), "C"),
            field_service_draft(date(2025, 9, 7), "A"),
            field_service_draft(date(2025, 9, 14), "B"),
        ];
        repo.insert_many(DutyType::FieldService, &batch).await.unwrap();

        let recent = repo.list_recent(DutyType::FieldService, 2).await.unwrap();
        let dates: Vec<NaiveDate> = recent.iter().map(|a| a.date).collect();
        assert_eq!(dates, vec![date(2025, 9, 21), date(2025, 9, 14)]);

        let ranged = repo
            .list_assignments(DutyType::FieldService, Some(date(2025, 9, 8)), Some(date(2025, 9, 21)))
            .await
            .unwrap();
        assert_eq!(ranged.len(), 2);
        assert_eq!(ranged[0].date, date(2025, 9, 14));
    }

    #[tokio::test]
    async fn test_ids_continue_after_existing_records() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AssignmentRepository::new(env.connection.clone());

        repo.insert_many(DutyType::Cleaning, &[cleaning_draft(date(2025, 9, 3), &["Ana"])])
            .await
            .unwrap();
        let second = repo
            .insert_many(
                DutyType::Cleaning,
                &[
                    cleaning_draft(date(2025, 9, 10), &["Beto"]),
                    cleaning_draft(date(2025, 9, 14), &["Caio"]),
                ],
            )
            .await
            .unwrap();
        let ids: Vec<u64> = second.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_update_rejects_taken_date() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AssignmentRepository::new(env.connection.clone());

        let inserted = repo
            .insert_many(
                DutyType::FieldService,
                &[
                    field_service_draft(date(2025, 9, 7), "Ana"),
                    field_service_draft(date(2025, 9, 14), "Caio"),
                ],
            )
            .await
            .unwrap();

        let mut moved = inserted[0].clone();
        moved.date = date(2025, 9, 14);
        let result = repo.update_assignment(DutyType::FieldService, &moved).await;
        assert!(matches!(result, Err(StoreError::DuplicateDates(_))));

        let mut renamed = inserted[0].clone();
        renamed.assignee = Assignee::Leader("Beto".to_string());
        assert!(repo.update_assignment(DutyType::FieldService, &renamed).await.unwrap());

        let missing = PersistedAssignment {
            id: 99,
            date: date(2025, 10, 5),
            ..renamed
        };
        assert!(!repo.update_assignment(DutyType::FieldService, &missing).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_assignment() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AssignmentRepository::new(env.connection.clone());

        repo.insert_many(DutyType::Cleaning, &[cleaning_draft(date(2025, 9, 3), &["Ana"])])
            .await
            .unwrap();
        assert!(repo.delete_assignment(DutyType::Cleaning, 1).await.unwrap());
        assert!(!repo.delete_assignment(DutyType::Cleaning, 1).await.unwrap());
        assert!(repo.get_assignment(DutyType::Cleaning, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_wrong_assignee_shape_fails_without_writing() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AssignmentRepository::new(env.connection.clone());

        let wrong = field_service_draft(date(2025, 9, 7), "Ana");
        let result = repo.insert_many(DutyType::Cleaning, &[wrong]).await;
        assert!(matches!(result, Err(StoreError::Other(_))));

        let content = std::fs::read_to_string(env.connection.assignments_file_path(DutyType::Cleaning)).unwrap();
        assert_eq!(content, CsvConnection::assignments_header(DutyType::Cleaning));
    }
}
