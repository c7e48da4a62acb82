//! Test utilities for file-backed storage tests.
//!
//! `TestEnvironment` owns a temporary data directory that is removed when the
//! environment is dropped, even if the test panics.

use anyhow::Result;
use chrono::NaiveDate;
use shared::DutyType;
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::CsvConnection;
use crate::backend::domain::locale::{LocaleFormatter, RosterLocale};
use crate::backend::domain::materializer::materialize_day;
use crate::backend::domain::models::{Assignee, AssignmentDraft};

/// RAII test environment with its own data directory
pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("duty_roster_")?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }
}

/// Cleaning draft with en-US labels derived from `date`
pub fn cleaning_draft(date: NaiveDate, members: &[&str]) -> AssignmentDraft {
    let assignee = Assignee::Group(members.iter().map(|name| name.to_string()).collect());
    draft(DutyType::Cleaning, date, assignee)
}

/// Field-service draft with en-US labels derived from `date`
pub fn field_service_draft(date: NaiveDate, leader: &str) -> AssignmentDraft {
    draft(DutyType::FieldService, date, Assignee::Leader(leader.to_string()))
}

fn draft(duty_type: DutyType, date: NaiveDate, assignee: Assignee) -> AssignmentDraft {
    let formatter = LocaleFormatter::new(RosterLocale::EnUs);
    materialize_day(duty_type, date, &assignee, &formatter).into_draft()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new().await?;
            base_path = env.base_path.clone();
            assert!(base_path.exists());
            std::fs::write(base_path.join("probe.txt"), "x")?;
        }
        assert!(!base_path.exists());
        Ok(())
    }

    #[test]
    fn test_drafts_carry_derived_labels() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        let draft = cleaning_draft(date, &["Ana"]);
        assert_eq!(draft.day_label, "Wednesday, 3 of September of 2025");
        assert_eq!(draft.month_label.as_deref(), Some("September"));
        assert_eq!(field_service_draft(date, "Caio").month_label, None);
    }
}
