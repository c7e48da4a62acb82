//! Domain errors for generation and saving.
use chrono::NaiveDate;

/// Reasons a preview cannot be generated. Nothing partial is produced.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Start date is required")]
    MissingStartDate,
    #[error("Invalid start date '{0}', expected YYYY-MM-DD")]
    InvalidStartDate(String),
    #[error("Duration must be between 1 and {max} months, got {given}")]
    InvalidDuration { given: u32, max: u32 },
    #[error("Week {index} does not exist, the window has {available} weeks")]
    UnknownWeek { index: usize, available: usize },
    #[error("Generation window starting {0} is out of the supported date range")]
    DateOutOfRange(NaiveDate),
}

/// Reasons a save, create or update was rejected. No partial write happens.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Some of these dates already exist: {}", format_dates(.0))]
    DuplicateDates(Vec<NaiveDate>),
    #[error("Invalid batch: {0}")]
    InvalidBatch(String),
    #[error("Invalid assignment: {0}")]
    InvalidAssignment(String),
    #[error("Assignment {0} not found")]
    NotFound(u64),
    #[error("Storage failure: {0}")]
    Storage(anyhow::Error),
}

impl SaveError {
    /// Whether the caller should tell the user that dates already exist
    pub fn is_duplicate_dates(&self) -> bool {
        matches!(self, SaveError::DuplicateDates(_))
    }
}

/// Render dates as a comma-separated ISO list
pub fn format_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
