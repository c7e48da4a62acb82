//! Preview generation for the duty roster.
//!
//! Ties the calendar partitioner, the rotation assigner and the materializer
//! together. Generation is pure: it reads no storage and produces a preview
//! the caller reviews before anything is saved.
//!
//! ## Key Responsibilities
//!
//! - **Input Validation**: Start date and duration are checked before any work
//! - **Week Buckets**: Monday-anchored buckets for the requested window
//! - **Week Selection**: Cleaning weeks picked by index, all weeks when none is picked
//! - **Preview**: One generated assignment per target day

use chrono::NaiveDate;
use log::{debug, info};
use std::sync::Arc;

use crate::backend::domain::calendar::partition_weeks;
use crate::backend::domain::commands::generation::{
    GeneratePreviewCommand, PreviewResult, WeekWindowQuery,
};
use crate::backend::domain::locale::DateFormatter;
use crate::backend::domain::materializer::materialize;
use crate::backend::domain::models::{GenerationError, WeekBucket};
use crate::backend::domain::rotation::{assign_rotation, RotationList};

/// Service generating assignment previews
#[derive(Clone)]
pub struct GeneratorService {
    formatter: Arc<dyn DateFormatter>,
    default_duration_months: u32,
    max_duration_months: u32,
}

impl GeneratorService {
    pub fn new(
        formatter: Arc<dyn DateFormatter>,
        default_duration_months: u32,
        max_duration_months: u32,
    ) -> Self {
        Self {
            formatter,
            default_duration_months,
            max_duration_months,
        }
    }

    /// Validated reference date and duration of a window query
    fn resolve_window(&self, query: &WeekWindowQuery) -> Result<(NaiveDate, u32), GenerationError> {
        let raw = query
            .start_date
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(GenerationError::MissingStartDate)?;

        let reference_date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| GenerationError::InvalidStartDate(raw.to_string()))?;

        let duration_months = query.duration_months.unwrap_or(self.default_duration_months);
        if duration_months == 0 || duration_months > self.max_duration_months {
            return Err(GenerationError::InvalidDuration {
                given: duration_months,
                max: self.max_duration_months,
            });
        }

        Ok((reference_date, duration_months))
    }

    /// Week buckets of the requested window, none selected
    pub fn compute_weeks(&self, query: &WeekWindowQuery) -> Result<Vec<WeekBucket>, GenerationError> {
        let (reference_date, duration_months) = self.resolve_window(query)?;
        partition_weeks(reference_date, duration_months)
    }

    /// Generate a preview batch. Fails before producing anything on invalid input.
    pub fn generate_preview(&self, command: GeneratePreviewCommand) -> Result<PreviewResult, GenerationError> {
        let duty_type = command.duty_type;
        let mut weeks = self.compute_weeks(&command.window)?;
        select_weeks(&mut weeks, &command.selected_weeks)?;

        let rotation = RotationList::parse(&command.rotation_text);
        debug!(
            "Generating {} preview over {} weeks with {} rotation entries",
            duty_type,
            weeks.len(),
            rotation.len()
        );

        let plans = assign_rotation(duty_type, &weeks, &rotation, self.formatter.unassigned_leader());
        let assignments = materialize(duty_type, &plans, self.formatter.as_ref());

        let result = PreviewResult {
            duty_type,
            weeks,
            plans,
            assignments,
        };
        info!(
            "Generated {} {} assignments across {} productive weeks",
            result.assignments.len(),
            duty_type,
            result.productive_weeks()
        );
        Ok(result)
    }
}

/// Mark the buckets at `indices` as selected
fn select_weeks(weeks: &mut [WeekBucket], indices: &[usize]) -> Result<(), GenerationError> {
    let available = weeks.len();
    for &index in indices {
        let bucket = weeks
            .get_mut(index)
            .ok_or(GenerationError::UnknownWeek { index, available })?;
        bucket.selected = true;
    }
    Ok(())
}
