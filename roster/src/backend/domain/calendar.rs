//! Calendar partitioning and weekday filtering for the roster.
//!
//! A generation window starts on the first day of the reference month and
//! ends, inclusively, `duration_months` later on the first of that month.
//! Days are grouped into buckets that close on Sunday. Every bucket after the
//! first starts on a Monday; the first and the last may be shorter than seven
//! days.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use shared::DutyType;

use crate::backend::domain::models::{GenerationError, WeekBucket};

/// Weekdays that need coverage for a duty type
pub fn target_weekdays(duty_type: DutyType) -> &'static [Weekday] {
    match duty_type {
        DutyType::Cleaning => &[Weekday::Wed, Weekday::Sun],
        DutyType::FieldService => &[Weekday::Sun],
    }
}

/// Whether `date` falls on one of the duty's weekdays
pub fn is_target_day(duty_type: DutyType, date: NaiveDate) -> bool {
    target_weekdays(duty_type).contains(&date.weekday())
}

/// Days of `bucket` that need coverage. An empty result marks a silent week.
pub fn target_days(duty_type: DutyType, bucket: &WeekBucket) -> Vec<NaiveDate> {
    bucket
        .days()
        .filter(|day| is_target_day(duty_type, *day))
        .collect()
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Inclusive `(first, last)` day range of the generation window
pub fn window_range(
    reference_date: NaiveDate,
    duration_months: u32,
) -> Result<(NaiveDate, NaiveDate), GenerationError> {
    let month_start = first_of_month(reference_date);
    let end = month_start
        .checked_add_months(Months::new(duration_months))
        .ok_or(GenerationError::DateOutOfRange(month_start))?;
    Ok((month_start, end))
}

/// Split the generation window into ordered week buckets.
///
/// A bucket closes after every Sunday; a trailing bucket that does not reach
/// Sunday is closed as-is. Every bucket starts unselected.
pub fn partition_weeks(
    reference_date: NaiveDate,
    duration_months: u32,
) -> Result<Vec<WeekBucket>, GenerationError> {
    let (first, last) = window_range(reference_date, duration_months)?;

    let mut buckets = Vec::new();
    let mut open: Option<NaiveDate> = None;

    for day in first.iter_days().take_while(|day| *day <= last) {
        let bucket_start = *open.get_or_insert(day);
        if day.weekday() == Weekday::Sun {
            buckets.push(WeekBucket::new(bucket_start, day));
            open = None;
        }
    }

    if let Some(bucket_start) = open {
        buckets.push(WeekBucket::new(bucket_start, last));
    }

    log::debug!(
        "Partitioned {}..={} into {} weeks",
        first,
        last,
        buckets.len()
    );

    Ok(buckets)
}
