//! Domain model for one week of the generation window.
use chrono::{Datelike, NaiveDate};

/// A Monday..Sunday span of the generation window.
///
/// The last bucket of a window may be truncated when the window does not end
/// on a Sunday. Buckets are recomputed whenever the window changes and are
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// "DD/MM to DD/MM"
    pub label: String,
    /// Only consulted for cleaning
    pub selected: bool,
}

impl WeekBucket {
    /// Create an unselected bucket spanning `start_date..=end_date`
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            label: format!(
                "{:02}/{:02} to {:02}/{:02}",
                start_date.day(),
                start_date.month(),
                end_date.day(),
                end_date.month()
            ),
            selected: false,
        }
    }

    /// Every day of the bucket in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |day| *day <= self.end_date)
    }

    /// Number of days covered (1..=7)
    pub fn len_days(&self) -> usize {
        (self.end_date - self.start_date).num_days() as usize + 1
    }
}
