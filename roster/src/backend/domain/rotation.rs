//! Round-robin rotation over productive weeks.
//!
//! The rotation cursor only moves when a week yields at least one target
//! date, so the order of the rotation list maps 1:1 onto productive weeks.
//! The cursor is an explicit value threaded through a fold; there is no
//! shared mutable state.

use chrono::NaiveDate;
use shared::DutyType;

use crate::backend::domain::calendar::target_days;
use crate::backend::domain::models::{Assignee, WeekBucket};

/// Ordered rotation entries, one per non-blank line of input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationList {
    entries: Vec<String>,
}

impl RotationList {
    /// Parse raw input: one entry per line, trimmed, blank lines dropped
    pub fn parse(text: &str) -> Self {
        Self::from_entries(text.lines())
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| entry.as_ref().trim().to_string())
                .filter(|entry| !entry.is_empty())
                .collect(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `position` modulo the list length
    pub fn entry_at(&self, position: usize) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.entries[position % self.entries.len()].as_str())
    }
}

/// Position in the rotation list; starts at zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationCursor {
    position: usize,
}

impl RotationCursor {
    pub fn position(&self) -> usize {
        self.position
    }

    fn advanced(self) -> Self {
        Self {
            position: self.position + 1,
        }
    }
}

/// Assignment decided for one processed week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekPlan {
    pub bucket: WeekBucket,
    pub target_days: Vec<NaiveDate>,
    pub assignee: Assignee,
    /// Rotation position consumed by this week, if any
    pub rotation_slot: Option<usize>,
}

impl WeekPlan {
    /// A week is productive when it has at least one date to cover
    pub fn is_productive(&self) -> bool {
        !self.target_days.is_empty()
    }
}

/// Buckets the rotation walks over.
///
/// Cleaning uses the selected buckets, falling back to every bucket when none
/// is selected. Field service always uses every bucket.
pub fn buckets_to_process(duty_type: DutyType, buckets: &[WeekBucket]) -> Vec<&WeekBucket> {
    match duty_type {
        DutyType::Cleaning if buckets.iter().any(|bucket| bucket.selected) => {
            buckets.iter().filter(|bucket| bucket.selected).collect()
        }
        _ => buckets.iter().collect(),
    }
}

/// Plan a single week and return the cursor for the next one.
///
/// Target days are computed first; the cursor advances afterwards, and only
/// when the week produced dates and the rotation list is non-empty.
pub fn plan_week(
    duty_type: DutyType,
    bucket: &WeekBucket,
    rotation: &RotationList,
    cursor: RotationCursor,
    unassigned_leader: &str,
) -> (WeekPlan, RotationCursor) {
    let days = target_days(duty_type, bucket);

    let (assignee, rotation_slot, next) = match rotation.entry_at(cursor.position()) {
        Some(entry) => {
            let assignee = Assignee::from_rotation_entry(duty_type, entry);
            if days.is_empty() {
                (assignee, None, cursor)
            } else {
                (assignee, Some(cursor.position()), cursor.advanced())
            }
        }
        None => (Assignee::placeholder(duty_type, unassigned_leader), None, cursor),
    };

    let plan = WeekPlan {
        bucket: bucket.clone(),
        target_days: days,
        assignee,
        rotation_slot,
    };
    (plan, next)
}

/// Assign rotation entries to every processed bucket, in bucket order
pub fn assign_rotation(
    duty_type: DutyType,
    buckets: &[WeekBucket],
    rotation: &RotationList,
    unassigned_leader: &str,
) -> Vec<WeekPlan> {
    let (plans, _) = buckets_to_process(duty_type, buckets).into_iter().fold(
        (Vec::new(), RotationCursor::default()),
        |(mut plans, cursor), bucket| {
            let (plan, next) = plan_week(duty_type, bucket, rotation, cursor, unassigned_leader);
            plans.push(plan);
            (plans, next)
        },
    );
    plans
}
