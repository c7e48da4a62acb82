//! Expands week plans into one generated assignment per date.
use chrono::NaiveDate;
use shared::DutyType;

use crate::backend::domain::locale::DateFormatter;
use crate::backend::domain::models::{Assignee, GeneratedAssignment};
use crate::backend::domain::rotation::WeekPlan;

/// Day label and, for cleaning, month label derived from `date`
pub fn derive_labels(
    duty_type: DutyType,
    date: NaiveDate,
    formatter: &dyn DateFormatter,
) -> (String, Option<String>) {
    let day_label = formatter.long_date(date);
    let month_label = match duty_type {
        DutyType::Cleaning => Some(formatter.month_label(date)),
        DutyType::FieldService => None,
    };
    (day_label, month_label)
}

/// Build the generated record for one date
pub fn materialize_day(
    duty_type: DutyType,
    date: NaiveDate,
    assignee: &Assignee,
    formatter: &dyn DateFormatter,
) -> GeneratedAssignment {
    let (day_label, month_label) = derive_labels(duty_type, date, formatter);
    GeneratedAssignment {
        date,
        day_label,
        month_label,
        assignee: assignee.clone(),
        duty_type,
    }
}

/// One generated record per target day of every plan, in date order
pub fn materialize(
    duty_type: DutyType,
    plans: &[WeekPlan],
    formatter: &dyn DateFormatter,
) -> Vec<GeneratedAssignment> {
    plans
        .iter()
        .flat_map(|plan| {
            plan.target_days
                .iter()
                .map(move |date| materialize_day(duty_type, *date, &plan.assignee, formatter))
        })
        .collect()
}
