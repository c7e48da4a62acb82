// roster/src/backend/domain/commands.rs

//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod generation {
    use shared::DutyType;

    use crate::backend::domain::models::{GeneratedAssignment, WeekBucket};
    use crate::backend::domain::rotation::WeekPlan;

    /// Start date and length of a generation window.
    #[derive(Debug, Clone, Default)]
    pub struct WeekWindowQuery {
        /// Any date inside the first month (YYYY-MM-DD)
        pub start_date: Option<String>,
        /// Falls back to the configured default when absent
        pub duration_months: Option<u32>,
    }

    /// Input for generating a preview.
    #[derive(Debug, Clone)]
    pub struct GeneratePreviewCommand {
        pub duty_type: DutyType,
        pub window: WeekWindowQuery,
        /// Raw rotation text, one entry per line
        pub rotation_text: String,
        /// Indices of the weeks selected for cleaning
        pub selected_weeks: Vec<usize>,
    }

    /// Result of generating a preview.
    #[derive(Debug, Clone)]
    pub struct PreviewResult {
        pub duty_type: DutyType,
        pub weeks: Vec<WeekBucket>,
        pub plans: Vec<WeekPlan>,
        pub assignments: Vec<GeneratedAssignment>,
    }

    impl PreviewResult {
        pub fn productive_weeks(&self) -> usize {
            self.plans.iter().filter(|plan| plan.is_productive()).count()
        }
    }
}

pub mod history {
    use shared::DutyType;

    /// Query for previously used assignees.
    #[derive(Debug, Clone)]
    pub struct HistorySeedQuery {
        pub duty_type: DutyType,
        /// Number of recent records to read; configured default when absent
        pub limit: Option<usize>,
    }

    /// De-duplicated assignees, oldest first.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct HistorySeed {
        pub entries: Vec<String>,
    }

    impl HistorySeed {
        /// Entries joined by newlines, the shape of the rotation input
        pub fn seed_text(&self) -> String {
            self.entries.join("\n")
        }
    }
}

pub mod assignments {
    use chrono::NaiveDate;
    use shared::DutyType;

    use crate::backend::domain::models::{Assignee, GeneratedAssignment, PersistedAssignment};

    /// Command for saving an approved preview batch.
    #[derive(Debug, Clone)]
    pub struct SaveAssignmentsCommand {
        pub duty_type: DutyType,
        pub assignments: Vec<GeneratedAssignment>,
    }

    /// Command for adding one assignment by hand.
    #[derive(Debug, Clone)]
    pub struct CreateAssignmentCommand {
        pub duty_type: DutyType,
        pub date: NaiveDate,
        pub assignee: Assignee,
        pub annotation: Option<String>,
    }

    /// Query parameters for listing assignments.
    #[derive(Debug, Clone)]
    pub struct AssignmentListQuery {
        pub duty_type: DutyType,
        /// Case-insensitive match on names and month label
        pub search: Option<String>,
    }

    /// Partial update of one assignment.
    #[derive(Debug, Clone)]
    pub struct UpdateAssignmentCommand {
        pub duty_type: DutyType,
        pub id: u64,
        pub date: Option<NaiveDate>,
        pub day_label: Option<String>,
        pub month_label: Option<String>,
        pub assignee: Option<Assignee>,
        /// `Some("")` clears the annotation
        pub annotation: Option<String>,
    }

    /// A saved assignment together with the duty it belongs to.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct UpcomingAssignment {
        pub duty_type: DutyType,
        pub assignment: PersistedAssignment,
    }

    /// Assignments sharing one month label, in date order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct MonthGroup {
        pub month_label: String,
        pub assignments: Vec<PersistedAssignment>,
    }
}

pub mod settings {
    /// Partial update of the settings; `None` keeps the current value.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateSettingsCommand {
        pub group_name: Option<String>,
        pub semester_year: Option<String>,
        pub superintendent: Option<String>,
        pub assistant: Option<String>,
        pub meeting_location: Option<String>,
        pub meeting_time: Option<String>,
    }
}
