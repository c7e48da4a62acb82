//! Domain models for generated and persisted assignments.
use chrono::NaiveDate;
use shared::DutyType;

/// Who covers a date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignee {
    /// Cleaning: the names of one rotation group, possibly empty
    Group(Vec<String>),
    /// Field service: a single leader, or the locale placeholder
    Leader(String),
}

impl Assignee {
    /// Placeholder used when the rotation list is empty
    pub fn placeholder(duty_type: DutyType, unassigned_leader: &str) -> Self {
        match duty_type {
            DutyType::Cleaning => Assignee::Group(Vec::new()),
            DutyType::FieldService => Assignee::Leader(unassigned_leader.to_string()),
        }
    }

    /// Build an assignee from one raw rotation entry.
    ///
    /// Cleaning entries are split on commas into trimmed, non-empty names.
    pub fn from_rotation_entry(duty_type: DutyType, entry: &str) -> Self {
        match duty_type {
            DutyType::Cleaning => Assignee::Group(split_names(entry)),
            DutyType::FieldService => Assignee::Leader(entry.trim().to_string()),
        }
    }

    /// Whether this assignee has the shape the duty type expects
    pub fn matches(&self, duty_type: DutyType) -> bool {
        matches!(
            (self, duty_type),
            (Assignee::Group(_), DutyType::Cleaning) | (Assignee::Leader(_), DutyType::FieldService)
        )
    }

    /// Comma-joined group or the leader name
    pub fn joined(&self) -> String {
        match self {
            Assignee::Group(names) => names.join(", "),
            Assignee::Leader(name) => name.clone(),
        }
    }

    /// Every name this assignee refers to
    pub fn names(&self) -> Vec<&str> {
        match self {
            Assignee::Group(names) => names.iter().map(String::as_str).collect(),
            Assignee::Leader(name) => vec![name.as_str()],
        }
    }
}

/// Split a comma-separated list of names, dropping blanks
pub fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// A previewed assignment that has not been saved yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAssignment {
    pub date: NaiveDate,
    /// Long locale form of `date`
    pub day_label: String,
    /// Capitalized month name, cleaning only
    pub month_label: Option<String>,
    pub assignee: Assignee,
    pub duty_type: DutyType,
}

impl GeneratedAssignment {
    /// Drop the duty discriminator, keeping what the store persists
    pub fn into_draft(self) -> AssignmentDraft {
        AssignmentDraft {
            date: self.date,
            day_label: self.day_label,
            month_label: self.month_label,
            assignee: self.assignee,
            annotation: None,
        }
    }
}

/// A record about to be inserted; the store assigns its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDraft {
    pub date: NaiveDate,
    pub day_label: String,
    pub month_label: Option<String>,
    pub assignee: Assignee,
    pub annotation: Option<String>,
}

impl AssignmentDraft {
    /// Attach a store-assigned id
    pub fn with_id(self, id: u64) -> PersistedAssignment {
        PersistedAssignment {
            id,
            date: self.date,
            day_label: self.day_label,
            month_label: self.month_label,
            assignee: self.assignee,
            annotation: self.annotation,
        }
    }
}

/// A saved assignment. `date` is unique inside its duty-type store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAssignment {
    pub id: u64,
    pub date: NaiveDate,
    pub day_label: String,
    pub month_label: Option<String>,
    pub assignee: Assignee,
    /// Cleaning observation, or field-service special-event marker
    pub annotation: Option<String>,
}

impl PersistedAssignment {
    /// Text a list view shows for the assignee.
    ///
    /// A field-service special-event marker replaces the leader.
    pub fn display_name(&self) -> String {
        match (&self.assignee, &self.annotation) {
            (Assignee::Leader(_), Some(marker)) if !marker.trim().is_empty() => marker.clone(),
            (assignee, _) => assignee.joined(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaning_entry_is_split_into_names() {
        let assignee = Assignee::from_rotation_entry(DutyType::Cleaning, " Ana ,Beto,, ");
        assert_eq!(assignee, Assignee::Group(vec!["Ana".to_string(), "Beto".to_string()]));
        assert_eq!(assignee.joined(), "Ana, Beto");
    }

    #[test]
    fn test_field_service_entry_keeps_commas() {
        let assignee = Assignee::from_rotation_entry(DutyType::FieldService, " Silva, J. ");
        assert_eq!(assignee, Assignee::Leader("Silva, J.".to_string()));
    }

    #[test]
    fn test_placeholder_shape() {
        assert_eq!(
            Assignee::placeholder(DutyType::Cleaning, "A definir"),
            Assignee::Group(Vec::new())
        );
        assert_eq!(
            Assignee::placeholder(DutyType::FieldService, "A definir"),
            Assignee::Leader("A definir".to_string())
        );
    }

    #[test]
    fn test_special_marker_overrides_leader() {
        let record = PersistedAssignment {
            id: 7,
            date: NaiveDate::from_ymd_opt(2025, 12, 14).unwrap(),
            day_label: "domingo, 14 de dezembro de 2025".to_string(),
            month_label: None,
            assignee: Assignee::Leader("Alonso".to_string()),
            annotation: Some("Assembleia de Circuito".to_string()),
        };
        assert_eq!(record.display_name(), "Assembleia de Circuito");

        let plain = PersistedAssignment { annotation: None, ..record };
        assert_eq!(plain.display_name(), "Alonso");
    }

    #[test]
    fn test_observation_does_not_override_group() {
        let record = PersistedAssignment {
            id: 1,
            date: NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
            day_label: String::new(),
            month_label: Some("Setembro".to_string()),
            assignee: Assignee::Group(vec!["Ana".to_string(), "Beto".to_string()]),
            annotation: Some("bring gloves".to_string()),
        };
        assert_eq!(record.display_name(), "Ana, Beto");
    }
}
