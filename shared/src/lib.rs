use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recurring obligation a record or request refers to.
///
/// Serialized as `"cleaning"` / `"field-service"`, which is also the path
/// segment used by the REST layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DutyType {
    /// Hall cleaning, covered on Wednesdays and Sundays by a group of names
    Cleaning,
    /// Field-service meeting, led on Sundays by a single leader
    FieldService,
}

impl DutyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DutyType::Cleaning => "cleaning",
            DutyType::FieldService => "field-service",
        }
    }
}

impl fmt::Display for DutyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DutyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cleaning" => Ok(DutyType::Cleaning),
            "field-service" | "field_service" | "field" => Ok(DutyType::FieldService),
            other => Err(format!("Unknown duty type: {}", other)),
        }
    }
}

/// Who covers an assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssigneeDto {
    /// Names designated for a cleaning date (may be empty)
    Group(Vec<String>),
    /// Leader of a field-service meeting
    Leader(String),
}

/// One Monday..Sunday span of the generation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekBucketDto {
    /// Position of the bucket inside the window, used for week selection
    pub index: usize,
    /// First day of the bucket (YYYY-MM-DD)
    pub start_date: String,
    /// Last day of the bucket (YYYY-MM-DD)
    pub end_date: String,
    /// "DD/MM to DD/MM"
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekListResponse {
    pub weeks: Vec<WeekBucketDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratePreviewRequest {
    pub duty_type: DutyType,
    /// Any date inside the first month to generate (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Number of months to cover, defaults to the configured value
    pub duration_months: Option<u32>,
    /// Rotation entries, one per line; cleaning lines hold comma-separated names
    #[serde(default)]
    pub rotation_text: String,
    /// Indices of the weeks picked for cleaning; empty means every week
    #[serde(default)]
    pub selected_weeks: Vec<usize>,
}

/// A generated, not yet persisted, assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAssignmentDto {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Long locale form, e.g. "quarta-feira, 3 de setembro de 2025"
    pub day_label: String,
    /// Capitalized month name, cleaning only
    pub month_label: Option<String>,
    pub assignee: AssigneeDto,
    pub duty_type: DutyType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub duty_type: DutyType,
    pub assignments: Vec<GeneratedAssignmentDto>,
    /// Number of weeks the rotation walked over
    pub processed_weeks: usize,
    /// Number of those weeks that produced at least one date
    pub productive_weeks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySeedResponse {
    pub duty_type: DutyType,
    /// Previously used assignees, oldest first
    pub entries: Vec<String>,
    /// `entries` joined by newlines, ready for the rotation input
    pub seed_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveAssignmentsRequest {
    pub assignments: Vec<GeneratedAssignmentDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveAssignmentsResponse {
    pub saved: Vec<AssignmentDto>,
    pub success_message: String,
}

/// Error body returned when a save collides with existing dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateDatesResponse {
    pub duplicate_dates: Vec<String>,
    pub error_message: String,
}

/// A persisted assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentDto {
    pub id: u64,
    pub date: String,
    pub day_label: String,
    pub month_label: Option<String>,
    pub assignee: AssigneeDto,
    /// Observation for cleaning, special-event marker for field service
    pub annotation: Option<String>,
    /// What a list view should show as the assignee
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGroupDto {
    pub month_label: String,
    pub assignments: Vec<AssignmentDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentListResponse {
    pub duty_type: DutyType,
    pub total: usize,
    pub month_groups: Vec<MonthGroupDto>,
}

/// Request to add one assignment by hand; labels are derived from the date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAssignmentRequest {
    /// YYYY-MM-DD
    pub date: String,
    pub assignee: AssigneeDto,
    #[serde(default)]
    pub annotation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAssignmentRequest {
    /// New date (YYYY-MM-DD); labels are re-derived unless given explicitly
    pub date: Option<String>,
    pub day_label: Option<String>,
    pub month_label: Option<String>,
    pub assignee: Option<AssigneeDto>,
    /// `Some("")` clears the annotation
    pub annotation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub assignment: AssignmentDto,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAssignmentResponse {
    pub deleted: bool,
    pub success_message: String,
}

/// A saved assignment of either duty, as shown on the home screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingAssignmentDto {
    pub duty_type: DutyType,
    pub assignment: AssignmentDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingAssignmentsResponse {
    /// First date considered (YYYY-MM-DD)
    pub from: String,
    /// Soonest first; the first entry is the next assignment
    pub assignments: Vec<UpcomingAssignmentDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupProfileDto {
    pub name: String,
    pub semester_year: String,
    pub superintendent: String,
    pub assistant: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldServiceMeetingDto {
    pub location: String,
    pub meeting_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub group: GroupProfileDto,
    pub field_service: FieldServiceMeetingDto,
}

/// Partial settings update; absent fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    pub group_name: Option<String>,
    pub semester_year: Option<String>,
    pub superintendent: Option<String>,
    pub assistant: Option<String>,
    pub meeting_location: Option<String>,
    pub meeting_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettingsResponse {
    pub settings: SettingsResponse,
    pub success_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_type_round_trips_through_path_segment() {
        assert_eq!("cleaning".parse::<DutyType>().unwrap(), DutyType::Cleaning);
        assert_eq!("field-service".parse::<DutyType>().unwrap(), DutyType::FieldService);
        assert_eq!("Field_Service".parse::<DutyType>().unwrap(), DutyType::FieldService);
        assert!("laundry".parse::<DutyType>().is_err());
        assert_eq!(DutyType::FieldService.to_string(), "field-service");
    }

    #[test]
    fn test_duty_type_serializes_kebab_case() {
        let json = serde_json::to_string(&DutyType::FieldService).unwrap();
        assert_eq!(json, "\"field-service\"");
    }

    #[test]
    fn test_preview_request_defaults() {
        let request: GeneratePreviewRequest = serde_json::from_str(
            r#"{"duty_type":"cleaning","start_date":"2025-09-01","duration_months":1}"#,
        )
        .unwrap();
        assert!(request.rotation_text.is_empty());
        assert!(request.selected_weeks.is_empty());
    }

    #[test]
    fn test_settings_update_fields_are_optional() {
        let request: UpdateSettingsRequest =
            serde_json::from_str(r#"{"meeting_time":"8h30"}"#).unwrap();
        assert_eq!(request.meeting_time.as_deref(), Some("8h30"));
        assert!(request.group_name.is_none());
    }

    #[test]
    fn test_assignee_json_shape() {
        let group = AssigneeDto::Group(vec!["Ana".to_string(), "Beto".to_string()]);
        assert_eq!(serde_json::to_string(&group).unwrap(), r#"{"group":["Ana","Beto"]}"#);
        let leader = AssigneeDto::Leader("Caio".to_string());
        assert_eq!(serde_json::to_string(&leader).unwrap(), r#"{"leader":"Caio"}"#);
    }
}
