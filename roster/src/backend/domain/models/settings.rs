use serde::{Deserialize, Serialize};

/// Who the roster belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupProfile {
    pub name: String,
    /// Free text such as "2/2025"
    pub semester_year: String,
    pub superintendent: String,
    pub assistant: String,
}

/// Where and when the field-service group meets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldServiceMeeting {
    pub location: String,
    /// Free text such as "8h30"
    pub meeting_time: String,
}

/// Editable settings shown alongside the rosters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSettings {
    pub group: GroupProfile,
    pub field_service: FieldServiceMeeting,
}
