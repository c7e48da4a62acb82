use shared::{FieldServiceMeetingDto, GroupProfileDto, SettingsResponse, UpdateSettingsRequest};

use crate::backend::domain::commands::settings::UpdateSettingsCommand;
use crate::backend::domain::models::RosterSettings;

pub struct SettingsMapper;

impl SettingsMapper {
    pub fn to_dto(domain: RosterSettings) -> SettingsResponse {
        SettingsResponse {
            group: GroupProfileDto {
                name: domain.group.name,
                semester_year: domain.group.semester_year,
                superintendent: domain.group.superintendent,
                assistant: domain.group.assistant,
            },
            field_service: FieldServiceMeetingDto {
                location: domain.field_service.location,
                meeting_time: domain.field_service.meeting_time,
            },
        }
    }

    pub fn to_command(request: UpdateSettingsRequest) -> UpdateSettingsCommand {
        UpdateSettingsCommand {
            group_name: request.group_name,
            semester_year: request.semester_year,
            superintendent: request.superintendent,
            assistant: request.assistant,
            meeting_location: request.meeting_location,
            meeting_time: request.meeting_time,
        }
    }
}
