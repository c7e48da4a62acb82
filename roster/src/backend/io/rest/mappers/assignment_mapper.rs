use chrono::NaiveDate;
use shared::{
    AssigneeDto, AssignmentDto, AssignmentListResponse, DutyType, GeneratedAssignmentDto,
    MonthGroupDto, PreviewResponse, UpcomingAssignmentDto, UpcomingAssignmentsResponse,
};

use crate::backend::domain::commands::assignments::{MonthGroup, UpcomingAssignment};
use crate::backend::domain::commands::generation::PreviewResult;
use crate::backend::domain::models::{Assignee, GeneratedAssignment, PersistedAssignment};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct AssignmentMapper;

impl AssignmentMapper {
    /// Parse a YYYY-MM-DD date coming from a request
    pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", raw))
    }

    pub fn format_date(date: NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    pub fn assignee_to_dto(assignee: Assignee) -> AssigneeDto {
        match assignee {
            Assignee::Group(names) => AssigneeDto::Group(names),
            Assignee::Leader(name) => AssigneeDto::Leader(name),
        }
    }

    /// Names are trimmed; blank group members are dropped
    pub fn assignee_to_domain(dto: AssigneeDto) -> Assignee {
        match dto {
            AssigneeDto::Group(names) => Assignee::Group(
                names
                    .iter()
                    .map(|name| name.trim())
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            AssigneeDto::Leader(name) => Assignee::Leader(name.trim().to_string()),
        }
    }

    pub fn generated_to_dto(domain: GeneratedAssignment) -> GeneratedAssignmentDto {
        GeneratedAssignmentDto {
            date: Self::format_date(domain.date),
            day_label: domain.day_label,
            month_label: domain.month_label,
            assignee: Self::assignee_to_dto(domain.assignee),
            duty_type: domain.duty_type,
        }
    }

    /// Convert a previewed (possibly hand-edited) assignment back to the domain
    pub fn generated_to_domain(dto: GeneratedAssignmentDto) -> Result<GeneratedAssignment, String> {
        Ok(GeneratedAssignment {
            date: Self::parse_date(&dto.date)?,
            day_label: dto.day_label,
            month_label: dto.month_label,
            assignee: Self::assignee_to_domain(dto.assignee),
            duty_type: dto.duty_type,
        })
    }

    pub fn to_dto(domain: PersistedAssignment) -> AssignmentDto {
        let display_name = domain.display_name();
        AssignmentDto {
            id: domain.id,
            date: Self::format_date(domain.date),
            day_label: domain.day_label,
            month_label: domain.month_label,
            assignee: Self::assignee_to_dto(domain.assignee),
            annotation: domain.annotation,
            display_name,
        }
    }

    pub fn to_dto_list(domain: Vec<PersistedAssignment>) -> Vec<AssignmentDto> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_month_group_dto(group: MonthGroup) -> MonthGroupDto {
        MonthGroupDto {
            month_label: group.month_label,
            assignments: Self::to_dto_list(group.assignments),
        }
    }

    pub fn to_list_response(duty_type: DutyType, total: usize, groups: Vec<MonthGroup>) -> AssignmentListResponse {
        AssignmentListResponse {
            duty_type,
            total,
            month_groups: groups.into_iter().map(Self::to_month_group_dto).collect(),
        }
    }

    pub fn to_upcoming_response(from: NaiveDate, upcoming: Vec<UpcomingAssignment>) -> UpcomingAssignmentsResponse {
        UpcomingAssignmentsResponse {
            from: Self::format_date(from),
            assignments: upcoming
                .into_iter()
                .map(|item| UpcomingAssignmentDto {
                    duty_type: item.duty_type,
                    assignment: Self::to_dto(item.assignment),
                })
                .collect(),
        }
    }

    pub fn to_preview_response(result: PreviewResult) -> PreviewResponse {
        let processed_weeks = result.plans.len();
        let productive_weeks = result.productive_weeks();
        PreviewResponse {
            duty_type: result.duty_type,
            assignments: result
                .assignments
                .into_iter()
                .map(Self::generated_to_dto)
                .collect(),
            processed_weeks,
            productive_weeks,
        }
    }
}
