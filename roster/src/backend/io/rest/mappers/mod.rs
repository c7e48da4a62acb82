//! Mapping between the `shared` DTOs and domain types.

pub mod assignment_mapper;
pub mod settings_mapper;
pub mod week_mapper;

pub use assignment_mapper::AssignmentMapper;
pub use settings_mapper::SettingsMapper;
pub use week_mapper::WeekMapper;
