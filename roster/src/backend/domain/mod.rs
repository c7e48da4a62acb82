//! # Domain Module
//!
//! Contains all business logic for the duty roster.
//!
//! This module turns a start date, a duration and a rotation list into
//! dated assignments for the two recurring duties, and guards how those
//! assignments are saved. It does not depend on any UI or on a specific
//! storage backend.
//!
//! ## Module Organization
//!
//! - **calendar**: Sunday-closed week buckets and the weekday filter
//! - **rotation**: Round-robin assignment over productive weeks
//! - **materializer**: One dated, labelled record per target day
//! - **locale**: Localized weekday and month names
//! - **generator_service**: Validated preview generation
//! - **history_service**: Rotation seeds from recent saved assignments
//! - **assignment_service**: Persistence gate, record maintenance and upcoming assignments
//! - **settings_service**: Group profile and field-service meeting details
//!
//! ## Core Concepts
//!
//! - **Duty Type**: Cleaning (Wednesdays and Sundays, a group) or field service (Sundays, a leader)
//! - **Week Bucket**: A Monday to Sunday span of the window, truncated at both ends
//! - **Productive Week**: A bucket with at least one target day
//! - **Preview**: Generated assignments held in memory until the admin saves them
//!
//! ## Business Rules
//!
//! - The rotation advances once per productive week, never on silent weeks
//! - Cleaning with no selected week processes every week
//! - An empty rotation assigns the placeholder without consuming a slot
//! - Labels are always derived from the date through one formatter
//! - A batch containing a taken date is rejected as a whole

pub mod assignment_service;
pub mod calendar;
pub mod commands;
pub mod generator_service;
pub mod history_service;
pub mod locale;
pub mod materializer;
pub mod models;
pub mod rotation;
pub mod settings_service;

pub use assignment_service::{group_by_month, AssignmentService};
pub use generator_service::GeneratorService;
pub use history_service::HistoryService;
pub use locale::{DateFormatter, LocaleFormatter, RosterLocale};
pub use settings_service::SettingsService;
