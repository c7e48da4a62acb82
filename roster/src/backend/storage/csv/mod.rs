//! # CSV Storage Module
//!
//! File-based storage for the duty roster. Each duty type keeps its
//! assignments in its own CSV file; settings live in a YAML file next to them.
//!
//! ## Key Responsibilities
//!
//! - **Data Directory**: Resolving and creating the directory holding all files
//! - **Assignment Files**: Date-unique, all-or-nothing writes per duty type
//! - **Configuration**: Loading `roster_config.yaml`, creating it on first start

pub mod assignment_repository;
pub mod connection;
pub mod roster_config_repository;

#[cfg(test)]
pub mod test_utils;

pub use assignment_repository::AssignmentRepository;
pub use connection::{CsvConnection, DATA_DIR_ENV};
pub use roster_config_repository::{RosterConfig, RosterConfigRepository};
