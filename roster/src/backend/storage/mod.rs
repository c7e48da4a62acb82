//! # Storage Module
//!
//! Handles all data persistence for the duty roster.
//!
//! The domain layer talks to storage only through the traits in [`traits`],
//! so the CSV implementation can be replaced without touching the generator
//! or the persistence gate.
//!
//! ## Key Responsibilities
//!
//! - **Date Uniqueness**: At most one assignment per date inside each duty type
//! - **Atomic Batches**: A batch with any taken date writes nothing
//! - **History Reads**: Recent assignments, newest first
//! - **Maintenance**: Get, update and delete single records

pub mod csv;
pub mod traits;

pub use csv::{CsvConnection, RosterConfig, RosterConfigRepository};
pub use traits::{AssignmentStorage, Connection, SettingsStorage, StoreError};
