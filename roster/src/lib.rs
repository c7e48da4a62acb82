//! Duty roster assignment generation.
//!
//! Generates cleaning and field-service rosters from a rotation list over a
//! window of Monday-anchored weeks, and stores approved rosters in CSV files.

pub mod backend;
