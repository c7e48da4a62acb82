//! Domain models for the duty roster.
//!
//! `DutyType` itself lives in the `shared` crate because both the wire DTOs
//! and the domain use the same two-value discriminator.

pub mod assignment;
pub mod errors;
pub mod settings;
pub mod week;

pub use assignment::*;
pub use errors::*;
pub use settings::*;
pub use week::*;
