//! # IO Module
//!
//! Provides the interface layer between HTTP clients and the domain logic.
//!
//! This module translates requests into domain commands and formats domain
//! results as the DTOs of the `shared` crate.
//!
//! ## Supported Operations
//!
//! - **GET /api/weeks**: Week buckets of a generation window
//! - **POST /api/preview**: Generate an unsaved preview
//! - **GET /api/history/{duty}**: Rotation seed from recent assignments
//! - **GET/POST /api/assignments/{duty}**: List or save assignments
//! - **POST /api/assignments/{duty}/new**: Add one assignment by hand
//! - **PUT/DELETE /api/assignments/{duty}/{id}**: Edit or remove one assignment
//! - **GET /api/upcoming**: Next assignments of both duties
//! - **GET/PUT /api/settings**: Group profile and field-service meeting details

pub mod rest;

pub use rest::api_router;
