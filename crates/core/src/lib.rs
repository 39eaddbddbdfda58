//! Domain types, errors and form validation for the taxi fleet service.
//!
//! This crate has no I/O: it is shared by the repository layer (`taxi-db`)
//! and the HTTP layer (`taxi-api`).

pub mod error;
pub mod forms;
pub mod license;
pub mod types;
