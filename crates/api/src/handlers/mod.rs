//! Request handlers, one submodule per resource.
//!
//! Handlers delegate to the corresponding repository in `taxi_db`, run
//! submissions through their `taxi_core` form, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod auth;
pub mod car;
pub mod driver;
pub mod health;
pub mod index;
pub mod manufacturer;
