//! Request extractors enforcing authentication.
//!
//! - [`auth::AuthDriver`] -- Extracts the logged-in driver from a JWT Bearer token.

pub mod auth;
