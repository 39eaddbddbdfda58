//! Password hashing and token handling for driver login.

pub mod password;
pub mod tokens;
