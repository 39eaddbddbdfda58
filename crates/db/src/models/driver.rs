//! Driver entity model and DTOs.
//!
//! A driver is the application's user identity: the same row backs login
//! and the fleet's driver roster.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taxi_core::types::{DbId, Timestamp};

use crate::models::car::CarListItem;

/// Full driver row from the `drivers` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`DriverResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Driver {
    pub id: DbId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub license_number: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe driver representation for API responses (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverResponse {
    pub id: DbId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub license_number: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<&Driver> for DriverResponse {
    fn from(d: &Driver) -> Self {
        Self {
            id: d.id,
            username: d.username.clone(),
            first_name: d.first_name.clone(),
            last_name: d.last_name.clone(),
            email: d.email.clone(),
            license_number: d.license_number.clone(),
            is_active: d.is_active,
            created_at: d.created_at,
        }
    }
}

/// A driver together with the cars assigned to them.
#[derive(Debug, Clone, Serialize)]
pub struct DriverDetail {
    #[serde(flatten)]
    pub driver: DriverResponse,
    pub cars: Vec<CarListItem>,
}

/// DTO for creating a new driver.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDriver {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub license_number: String,
    pub password_hash: String,
}
