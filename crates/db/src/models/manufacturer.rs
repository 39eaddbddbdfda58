//! Manufacturer entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taxi_core::types::{DbId, Timestamp};

/// A manufacturer row from the `manufacturers` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Manufacturer {
    pub id: DbId,
    pub name: String,
    pub country: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new manufacturer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateManufacturer {
    pub name: String,
    pub country: String,
}

/// DTO for updating an existing manufacturer. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateManufacturer {
    pub name: Option<String>,
    pub country: Option<String>,
}
