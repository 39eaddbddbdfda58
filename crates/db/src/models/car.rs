//! Car entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taxi_core::types::{DbId, Timestamp};

use crate::models::driver::DriverResponse;

/// A car row from the `cars` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Car {
    pub id: DbId,
    pub model: String,
    pub manufacturer_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A car joined with its manufacturer, as shown in lists.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CarListItem {
    pub id: DbId,
    pub model: String,
    pub manufacturer_id: DbId,
    pub manufacturer_name: String,
    pub manufacturer_country: String,
}

/// A car together with its assigned drivers.
#[derive(Debug, Clone, Serialize)]
pub struct CarDetail {
    #[serde(flatten)]
    pub car: CarListItem,
    pub drivers: Vec<DriverResponse>,
}

/// DTO for creating a new car. `drivers` are linked in the same transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCar {
    pub model: String,
    pub manufacturer_id: DbId,
    pub drivers: Vec<DbId>,
}

/// DTO for updating an existing car.
///
/// `drivers`, when present, replaces the full set of assigned drivers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCar {
    pub model: Option<String>,
    pub manufacturer_id: Option<DbId>,
    pub drivers: Option<Vec<DbId>>,
}
