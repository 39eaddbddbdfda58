//! Handler for the home page.

use axum::extract::State;
use axum::Json;
use taxi_db::repositories::{CarRepo, DriverRepo, ManufacturerRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthDriver;
use crate::page::{IndexPage, INDEX_TEMPLATE};
use crate::state::AppState;

/// GET /api/v1/
///
/// Fleet totals: drivers, cars and manufacturers.
pub async fn index(State(state): State<AppState>, _driver: AuthDriver) -> AppResult<Json<IndexPage>> {
    let num_drivers = DriverRepo::count(&state.pool).await?;
    let num_cars = CarRepo::count(&state.pool).await?;
    let num_manufacturers = ManufacturerRepo::count(&state.pool).await?;

    Ok(Json(IndexPage {
        template: INDEX_TEMPLATE,
        num_drivers,
        num_cars,
        num_manufacturers,
    }))
}
