//! Handlers for the `/manufacturers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use taxi_core::error::CoreError;
use taxi_core::forms::{Form, ManufacturerForm, ManufacturerSearchForm};
use taxi_core::types::DbId;
use taxi_db::models::manufacturer::{CreateManufacturer, Manufacturer, UpdateManufacturer};
use taxi_db::repositories::ManufacturerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthDriver;
use crate::page::{ListPage, MANUFACTURER_LIST_TEMPLATE};
use crate::state::AppState;

/// GET /api/v1/manufacturers?name=
///
/// Manufacturers whose name contains `name` (case-insensitive), or all of
/// them when the filter is blank.
pub async fn list(
    State(state): State<AppState>,
    _driver: AuthDriver,
    Query(form): Query<ManufacturerSearchForm>,
) -> AppResult<Json<ListPage<Manufacturer, ManufacturerSearchForm>>> {
    let form = form.clean()?;
    let manufacturers = ManufacturerRepo::list(&state.pool, form.term()).await?;

    Ok(Json(ListPage {
        template: MANUFACTURER_LIST_TEMPLATE,
        context_key: "manufacturer_list",
        items: manufacturers,
        search_form: form,
    }))
}

/// POST /api/v1/manufacturers
pub async fn create(
    State(state): State<AppState>,
    driver: AuthDriver,
    Json(form): Json<ManufacturerForm>,
) -> AppResult<(StatusCode, Json<Manufacturer>)> {
    let form = form.clean()?;
    let input = CreateManufacturer {
        name: form.name,
        country: form.country,
    };
    let manufacturer = ManufacturerRepo::create(&state.pool, &input).await?;

    tracing::info!(
        manufacturer_id = manufacturer.id,
        driver_id = driver.id,
        "Manufacturer created"
    );
    Ok((StatusCode::CREATED, Json(manufacturer)))
}

/// POST /api/v1/manufacturers/{id}/update
pub async fn update(
    State(state): State<AppState>,
    _driver: AuthDriver,
    Path(id): Path<DbId>,
    Json(form): Json<ManufacturerForm>,
) -> AppResult<Json<Manufacturer>> {
    let form = form.clean()?;
    let input = UpdateManufacturer {
        name: Some(form.name),
        country: Some(form.country),
    };
    let manufacturer = ManufacturerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Manufacturer",
            id,
        }))?;
    Ok(Json(manufacturer))
}

/// DELETE /api/v1/manufacturers/{id}
///
/// Cars of the manufacturer are deleted with it.
pub async fn delete(
    State(state): State<AppState>,
    driver: AuthDriver,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ManufacturerRepo::delete(&state.pool, id).await? {
        tracing::info!(manufacturer_id = id, driver_id = driver.id, "Manufacturer deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Manufacturer",
            id,
        }))
    }
}
