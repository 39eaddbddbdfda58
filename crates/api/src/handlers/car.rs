//! Handlers for the `/cars` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use taxi_core::error::CoreError;
use taxi_core::forms::{CarForm, CarSearchForm, Form, FormErrors};
use taxi_core::types::DbId;
use taxi_db::models::car::{CarDetail, CarListItem, CreateCar, UpdateCar};
use taxi_db::models::driver::DriverResponse;
use taxi_db::repositories::{CarRepo, DriverRepo, ManufacturerRepo};
use taxi_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthDriver;
use crate::page::{ListPage, CAR_LIST_TEMPLATE};
use crate::state::AppState;

/// GET /api/v1/cars?model=
///
/// Cars whose model contains `model` (case-insensitive), or all of them when
/// the filter is blank. Each item carries its manufacturer.
pub async fn list(
    State(state): State<AppState>,
    _driver: AuthDriver,
    Query(form): Query<CarSearchForm>,
) -> AppResult<Json<ListPage<CarListItem, CarSearchForm>>> {
    let form = form.clean()?;
    let cars = CarRepo::list(&state.pool, form.term()).await?;

    Ok(Json(ListPage {
        template: CAR_LIST_TEMPLATE,
        context_key: "car_list",
        items: cars,
        search_form: form,
    }))
}

/// POST /api/v1/cars
pub async fn create(
    State(state): State<AppState>,
    driver: AuthDriver,
    Json(form): Json<CarForm>,
) -> AppResult<(StatusCode, Json<CarDetail>)> {
    let form = form.clean()?;
    check_references(&state.pool, &form).await?;

    let input = CreateCar {
        manufacturer_id: form.manufacturer(),
        model: form.model,
        drivers: form.drivers,
    };
    let car = CarRepo::create(&state.pool, &input).await?;

    tracing::info!(car_id = car.id, driver_id = driver.id, "Car created");
    let detail = load_detail(&state.pool, car.id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/cars/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _driver: AuthDriver,
    Path(id): Path<DbId>,
) -> AppResult<Json<CarDetail>> {
    Ok(Json(load_detail(&state.pool, id).await?))
}

/// POST /api/v1/cars/{id}/update
///
/// Replaces model, manufacturer and the full set of assigned drivers.
pub async fn update(
    State(state): State<AppState>,
    _driver: AuthDriver,
    Path(id): Path<DbId>,
    Json(form): Json<CarForm>,
) -> AppResult<Json<CarDetail>> {
    if CarRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "Car", id }));
    }
    let form = form.clean()?;
    check_references(&state.pool, &form).await?;

    let input = UpdateCar {
        manufacturer_id: Some(form.manufacturer()),
        model: Some(form.model),
        drivers: Some(form.drivers),
    };
    CarRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Car", id }))?;

    Ok(Json(load_detail(&state.pool, id).await?))
}

/// DELETE /api/v1/cars/{id}
pub async fn delete(
    State(state): State<AppState>,
    driver: AuthDriver,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CarRepo::delete(&state.pool, id).await? {
        tracing::info!(car_id = id, driver_id = driver.id, "Car deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Car", id }))
    }
}

/// POST /api/v1/cars/{id}/toggle-assign
///
/// Assign the logged-in driver to the car, or unassign them if already
/// assigned. Returns the updated car.
pub async fn toggle_assign(
    State(state): State<AppState>,
    driver: AuthDriver,
    Path(id): Path<DbId>,
) -> AppResult<Json<CarDetail>> {
    if CarRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "Car", id }));
    }

    let assigned = CarRepo::toggle_driver(&state.pool, id, driver.id).await?;
    tracing::info!(car_id = id, driver_id = driver.id, assigned, "Car assignment toggled");

    Ok(Json(load_detail(&state.pool, id).await?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject a car form whose manufacturer or drivers do not exist.
async fn check_references(pool: &DbPool, form: &CarForm) -> AppResult<()> {
    let mut errors = FormErrors::new();

    if ManufacturerRepo::find_by_id(pool, form.manufacturer())
        .await?
        .is_none()
    {
        errors.add(
            "manufacturer_id",
            "Select a valid choice. That choice is not one of the available choices.",
        );
    }

    for missing in DriverRepo::find_missing_ids(pool, &form.drivers).await? {
        errors.add(
            "drivers",
            format!("Select a valid choice. {missing} is not one of the available choices."),
        );
    }

    errors.into_result(()).map_err(AppError::from)
}

/// Load a car with its manufacturer and assigned drivers.
async fn load_detail(pool: &DbPool, id: DbId) -> AppResult<CarDetail> {
    let car = CarRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Car", id }))?;
    let drivers = DriverRepo::list_by_car(pool, id).await?;

    Ok(CarDetail {
        car,
        drivers: drivers.iter().map(DriverResponse::from).collect(),
    })
}
