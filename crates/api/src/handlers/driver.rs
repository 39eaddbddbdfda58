//! Handlers for the `/drivers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use taxi_core::error::CoreError;
use taxi_core::forms::{
    DriverCreationForm, DriverLicenseUpdateForm, DriverSearchForm, Form, FormErrors,
};
use taxi_core::types::DbId;
use taxi_db::models::driver::{CreateDriver, DriverDetail, DriverResponse};
use taxi_db::repositories::{CarRepo, DriverRepo, SessionRepo};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthDriver;
use crate::page::{ListPage, DRIVER_LIST_TEMPLATE};
use crate::state::AppState;

/// GET /api/v1/drivers?username=
///
/// Drivers whose username contains `username` (case-insensitive), or all of
/// them when the filter is blank.
pub async fn list(
    State(state): State<AppState>,
    _driver: AuthDriver,
    Query(form): Query<DriverSearchForm>,
) -> AppResult<Json<ListPage<DriverResponse, DriverSearchForm>>> {
    let form = form.clean()?;
    let drivers = DriverRepo::list(&state.pool, form.term()).await?;

    Ok(Json(ListPage {
        template: DRIVER_LIST_TEMPLATE,
        context_key: "driver_list",
        items: drivers.iter().map(DriverResponse::from).collect(),
        search_form: form,
    }))
}

/// POST /api/v1/drivers
///
/// Validate the creation form, hash the password and store the new driver.
pub async fn create(
    State(state): State<AppState>,
    driver: AuthDriver,
    Json(form): Json<DriverCreationForm>,
) -> AppResult<(StatusCode, Json<DriverResponse>)> {
    let form = form.clean()?;

    if DriverRepo::username_taken(&state.pool, &form.username).await? {
        let mut errors = FormErrors::new();
        errors.add("username", "A user with that username already exists.");
        return Err(errors.into());
    }

    let password_hash = hash_password(&form.password1)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateDriver {
        username: form.username,
        first_name: form.first_name,
        last_name: form.last_name,
        email: form.email,
        license_number: form.license_number,
        password_hash,
    };
    let created = DriverRepo::create(&state.pool, &input).await?;

    tracing::info!(
        new_driver_id = created.id,
        driver_id = driver.id,
        "Driver created"
    );
    Ok((StatusCode::CREATED, Json(DriverResponse::from(&created))))
}

/// GET /api/v1/drivers/{id}
///
/// A driver together with the cars assigned to them.
pub async fn get_by_id(
    State(state): State<AppState>,
    _driver: AuthDriver,
    Path(id): Path<DbId>,
) -> AppResult<Json<DriverDetail>> {
    let driver = DriverRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Driver",
            id,
        }))?;
    let cars = CarRepo::list_by_driver(&state.pool, id).await?;

    Ok(Json(DriverDetail {
        driver: DriverResponse::from(&driver),
        cars,
    }))
}

/// POST /api/v1/drivers/{id}/update
///
/// Change the driver's license number; nothing else is writable here.
pub async fn update_license(
    State(state): State<AppState>,
    driver: AuthDriver,
    Path(id): Path<DbId>,
    Json(form): Json<DriverLicenseUpdateForm>,
) -> AppResult<Json<DriverResponse>> {
    let form = form.clean()?;
    let updated = DriverRepo::update_license_number(&state.pool, id, &form.license_number)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Driver",
            id,
        }))?;

    tracing::info!(target_driver_id = id, driver_id = driver.id, "License number updated");
    Ok(Json(DriverResponse::from(&updated)))
}

/// POST /api/v1/drivers/{id}/deactivate
///
/// The driver can no longer log in, and their open sessions and access
/// tokens stop working. Their car assignments are kept.
pub async fn deactivate(
    State(state): State<AppState>,
    driver: AuthDriver,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !DriverRepo::deactivate(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Driver",
            id,
        }));
    }
    let ended = SessionRepo::end_all(&state.pool, id).await?;

    tracing::info!(target_driver_id = id, driver_id = driver.id, ended, "Driver deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/drivers/{id}
pub async fn delete(
    State(state): State<AppState>,
    driver: AuthDriver,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if DriverRepo::delete(&state.pool, id).await? {
        tracing::info!(target_driver_id = id, driver_id = driver.id, "Driver deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Driver",
            id,
        }))
    }
}
