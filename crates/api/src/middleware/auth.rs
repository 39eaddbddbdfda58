//! Extractor for the logged-in driver.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use taxi_core::error::CoreError;
use taxi_core::types::DbId;
use taxi_db::repositories::DriverRepo;

use crate::error::AppError;
use crate::state::AppState;

/// The driver behind the request's Bearer token.
///
/// Every route except login and refresh takes this extractor. The token only
/// names a driver id; the row is reloaded here, so a deleted or deactivated
/// driver is turned away with 401 even while their token is unexpired.
#[derive(Debug, Clone)]
pub struct AuthDriver {
    pub id: DbId,
    pub username: String,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

impl FromRequestParts<AppState> for AuthDriver {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| unauthorized("Authentication credentials were not provided."))?;
        let driver_id = state
            .tokens
            .verify_access(token)
            .ok_or_else(|| unauthorized("Invalid or expired token"))?;

        match DriverRepo::find_by_id(&state.pool, driver_id).await? {
            Some(driver) if driver.is_active => Ok(AuthDriver {
                id: driver.id,
                username: driver.username,
            }),
            _ => {
                tracing::info!(driver_id, "Token presented for missing or inactive driver");
                Err(unauthorized("Driver account is no longer active"))
            }
        }
    }
}
