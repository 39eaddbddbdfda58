//! Login, token refresh and logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use taxi_core::error::CoreError;
use taxi_core::types::DbId;
use taxi_db::models::driver::Driver;
use taxi_db::models::session::NewSession;
use taxi_db::repositories::{DriverRepo, SessionRepo};

use crate::auth::password::verify_password;
use crate::auth::tokens::refresh_digest;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthDriver;
use crate::state::AppState;

const BAD_CREDENTIALS: &str = "Please enter a correct username and password.";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Tokens returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub driver: LoggedInDriver,
}

#[derive(Debug, Serialize)]
pub struct LoggedInDriver {
    pub id: DbId,
    pub username: String,
}

/// POST /api/v1/auth/login
///
/// Usernames match exactly. Deactivated drivers with the right password get
/// 403; any other failure is the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let bad_credentials = || AppError::Core(CoreError::Unauthorized(BAD_CREDENTIALS.into()));

    let driver = DriverRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(bad_credentials)?;

    let matches = verify_password(&input.password, &driver.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !matches {
        tracing::info!(driver_id = driver.id, "Login rejected: wrong password");
        return Err(bad_credentials());
    }
    if !driver.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "This account is inactive.".into(),
        )));
    }

    let response = issue_tokens(&state, &driver).await?;
    tracing::info!(driver_id = driver.id, "Driver logged in");
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Spends the refresh token and hands out a new pair.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<TokenResponse>> {
    let rejected = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    };

    let driver_id = SessionRepo::consume(&state.pool, &refresh_digest(&input.refresh_token))
        .await?
        .ok_or_else(rejected)?;
    let driver = DriverRepo::find_by_id(&state.pool, driver_id)
        .await?
        .filter(|d| d.is_active)
        .ok_or_else(rejected)?;

    Ok(Json(issue_tokens(&state, &driver).await?))
}

/// POST /api/v1/auth/logout
///
/// Ends every session of the logged-in driver. Access tokens already issued
/// run until they expire.
pub async fn logout(State(state): State<AppState>, driver: AuthDriver) -> AppResult<StatusCode> {
    let ended = SessionRepo::end_all(&state.pool, driver.id).await?;
    tracing::info!(driver_id = driver.id, ended, "Driver logged out");
    Ok(StatusCode::NO_CONTENT)
}

async fn issue_tokens(state: &AppState, driver: &Driver) -> AppResult<TokenResponse> {
    let access_token = state
        .tokens
        .issue_access(driver.id)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let refresh = state.tokens.issue_refresh();
    let session = NewSession {
        driver_id: driver.id,
        refresh_token_hash: refresh.digest,
        expires_at: refresh.expires_at,
    };
    SessionRepo::start(&state.pool, &session).await?;

    Ok(TokenResponse {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: state.tokens.access_ttl_secs(),
        driver: LoggedInDriver {
            id: driver.id,
            username: driver.username.clone(),
        },
    })
}
