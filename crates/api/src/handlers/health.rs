//! Liveness endpoint for load balancers and process managers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// GET /health
///
/// 200 when the database answers, 503 otherwise. Public.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    let reachable = match taxi_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    let (code, status, database) = if reachable {
        (StatusCode::OK, "ok", "up")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable", "down")
    };
    let body = Health {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
    };
    (code, Json(body))
}
