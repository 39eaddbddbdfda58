//! Repository for the `driver_sessions` table.
//!
//! A session lives until its refresh token is exchanged, its driver logs out
//! or is deactivated, or it expires.

use sqlx::PgPool;
use taxi_core::types::DbId;

use crate::models::session::NewSession;

pub struct SessionRepo;

impl SessionRepo {
    /// Record a newly issued refresh token, returning the session id.
    pub async fn start(pool: &PgPool, session: &NewSession) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO driver_sessions (driver_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(session.driver_id)
        .bind(&session.refresh_token_hash)
        .bind(session.expires_at)
        .fetch_one(pool)
        .await
    }

    /// Spend a refresh token: close its session and return the owning driver.
    ///
    /// `None` when the token is unknown, already spent or expired. Runs as a
    /// single statement, so one token can be exchanged at most once.
    pub async fn consume(
        pool: &PgPool,
        refresh_token_hash: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE driver_sessions SET is_revoked = true
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()
             RETURNING driver_id",
        )
        .bind(refresh_token_hash)
        .fetch_optional(pool)
        .await
    }

    /// Close every open session of a driver. Returns how many were open.
    pub async fn end_all(pool: &PgPool, driver_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE driver_sessions SET is_revoked = true
             WHERE driver_id = $1 AND is_revoked = false",
        )
        .bind(driver_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
