//! Repository for the `drivers` table.

use sqlx::PgPool;
use taxi_core::forms::search::contains_pattern;
use taxi_core::types::DbId;

use crate::models::driver::{CreateDriver, Driver};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, first_name, last_name, email, license_number, \
                        password_hash, is_active, created_at, updated_at";

/// Same columns, qualified with the `d` alias for joins.
const D_COLUMNS: &str = "d.id, d.username, d.first_name, d.last_name, d.email, \
                          d.license_number, d.password_hash, d.is_active, d.created_at, d.updated_at";

/// Provides CRUD operations for drivers.
pub struct DriverRepo;

impl DriverRepo {
    /// Insert a new driver, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDriver) -> Result<Driver, sqlx::Error> {
        let query = format!(
            "INSERT INTO drivers (username, first_name, last_name, email, license_number, password_hash)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(&input.username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.license_number)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a driver by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drivers WHERE id = $1");
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a driver by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drivers WHERE username = $1");
        sqlx::query_as::<_, Driver>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Whether `username` is already in use, ignoring case.
    pub async fn username_taken(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM drivers WHERE LOWER(username) = LOWER($1))")
            .bind(username)
            .fetch_one(pool)
            .await
    }

    /// List drivers ordered by username, optionally restricted to those whose
    /// username contains `username_filter` (case-insensitive).
    pub async fn list(
        pool: &PgPool,
        username_filter: Option<&str>,
    ) -> Result<Vec<Driver>, sqlx::Error> {
        match username_filter {
            Some(term) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM drivers
                     WHERE username ILIKE $1
                     ORDER BY username ASC"
                );
                sqlx::query_as::<_, Driver>(&query)
                    .bind(contains_pattern(term))
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM drivers ORDER BY username ASC");
                sqlx::query_as::<_, Driver>(&query).fetch_all(pool).await
            }
        }
    }

    /// List the drivers assigned to a car, ordered by username.
    pub async fn list_by_car(pool: &PgPool, car_id: DbId) -> Result<Vec<Driver>, sqlx::Error> {
        let query = format!(
            "SELECT {D_COLUMNS} FROM drivers d
             JOIN cars_drivers cd ON cd.driver_id = d.id
             WHERE cd.car_id = $1
             ORDER BY d.username ASC"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(car_id)
            .fetch_all(pool)
            .await
    }

    /// Return the subset of `ids` that do not belong to any driver.
    pub async fn find_missing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let existing: Vec<(DbId,)> = sqlx::query_as("SELECT id FROM drivers WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !existing.iter().any(|(e,)| e == id))
            .collect())
    }

    /// Replace a driver's license number, leaving every other column as is.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_license_number(
        pool: &PgPool,
        id: DbId,
        license_number: &str,
    ) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!(
            "UPDATE drivers SET license_number = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .bind(license_number)
            .fetch_optional(pool)
            .await
    }

    /// Mark a driver inactive. They keep their cars but can no longer log in.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE drivers SET is_active = false WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a driver. Car assignments and sessions go with it.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of drivers.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM drivers")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
