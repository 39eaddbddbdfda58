//! Repository for the `manufacturers` table.

use sqlx::PgPool;
use taxi_core::forms::search::contains_pattern;
use taxi_core::types::DbId;

use crate::models::manufacturer::{CreateManufacturer, Manufacturer, UpdateManufacturer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, country, created_at, updated_at";

/// Provides CRUD operations for manufacturers.
pub struct ManufacturerRepo;

impl ManufacturerRepo {
    /// Insert a new manufacturer, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateManufacturer,
    ) -> Result<Manufacturer, sqlx::Error> {
        let query = format!(
            "INSERT INTO manufacturers (name, country)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manufacturer>(&query)
            .bind(&input.name)
            .bind(&input.country)
            .fetch_one(pool)
            .await
    }

    /// Find a manufacturer by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Manufacturer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM manufacturers WHERE id = $1");
        sqlx::query_as::<_, Manufacturer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List manufacturers ordered by name, optionally restricted to those
    /// whose name contains `name_filter` (case-insensitive).
    pub async fn list(
        pool: &PgPool,
        name_filter: Option<&str>,
    ) -> Result<Vec<Manufacturer>, sqlx::Error> {
        match name_filter {
            Some(term) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM manufacturers
                     WHERE name ILIKE $1
                     ORDER BY name ASC, id ASC"
                );
                sqlx::query_as::<_, Manufacturer>(&query)
                    .bind(contains_pattern(term))
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM manufacturers ORDER BY name ASC, id ASC");
                sqlx::query_as::<_, Manufacturer>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Update a manufacturer. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateManufacturer,
    ) -> Result<Option<Manufacturer>, sqlx::Error> {
        let query = format!(
            "UPDATE manufacturers SET
                name = COALESCE($2, name),
                country = COALESCE($3, country)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manufacturer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.country)
            .fetch_optional(pool)
            .await
    }

    /// Delete a manufacturer and, by cascade, its cars. Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM manufacturers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of manufacturers.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM manufacturers")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
