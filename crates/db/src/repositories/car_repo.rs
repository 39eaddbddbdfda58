//! Repository for the `cars` table and its `cars_drivers` link table.

use sqlx::{PgConnection, PgPool};
use taxi_core::forms::search::contains_pattern;
use taxi_core::types::DbId;

use crate::models::car::{Car, CarListItem, CreateCar, UpdateCar};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, model, manufacturer_id, created_at, updated_at";

/// Car columns joined with the manufacturer's name and country.
const LIST_COLUMNS: &str = "c.id, c.model, c.manufacturer_id, \
                             m.name AS manufacturer_name, m.country AS manufacturer_country";

/// Provides CRUD operations for cars and their driver assignments.
pub struct CarRepo;

impl CarRepo {
    /// Insert a new car and link its drivers in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateCar) -> Result<Car, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO cars (model, manufacturer_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let car = sqlx::query_as::<_, Car>(&query)
            .bind(&input.model)
            .bind(input.manufacturer_id)
            .fetch_one(&mut *tx)
            .await?;

        link_drivers(&mut tx, car.id, &input.drivers).await?;
        tx.commit().await?;
        Ok(car)
    }

    /// Find a car, joined with its manufacturer.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CarListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM cars c
             JOIN manufacturers m ON m.id = c.manufacturer_id
             WHERE c.id = $1"
        );
        sqlx::query_as::<_, CarListItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List cars ordered by model, optionally restricted to those whose model
    /// contains `model_filter` (case-insensitive).
    pub async fn list(
        pool: &PgPool,
        model_filter: Option<&str>,
    ) -> Result<Vec<CarListItem>, sqlx::Error> {
        match model_filter {
            Some(term) => {
                let query = format!(
                    "SELECT {LIST_COLUMNS} FROM cars c
                     JOIN manufacturers m ON m.id = c.manufacturer_id
                     WHERE c.model ILIKE $1
                     ORDER BY c.model ASC, c.id ASC"
                );
                sqlx::query_as::<_, CarListItem>(&query)
                    .bind(contains_pattern(term))
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {LIST_COLUMNS} FROM cars c
                     JOIN manufacturers m ON m.id = c.manufacturer_id
                     ORDER BY c.model ASC, c.id ASC"
                );
                sqlx::query_as::<_, CarListItem>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// List the cars a driver is assigned to, ordered by model.
    pub async fn list_by_driver(
        pool: &PgPool,
        driver_id: DbId,
    ) -> Result<Vec<CarListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM cars c
             JOIN manufacturers m ON m.id = c.manufacturer_id
             JOIN cars_drivers cd ON cd.car_id = c.id
             WHERE cd.driver_id = $1
             ORDER BY c.model ASC, c.id ASC"
        );
        sqlx::query_as::<_, CarListItem>(&query)
            .bind(driver_id)
            .fetch_all(pool)
            .await
    }

    /// Update a car. Only non-`None` fields in `input` are applied; a present
    /// `drivers` list replaces the current assignments.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCar,
    ) -> Result<Option<Car>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE cars SET
                model = COALESCE($2, model),
                manufacturer_id = COALESCE($3, manufacturer_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(car) = sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .bind(&input.model)
            .bind(input.manufacturer_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(drivers) = &input.drivers {
            sqlx::query("DELETE FROM cars_drivers WHERE car_id = $1")
                .bind(car.id)
                .execute(&mut *tx)
                .await?;
            link_drivers(&mut tx, car.id, drivers).await?;
        }

        tx.commit().await?;
        Ok(Some(car))
    }

    /// Assign the driver to the car if not assigned, otherwise unassign.
    ///
    /// Returns `true` if the driver is assigned after the call.
    pub async fn toggle_driver(
        pool: &PgPool,
        car_id: DbId,
        driver_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed = sqlx::query("DELETE FROM cars_drivers WHERE car_id = $1 AND driver_id = $2")
            .bind(car_id)
            .bind(driver_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if !removed {
            link_drivers(&mut tx, car_id, &[driver_id]).await?;
        }

        tx.commit().await?;
        Ok(!removed)
    }

    /// Delete a car. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of cars.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cars")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

/// Insert `cars_drivers` links, skipping ones that already exist.
async fn link_drivers(
    conn: &mut PgConnection,
    car_id: DbId,
    drivers: &[DbId],
) -> Result<(), sqlx::Error> {
    if drivers.is_empty() {
        return Ok(());
    }
    sqlx::query(
        "INSERT INTO cars_drivers (car_id, driver_id)
         SELECT $1, UNNEST($2::BIGINT[])
         ON CONFLICT DO NOTHING",
    )
    .bind(car_id)
    .bind(drivers)
    .execute(conn)
    .await?;
    Ok(())
}
