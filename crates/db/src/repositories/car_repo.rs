//! Repository for the `cars` and `car_mods` tables.
//!
//! All lookups that precede a mutation are owner-scoped (`id` + `user_id`),
//! so a foreign car is indistinguishable from a missing one.

use std::collections::HashMap;

use sqlx::PgPool;
use trackside_core::types::DbId;

use crate::models::car::{Car, CarMod, CarWithMods, CreateCar, CreateCarMod};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, make, model, year, user_id, created_at, updated_at";

const MOD_COLUMNS: &str = "id, name, category, notes, car_id";

/// Provides CRUD operations for cars and their mods.
pub struct CarRepo;

impl CarRepo {
    /// List a user's cars with their mods, most recently created first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CarWithMods>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cars WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let cars = sqlx::query_as::<_, Car>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = cars.iter().map(|c| c.id).collect();
        let mut mods = Self::mods_for_cars(pool, &ids).await?;

        Ok(cars
            .into_iter()
            .map(|car| {
                let mods = mods.remove(&car.id).unwrap_or_default();
                CarWithMods { car, mods }
            })
            .collect())
    }

    /// Find a car by id, scoped to its owner. Returns `None` for both a
    /// missing car and a car owned by someone else.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<CarWithMods>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars WHERE id = $1 AND user_id = $2");
        let car = sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        match car {
            Some(car) => {
                let mods = Self::mods_for_car(pool, car.id).await?;
                Ok(Some(CarWithMods { car, mods }))
            }
            None => Ok(None),
        }
    }

    /// Whether a car with the given id belongs to the given user.
    pub async fn exists_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM cars WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Insert a new car, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCar) -> Result<Car, sqlx::Error> {
        let query = format!(
            "INSERT INTO cars (make, model, year, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(&input.make)
            .bind(&input.model)
            .bind(input.year)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Replace a car's make/model/year.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        make: &str,
        model: &str,
        year: i32,
    ) -> Result<Option<Car>, sqlx::Error> {
        let query = format!(
            "UPDATE cars SET make = $2, model = $3, year = $4, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .bind(make)
            .bind(model)
            .bind(year)
            .fetch_optional(pool)
            .await
    }

    /// Delete a car. Mods and lap records referencing it go with it via
    /// FK cascade. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the mods of one car.
    pub async fn mods_for_car(pool: &PgPool, car_id: DbId) -> Result<Vec<CarMod>, sqlx::Error> {
        let query = format!("SELECT {MOD_COLUMNS} FROM car_mods WHERE car_id = $1 ORDER BY id");
        sqlx::query_as::<_, CarMod>(&query)
            .bind(car_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new mod, returning the created row.
    pub async fn create_mod(pool: &PgPool, input: &CreateCarMod) -> Result<CarMod, sqlx::Error> {
        let query = format!(
            "INSERT INTO car_mods (name, category, notes, car_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {MOD_COLUMNS}"
        );
        sqlx::query_as::<_, CarMod>(&query)
            .bind(&input.name)
            .bind(input.category)
            .bind(&input.notes)
            .bind(input.car_id)
            .fetch_one(pool)
            .await
    }

    /// Find a mod by id, scoped to its parent car.
    pub async fn find_mod(
        pool: &PgPool,
        mod_id: DbId,
        car_id: DbId,
    ) -> Result<Option<CarMod>, sqlx::Error> {
        let query = format!("SELECT {MOD_COLUMNS} FROM car_mods WHERE id = $1 AND car_id = $2");
        sqlx::query_as::<_, CarMod>(&query)
            .bind(mod_id)
            .bind(car_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a mod. Returns `true` if a row was deleted.
    pub async fn delete_mod(pool: &PgPool, mod_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM car_mods WHERE id = $1")
            .bind(mod_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Batch-load mods for a set of cars, grouped by car id.
    async fn mods_for_cars(
        pool: &PgPool,
        car_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<CarMod>>, sqlx::Error> {
        if car_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {MOD_COLUMNS} FROM car_mods WHERE car_id = ANY($1) ORDER BY id"
        );
        let mods = sqlx::query_as::<_, CarMod>(&query)
            .bind(car_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<CarMod>> = HashMap::new();
        for m in mods {
            grouped.entry(m.car_id).or_default().push(m);
        }
        Ok(grouped)
    }
}
