//! Repository for the `users` table.

use sqlx::PgPool;
use trackside_core::enums::ExperienceLevel;
use trackside_core::types::DbId;

use crate::models::user::{CreateUser, Profile, ProfileCounts, User};
use crate::repositories::CarRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, image, experience, created_at, updated_at";

/// Email of the synthetic account that owns bulk-imported tracks.
const SYSTEM_EMAIL: &str = "system@trackside.local";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Experience defaults to BEGINNER via the column default.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Update the profile fields a user controls: display name and
    /// experience tier.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        name: &str,
        experience: ExperienceLevel,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET name = $2, experience = $3, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(name)
            .bind(experience)
            .fetch_optional(pool)
            .await
    }

    /// Assemble the full profile aggregate: identity, garage, and
    /// contribution counts.
    pub async fn get_profile(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let Some(user) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let cars = CarRepo::list_for_user(pool, id).await?;

        let count = sqlx::query_as::<_, ProfileCounts>(
            "SELECT
                (SELECT COUNT(*) FROM track_reviews WHERE author_id = $1) AS track_reviews,
                (SELECT COUNT(*) FROM lap_records WHERE driver_id = $1) AS lap_records,
                (SELECT COUNT(*) FROM tracks WHERE uploaded_by_id = $1) AS tracks,
                (SELECT COUNT(*) FROM zone_tips WHERE author_id = $1) AS zone_tips",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(Some(Profile {
            id: user.id,
            name: user.name,
            email: user.email,
            experience: user.experience,
            image: user.image,
            created_at: user.created_at,
            cars,
            count,
        }))
    }

    /// Find the system account, creating it on first use.
    ///
    /// The system account owns tracks created by the bulk import and has no
    /// credential, so it can never log in.
    pub async fn find_or_create_system(pool: &PgPool) -> Result<User, sqlx::Error> {
        if let Some(user) = Self::find_by_email(pool, SYSTEM_EMAIL).await? {
            return Ok(user);
        }

        let query = format!(
            "INSERT INTO users (name, email)
             VALUES ('Trackside System', $1)
             ON CONFLICT ON CONSTRAINT uq_users_email DO UPDATE SET updated_at = now()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(SYSTEM_EMAIL)
            .fetch_one(pool)
            .await
    }
}
