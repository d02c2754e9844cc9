//! Repository for the `track_images` gallery table.

use sqlx::{FromRow, PgPool};
use trackside_core::types::DbId;

use crate::models::track_image::{CreateTrackImage, TrackImage, TrackImageWithUploader};
use crate::models::user::UserBrief;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, url, caption, track_id, uploaded_by_id, created_at";

/// Image row joined with its uploader's name.
#[derive(Debug, FromRow)]
struct TrackImageRow {
    #[sqlx(flatten)]
    image: TrackImage,
    uploader_name: Option<String>,
}

impl TrackImageRow {
    fn into_with_uploader(self) -> TrackImageWithUploader {
        TrackImageWithUploader {
            id: self.image.id,
            url: self.image.url,
            caption: self.image.caption,
            created_at: self.image.created_at,
            uploaded_by: UserBrief {
                id: self.image.uploaded_by_id,
                name: self.uploader_name,
            },
        }
    }
}

/// Provides CRUD operations for track gallery images.
pub struct TrackImageRepo;

impl TrackImageRepo {
    /// List a track's gallery, newest first.
    pub async fn list_for_track(
        pool: &PgPool,
        track_id: DbId,
    ) -> Result<Vec<TrackImageWithUploader>, sqlx::Error> {
        let rows = sqlx::query_as::<_, TrackImageRow>(
            "SELECT ti.id, ti.url, ti.caption, ti.track_id, ti.uploaded_by_id, ti.created_at,
                    u.name AS uploader_name
             FROM track_images ti
             JOIN users u ON u.id = ti.uploaded_by_id
             WHERE ti.track_id = $1
             ORDER BY ti.created_at DESC",
        )
        .bind(track_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(TrackImageRow::into_with_uploader).collect())
    }

    /// Insert a new gallery image, returning it with the uploader's
    /// identity.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTrackImage,
    ) -> Result<TrackImageWithUploader, sqlx::Error> {
        let query = format!(
            "INSERT INTO track_images (url, caption, track_id, uploaded_by_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, TrackImage>(&query)
            .bind(&input.url)
            .bind(&input.caption)
            .bind(input.track_id)
            .bind(input.uploaded_by_id)
            .fetch_one(pool)
            .await?;

        let uploaded_by = sqlx::query_as::<_, UserBrief>("SELECT id, name FROM users WHERE id = $1")
            .bind(image.uploaded_by_id)
            .fetch_one(pool)
            .await?;

        Ok(TrackImageWithUploader {
            id: image.id,
            url: image.url,
            caption: image.caption,
            created_at: image.created_at,
            uploaded_by,
        })
    }

    /// Find an image by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TrackImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM track_images WHERE id = $1");
        sqlx::query_as::<_, TrackImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an image row. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM track_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
