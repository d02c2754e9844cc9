//! Repository for the `track_zones` and `zone_tips` tables.

use std::collections::HashMap;

use sqlx::{FromRow, PgPool};
use trackside_core::enums::EventType;
use trackside_core::types::DbId;

use crate::models::user::UserBrief;
use crate::models::zone::{
    CreateTrackZone, CreateZoneTip, TrackZone, TrackZoneWithTips, UpdateTrackZone, ZoneTip,
    ZoneTipWithAuthor,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, pos_x, pos_y, track_id, event_type, created_at";

const TIP_COLUMNS: &str = "id, content, conditions, zone_id, author_id, created_at, updated_at";

/// Tip row joined with its author's name.
#[derive(Debug, FromRow)]
struct ZoneTipRow {
    #[sqlx(flatten)]
    tip: ZoneTip,
    author_name: Option<String>,
}

impl ZoneTipRow {
    fn into_with_author(self) -> ZoneTipWithAuthor {
        ZoneTipWithAuthor {
            author: UserBrief {
                id: self.tip.author_id,
                name: self.author_name,
            },
            tip: self.tip,
        }
    }
}

/// Provides CRUD operations for zones and their tips.
pub struct ZoneRepo;

impl ZoneRepo {
    /// List a track's zones, each with its tips and tip authors.
    ///
    /// `event_filter` narrows the list to zones tagged with that discipline.
    pub async fn zones_with_tips(
        pool: &PgPool,
        track_id: DbId,
        event_filter: Option<EventType>,
    ) -> Result<Vec<TrackZoneWithTips>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM track_zones
             WHERE track_id = $1 AND ($2::text IS NULL OR event_type = $2)
             ORDER BY created_at"
        );
        let zones = sqlx::query_as::<_, TrackZone>(&query)
            .bind(track_id)
            .bind(event_filter)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = zones.iter().map(|z| z.id).collect();
        let mut tips = Self::tips_for_zones(pool, &ids).await?;

        Ok(zones
            .into_iter()
            .map(|zone| {
                let tips = tips.remove(&zone.id).unwrap_or_default();
                TrackZoneWithTips { zone, tips }
            })
            .collect())
    }

    /// Find a zone by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TrackZone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM track_zones WHERE id = $1");
        sqlx::query_as::<_, TrackZone>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a zone by id, scoped to its parent track.
    pub async fn find_for_track(
        pool: &PgPool,
        zone_id: DbId,
        track_id: DbId,
    ) -> Result<Option<TrackZone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM track_zones WHERE id = $1 AND track_id = $2");
        sqlx::query_as::<_, TrackZone>(&query)
            .bind(zone_id)
            .bind(track_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new zone, returning the created row. Position is fixed
    /// from here on.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTrackZone,
    ) -> Result<TrackZone, sqlx::Error> {
        let query = format!(
            "INSERT INTO track_zones (name, description, pos_x, pos_y, track_id, event_type)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrackZone>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .bind(input.track_id)
            .bind(input.event_type)
            .fetch_one(pool)
            .await
    }

    /// Edit a zone's text fields. Only non-`None` fields in `input` are
    /// applied; position is untouchable.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrackZone,
    ) -> Result<Option<TrackZone>, sqlx::Error> {
        let query = format!(
            "UPDATE track_zones SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrackZone>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a zone and, via FK cascade, its tips. Returns `true` if a
    /// row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM track_zones WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a new tip, returning it with the author's identity attached.
    pub async fn create_tip(
        pool: &PgPool,
        input: &CreateZoneTip,
    ) -> Result<ZoneTipWithAuthor, sqlx::Error> {
        let query = format!(
            "INSERT INTO zone_tips (content, conditions, zone_id, author_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {TIP_COLUMNS}"
        );
        let tip = sqlx::query_as::<_, ZoneTip>(&query)
            .bind(&input.content)
            .bind(input.conditions)
            .bind(input.zone_id)
            .bind(input.author_id)
            .fetch_one(pool)
            .await?;

        let author = sqlx::query_as::<_, UserBrief>("SELECT id, name FROM users WHERE id = $1")
            .bind(tip.author_id)
            .fetch_one(pool)
            .await?;

        Ok(ZoneTipWithAuthor { tip, author })
    }

    /// List one zone's tips with authors, newest first.
    pub async fn tips_for_zone(
        pool: &PgPool,
        zone_id: DbId,
    ) -> Result<Vec<ZoneTipWithAuthor>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ZoneTipRow>(
            "SELECT zt.id, zt.content, zt.conditions, zt.zone_id, zt.author_id,
                    zt.created_at, zt.updated_at,
                    u.name AS author_name
             FROM zone_tips zt
             JOIN users u ON u.id = zt.author_id
             WHERE zt.zone_id = $1
             ORDER BY zt.created_at DESC",
        )
        .bind(zone_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(ZoneTipRow::into_with_author).collect())
    }

    /// Batch-load tips (with authors) for a set of zones, grouped by zone
    /// id, newest first.
    async fn tips_for_zones(
        pool: &PgPool,
        zone_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<ZoneTipWithAuthor>>, sqlx::Error> {
        if zone_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query_as::<_, ZoneTipRow>(
            "SELECT zt.id, zt.content, zt.conditions, zt.zone_id, zt.author_id,
                    zt.created_at, zt.updated_at,
                    u.name AS author_name
             FROM zone_tips zt
             JOIN users u ON u.id = zt.author_id
             WHERE zt.zone_id = ANY($1)
             ORDER BY zt.created_at DESC",
        )
        .bind(zone_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<ZoneTipWithAuthor>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.tip.zone_id)
                .or_default()
                .push(row.into_with_author());
        }
        Ok(grouped)
    }
}
