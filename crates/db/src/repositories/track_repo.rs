//! Repository for the `tracks` and `track_events` tables, including the
//! listing and detail aggregates.
//!
//! Average ratings and counts are recomputed on every read rather than
//! stored, so they can never go stale.

use std::collections::HashMap;

use sqlx::{FromRow, PgPool};
use trackside_core::enums::EventType;
use trackside_core::types::DbId;

use crate::models::track::{
    CreateTrack, ImportTrack, Track, TrackCounts, TrackDetail, TrackEvent, TrackFilter,
    TrackListItem, UpdateTrack,
};
use crate::models::user::{UserBrief, UserWithExperience};
use crate::repositories::{ReviewRepo, ZoneRepo};

/// Column list shared across single-table queries.
const COLUMNS: &str = "id, name, location, state, description, image_url, latitude, longitude, \
                       status, is_imported, uploaded_by_id, created_at, updated_at";

const EVENT_COLUMNS: &str = "id, event_type, track_id";

/// Listing row: track columns plus uploader name and the per-track
/// aggregates computed in SQL.
#[derive(Debug, FromRow)]
struct TrackListRow {
    #[sqlx(flatten)]
    track: Track,
    uploader_name: Option<String>,
    review_count: i64,
    zone_count: i64,
    lap_record_count: i64,
    avg_rating: f64,
}

/// Counts and average rating for one track.
#[derive(Debug, FromRow)]
struct TrackStatsRow {
    review_count: i64,
    zone_count: i64,
    lap_record_count: i64,
    avg_rating: f64,
}

/// Provides CRUD and aggregate reads for tracks.
pub struct TrackRepo;

impl TrackRepo {
    /// List APPROVED tracks matching the given filters, newest first.
    ///
    /// Filters AND together; a `None` filter imposes no constraint. Search
    /// matches name OR location, case-insensitively. State comparison is
    /// uppercase-normalized.
    pub async fn list(
        pool: &PgPool,
        filter: &TrackFilter,
    ) -> Result<Vec<TrackListItem>, sqlx::Error> {
        let rows = sqlx::query_as::<_, TrackListRow>(
            "SELECT t.id, t.name, t.location, t.state, t.description, t.image_url,
                    t.latitude, t.longitude, t.status, t.is_imported, t.uploaded_by_id,
                    t.created_at, t.updated_at,
                    u.name AS uploader_name,
                    (SELECT COUNT(*) FROM track_reviews r WHERE r.track_id = t.id) AS review_count,
                    (SELECT COUNT(*) FROM track_zones z WHERE z.track_id = t.id) AS zone_count,
                    (SELECT COUNT(*) FROM lap_records lr WHERE lr.track_id = t.id) AS lap_record_count,
                    COALESCE((SELECT AVG(r.rating) FROM track_reviews r WHERE r.track_id = t.id), 0)::float8 AS avg_rating
             FROM tracks t
             JOIN users u ON u.id = t.uploaded_by_id
             WHERE t.status = 'APPROVED'
               AND ($1::text IS NULL OR t.name ILIKE '%' || $1 || '%' OR t.location ILIKE '%' || $1 || '%')
               AND ($2::text IS NULL OR EXISTS (
                       SELECT 1 FROM track_events te
                       WHERE te.track_id = t.id AND te.event_type = $2))
               AND ($3::text IS NULL OR t.state = upper($3))
             ORDER BY t.created_at DESC",
        )
        .bind(&filter.search)
        .bind(filter.event_type)
        .bind(&filter.state)
        .fetch_all(pool)
        .await?;

        let ids: Vec<DbId> = rows.iter().map(|r| r.track.id).collect();
        let mut events = Self::events_for_tracks(pool, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| TrackListItem {
                uploaded_by: UserBrief {
                    id: row.track.uploaded_by_id,
                    name: row.uploader_name,
                },
                events: events.remove(&row.track.id).unwrap_or_default(),
                count: TrackCounts {
                    reviews: row.review_count,
                    zones: row.zone_count,
                    lap_records: row.lap_record_count,
                },
                avg_rating: row.avg_rating,
                track: row.track,
            })
            .collect())
    }

    /// Find a track by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a track with the given id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM tracks WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Assemble the full detail aggregate for one track.
    ///
    /// `zone_event_filter` narrows the zone list to zones tagged with that
    /// discipline; it does not affect events, reviews, or counts.
    pub async fn get_detail(
        pool: &PgPool,
        id: DbId,
        zone_event_filter: Option<EventType>,
    ) -> Result<Option<TrackDetail>, sqlx::Error> {
        let Some(track) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let uploaded_by = sqlx::query_as::<_, UserWithExperience>(
            "SELECT id, name, experience FROM users WHERE id = $1",
        )
        .bind(track.uploaded_by_id)
        .fetch_one(pool)
        .await?;

        let events = Self::events_for_track(pool, id).await?;
        let zones = ZoneRepo::zones_with_tips(pool, id, zone_event_filter).await?;
        let reviews = ReviewRepo::list_for_track(pool, id).await?;

        let stats = sqlx::query_as::<_, TrackStatsRow>(
            "SELECT
                (SELECT COUNT(*) FROM track_reviews WHERE track_id = $1) AS review_count,
                (SELECT COUNT(*) FROM track_zones WHERE track_id = $1) AS zone_count,
                (SELECT COUNT(*) FROM lap_records WHERE track_id = $1) AS lap_record_count,
                COALESCE((SELECT AVG(rating) FROM track_reviews WHERE track_id = $1), 0)::float8 AS avg_rating",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(Some(TrackDetail {
            track,
            events,
            uploaded_by,
            zones,
            reviews,
            count: TrackCounts {
                reviews: stats.review_count,
                zones: stats.zone_count,
                lap_records: stats.lap_record_count,
            },
            avg_rating: stats.avg_rating,
        }))
    }

    /// Insert a track together with its initial events in one transaction,
    /// so a track with zero events is never observable.
    ///
    /// Returns the listing-shaped representation with zero counts.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTrack,
    ) -> Result<TrackListItem, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO tracks (name, location, description, image_url, uploaded_by_id, status)
             VALUES ($1, $2, $3, $4, $5, 'APPROVED')
             RETURNING {COLUMNS}"
        );
        let track = sqlx::query_as::<_, Track>(&insert_query)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.uploaded_by_id)
            .fetch_one(&mut *tx)
            .await?;

        let mut events = Vec::with_capacity(input.event_types.len());
        for event_type in &input.event_types {
            let event_query = format!(
                "INSERT INTO track_events (event_type, track_id)
                 VALUES ($1, $2)
                 RETURNING {EVENT_COLUMNS}"
            );
            let event = sqlx::query_as::<_, TrackEvent>(&event_query)
                .bind(event_type)
                .bind(track.id)
                .fetch_one(&mut *tx)
                .await?;
            events.push(event);
        }

        tx.commit().await?;

        let uploaded_by = sqlx::query_as::<_, UserBrief>(
            "SELECT id, name FROM users WHERE id = $1",
        )
        .bind(track.uploaded_by_id)
        .fetch_one(pool)
        .await?;

        Ok(TrackListItem {
            track,
            events,
            uploaded_by,
            count: TrackCounts::default(),
            avg_rating: 0.0,
        })
    }

    /// Patch track-level fields. Only non-`None` fields in `input` are
    /// applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrack,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!(
            "UPDATE tracks SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                image_url = COALESCE($5, image_url),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// List the events hosted by one track.
    pub async fn events_for_track(
        pool: &PgPool,
        track_id: DbId,
    ) -> Result<Vec<TrackEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM track_events WHERE track_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, TrackEvent>(&query)
            .bind(track_id)
            .fetch_all(pool)
            .await
    }

    /// Find an event by id, scoped to its parent track. Used to verify that
    /// a referenced event actually belongs to the track a review or lap
    /// record names.
    pub async fn find_event_for_track(
        pool: &PgPool,
        event_id: DbId,
        track_id: DbId,
    ) -> Result<Option<TrackEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM track_events WHERE id = $1 AND track_id = $2"
        );
        sqlx::query_as::<_, TrackEvent>(&query)
            .bind(event_id)
            .bind(track_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a track by its (name, location) pair, the identity the bulk
    /// import upserts on.
    pub async fn find_by_name_and_location(
        pool: &PgPool,
        name: &str,
        location: &str,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE name = $1 AND location = $2");
        sqlx::query_as::<_, Track>(&query)
            .bind(name)
            .bind(location)
            .fetch_optional(pool)
            .await
    }

    /// Upsert one imported track keyed by (name, location).
    ///
    /// Existing rows get their geo/description fields refreshed; new rows
    /// are created with their events in a transaction, owned by the system
    /// user. Returns `true` when a new row was created.
    pub async fn upsert_imported(
        pool: &PgPool,
        data: &ImportTrack,
        system_user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        if let Some(existing) = Self::find_by_name_and_location(pool, &data.name, &data.location).await? {
            sqlx::query(
                "UPDATE tracks SET
                    description = $2, latitude = $3, longitude = $4, state = $5,
                    is_imported = true, updated_at = now()
                 WHERE id = $1",
            )
            .bind(existing.id)
            .bind(&data.description)
            .bind(data.latitude)
            .bind(data.longitude)
            .bind(&data.state)
            .execute(pool)
            .await?;
            return Ok(false);
        }

        let mut tx = pool.begin().await?;

        let track_id: DbId = sqlx::query_scalar(
            "INSERT INTO tracks (name, location, state, description, latitude, longitude,
                                 is_imported, status, uploaded_by_id)
             VALUES ($1, $2, $3, $4, $5, $6, true, 'APPROVED', $7)
             RETURNING id",
        )
        .bind(&data.name)
        .bind(&data.location)
        .bind(&data.state)
        .bind(&data.description)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(system_user_id)
        .fetch_one(&mut *tx)
        .await?;

        for event_type in &data.event_types {
            sqlx::query("INSERT INTO track_events (event_type, track_id) VALUES ($1, $2)")
                .bind(event_type)
                .bind(track_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Batch-load events for a set of tracks, grouped by track id.
    async fn events_for_tracks(
        pool: &PgPool,
        track_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<TrackEvent>>, sqlx::Error> {
        if track_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM track_events WHERE track_id = ANY($1) ORDER BY id"
        );
        let events = sqlx::query_as::<_, TrackEvent>(&query)
            .bind(track_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<TrackEvent>> = HashMap::new();
        for e in events {
            grouped.entry(e.track_id).or_default().push(e);
        }
        Ok(grouped)
    }
}
