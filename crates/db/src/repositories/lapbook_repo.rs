//! Repository for the `lap_records` table.
//!
//! Every read is scoped to one driver; lap records are mutable only by
//! deletion.

use std::collections::HashMap;

use sqlx::{FromRow, PgPool};
use trackside_core::types::DbId;

use crate::models::car::CarSummary;
use crate::models::lap_record::{
    CreateLapRecord, LapRecord, LapRecordFilter, LapRecordWithDetails,
};
use crate::models::track::{TrackBrief, TrackEvent};

/// Column list shared across single-table queries.
const COLUMNS: &str = "id, lap_time, conditions, notes, \
                       tire_pressure_fl, tire_pressure_fr, tire_pressure_rl, tire_pressure_rr, \
                       fuel_level, camber_fl, camber_fr, camber_rl, camber_rr, \
                       caster_fl, caster_fr, toe_fl, toe_fr, toe_rl, toe_rr, \
                       track_id, track_event_id, car_id, driver_id, created_at, updated_at";

/// Lap record row joined with its track and car summaries.
#[derive(Debug, FromRow)]
struct LapRecordRow {
    #[sqlx(flatten)]
    record: LapRecord,
    track_name: String,
    track_location: String,
    car_make: String,
    car_model: String,
    car_year: i32,
}

/// Provides creation, driver-scoped reads, and deletion for lap records.
pub struct LapbookRepo;

impl LapbookRepo {
    /// List one driver's lap records matching the given filters, newest
    /// first, each with track/car/event summaries.
    pub async fn list_for_driver(
        pool: &PgPool,
        driver_id: DbId,
        filter: &LapRecordFilter,
    ) -> Result<Vec<LapRecordWithDetails>, sqlx::Error> {
        let rows = sqlx::query_as::<_, LapRecordRow>(
            "SELECT lr.id, lr.lap_time, lr.conditions, lr.notes,
                    lr.tire_pressure_fl, lr.tire_pressure_fr, lr.tire_pressure_rl, lr.tire_pressure_rr,
                    lr.fuel_level, lr.camber_fl, lr.camber_fr, lr.camber_rl, lr.camber_rr,
                    lr.caster_fl, lr.caster_fr, lr.toe_fl, lr.toe_fr, lr.toe_rl, lr.toe_rr,
                    lr.track_id, lr.track_event_id, lr.car_id, lr.driver_id,
                    lr.created_at, lr.updated_at,
                    t.name AS track_name, t.location AS track_location,
                    c.make AS car_make, c.model AS car_model, c.year AS car_year
             FROM lap_records lr
             JOIN tracks t ON t.id = lr.track_id
             JOIN cars c ON c.id = lr.car_id
             WHERE lr.driver_id = $1
               AND ($2::bigint IS NULL OR lr.track_id = $2)
               AND ($3::bigint IS NULL OR lr.car_id = $3)
               AND ($4::text IS NULL OR EXISTS (
                       SELECT 1 FROM track_events te
                       WHERE te.id = lr.track_event_id AND te.event_type = $4))
             ORDER BY lr.created_at DESC",
        )
        .bind(driver_id)
        .bind(filter.track_id)
        .bind(filter.car_id)
        .bind(filter.event_type)
        .fetch_all(pool)
        .await?;

        let event_ids: Vec<DbId> = rows
            .iter()
            .filter_map(|r| r.record.track_event_id)
            .collect();
        let mut events = Self::events_by_ids(pool, &event_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let track_event = row.record.track_event_id.and_then(|id| events.remove(&id));
                LapRecordWithDetails {
                    track: TrackBrief {
                        id: row.record.track_id,
                        name: row.track_name,
                        location: row.track_location,
                    },
                    car: CarSummary {
                        id: row.record.car_id,
                        make: row.car_make,
                        model: row.car_model,
                        year: row.car_year,
                    },
                    track_event,
                    record: row.record,
                }
            })
            .collect())
    }

    /// Insert a new lap record, returning it with track/car/event
    /// summaries attached.
    pub async fn create(
        pool: &PgPool,
        input: &CreateLapRecord,
    ) -> Result<LapRecordWithDetails, sqlx::Error> {
        let query = format!(
            "INSERT INTO lap_records (lap_time, conditions, notes,
                 tire_pressure_fl, tire_pressure_fr, tire_pressure_rl, tire_pressure_rr,
                 fuel_level, camber_fl, camber_fr, camber_rl, camber_rr,
                 caster_fl, caster_fr, toe_fl, toe_fr, toe_rl, toe_rr,
                 track_id, track_event_id, car_id, driver_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                     $13, $14, $15, $16, $17, $18, $19, $20, $21, $22)
             RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, LapRecord>(&query)
            .bind(&input.lap_time)
            .bind(input.conditions)
            .bind(&input.notes)
            .bind(input.tire_pressure_fl)
            .bind(input.tire_pressure_fr)
            .bind(input.tire_pressure_rl)
            .bind(input.tire_pressure_rr)
            .bind(input.fuel_level)
            .bind(input.camber_fl)
            .bind(input.camber_fr)
            .bind(input.camber_rl)
            .bind(input.camber_rr)
            .bind(input.caster_fl)
            .bind(input.caster_fr)
            .bind(input.toe_fl)
            .bind(input.toe_fr)
            .bind(input.toe_rl)
            .bind(input.toe_rr)
            .bind(input.track_id)
            .bind(input.track_event_id)
            .bind(input.car_id)
            .bind(input.driver_id)
            .fetch_one(pool)
            .await?;

        let track = sqlx::query_as::<_, TrackBrief>(
            "SELECT id, name, location FROM tracks WHERE id = $1",
        )
        .bind(record.track_id)
        .fetch_one(pool)
        .await?;

        let car = sqlx::query_as::<_, CarSummary>(
            "SELECT id, make, model, year FROM cars WHERE id = $1",
        )
        .bind(record.car_id)
        .fetch_one(pool)
        .await?;

        let track_event = match record.track_event_id {
            Some(event_id) => {
                sqlx::query_as::<_, TrackEvent>(
                    "SELECT id, event_type, track_id FROM track_events WHERE id = $1",
                )
                .bind(event_id)
                .fetch_optional(pool)
                .await?
            }
            None => None,
        };

        Ok(LapRecordWithDetails {
            record,
            track,
            track_event,
            car,
        })
    }

    /// Find a lap record by id, scoped to its driver. Returns `None` for
    /// both a missing record and another driver's record.
    pub async fn find_for_driver(
        pool: &PgPool,
        id: DbId,
        driver_id: DbId,
    ) -> Result<Option<LapRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lap_records WHERE id = $1 AND driver_id = $2");
        sqlx::query_as::<_, LapRecord>(&query)
            .bind(id)
            .bind(driver_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a lap record. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lap_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Batch-load events by id.
    async fn events_by_ids(
        pool: &PgPool,
        event_ids: &[DbId],
    ) -> Result<HashMap<DbId, TrackEvent>, sqlx::Error> {
        if event_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let events = sqlx::query_as::<_, TrackEvent>(
            "SELECT id, event_type, track_id FROM track_events WHERE id = ANY($1)",
        )
        .bind(event_ids)
        .fetch_all(pool)
        .await?;

        Ok(events.into_iter().map(|e| (e.id, e)).collect())
    }
}
