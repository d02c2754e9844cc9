//! Repository for the `track_reviews` table.
//!
//! Reviews are immutable after creation; the read side attaches the
//! author's identity, experience tier, and garage.

use std::collections::HashMap;

use sqlx::{FromRow, PgPool};
use trackside_core::enums::ExperienceLevel;
use trackside_core::types::DbId;

use crate::models::car::CarBrief;
use crate::models::review::{CreateTrackReview, ReviewWithAuthor, TrackReview};
use crate::models::track::TrackEvent;
use crate::models::user::UserWithCars;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, rating, content, conditions, track_id, track_event_id, author_id, \
                       created_at, updated_at";

/// Review row joined with its author's name and experience.
#[derive(Debug, FromRow)]
struct ReviewRow {
    #[sqlx(flatten)]
    review: TrackReview,
    author_name: Option<String>,
    author_experience: ExperienceLevel,
}

/// One car brief tagged with its owner, for batch grouping.
#[derive(Debug, FromRow)]
struct OwnedCarBrief {
    user_id: DbId,
    make: String,
    model: String,
    year: i32,
}

/// Provides creation and track-scoped reads for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// List a track's reviews with author details, newest first.
    pub async fn list_for_track(
        pool: &PgPool,
        track_id: DbId,
    ) -> Result<Vec<ReviewWithAuthor>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT tr.id, tr.rating, tr.content, tr.conditions, tr.track_id,
                    tr.track_event_id, tr.author_id, tr.created_at, tr.updated_at,
                    u.name AS author_name, u.experience AS author_experience
             FROM track_reviews tr
             JOIN users u ON u.id = tr.author_id
             WHERE tr.track_id = $1
             ORDER BY tr.created_at DESC",
        )
        .bind(track_id)
        .fetch_all(pool)
        .await?;

        let author_ids: Vec<DbId> = rows.iter().map(|r| r.review.author_id).collect();
        let mut garages = Self::cars_for_authors(pool, &author_ids).await?;

        let event_ids: Vec<DbId> = rows
            .iter()
            .filter_map(|r| r.review.track_event_id)
            .collect();
        let mut events = Self::events_by_ids(pool, &event_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let track_event = row.review.track_event_id.and_then(|id| events.remove(&id));
                ReviewWithAuthor {
                    author: UserWithCars {
                        id: row.review.author_id,
                        name: row.author_name,
                        experience: row.author_experience,
                        cars: garages.remove(&row.review.author_id).unwrap_or_default(),
                    },
                    track_event,
                    review: row.review,
                }
            })
            .collect())
    }

    /// Insert a new review, returning it with author details attached.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTrackReview,
    ) -> Result<ReviewWithAuthor, sqlx::Error> {
        let query = format!(
            "INSERT INTO track_reviews (rating, content, conditions, track_id, track_event_id, author_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let review = sqlx::query_as::<_, TrackReview>(&query)
            .bind(input.rating)
            .bind(&input.content)
            .bind(input.conditions)
            .bind(input.track_id)
            .bind(input.track_event_id)
            .bind(input.author_id)
            .fetch_one(pool)
            .await?;

        let (author_name, author_experience): (Option<String>, ExperienceLevel) =
            sqlx::query_as("SELECT name, experience FROM users WHERE id = $1")
                .bind(review.author_id)
                .fetch_one(pool)
                .await?;

        let cars = sqlx::query_as::<_, CarBrief>(
            "SELECT make, model, year FROM cars WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(review.author_id)
        .fetch_all(pool)
        .await?;

        let track_event = match review.track_event_id {
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

        Ok(ReviewWithAuthor {
            author: UserWithCars {
                id: review.author_id,
                name: author_name,
                experience: author_experience,
                cars,
            },
            track_event,
            review,
        })
    }

    /// Batch-load each author's cars, grouped by author id.
    async fn cars_for_authors(
        pool: &PgPool,
        author_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<CarBrief>>, sqlx::Error> {
        if author_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query_as::<_, OwnedCarBrief>(
            "SELECT user_id, make, model, year FROM cars
             WHERE user_id = ANY($1)
             ORDER BY created_at",
        )
        .bind(author_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<CarBrief>> = HashMap::new();
        for row in rows {
            grouped.entry(row.user_id).or_default().push(CarBrief {
                make: row.make,
                model: row.model,
                year: row.year,
            });
        }
        Ok(grouped)
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
