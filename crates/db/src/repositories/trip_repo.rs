//! Repository for the `trips`, `stages`, and `trip_media` tables.

use sqlx::PgPool;

use motogiro_core::status::STATUS_DRAFT;
use motogiro_core::types::DbId;

use crate::models::trip::{CreateMedia, CreateStage, CreateTrip, Stage, Trip, TripMedia};

/// Column list for trips queries.
const TRIP_COLUMNS: &str = "id, slug, owner_id, title, destination, duration_days, \
    duration_nights, theme, travel_date, gpx_data, status, created_at, updated_at";

/// Column list for stages queries.
const STAGE_COLUMNS: &str =
    "id, trip_id, stage_index, title, description, route, created_at, updated_at";

/// Column list for trip_media queries.
const MEDIA_COLUMNS: &str = "id, trip_id, file_path, caption, created_at";

/// Provides CRUD operations for trips and their nested content.
pub struct TripRepo;

impl TripRepo {
    /// Insert a new draft trip with its stages and media in one
    /// transaction. Stage indexes are assigned from input order.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTrip,
        stages: &[CreateStage],
        media: &[CreateMedia],
    ) -> Result<Trip, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO trips
                (slug, owner_id, title, destination, duration_days, duration_nights,
                 theme, travel_date, gpx_data, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {TRIP_COLUMNS}"
        );
        let trip = sqlx::query_as::<_, Trip>(&query)
            .bind(&input.slug)
            .bind(input.owner_id)
            .bind(&input.title)
            .bind(&input.destination)
            .bind(input.duration_days)
            .bind(input.duration_nights)
            .bind(&input.theme)
            .bind(input.travel_date)
            .bind(&input.gpx_data)
            .bind(STATUS_DRAFT)
            .fetch_one(&mut *tx)
            .await?;

        for (index, stage) in stages.iter().enumerate() {
            sqlx::query(
                "INSERT INTO stages (trip_id, stage_index, title, description, route)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(trip.id)
            .bind(index as i32)
            .bind(&stage.title)
            .bind(&stage.description)
            .bind(&stage.route)
            .execute(&mut *tx)
            .await?;
        }

        for item in media {
            sqlx::query(
                "INSERT INTO trip_media (trip_id, file_path, caption)
                 VALUES ($1, $2, $3)",
            )
            .bind(trip.id)
            .bind(&item.file_path)
            .bind(&item.caption)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(trip)
    }

    /// Find a trip by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Trip>, sqlx::Error> {
        let query = format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = $1");
        sqlx::query_as::<_, Trip>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all trips owned by a user, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Trip>, sqlx::Error> {
        let query = format!(
            "SELECT {TRIP_COLUMNS} FROM trips WHERE owner_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Trip>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// List a trip's stages ordered by stage_index ascending.
    pub async fn list_stages(pool: &PgPool, trip_id: DbId) -> Result<Vec<Stage>, sqlx::Error> {
        let query = format!(
            "SELECT {STAGE_COLUMNS} FROM stages WHERE trip_id = $1 ORDER BY stage_index ASC"
        );
        sqlx::query_as::<_, Stage>(&query)
            .bind(trip_id)
            .fetch_all(pool)
            .await
    }

    /// List a trip's media items, oldest first.
    pub async fn list_media(pool: &PgPool, trip_id: DbId) -> Result<Vec<TripMedia>, sqlx::Error> {
        let query = format!(
            "SELECT {MEDIA_COLUMNS} FROM trip_media WHERE trip_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, TripMedia>(&query)
            .bind(trip_id)
            .fetch_all(pool)
            .await
    }

    /// Conditionally move a trip's status.
    ///
    /// The UPDATE applies only while the stored status still equals
    /// `expected_prior`; `None` for a trip that exists means a
    /// concurrent writer committed first. This is the single write path
    /// for trip status.
    pub async fn update_status_where_current(
        pool: &PgPool,
        id: DbId,
        new_status: &str,
        expected_prior: &str,
    ) -> Result<Option<Trip>, sqlx::Error> {
        let query = format!(
            "UPDATE trips
             SET status = $2, updated_at = now()
             WHERE id = $1 AND status = $3
             RETURNING {TRIP_COLUMNS}"
        );
        sqlx::query_as::<_, Trip>(&query)
            .bind(id)
            .bind(new_status)
            .bind(expected_prior)
            .fetch_optional(pool)
            .await
    }
}
