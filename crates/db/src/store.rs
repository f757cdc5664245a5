//! PostgreSQL-backed implementation of the core's storage capability.
//!
//! The lifecycle engine depends on [`TripStore`], not on this type;
//! handlers construct a [`PgTripStore`] per request from the shared
//! pool (it is just a cheap pool handle).

use async_trait::async_trait;

use motogiro_core::error::CoreError;
use motogiro_core::lifecycle::TripStore;
use motogiro_core::status::TripStatus;
use motogiro_core::trip::{MediaContent, StageContent, TripContent, TripSummary};
use motogiro_core::types::DbId;

use crate::models::trip::Trip;
use crate::repositories::TripRepo;
use crate::DbPool;

/// [`TripStore`] over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgTripStore {
    pool: DbPool,
}

impl PgTripStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Assemble the full domain snapshot for a trip row.
    pub async fn load_content(&self, trip: Trip) -> Result<TripContent, CoreError> {
        let stages = TripRepo::list_stages(&self.pool, trip.id)
            .await
            .map_err(storage_fault)?;
        let media = TripRepo::list_media(&self.pool, trip.id)
            .await
            .map_err(storage_fault)?;

        let status = parse_status(&trip.status)?;

        Ok(TripContent {
            id: trip.id,
            slug: trip.slug,
            owner_id: trip.owner_id,
            title: trip.title,
            destination: trip.destination,
            duration_days: trip.duration_days,
            duration_nights: trip.duration_nights,
            theme: trip.theme,
            travel_date: trip.travel_date,
            gpx_data: trip.gpx_data,
            status,
            stages: stages
                .into_iter()
                .map(|s| StageContent {
                    stage_index: s.stage_index,
                    title: s.title,
                    description: s.description,
                    route: s.route,
                })
                .collect(),
            media: media
                .into_iter()
                .map(|m| MediaContent {
                    file_path: m.file_path,
                    caption: m.caption,
                })
                .collect(),
        })
    }
}

#[async_trait]
impl TripStore for PgTripStore {
    async fn find_trip_by_id(&self, id: DbId) -> Result<Option<TripContent>, CoreError> {
        let Some(trip) = TripRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_fault)?
        else {
            return Ok(None);
        };
        Ok(Some(self.load_content(trip).await?))
    }

    async fn update_trip_status(
        &self,
        id: DbId,
        new_status: TripStatus,
        expected_prior: TripStatus,
    ) -> Result<Option<TripSummary>, CoreError> {
        let updated = TripRepo::update_status_where_current(
            &self.pool,
            id,
            new_status.as_str(),
            expected_prior.as_str(),
        )
        .await
        .map_err(storage_fault)?;

        let Some(trip) = updated else {
            return Ok(None);
        };

        Ok(Some(TripSummary {
            id: trip.id,
            slug: trip.slug,
            status: parse_status(&trip.status)?,
            updated_at: trip.updated_at,
        }))
    }
}

/// A stored token that fails to parse means the table was written
/// outside the state machine; surface it as an internal fault.
fn parse_status(token: &str) -> Result<TripStatus, CoreError> {
    TripStatus::from_str_value(token).map_err(CoreError::Internal)
}

fn storage_fault(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Storage fault in trip store");
    CoreError::Internal(format!("storage fault: {err}"))
}
