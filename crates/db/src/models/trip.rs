//! Trip, stage, and media rows plus create DTOs.

use chrono::NaiveDate;
use motogiro_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `trips` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Trip {
    pub id: DbId,
    pub slug: String,
    pub owner_id: DbId,
    pub title: String,
    pub destination: String,
    pub duration_days: i32,
    pub duration_nights: i32,
    pub theme: String,
    pub travel_date: Option<NaiveDate>,
    pub gpx_data: Option<String>,
    /// One of the four lifecycle tokens; see `motogiro_core::status`.
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `stages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Stage {
    pub id: DbId,
    pub trip_id: DbId,
    pub stage_index: i32,
    pub title: String,
    pub description: String,
    pub route: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `trip_media` table.
///
/// The BIGSERIAL id is durable; any client-generated temporary id is
/// discarded on insert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TripMedia {
    pub id: DbId,
    pub trip_id: DbId,
    pub file_path: String,
    pub caption: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a trip row.
#[derive(Debug, Clone)]
pub struct CreateTrip {
    pub slug: String,
    pub owner_id: DbId,
    pub title: String,
    pub destination: String,
    pub duration_days: i32,
    pub duration_nights: i32,
    pub theme: String,
    pub travel_date: Option<NaiveDate>,
    pub gpx_data: Option<String>,
}

/// DTO for inserting one stage of a new trip.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStage {
    pub title: String,
    pub description: String,
    pub route: String,
}

/// DTO for inserting one media item of a new trip.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMedia {
    pub file_path: String,
    pub caption: Option<String>,
}
