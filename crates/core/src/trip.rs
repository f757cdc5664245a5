//! Domain snapshot types for a trip and its nested content.
//!
//! These are the shapes the validation engine and lifecycle engine work
//! against. They carry no persistence concerns; the `db` crate assembles
//! them from table rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::TripStatus;
use crate::types::{DbId, Timestamp};

/// One ordered leg of a trip's itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageContent {
    /// Zero-based position within the trip; displayed zero-padded.
    pub stage_index: i32,
    pub title: String,
    pub description: String,
    /// Start/end locality text for the leg.
    pub route: String,
}

/// A captioned image reference owned by the trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaContent {
    pub file_path: String,
    pub caption: Option<String>,
}

/// A full read snapshot of a trip, including nested itinerary content.
///
/// All checks in a lifecycle request are computed against a single
/// snapshot; the commit is conditional on the status read here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripContent {
    pub id: DbId,
    pub slug: String,
    /// The creator. Immutable after creation.
    pub owner_id: DbId,
    pub title: String,
    pub destination: String,
    pub duration_days: i32,
    pub duration_nights: i32,
    pub theme: String,
    pub travel_date: Option<NaiveDate>,
    pub gpx_data: Option<String>,
    pub status: TripStatus,
    /// Ordered by `stage_index` ascending.
    pub stages: Vec<StageContent>,
    pub media: Vec<MediaContent>,
}

/// The slim view returned after a committed transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSummary {
    pub id: DbId,
    pub slug: String,
    pub status: TripStatus,
    pub updated_at: Timestamp,
}
