//! Publication-readiness validation for trips.
//!
//! Deliberately decoupled from the state machine so it can back a
//! standalone "check my trip" preview and be unit-tested without
//! persistence or authorization. Every check runs on every call and
//! every failure is reported, so the author can fix the whole trip in
//! one editing pass.

use crate::gpx;
use crate::slug::stage_label;
use crate::trip::TripContent;

/// Maximum length for a trip title.
pub const MAX_TITLE_LENGTH: usize = 120;

/// Maximum length for a trip destination.
pub const MAX_DESTINATION_LENGTH: usize = 160;

/// Maximum length for a media caption.
pub const MAX_CAPTION_LENGTH: usize = 280;

/// The verdict of a publication-readiness check.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Evaluate every publication check against a trip snapshot.
///
/// Pure with respect to its input; safe to invoke speculatively.
pub fn validate_for_publication(trip: &TripContent) -> ValidationReport {
    let mut errors = Vec::new();

    check_stages(trip, &mut errors);
    check_headline_fields(trip, &mut errors);
    check_duration(trip, &mut errors);
    check_gpx(trip, &mut errors);
    check_media_captions(trip, &mut errors);

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn check_stages(trip: &TripContent, errors: &mut Vec<String>) {
    if trip.stages.is_empty() {
        errors.push("Trip has no stages; at least one stage is required".to_string());
        return;
    }

    for stage in &trip.stages {
        let label = stage_label(stage.stage_index);
        if stage.description.trim().is_empty() {
            errors.push(format!("Stage {label} has no description"));
        }
        if stage.route.trim().is_empty() {
            errors.push(format!("Stage {label} has no route"));
        }
    }
}

fn check_headline_fields(trip: &TripContent, errors: &mut Vec<String>) {
    // Bounds count characters, not bytes, matching the length rules
    // applied when the trip is created.
    if trip.title.trim().is_empty() {
        errors.push("Title must not be empty".to_string());
    } else if trip.title.chars().count() > MAX_TITLE_LENGTH {
        errors.push(format!(
            "Title exceeds {MAX_TITLE_LENGTH} characters (got {})",
            trip.title.chars().count()
        ));
    }

    if trip.destination.trim().is_empty() {
        errors.push("Destination must not be empty".to_string());
    } else if trip.destination.chars().count() > MAX_DESTINATION_LENGTH {
        errors.push(format!(
            "Destination exceeds {MAX_DESTINATION_LENGTH} characters (got {})",
            trip.destination.chars().count()
        ));
    }
}

fn check_duration(trip: &TripContent, errors: &mut Vec<String>) {
    if trip.duration_days <= 0 {
        errors.push(format!(
            "Duration days must be a positive integer (got {})",
            trip.duration_days
        ));
    }
    if trip.duration_nights <= 0 {
        errors.push(format!(
            "Duration nights must be a positive integer (got {})",
            trip.duration_nights
        ));
    }
}

fn check_gpx(trip: &TripContent, errors: &mut Vec<String>) {
    let Some(gpx_data) = &trip.gpx_data else {
        return; // a track is optional
    };

    match gpx::parse_track_points(gpx_data) {
        Ok(points) if points.is_empty() => {
            errors.push("GPX track contains no points".to_string());
        }
        Ok(_) => {}
        Err(e) => {
            errors.push(format!("GPX track is malformed: {e}"));
        }
    }
}

fn check_media_captions(trip: &TripContent, errors: &mut Vec<String>) {
    for (i, media) in trip.media.iter().enumerate() {
        if let Some(caption) = &media.caption {
            if caption.chars().count() > MAX_CAPTION_LENGTH {
                errors.push(format!(
                    "Caption for media item {} exceeds {MAX_CAPTION_LENGTH} characters (got {})",
                    i + 1,
                    caption.chars().count()
                ));
            }
        }
    }
}
