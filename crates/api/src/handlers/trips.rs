//! Handlers for trip authoring and the validation preview.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use motogiro_core::authz::{authorize_validation_preview, AccessDecision};
use motogiro_core::error::CoreError;
use motogiro_core::lifecycle::TripStore;
use motogiro_core::slug::slugify;
use motogiro_core::status::TripStatus;
use motogiro_core::trip::TripContent;
use motogiro_core::types::DbId;
use motogiro_core::validation::validate_for_publication;
use motogiro_db::models::trip::{CreateMedia, CreateStage, CreateTrip};
use motogiro_db::repositories::TripRepo;
use motogiro_db::store::PgTripStore;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireRanger;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating a trip. Lengths mirror the publication
/// bounds so a draft cannot be created that could never publish.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTripRequest {
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[validate(length(min = 1, max = 160))]
    pub destination: String,
    pub duration_days: i32,
    pub duration_nights: i32,
    #[serde(default)]
    pub theme: String,
    pub travel_date: Option<NaiveDate>,
    pub gpx_data: Option<String>,
    #[serde(default)]
    pub stages: Vec<CreateStage>,
    #[serde(default)]
    pub media: Vec<CreateMedia>,
}

/// Response body for the validation preview.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub is_valid: bool,
    pub validation_errors: Vec<String>,
}

/// POST /api/v1/trips
///
/// Create a draft trip with its stages and media. Requires a role that
/// may author trips; the caller becomes the owner.
pub async fn create_trip(
    RequireRanger(user): RequireRanger,
    State(state): State<AppState>,
    Json(input): Json<CreateTripRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let slug = slugify(&input.title);
    if slug.is_empty() {
        return Err(AppError::BadRequest(
            "Title must contain at least one alphanumeric character".into(),
        ));
    }

    let create = CreateTrip {
        slug,
        owner_id: user.user_id,
        title: input.title,
        destination: input.destination,
        duration_days: input.duration_days,
        duration_nights: input.duration_nights,
        theme: input.theme,
        travel_date: input.travel_date,
        gpx_data: input.gpx_data,
    };

    let trip = TripRepo::create(&state.pool, &create, &input.stages, &input.media).await?;

    tracing::info!(
        user_id = user.user_id,
        trip_id = trip.id,
        slug = %trip.slug,
        "Trip created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: trip })))
}

/// GET /api/v1/trips
///
/// List the trips owned by the current actor, newest first.
pub async fn list_my_trips(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let trips = TripRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: trips }))
}

/// GET /api/v1/trips/{id}
///
/// Fetch a trip with its full itinerary content. Published trips are
/// visible to any authenticated user; everything else only to the
/// owner or a Sentinel.
pub async fn get_trip(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let trip = load_trip(&state, id).await?;

    if trip.status != TripStatus::Published {
        ensure_owner_or_sentinel(&user, &trip)?;
    }

    Ok(Json(DataResponse { data: trip }))
}

/// GET /api/v1/trips/{id}/validate
///
/// Publication-readiness preview. Runs every check and reports every
/// failure without touching the trip's state; owner or Sentinel only.
pub async fn validate_trip(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let trip = load_trip(&state, id).await?;
    ensure_owner_or_sentinel(&user, &trip)?;

    let report = validate_for_publication(&trip);

    Ok(Json(DataResponse {
        data: ValidationResponse {
            is_valid: report.is_valid,
            validation_errors: report.errors,
        },
    }))
}

/// Load the full domain snapshot or fail with 404.
async fn load_trip(state: &AppState, id: DbId) -> Result<TripContent, AppError> {
    let store = PgTripStore::new(state.pool.clone());
    let trip = store
        .find_trip_by_id(id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Trip",
            id,
        })?;
    Ok(trip)
}

fn ensure_owner_or_sentinel(user: &AuthUser, trip: &TripContent) -> Result<(), AppError> {
    match authorize_validation_preview(Some(&user.actor()), trip) {
        AccessDecision::Granted => Ok(()),
        AccessDecision::Denied(reason) => Err(AppError::Core(CoreError::Forbidden(reason))),
    }
}
