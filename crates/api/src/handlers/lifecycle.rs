//! Handlers for trip lifecycle transitions.
//!
//! Each endpoint is a thin adapter over
//! [`motogiro_core::lifecycle::request_transition`]; authorization,
//! the transition table, the publication gate, and the conditional
//! commit all live in the core.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use motogiro_core::lifecycle::request_transition;
use motogiro_core::status::TripStatus;
use motogiro_core::trip::TripSummary;
use motogiro_core::types::DbId;
use motogiro_db::store::PgTripStore;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// PATCH /api/v1/trips/{id}/publish
///
/// Attempt `Draft|PendingReview -> Published`. Fails 400 with the
/// itemized error list if the content does not pass the publication
/// gate, 409 on an undefined transition or a lost race.
pub async fn publish_trip(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    transition(user, state, id, TripStatus::Published).await
}

/// PATCH /api/v1/trips/{id}/submit
///
/// `Draft -> PendingReview`. No validation gate: content is expected to
/// still be evolving.
pub async fn submit_trip(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    transition(user, state, id, TripStatus::PendingReview).await
}

/// PATCH /api/v1/trips/{id}/archive
///
/// Retire a trip from any non-terminal state.
pub async fn archive_trip(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    transition(user, state, id, TripStatus::Archived).await
}

async fn transition(
    user: AuthUser,
    state: AppState,
    trip_id: DbId,
    target: TripStatus,
) -> AppResult<Json<DataResponse<TripSummary>>> {
    let store = PgTripStore::new(state.pool.clone());
    let summary = request_transition(&store, Some(&user.actor()), trip_id, target).await?;

    tracing::info!(
        user_id = user.user_id,
        trip_id,
        status = summary.status.as_str(),
        "Trip transition applied"
    );

    Ok(Json(DataResponse { data: summary }))
}
