//! Route definitions for the `/trips` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{lifecycle, trips};
use crate::state::AppState;

/// Routes mounted at `/trips`.
///
/// All routes require authentication; per-trip ownership rules are
/// enforced by the core access gate inside the handlers.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trips::list_my_trips).post(trips::create_trip))
        .route("/{id}", get(trips::get_trip))
        .route("/{id}/validate", get(trips::validate_trip))
        .route("/{id}/publish", patch(lifecycle::publish_trip))
        .route("/{id}/submit", patch(lifecycle::submit_trip))
        .route("/{id}/archive", patch(lifecycle::archive_trip))
}
