pub mod health;
pub mod trips;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /trips                     list own trips (GET), create draft (POST)
/// /trips/{id}                fetch trip with content (GET)
/// /trips/{id}/validate       publication-readiness preview (GET)
/// /trips/{id}/publish        Draft|PendingReview -> Published (PATCH)
/// /trips/{id}/submit         Draft -> PendingReview (PATCH)
/// /trips/{id}/archive        any non-terminal -> Archived (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/trips", trips::router())
}
