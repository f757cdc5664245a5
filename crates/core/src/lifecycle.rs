//! The lifecycle engine: orchestrates gate, validation, and the
//! conditional commit for a trip status transition.
//!
//! Storage is injected through [`TripStore`] so the engine can be
//! exercised against an in-memory fake. The engine is request-scoped
//! and holds no state of its own; all trip state lives behind the
//! store.

use async_trait::async_trait;

use crate::authz::{authorize_transition, AccessDecision, Actor};
use crate::error::CoreError;
use crate::status::{is_transition_defined, TripStatus};
use crate::trip::{TripContent, TripSummary};
use crate::types::DbId;
use crate::validation::validate_for_publication;

/// Storage capability consumed by the lifecycle engine.
///
/// `update_trip_status` must be a conditional write: it commits only if
/// the trip's stored status still equals `expected_prior`, and returns
/// `Ok(None)` when a concurrent writer got there first.
#[async_trait]
pub trait TripStore: Send + Sync {
    async fn find_trip_by_id(&self, id: DbId) -> Result<Option<TripContent>, CoreError>;

    async fn update_trip_status(
        &self,
        id: DbId,
        new_status: TripStatus,
        expected_prior: TripStatus,
    ) -> Result<Option<TripSummary>, CoreError>;
}

/// Attempt to move a trip into `target` on behalf of `actor`.
///
/// Evaluated strictly in order against a single read snapshot:
///
/// 1. `NotFound` if the trip does not exist;
/// 2. `Unauthorized`/`Forbidden` if the access gate denies;
/// 3. `InvalidTransition` if `(current -> target)` is not in the table;
/// 4. `ValidationFailed` if `target` is Published and the content
///    fails the publication checks;
/// 5. conditional commit; a stale snapshot yields
///    `ConcurrentModification` and the caller retries from step 1.
pub async fn request_transition(
    store: &dyn TripStore,
    actor: Option<&Actor>,
    trip_id: DbId,
    target: TripStatus,
) -> Result<TripSummary, CoreError> {
    let trip = store
        .find_trip_by_id(trip_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Trip",
            id: trip_id,
        })?;

    match authorize_transition(actor, &trip, target) {
        AccessDecision::Granted => {}
        AccessDecision::Denied(reason) => {
            return Err(match actor {
                None => CoreError::Unauthorized(reason),
                Some(_) => CoreError::Forbidden(reason),
            });
        }
    }

    if !is_transition_defined(trip.status, target) {
        return Err(CoreError::InvalidTransition {
            from: trip.status.as_str(),
            to: target.as_str(),
        });
    }

    if target.requires_validation() {
        let report = validate_for_publication(&trip);
        if !report.is_valid {
            return Err(CoreError::ValidationFailed(report.errors));
        }
    }

    let summary = store
        .update_trip_status(trip_id, target, trip.status)
        .await?
        .ok_or_else(|| {
            CoreError::ConcurrentModification(format!(
                "Trip {trip_id} status changed since it was read (expected '{}')",
                trip.status.as_str()
            ))
        })?;

    tracing::info!(
        trip_id,
        from = trip.status.as_str(),
        to = target.as_str(),
        "Trip transition committed"
    );

    Ok(summary)
}
