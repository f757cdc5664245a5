//! Access control gate for trip lifecycle operations.
//!
//! A single two-axis decision (role capability x resource ownership)
//! replaces per-handler boolean checks. The gate is pure and carries no
//! transport concerns, so the same function backs HTTP handlers and
//! admin tooling. Rules are evaluated strictly in order:
//!
//! 1. no actor -> deny;
//! 2. Sentinel -> grant, unconditionally;
//! 3. owner whose role may author trips -> grant;
//! 4. otherwise deny.

use crate::roles::Role;
use crate::status::TripStatus;
use crate::trip::TripContent;
use crate::types::DbId;

/// The authenticated principal of a request, as resolved from the
/// session layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub role: Role,
}

/// The gate's verdict, with the denial reason when negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Denied(String),
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Decide whether `actor` may move `trip` into `target`.
///
/// Ownership and role are independent axes: a Ranger is granted on
/// trips it owns and denied on every other trip, while a Sentinel is
/// granted on any trip. Every defined transition is owner-serviceable,
/// so `target` does not further restrict owners.
pub fn authorize_transition(
    actor: Option<&Actor>,
    trip: &TripContent,
    target: TripStatus,
) -> AccessDecision {
    let Some(actor) = actor else {
        return AccessDecision::Denied("Authentication required".to_string());
    };

    if actor.role == Role::Sentinel {
        return AccessDecision::Granted;
    }

    if actor.user_id == trip.owner_id && actor.role.can_create_trips() {
        return AccessDecision::Granted;
    }

    AccessDecision::Denied(format!(
        "Role '{}' may not set trip {} to '{}': not the owner or not permitted to author trips",
        actor.role.as_str(),
        trip.id,
        target.as_str()
    ))
}

/// Decide whether `actor` may view the validation preview for `trip`.
///
/// Same owner-or-Sentinel rule as transitions. This is a real ownership
/// check; the preview is not world-readable.
pub fn authorize_validation_preview(actor: Option<&Actor>, trip: &TripContent) -> AccessDecision {
    let Some(actor) = actor else {
        return AccessDecision::Denied("Authentication required".to_string());
    };

    if actor.role == Role::Sentinel {
        return AccessDecision::Granted;
    }

    if actor.user_id == trip.owner_id && actor.role.can_create_trips() {
        return AccessDecision::Granted;
    }

    AccessDecision::Denied(format!(
        "Role '{}' may not view validation for trip {}: not the owner",
        actor.role.as_str(),
        trip.id
    ))
}
