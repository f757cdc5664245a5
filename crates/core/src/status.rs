//! Trip lifecycle states and the authoritative transition table.
//!
//! Status values must match the literal tokens stored in the
//! `trips.status` column. No write path may set a status outside the
//! transitions defined here.

use serde::{Deserialize, Serialize};

/// Private draft; the initial state of every trip.
pub const STATUS_DRAFT: &str = "Bozza";

/// Submitted by the owner, awaiting review.
pub const STATUS_PENDING_REVIEW: &str = "Pronto_per_revisione";

/// Publicly purchasable.
pub const STATUS_PUBLISHED: &str = "Pubblicato";

/// Retired content. Terminal: no transition leads out of it.
pub const STATUS_ARCHIVED: &str = "Archiviato";

/// All valid status tokens.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_PENDING_REVIEW,
    STATUS_PUBLISHED,
    STATUS_ARCHIVED,
];

/// A trip's lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripStatus {
    #[serde(rename = "Bozza")]
    Draft,
    #[serde(rename = "Pronto_per_revisione")]
    PendingReview,
    #[serde(rename = "Pubblicato")]
    Published,
    #[serde(rename = "Archiviato")]
    Archived,
}

/// Every defined `(from, to)` transition. Anything absent from this
/// table fails with `InvalidTransition` regardless of actor role.
pub const TRANSITIONS: &[(TripStatus, TripStatus)] = &[
    (TripStatus::Draft, TripStatus::PendingReview),
    (TripStatus::Draft, TripStatus::Published),
    (TripStatus::PendingReview, TripStatus::Published),
    (TripStatus::Draft, TripStatus::Archived),
    (TripStatus::PendingReview, TripStatus::Archived),
    (TripStatus::Published, TripStatus::Archived),
];

impl TripStatus {
    /// Convert from the database token.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_PENDING_REVIEW => Ok(Self::PendingReview),
            STATUS_PUBLISHED => Ok(Self::Published),
            STATUS_ARCHIVED => Ok(Self::Archived),
            _ => Err(format!(
                "Invalid trip status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::PendingReview => STATUS_PENDING_REVIEW,
            Self::Published => STATUS_PUBLISHED,
            Self::Archived => STATUS_ARCHIVED,
        }
    }

    /// Transitions into `Published` must pass the validation engine.
    pub fn requires_validation(&self) -> bool {
        matches!(self, Self::Published)
    }

    /// Archived trips accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Archived)
    }
}

/// Returns `true` if `(from, to)` appears in the transition table.
pub fn is_transition_defined(from: TripStatus, to: TripStatus) -> bool {
    TRANSITIONS.contains(&(from, to))
}
