//! Role policy: the three-tier capability hierarchy.
//!
//! Role names must match the values stored in the `users.role` column.
//! Capabilities are pure predicates with no state and no failure modes;
//! they are consumed by the access gate and the admin/UI layers.

use serde::{Deserialize, Serialize};

/// Base role: read and purchase access only.
pub const ROLE_EXPLORER: &str = "explorer";

/// May author and manage its own trips.
pub const ROLE_RANGER: &str = "ranger";

/// Elevated role: unconditional override over any trip, plus user
/// management and admin panel access.
pub const ROLE_SENTINEL: &str = "sentinel";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_EXPLORER, ROLE_RANGER, ROLE_SENTINEL];

/// A user's role. Every user has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Explorer,
    Ranger,
    Sentinel,
}

impl Role {
    /// Convert from the database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_EXPLORER => Ok(Self::Explorer),
            ROLE_RANGER => Ok(Self::Ranger),
            ROLE_SENTINEL => Ok(Self::Sentinel),
            _ => Err(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Explorer => ROLE_EXPLORER,
            Self::Ranger => ROLE_RANGER,
            Self::Sentinel => ROLE_SENTINEL,
        }
    }

    /// Rangers and Sentinels may author trips.
    pub fn can_create_trips(&self) -> bool {
        matches!(self, Self::Ranger | Self::Sentinel)
    }

    /// Only Sentinels may manage other users.
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Self::Sentinel)
    }

    /// Only Sentinels may access the admin panel.
    pub fn can_access_admin_panel(&self) -> bool {
        matches!(self, Self::Sentinel)
    }
}
