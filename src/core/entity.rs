//! Runtime identifiers.
//!
//! - `InstanceId`: a character in play. Allocated by the game state, never
//!   reused within a game, so an id held across a suspended effect either
//!   still names the same character or names nothing.
//! - `PendingId`: a suspended effect awaiting a player's selection.

use serde::{Deserialize, Serialize};

/// Unique identifier for a character in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Character({})", self.0)
    }
}

/// Identifier for a suspended effect and its paired pending action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingId(pub u32);

impl std::fmt::Display for PendingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pending({})", self.0)
    }
}
