//! Player actions.
//!
//! Four player-initiated board actions (play face-up, play hidden, reveal,
//! upgrade) plus pass, the mulligan decision, and the two responses to a
//! pending effect (select a target, decline an optional effect).

use serde::{Deserialize, Serialize};

use super::entity::{InstanceId, PendingId};
use super::player::PlayerId;

/// Something a pending effect can ask a player to pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// A character in play.
    Character(InstanceId),
    /// An active mission, by index.
    Mission(usize),
    /// A card in the deciding player's hand, by index.
    HandCard(usize),
    /// A card from the list attached to the pending action, by index.
    ListCard(usize),
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Character(id) => write!(f, "{}", id),
            Target::Mission(i) => write!(f, "Mission #{}", i),
            Target::HandCard(i) => write!(f, "Hand card #{}", i),
            Target::ListCard(i) => write!(f, "Listed card #{}", i),
        }
    }
}

/// A complete game action.
///
/// ```
/// use mythos_engine::core::{Action, InstanceId};
///
/// let play = Action::PlayFaceUp { hand_index: 0, mission: 0 };
/// assert!(play.is_board_action());
/// assert!(!Action::Pass.is_board_action());
/// assert!(Action::Reveal { character: InstanceId(4) }.is_board_action());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Keep the opening hand, or shuffle it back and redraw.
    Mulligan { keep: bool },
    /// Play a character from hand face-up onto a mission.
    PlayFaceUp { hand_index: usize, mission: usize },
    /// Play a character from hand face-down onto a mission for 1 chakra.
    PlayHidden { hand_index: usize, mission: usize },
    /// Turn one of your hidden characters face-up.
    Reveal { character: InstanceId },
    /// Play a same-name, higher-cost card from hand over a character.
    Upgrade {
        hand_index: usize,
        character: InstanceId,
    },
    /// Stop acting for the rest of this turn.
    Pass,
    /// Answer a pending effect with one of its candidates.
    SelectTarget { pending: PendingId, target: Target },
    /// Skip an optional pending effect.
    DeclineOptionalEffect { pending: PendingId },
}

impl Action {
    /// Play, reveal or upgrade.
    #[must_use]
    pub fn is_board_action(&self) -> bool {
        matches!(
            self,
            Action::PlayFaceUp { .. }
                | Action::PlayHidden { .. }
                | Action::Reveal { .. }
                | Action::Upgrade { .. }
        )
    }

    /// Response to a pending effect.
    #[must_use]
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            Action::SelectTarget { .. } | Action::DeclineOptionalEffect { .. }
        )
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u8,

    /// Sequence number within the game.
    pub sequence: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_classification() {
        let select = Action::SelectTarget {
            pending: PendingId(1),
            target: Target::Mission(2),
        };
        assert!(select.is_selection());
        assert!(!select.is_board_action());
        assert!(Action::DeclineOptionalEffect { pending: PendingId(1) }.is_selection());
    }

    #[test]
    fn test_action_hash_and_eq() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Action::PlayHidden { hand_index: 1, mission: 0 });
        set.insert(Action::PlayHidden { hand_index: 1, mission: 0 });
        set.insert(Action::PlayFaceUp { hand_index: 1, mission: 0 });

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord {
            player: PlayerId::TWO,
            action: Action::Upgrade {
                hand_index: 2,
                character: InstanceId(7),
            },
            turn: 3,
            sequence: 11,
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: ActionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
