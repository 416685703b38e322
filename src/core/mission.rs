//! Active missions and their ranks.

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{Card, CharacterInPlay};

/// Mission rank, assigned by the turn the mission was revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MissionRank {
    D,
    C,
    B,
    A,
}

impl MissionRank {
    /// Ranks in scoring order.
    pub const SCORING_ORDER: [MissionRank; 4] =
        [MissionRank::D, MissionRank::C, MissionRank::B, MissionRank::A];

    /// Rank revealed on a given turn (1-4).
    ///
    /// ```
    /// use mythos_engine::core::MissionRank;
    ///
    /// assert_eq!(MissionRank::for_turn(1), Some(MissionRank::D));
    /// assert_eq!(MissionRank::for_turn(4), Some(MissionRank::A));
    /// assert_eq!(MissionRank::for_turn(5), None);
    /// ```
    #[must_use]
    pub fn for_turn(turn: u8) -> Option<Self> {
        match turn {
            1 => Some(Self::D),
            2 => Some(Self::C),
            3 => Some(Self::B),
            4 => Some(Self::A),
            _ => None,
        }
    }

    /// Position in scoring order (0 for D).
    #[must_use]
    pub fn ordinal(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for MissionRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Self::D => "D",
            Self::C => "C",
            Self::B => "B",
            Self::A => "A",
        };
        write!(f, "{}", letter)
    }
}

/// A mission on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveMission {
    pub card: Arc<Card>,
    pub rank: MissionRank,
    pub base_points: u32,
    pub rank_bonus: u32,
    /// Characters per side, in play order.
    pub characters: PlayerMap<Vector<CharacterInPlay>>,
    /// Winner of the most recent scoring pass.
    pub won_by: Option<PlayerId>,
}

impl ActiveMission {
    #[must_use]
    pub fn new(card: Arc<Card>, rank: MissionRank, rank_bonus: u32) -> Self {
        Self {
            base_points: card.base_points,
            card,
            rank,
            rank_bonus,
            characters: PlayerMap::with_default(),
            won_by: None,
        }
    }

    /// Points awarded to the winner.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.base_points + self.rank_bonus
    }

    /// One player's characters here.
    #[must_use]
    pub fn side(&self, player: PlayerId) -> &Vector<CharacterInPlay> {
        &self.characters[player]
    }

    /// Face-up characters a player has here.
    pub fn visible(&self, player: PlayerId) -> impl Iterator<Item = &CharacterInPlay> {
        self.characters[player].iter().filter(|c| c.is_visible())
    }

    /// Find a character by id: (side, position).
    #[must_use]
    pub fn locate(&self, id: InstanceId) -> Option<(PlayerId, usize)> {
        self.characters
            .iter()
            .find_map(|(side, chars)| chars.iter().position(|c| c.id == id).map(|pos| (side, pos)))
    }

    /// Whether `player` has a face-up character named `name` here.
    #[must_use]
    pub fn has_visible_named(&self, player: PlayerId, name: &str) -> bool {
        self.visible(player).any(|c| c.card().same_name_as(name))
    }

    /// Total characters on both sides.
    #[must_use]
    pub fn character_count(&self) -> usize {
        self.characters.iter().map(|(_, side)| side.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    #[test]
    fn test_points_include_rank_bonus() {
        let card = Card::mission(CardId::new(200), "Escort", 3).shared();
        let mission = ActiveMission::new(card, MissionRank::D, 1);
        assert_eq!(mission.points(), 4);
    }

    #[test]
    fn test_scoring_order() {
        let mut ranks = vec![MissionRank::A, MissionRank::D, MissionRank::B, MissionRank::C];
        ranks.sort();
        assert_eq!(ranks, MissionRank::SCORING_ORDER.to_vec());
    }

    #[test]
    fn test_locate_and_name_lookup() {
        let card = Card::mission(CardId::new(200), "Escort", 3).shared();
        let mut mission = ActiveMission::new(card, MissionRank::C, 2);
        let naruto = Card::character(CardId::new(1), "Naruto Uzumaki", 2, 2).shared();
        mission.characters[PlayerId::TWO].push_back(CharacterInPlay::new(
            InstanceId(9),
            naruto,
            PlayerId::TWO,
            0,
            false,
        ));

        assert_eq!(mission.locate(InstanceId(9)), Some((PlayerId::TWO, 0)));
        assert!(mission.has_visible_named(PlayerId::TWO, "naruto uzumaki"));
        assert!(!mission.has_visible_named(PlayerId::ONE, "naruto uzumaki"));
    }
}
