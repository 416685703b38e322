//! Game configuration types.
//!
//! - `RulesConfig`: the numeric constants of the rules (income, draws, hand
//!   size, deck limits, rank bonuses)
//! - `DeckList`: one player's characters and mission pool
//! - `GameConfig`: both decks, the seed, and the rules
//!
//! All are plain serde structs so callers may load them from any format.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::mission::MissionRank;
use super::player::PlayerMap;
use crate::cards::Card;

/// Numeric rules constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Chakra granted each start phase before bonuses.
    pub base_chakra: u32,

    /// Cards drawn each start phase.
    pub cards_per_turn: u32,

    /// Opening hand size.
    pub starting_hand: u32,

    /// Number of turns in a game.
    pub turns: u8,

    /// Minimum character cards in a deck.
    pub min_deck_size: usize,

    /// Maximum copies of one card identifier in a deck.
    pub max_copies: usize,

    /// Missions each player brings.
    pub mission_pool_size: usize,

    /// Missions from each pool shuffled into the mission deck.
    pub missions_per_player: usize,

    /// Cost of playing a character face-down.
    pub hidden_cost: u32,

    /// Rank bonus for D, C, B, A.
    pub rank_bonus: [u32; 4],
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            base_chakra: 5,
            cards_per_turn: 2,
            starting_hand: 5,
            turns: 4,
            min_deck_size: 30,
            max_copies: 2,
            mission_pool_size: 3,
            missions_per_player: 2,
            hidden_cost: 1,
            rank_bonus: [1, 2, 3, 4],
        }
    }
}

impl RulesConfig {
    /// Bonus points for a mission rank.
    #[must_use]
    pub fn bonus_for(&self, rank: MissionRank) -> u32 {
        self.rank_bonus[rank.ordinal()]
    }

    /// Set the base chakra income (builder pattern).
    #[must_use]
    pub fn with_base_chakra(mut self, chakra: u32) -> Self {
        self.base_chakra = chakra;
        self
    }

    /// Set the opening hand size (builder pattern).
    #[must_use]
    pub fn with_starting_hand(mut self, size: u32) -> Self {
        self.starting_hand = size;
        self
    }
}

/// One player's cards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeckList {
    pub characters: Vec<Arc<Card>>,
    pub missions: Vec<Arc<Card>>,
}

impl DeckList {
    #[must_use]
    pub fn new(characters: Vec<Arc<Card>>, missions: Vec<Arc<Card>>) -> Self {
        Self {
            characters,
            missions,
        }
    }
}

/// Everything needed to create a game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    pub decks: PlayerMap<DeckList>,
    pub seed: u64,
    #[serde(default)]
    pub rules: RulesConfig,
}

impl GameConfig {
    #[must_use]
    pub fn new(first: DeckList, second: DeckList, seed: u64) -> Self {
        Self {
            decks: PlayerMap::from_pair(first, second),
            seed,
            rules: RulesConfig::default(),
        }
    }

    /// Override the rules constants (builder pattern).
    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = RulesConfig::default();
        assert_eq!(rules.base_chakra, 5);
        assert_eq!(rules.turns, 4);
        assert_eq!(rules.bonus_for(MissionRank::D), 1);
        assert_eq!(rules.bonus_for(MissionRank::A), 4);
    }

    #[test]
    fn test_rules_deserialize_partial_config() {
        let json = r#"{"decks":[{"characters":[],"missions":[]},{"characters":[],"missions":[]}],"seed":9}"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.rules, RulesConfig::default());
    }
}
