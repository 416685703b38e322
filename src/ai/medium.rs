//! Medium: one-ply greedy.

use crate::core::{Action, GameState, PlayerId};

use super::config::AiConfig;
use super::evaluation::action_score;
use super::{best_by, mulligan_choice, Difficulty, Strategy};

/// Takes the action with the highest heuristic score. No lookahead.
#[derive(Clone, Debug)]
pub struct MediumStrategy {
    config: AiConfig,
}

impl MediumStrategy {
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }
}

impl Strategy for MediumStrategy {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }

    fn choose_action(&mut self, state: &GameState, player: PlayerId, valid: &[Action]) -> Option<Action> {
        if let Some(choice) = mulligan_choice(state, player, valid, self.config.mulligan_threshold) {
            return Some(choice);
        }
        best_by(valid, |action| action_score(state, player, action))
    }
}
