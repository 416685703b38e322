//! Easy: random play with a lean towards keeping and playing.

use tracing::trace;

use crate::core::{Action, GameRng, GameState, PlayerId};

use super::config::AiConfig;
use super::{Difficulty, Strategy};

/// Uniform-random choice over the legal actions, except that it keeps its
/// opening hand with probability `easy_keep_bias` and, when it could play,
/// plays rather than passes with probability `easy_play_bias`.
#[derive(Clone, Debug)]
pub struct EasyStrategy {
    config: AiConfig,
    rng: GameRng,
}

impl EasyStrategy {
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self { config, rng }
    }
}

impl Strategy for EasyStrategy {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }

    fn choose_action(&mut self, _state: &GameState, player: PlayerId, valid: &[Action]) -> Option<Action> {
        if valid.iter().any(|a| matches!(a, Action::Mulligan { .. })) {
            let keep = self.rng.gen_bool(self.config.easy_keep_bias);
            let wanted = Action::Mulligan { keep };
            return valid
                .iter()
                .find(|&a| *a == wanted)
                .or_else(|| valid.first())
                .cloned();
        }

        let plays: Vec<&Action> = valid.iter().filter(|a| a.is_board_action()).collect();
        let can_pass = valid.contains(&Action::Pass);
        if can_pass && !plays.is_empty() {
            if self.rng.gen_bool(self.config.easy_play_bias) {
                trace!(%player, options = plays.len(), "easy plays");
                return self.rng.choose(&plays).map(|&a| a.clone());
            }
            return Some(Action::Pass);
        }

        self.rng.choose(valid).cloned()
    }
}
