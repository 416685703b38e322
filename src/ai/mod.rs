//! AI opponents.
//!
//! ## Overview
//!
//! Four strategies of increasing strength share one interface, [`Strategy`]:
//!
//! - **Easy**: random legal play, biased towards keeping and playing
//! - **Medium**: one-ply greedy on a hand-tuned action score
//! - **Hard**: depth-limited alpha-beta minimax over the sanitized state
//! - **Expert**: expectimax over determinized states, averaged across
//!   Monte Carlo simulations, plus strategic bonuses
//!
//! Strategies only ever see a state sanitized for their player. Hard and
//! Expert drive the engine through `try_apply`; a rejected action inside
//! the search scores as a large penalty instead of aborting it.
//!
//! ## Usage
//!
//! ```rust
//! use mythos_engine::ai::{AiConfig, AiPlayer, Difficulty};
//! use mythos_engine::cards::starter;
//! use mythos_engine::core::PlayerId;
//! use mythos_engine::rules::{GameEngine, RulesEngine};
//!
//! let catalog = starter::catalog();
//! let engine = GameEngine::with_catalog(&catalog);
//! let state = engine.create_game(&starter::starter_config(7));
//!
//! let mut ai = AiPlayer::new(PlayerId::ONE, Difficulty::Medium, &engine, &catalog, AiConfig::default());
//! let action = ai.decide(&engine, &state).unwrap();
//! assert!(engine.valid_actions(&state, PlayerId::ONE).contains(&action));
//! ```

pub mod config;
mod easy;
pub mod evaluation;
mod expert;
mod hard;
mod medium;
pub mod sampling;
pub mod stats;

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::CardCatalog;
use crate::core::{Action, GameState, PlayerId};
use crate::rules::{sanitize_for, GameEngine, RulesEngine};

pub use config::AiConfig;
pub use easy::EasyStrategy;
pub use expert::ExpertStrategy;
pub use hard::HardStrategy;
pub use medium::MediumStrategy;
pub use stats::SearchStats;

/// AI strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        f.write_str(name)
    }
}

/// A decision procedure for one seat.
pub trait Strategy: Send {
    fn difficulty(&self) -> Difficulty;

    /// Pick one of `valid`. `state` is already sanitized for `player`.
    ///
    /// Returns `None` only when `valid` is empty.
    fn choose_action(&mut self, state: &GameState, player: PlayerId, valid: &[Action]) -> Option<Action>;
}

/// Build the strategy for `difficulty`.
///
/// `catalog` is the card pool Expert samples hidden cards from.
#[must_use]
pub fn create_strategy(
    difficulty: Difficulty,
    engine: &GameEngine,
    catalog: &CardCatalog,
    config: AiConfig,
) -> Box<dyn Strategy> {
    match difficulty {
        Difficulty::Easy => Box::new(EasyStrategy::new(config)),
        Difficulty::Medium => Box::new(MediumStrategy::new(config)),
        Difficulty::Hard => Box::new(HardStrategy::new(engine.clone(), config)),
        Difficulty::Expert => Box::new(ExpertStrategy::new(
            engine.clone(),
            catalog.characters().cloned().collect(),
            config,
        )),
    }
}

/// A seat driven by a strategy.
///
/// Sanitizes the authoritative state before the strategy sees it and
/// guarantees the returned action is one of the valid ones.
pub struct AiPlayer {
    player: PlayerId,
    strategy: Box<dyn Strategy>,
}

impl AiPlayer {
    #[must_use]
    pub fn new(
        player: PlayerId,
        difficulty: Difficulty,
        engine: &GameEngine,
        catalog: &CardCatalog,
        config: AiConfig,
    ) -> Self {
        Self::with_strategy(player, create_strategy(difficulty, engine, catalog, config))
    }

    #[must_use]
    pub fn with_strategy(player: PlayerId, strategy: Box<dyn Strategy>) -> Self {
        Self { player, strategy }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.strategy.difficulty()
    }

    /// Choose this seat's next action, or `None` if it has nothing to do.
    pub fn decide(&mut self, engine: &GameEngine, state: &GameState) -> Option<Action> {
        let valid = engine.valid_actions(state, self.player);
        if valid.is_empty() {
            return None;
        }
        let view = sanitize_for(state, self.player);
        let choice = self
            .strategy
            .choose_action(&view, self.player, &valid)
            .filter(|action| valid.contains(action))
            .or_else(|| valid.first().cloned());
        debug!(player = %self.player, difficulty = %self.difficulty(), ?choice, "ai decision");
        choice
    }
}

impl fmt::Debug for AiPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiPlayer")
            .field("player", &self.player)
            .field("difficulty", &self.difficulty())
            .finish()
    }
}

/// First action with the highest score.
pub(crate) fn best_by(actions: &[Action], mut score: impl FnMut(&Action) -> f64) -> Option<Action> {
    let mut best: Option<(f64, &Action)> = None;
    for action in actions {
        let value = score(action);
        if best.map_or(true, |(top, _)| value > top) {
            best = Some((value, action));
        }
    }
    best.map(|(_, action)| action.clone())
}

/// The mulligan answer when one is being asked for.
pub(crate) fn mulligan_choice(
    state: &GameState,
    player: PlayerId,
    valid: &[Action],
    threshold: f64,
) -> Option<Action> {
    if !valid.iter().any(|a| matches!(a, Action::Mulligan { .. })) {
        return None;
    }
    let keep = evaluation::mulligan_score(state, player) >= threshold;
    let wanted = Action::Mulligan { keep };
    valid.iter().find(|&a| *a == wanted).or_else(|| valid.first()).cloned()
}

/// The actions worth searching at a node: best `limit` by the ordering
/// heuristic, with Pass always kept.
pub(crate) fn candidates(state: &GameState, actor: PlayerId, actions: &[Action], limit: usize) -> Vec<Action> {
    let mut scored: Vec<(f64, &Action)> = actions
        .iter()
        .map(|a| (evaluation::action_score(state, actor, a), a))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let mut kept: Vec<Action> = scored.iter().take(limit.max(1)).map(|(_, a)| (*a).clone()).collect();
    if actions.contains(&Action::Pass) && !kept.contains(&Action::Pass) {
        kept.push(Action::Pass);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::starter;

    #[test]
    fn test_best_by_prefers_first_on_ties() {
        let actions = [Action::Pass, Action::Mulligan { keep: true }];
        assert_eq!(best_by(&actions, |_| 1.0), Some(Action::Pass));
        assert_eq!(best_by(&[], |_| 1.0), None);
    }

    #[test]
    fn test_candidates_keep_pass() {
        let state = GameState::new(crate::core::RulesConfig::default(), 0);
        let actions = vec![
            Action::PlayFaceUp { hand_index: 0, mission: 0 },
            Action::PlayFaceUp { hand_index: 1, mission: 0 },
            Action::Pass,
        ];
        let kept = candidates(&state, PlayerId::ONE, &actions, 1);
        assert_eq!(kept.len(), 2);
        assert!(kept.contains(&Action::Pass));
    }

    #[test]
    fn test_difficulty_display() {
        let names: Vec<String> = Difficulty::ALL.iter().map(|d| d.to_string()).collect();
        assert_eq!(names, ["easy", "medium", "hard", "expert"]);
    }

    #[test]
    fn test_ai_player_choice_is_valid() {
        let catalog = starter::catalog();
        let engine = GameEngine::with_catalog(&catalog);
        let state = engine.create_game(&starter::starter_config(3));
        for difficulty in Difficulty::ALL {
            let config = AiConfig::default().with_simulations(2).with_parallel(false);
            let mut ai = AiPlayer::new(PlayerId::TWO, difficulty, &engine, &catalog, config);
            let action = ai.decide(&engine, &state).unwrap();
            assert!(engine.valid_actions(&state, PlayerId::TWO).contains(&action));
        }
    }
}
