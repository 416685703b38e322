//! Hard: alpha-beta minimax.
//!
//! Searches the sanitized state as if it were the whole game: the opponent
//! can only do what the visible board lets it do. Each node expands at most
//! `branch_limit` actions, best first by the ordering heuristic, which both
//! bounds the tree and makes cutoffs likely.

use std::time::Instant;

use tracing::{debug, trace};

use crate::core::{Action, GameState, PlayerId};
use crate::rules::{GameEngine, RulesEngine};

use super::config::AiConfig;
use super::evaluation::{evaluate, FAILURE_PENALTY};
use super::stats::SearchStats;
use super::{candidates, mulligan_choice, Difficulty, Strategy};

#[derive(Clone, Debug)]
pub struct HardStrategy {
    engine: GameEngine,
    config: AiConfig,
    stats: SearchStats,
}

impl HardStrategy {
    #[must_use]
    pub fn new(engine: GameEngine, config: AiConfig) -> Self {
        Self {
            engine,
            config,
            stats: SearchStats::default(),
        }
    }

    /// Statistics of the last decision.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn minimax(&mut self, state: &GameState, me: PlayerId, depth: u32, mut alpha: f64, mut beta: f64) -> f64 {
        self.stats.nodes += 1;
        if depth == 0 || state.is_over() {
            return evaluate(state, me);
        }
        let Some(actor) = self.engine.next_actor(state) else {
            return evaluate(state, me);
        };
        let actions = self.engine.valid_actions(state, actor);
        let actions = candidates(state, actor, &actions, self.config.branch_limit);
        if actions.is_empty() {
            return evaluate(state, me);
        }
        trace!(depth, %actor, branches = actions.len(), "expand");

        let maximizing = actor == me;
        let mut best = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
        for action in &actions {
            let value = match self.engine.try_apply(state, actor, action) {
                Ok(next) => self.minimax(&next, me, depth - 1, alpha, beta),
                Err(error) => {
                    self.stats.failed_branches += 1;
                    trace!(%actor, ?action, %error, "branch failed");
                    if maximizing {
                        -FAILURE_PENALTY
                    } else {
                        FAILURE_PENALTY
                    }
                }
            };

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }
        best
    }
}

impl Strategy for HardStrategy {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Hard
    }

    fn choose_action(&mut self, state: &GameState, player: PlayerId, valid: &[Action]) -> Option<Action> {
        if let Some(choice) = mulligan_choice(state, player, valid, self.config.mulligan_threshold) {
            return Some(choice);
        }
        if valid.len() <= 1 {
            return valid.first().cloned();
        }

        let start = Instant::now();
        self.stats.reset();

        let depth = self.config.depth.saturating_sub(1);
        let mut alpha = f64::NEG_INFINITY;
        let mut best: Option<(f64, Action)> = None;
        for action in candidates(state, player, valid, self.config.branch_limit) {
            let value = match self.engine.try_apply(state, player, &action) {
                Ok(next) => self.minimax(&next, player, depth, alpha, f64::INFINITY),
                Err(error) => {
                    self.stats.failed_branches += 1;
                    trace!(%player, ?action, %error, "root branch failed");
                    -FAILURE_PENALTY
                }
            };
            if best.as_ref().map_or(true, |(top, _)| value > *top) {
                best = Some((value, action));
            }
            alpha = alpha.max(value);
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            nodes = self.stats.nodes,
            cutoffs = self.stats.cutoffs,
            failed = self.stats.failed_branches,
            time_us = self.stats.time_us,
            value = best.as_ref().map(|(v, _)| *v),
            "hard search"
        );
        best.map(|(_, action)| action).or_else(|| valid.first().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{starter, Card, CardId};
    use crate::core::{ActiveMission, MissionRank, Phase, RulesConfig};

    fn duel() -> GameState {
        let mut state = GameState::new(RulesConfig::default(), 5);
        let mission = Card::mission(CardId::new(200), "Escort", 3).shared();
        state.missions.push_back(ActiveMission::new(mission, MissionRank::D, 1));
        state.phase = Phase::Action;
        state.turn = 4;
        state.active_player = PlayerId::ONE;
        state.edge_holder = PlayerId::TWO;
        state.players[PlayerId::ONE].chakra = 5;
        state.players[PlayerId::ONE]
            .hand
            .push_back(Card::character(CardId::new(1), "Kakashi Hatake", 4, 5).shared());
        state
    }

    #[test]
    fn test_hard_plays_the_winning_character() {
        let state = duel();
        let engine = GameEngine::default();
        let valid = engine.valid_actions(&state, PlayerId::ONE);
        let mut hard = HardStrategy::new(engine, AiConfig::default());

        let choice = hard.choose_action(&state, PlayerId::ONE, &valid);
        assert_eq!(choice, Some(Action::PlayFaceUp { hand_index: 0, mission: 0 }));
        assert!(hard.stats().nodes > 0);
    }

    #[test]
    fn test_hard_choice_is_valid_from_opening() {
        let catalog = starter::catalog();
        let engine = GameEngine::with_catalog(&catalog);
        let mut state = engine.create_game(&starter::starter_config(11));
        for player in PlayerId::all() {
            state = engine.apply_action(&state, player, &Action::Mulligan { keep: true });
        }
        let actor = engine.next_actor(&state).unwrap();
        let valid = engine.valid_actions(&state, actor);
        let view = crate::rules::sanitize_for(&state, actor);

        let mut hard = HardStrategy::new(engine, AiConfig::default());
        let choice = hard.choose_action(&view, actor, &valid).unwrap();
        assert!(valid.contains(&choice));
    }
}
