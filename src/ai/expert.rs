//! Expert: Monte Carlo expectimax over determinized states.
//!
//! Each simulation fills the opponent's concealed hand, deck and face-down
//! characters from the pool of cards it could still hold, then scores every
//! root candidate with a depth-limited expectimax. The opponent's plies are
//! chance nodes: each reply is weighted by how good the ordering heuristic
//! thinks it is for them, a rough model of a sensible but not omniscient
//! opponent. Scores are averaged across simulations and a few strategic
//! bonuses are added on top.
//!
//! Simulations are independent: each owns its cloned state and RNG, and
//! results are only combined after all of them finish. With
//! `AiConfig::parallel` they run on the rayon pool.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::cards::{Card, ContinuousRule};
use crate::core::{Action, GameRng, GameState, PlayerId};
use crate::effects::continuous;
use crate::rules::{GameEngine, RulesEngine};
use crate::triggers::{ConditionContext, ConditionEvaluator};

use super::config::AiConfig;
use super::evaluation::{action_score, evaluate, FAILURE_PENALTY};
use super::sampling::{determinize, unseen_pool};
use super::stats::SearchStats;
use super::{candidates, mulligan_choice, Difficulty, Strategy};

const TEMPO_BONUS: f64 = 1.0;
const EDGE_BONUS: f64 = 1.5;
const SYNERGY_BONUS: f64 = 0.5;

pub struct ExpertStrategy {
    engine: GameEngine,
    characters: Vec<Arc<Card>>,
    config: AiConfig,
    rng: GameRng,
    stats: SearchStats,
}

impl ExpertStrategy {
    /// `characters` is the card pool hidden cards are sampled from.
    #[must_use]
    pub fn new(engine: GameEngine, characters: Vec<Arc<Card>>, config: AiConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            engine,
            characters,
            config,
            rng,
            stats: SearchStats::default(),
        }
    }

    /// Statistics of the last decision.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

/// Root scores for one determinization of `state`.
struct Simulation<'a> {
    engine: &'a GameEngine,
    me: PlayerId,
    branch_limit: usize,
    stats: SearchStats,
}

impl Simulation<'_> {
    fn run(
        mut self,
        state: &GameState,
        root: &[Action],
        pool: &[Arc<Card>],
        mut rng: GameRng,
        depth: u32,
    ) -> (Vec<f64>, SearchStats) {
        let mut world = state.clone();
        determinize(&mut world, self.me, pool, &mut rng);
        world.rng = rng.fork();
        self.stats.simulations = 1;

        let values = root
            .iter()
            .map(|action| match self.engine.try_apply(&world, self.me, action) {
                Ok(next) => self.expectimax(&next, depth),
                Err(error) => {
                    self.stats.failed_branches += 1;
                    trace!(?action, %error, "root branch failed");
                    -FAILURE_PENALTY
                }
            })
            .collect();
        (values, self.stats)
    }

    fn expectimax(&mut self, state: &GameState, depth: u32) -> f64 {
        self.stats.nodes += 1;
        if depth == 0 || state.is_over() {
            return evaluate(state, self.me);
        }
        let Some(actor) = self.engine.next_actor(state) else {
            return evaluate(state, self.me);
        };
        let actions = self.engine.valid_actions(state, actor);
        let actions = candidates(state, actor, &actions, self.branch_limit);
        if actions.is_empty() {
            return evaluate(state, self.me);
        }
        trace!(depth, %actor, branches = actions.len(), "expand");

        if actor == self.me {
            let mut best = f64::NEG_INFINITY;
            for action in &actions {
                let value = match self.engine.try_apply(state, actor, action) {
                    Ok(next) => self.expectimax(&next, depth - 1),
                    Err(_) => {
                        self.stats.failed_branches += 1;
                        -FAILURE_PENALTY
                    }
                };
                best = best.max(value);
            }
            return best;
        }

        // Chance node. A reply the engine rejects gets no weight.
        let scores: Vec<f64> = actions.iter().map(|a| action_score(state, actor, a)).collect();
        let floor = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let mut total = 0.0;
        let mut weight_sum = 0.0;
        for (action, score) in actions.iter().zip(&scores) {
            match self.engine.try_apply(state, actor, action) {
                Ok(next) => {
                    let weight = score - floor + 1.0;
                    total += weight * self.expectimax(&next, depth - 1);
                    weight_sum += weight;
                }
                Err(_) => self.stats.failed_branches += 1,
            }
        }
        if weight_sum > 0.0 {
            total / weight_sum
        } else {
            evaluate(state, self.me)
        }
    }
}

/// Hand-authored adjustments the search horizon misses.
fn strategic_bonus(state: &GameState, player: PlayerId, action: &Action) -> f64 {
    let opponent = player.opponent();
    match *action {
        Action::Pass => {
            // The first to pass takes the Edge, which settles tied missions.
            let contested = (0..state.missions.len()).any(|m| {
                let mine = continuous::mission_power(state, m, player);
                mine > 0 && mine == continuous::mission_power(state, m, opponent)
            });
            if state.edge_holder != player && !state.players[opponent].passed && contested {
                EDGE_BONUS
            } else {
                0.0
            }
        }
        Action::PlayFaceUp { hand_index, mission } => {
            let Some(card) = state.players[player].hand.get(hand_index) else {
                return 0.0;
            };
            tempo(state, player, mission) + synergy(state, player, card, mission)
        }
        Action::Upgrade {
            hand_index,
            character,
        } => {
            let (Some(card), Some(ch)) = (state.players[player].hand.get(hand_index), state.character(character))
            else {
                return 0.0;
            };
            synergy(state, player, card, ch.mission)
        }
        Action::PlayHidden { mission, .. } => 0.5 * tempo(state, player, mission),
        _ => 0.0,
    }
}

/// Committing while the opponent is still active and the mission is not
/// yet ours.
fn tempo(state: &GameState, player: PlayerId, mission: usize) -> f64 {
    let behind = continuous::mission_leader(state, mission) != Some(player);
    if behind && !state.players[player.opponent()].passed {
        TEMPO_BONUS
    } else {
        0.0
    }
}

/// Conditions the card would satisfy and allies its auras would boost.
fn synergy(state: &GameState, player: PlayerId, card: &Card, mission: usize) -> f64 {
    let ctx = ConditionContext::for_play(state, player, mission);
    let allies: Vec<&Arc<Card>> = state
        .missions
        .get(mission)
        .map(|m| m.visible(player).map(|c| c.card()).collect())
        .unwrap_or_default();

    let hits = card
        .continuous_rules()
        .map(|rule| match rule {
            ContinuousRule::ChakraBonus { condition, .. } => usize::from(ConditionEvaluator::evaluate(condition, &ctx)),
            ContinuousRule::SelfPower { condition, amount } if *amount > 0 => {
                usize::from(ConditionEvaluator::evaluate(condition, &ctx))
            }
            // Negative amounts are discounts.
            ContinuousRule::SelfCost { condition, amount, .. } if *amount < 0 => {
                usize::from(ConditionEvaluator::evaluate(condition, &ctx))
            }
            ContinuousRule::PowerAura { filter, amount } if *amount > 0 => {
                allies.iter().filter(|ally| filter.matches(ally)).count()
            }
            ContinuousRule::SelfPowerPerOtherFriendly { amount } if *amount > 0 => allies.len(),
            _ => 0,
        })
        .sum::<usize>();
    SYNERGY_BONUS * hits as f64
}

impl Strategy for ExpertStrategy {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Expert
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

        let root = candidates(state, player, valid, self.config.branch_limit);
        let pool = unseen_pool(&self.characters, state, player);
        let rngs: Vec<GameRng> = (0..self.config.simulations.max(1)).map(|_| self.rng.fork()).collect();
        let depth = self.config.depth.saturating_sub(1);

        let engine = &self.engine;
        let branch_limit = self.config.branch_limit;
        let simulate = |rng: GameRng| {
            Simulation {
                engine,
                me: player,
                branch_limit,
                stats: SearchStats::default(),
            }
            .run(state, &root, &pool, rng, depth)
        };
        let results: Vec<(Vec<f64>, SearchStats)> = if self.config.parallel {
            rngs.into_par_iter().map(simulate).collect()
        } else {
            rngs.into_iter().map(simulate).collect()
        };

        let runs = results.len() as f64;
        let mut totals = vec![0.0; root.len()];
        for (values, stats) in &results {
            for (total, value) in totals.iter_mut().zip(values) {
                *total += value;
            }
            self.stats.merge(stats);
        }

        let mut best: Option<(f64, &Action)> = None;
        for (action, total) in root.iter().zip(&totals) {
            let value = total / runs + strategic_bonus(state, player, action);
            if best.map_or(true, |(top, _)| value > top) {
                best = Some((value, action));
            }
        }
        let choice = best.map(|(_, action)| action.clone());

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            simulations = self.stats.simulations,
            nodes = self.stats.nodes,
            failed = self.stats.failed_branches,
            time_us = self.stats.time_us,
            "expert search"
        );
        choice.or_else(|| valid.first().cloned())
    }
}
