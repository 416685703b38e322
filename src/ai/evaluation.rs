//! Heuristics shared by the strategies.
//!
//! - [`evaluate`]: static value of a state for one player (search leaves)
//! - [`action_score`]: cheap one-ply score of an action without applying
//!   it. Medium picks by it; Hard and Expert order and prune with it, and
//!   Expert weights opponent replies by it.
//! - [`mulligan_score`]: how playable an opening hand is, in 0..=1

use crate::cards::{Card, ContinuousRule, EffectAction};
use crate::core::{Action, GameState, PlayerId, Target};
use crate::effects::continuous;
use crate::triggers::EffectTrigger;

/// Value of a won game before the point margin is added.
pub const WIN_SCORE: f64 = 10_000.0;

/// Value of a branch whose action was rejected, from the chooser's side.
pub const FAILURE_PENALTY: f64 = 1_000_000.0;

const POINT_WEIGHT: f64 = 10.0;
const COST_WEIGHT: f64 = 0.3;

/// Static value of `state` for `me`. Higher is better.
#[must_use]
pub fn evaluate(state: &GameState, me: PlayerId) -> f64 {
    let them = me.opponent();
    let margin =
        f64::from(state.players[me].mission_points) - f64::from(state.players[them].mission_points);

    if state.is_over() {
        let won = margin > 0.0 || (margin == 0.0 && state.edge_holder == me);
        return if won { WIN_SCORE + margin } else { -WIN_SCORE + margin };
    }

    let mut score = POINT_WEIGHT * margin;

    for (index, mission) in state.missions.iter().enumerate() {
        let value = f64::from(mission.points());
        let lead = f64::from(continuous::mission_power(state, index, me))
            - f64::from(continuous::mission_power(state, index, them));
        score += value * lead.clamp(-3.0, 3.0) * 0.5;
        match continuous::mission_leader(state, index) {
            Some(p) if p == me => score += value * 2.0,
            Some(_) => score -= value * 2.0,
            None => {}
        }
    }

    for character in state.characters().filter(|c| c.hidden) {
        // Face-down characters are latent power for their controller.
        let weight = if character.controller == me { 1.0 } else { -1.0 };
        score += weight;
    }

    score += 0.5 * (state.players[me].hand_size() as f64 - state.players[them].hand_size() as f64);
    score += 0.2 * (f64::from(state.players[me].chakra) - f64::from(state.players[them].chakra));
    if state.edge_holder == me {
        score += 1.5;
    }
    score
}

/// How much a card's printed effects are worth to the heuristic.
#[must_use]
pub fn effect_value(card: &Card) -> f64 {
    card.effects
        .iter()
        .map(|effect| {
            let base = match &effect.action {
                EffectAction::GainChakra(n) => 0.5 * f64::from(*n),
                EffectAction::Draw(n) => f64::from(*n),
                EffectAction::PowerUpSelf(n) => f64::from(*n),
                EffectAction::PowerUpFriendly { amount, .. } => f64::from(*amount),
                EffectAction::DefeatEnemy { .. } | EffectAction::DefeatHiddenEnemy { .. } => 2.5,
                EffectAction::HideEnemy { .. } | EffectAction::StealEnemy { .. } => 2.0,
                EffectAction::Continuous(rule) => rule_value(rule),
                _ => 0.5,
            };
            match effect.trigger {
                EffectTrigger::Score => base + 1.5,
                _ => base,
            }
        })
        .sum()
}

fn rule_value(rule: &ContinuousRule) -> f64 {
    match rule {
        ContinuousRule::ChakraBonus { amount, .. } | ContinuousRule::ChakraPerMission { amount, .. } => {
            1.5 * f64::from(*amount)
        }
        ContinuousRule::PowerAura { amount, .. } => f64::from(*amount).max(0.0),
        ContinuousRule::RetainTokens => 0.5,
        ContinuousRule::ReturnToHandAtEnd { .. } => -0.5,
        _ => 0.25,
    }
}

fn hand_card(state: &GameState, player: PlayerId, index: usize) -> Option<&Card> {
    state.players[player].hand.get(index).map(|c| c.as_ref())
}

fn mission_value(state: &GameState, mission: usize) -> f64 {
    state
        .missions
        .get(mission)
        .map_or(0.0, |m| f64::from(m.points()))
}

/// Extra credit for a play that flips or secures a mission.
fn contest_value(state: &GameState, player: PlayerId, mission: usize, added: f64) -> f64 {
    let mine = f64::from(continuous::mission_power(state, mission, player));
    let theirs = f64::from(continuous::mission_power(state, mission, player.opponent()));
    if mine <= theirs && mine + added > theirs {
        mission_value(state, mission)
    } else if mine > theirs + 4.0 {
        // Already well ahead here.
        -1.0
    } else {
        0.0
    }
}

/// Cheap score of taking `action` now, without applying it.
#[must_use]
pub fn action_score(state: &GameState, player: PlayerId, action: &Action) -> f64 {
    match *action {
        Action::Pass | Action::Mulligan { .. } | Action::DeclineOptionalEffect { .. } => 0.0,

        Action::PlayFaceUp { hand_index, mission } => {
            let Some(card) = hand_card(state, player, hand_index) else {
                return 0.0;
            };
            let power = f64::from(card.power);
            let cost = f64::from(continuous::play_cost(state, player, card, mission));
            power + 0.5 * mission_value(state, mission) + effect_value(card)
                + contest_value(state, player, mission, power)
                - COST_WEIGHT * cost
        }

        Action::PlayHidden { hand_index, mission } => {
            let Some(card) = hand_card(state, player, hand_index) else {
                return 0.0;
            };
            let ambush = if card.has_trigger(EffectTrigger::Ambush) { 2.0 } else { 0.0 };
            0.5 * f64::from(card.power) + 0.25 * mission_value(state, mission) + ambush
                - COST_WEIGHT * f64::from(state.rules.hidden_cost)
        }

        Action::Reveal { character } => {
            let Some(ch) = state.character(character) else {
                return 0.0;
            };
            let card = ch.card();
            let power = f64::from(card.power);
            power + 0.5 * mission_value(state, ch.mission) + effect_value(card)
                + contest_value(state, player, ch.mission, power)
                - COST_WEIGHT * f64::from(continuous::reveal_cost(state, ch))
        }

        Action::Upgrade {
            hand_index,
            character,
        } => {
            let (Some(card), Some(ch)) = (hand_card(state, player, hand_index), state.character(character))
            else {
                return 0.0;
            };
            let gain = f64::from(card.power) - f64::from(ch.card().power);
            let diff = f64::from(card.chakra.saturating_sub(ch.card().chakra));
            gain + effect_value(card) + contest_value(state, player, ch.mission, gain)
                - COST_WEIGHT * diff
        }

        Action::SelectTarget { target, .. } => target_score(state, player, target),
    }
}

fn target_score(state: &GameState, player: PlayerId, target: Target) -> f64 {
    match target {
        Target::Character(id) => match state.character(id) {
            Some(ch) if ch.controller == player => {
                0.5 * f64::from(continuous::effective_power(state, ch)) + mission_value(state, ch.mission) * 0.25
            }
            Some(ch) => {
                f64::from(continuous::effective_power(state, ch))
                    + if ch.hidden { 2.0 } else { 0.0 }
                    + mission_value(state, ch.mission) * 0.25
            }
            None => 0.0,
        },
        Target::Mission(index) => mission_value(state, index),
        // Giving up a card from hand: prefer the weakest.
        Target::HandCard(index) => hand_card(state, player, index).map_or(0.0, |c| -f64::from(c.power)),
        Target::ListCard(index) => state
            .pending_actions
            .front()
            .and_then(|p| p.cards.get(index))
            .map_or(0.0, |c| f64::from(c.power) + effect_value(c)),
    }
}

/// Playability of `player`'s current hand in 0..=1. Cheap cards and a
/// spread of costs score high.
#[must_use]
pub fn mulligan_score(state: &GameState, player: PlayerId) -> f64 {
    let hand = &state.players[player].hand;
    if hand.is_empty() {
        return 0.0;
    }
    let income = state.rules.base_chakra;

    let playable: f64 = hand
        .iter()
        .map(|card| {
            if card.chakra <= income / 2 + 1 {
                1.0
            } else if card.chakra <= income {
                0.6
            } else {
                0.15
            }
        })
        .sum::<f64>()
        / hand.len() as f64;

    let mut costs: Vec<u32> = hand.iter().map(|c| c.chakra).collect();
    costs.sort_unstable();
    costs.dedup();
    let spread = (costs.len() as f64 / hand.len() as f64).min(1.0);

    0.75 * playable + 0.25 * spread
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardEffect, CardId, CharacterInPlay};
    use crate::core::{ActiveMission, MissionRank, Phase, RulesConfig};

    fn state() -> GameState {
        let mut state = GameState::new(RulesConfig::default(), 2);
        let mission = Card::mission(CardId::new(200), "Escort", 3).shared();
        state.missions.push_back(ActiveMission::new(mission, MissionRank::D, 1));
        state.phase = Phase::Action;
        state.players[PlayerId::ONE].chakra = 5;
        state
    }

    #[test]
    fn test_evaluate_prefers_points_and_leads() {
        let mut state = state();
        let base = evaluate(&state, PlayerId::ONE);

        let id = state.alloc_instance();
        let card = Card::character(CardId::new(1), "A", 3, 3).shared();
        state.place_character(CharacterInPlay::new(id, card, PlayerId::ONE, 0, false));
        let leading = evaluate(&state, PlayerId::ONE);
        assert!(leading > base);
        assert!(evaluate(&state, PlayerId::TWO) < evaluate(&state, PlayerId::ONE));

        state.players[PlayerId::TWO].mission_points = 4;
        assert!(evaluate(&state, PlayerId::ONE) < leading);
    }

    #[test]
    fn test_evaluate_terminal() {
        let mut state = state();
        state.phase = Phase::GameOver;
        state.players[PlayerId::ONE].mission_points = 6;
        state.players[PlayerId::TWO].mission_points = 2;
        assert_eq!(evaluate(&state, PlayerId::ONE), WIN_SCORE + 4.0);
        assert_eq!(evaluate(&state, PlayerId::TWO), -WIN_SCORE - 4.0);
    }

    #[test]
    fn test_action_score_prefers_strong_cheap_plays() {
        let mut state = state();
        let hand = &mut state.players[PlayerId::ONE].hand;
        hand.push_back(Card::character(CardId::new(1), "Weak", 1, 1).shared());
        hand.push_back(
            Card::character(CardId::new(2), "Strong", 3, 4)
                .with_effect(CardEffect::new(EffectTrigger::Main, "", EffectAction::Draw(1)))
                .shared(),
        );

        let weak = action_score(&state, PlayerId::ONE, &Action::PlayFaceUp { hand_index: 0, mission: 0 });
        let strong = action_score(&state, PlayerId::ONE, &Action::PlayFaceUp { hand_index: 1, mission: 0 });
        assert!(strong > weak);
        assert!(weak > action_score(&state, PlayerId::ONE, &Action::Pass));
    }

    #[test]
    fn test_mulligan_score_range() {
        let mut state = state();
        assert_eq!(mulligan_score(&state, PlayerId::ONE), 0.0);

        for (i, cost) in [1, 2, 3, 2, 4].into_iter().enumerate() {
            state.players[PlayerId::ONE]
                .hand
                .push_back(Card::character(CardId::new(i as u32), "C", cost, 2).shared());
        }
        let good = mulligan_score(&state, PlayerId::ONE);

        for (i, cost) in [6, 6, 7, 6, 7].into_iter().enumerate() {
            state.players[PlayerId::TWO]
                .hand
                .push_back(Card::character(CardId::new(10 + i as u32), "C", cost, 6).shared());
        }
        let bad = mulligan_score(&state, PlayerId::TWO);

        assert!(good > 0.55 && good <= 1.0);
        assert!(bad < 0.55);
    }
}
