//! Board conditions for continuous rules.
//!
//! A condition is evaluated for one subject: a character in play, or a card
//! about to be played onto a mission by a player. Conditions only read the
//! board; they are re-evaluated on every query.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, InstanceId, PlayerId};

/// A predicate over the board from one character's point of view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// Always holds.
    Always,

    /// Another friendly visible character with this name is in the same
    /// mission.
    CompanionInMission(String),

    /// Another friendly visible character with this keyword is in the same
    /// mission.
    FriendlyKeywordInMission(String),

    /// The subject's player holds the Edge.
    HoldingEdge,

    /// The opponent has at least one character in the same mission.
    EnemyInMission,

    /// All conditions hold.
    All(Vec<Condition>),

    /// At least one condition holds.
    Any(Vec<Condition>),

    /// The condition does not hold.
    Not(Box<Condition>),
}

impl Condition {
    /// Create a companion condition.
    pub fn companion(name: impl Into<String>) -> Self {
        Self::CompanionInMission(name.into())
    }

    /// Create a keyword-ally condition.
    pub fn keyword_ally(keyword: impl Into<String>) -> Self {
        Self::FriendlyKeywordInMission(keyword.into())
    }

    /// Negate this condition.
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another condition with AND.
    pub fn and(self, other: Condition) -> Self {
        match self {
            Self::All(mut conditions) => {
                conditions.push(other);
                Self::All(conditions)
            }
            _ => Self::All(vec![self, other]),
        }
    }
}

/// What a condition is evaluated for.
pub struct ConditionContext<'a> {
    pub state: &'a GameState,
    /// The player whose point of view "friendly" refers to.
    pub controller: PlayerId,
    /// The mission the subject is on or is being played onto.
    pub mission: usize,
    /// The subject character, if it is already in play.
    pub subject: Option<InstanceId>,
}

impl<'a> ConditionContext<'a> {
    /// Context for a character in play.
    pub fn for_character(
        state: &'a GameState,
        character: &crate::cards::CharacterInPlay,
    ) -> Self {
        Self {
            state,
            controller: character.controller,
            mission: character.mission,
            subject: Some(character.id),
        }
    }

    /// Context for a card about to enter `mission` under `controller`.
    pub fn for_play(state: &'a GameState, controller: PlayerId, mission: usize) -> Self {
        Self {
            state,
            controller,
            mission,
            subject: None,
        }
    }
}

/// Evaluator for board conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a condition is satisfied.
    pub fn evaluate(condition: &Condition, ctx: &ConditionContext) -> bool {
        match condition {
            Condition::Always => true,

            Condition::CompanionInMission(name) => {
                Self::friendly_others(ctx).any(|c| c.card().same_name_as(name))
            }

            Condition::FriendlyKeywordInMission(keyword) => {
                Self::friendly_others(ctx).any(|c| c.card().has_keyword(keyword))
            }

            Condition::HoldingEdge => ctx.state.edge_holder == ctx.controller,

            Condition::EnemyInMission => ctx
                .state
                .missions
                .get(ctx.mission)
                .is_some_and(|m| !m.side(ctx.controller.opponent()).is_empty()),

            Condition::All(conditions) => conditions.iter().all(|c| Self::evaluate(c, ctx)),

            Condition::Any(conditions) => conditions.iter().any(|c| Self::evaluate(c, ctx)),

            Condition::Not(inner) => !Self::evaluate(inner, ctx),
        }
    }

    /// Friendly visible characters in the subject's mission, excluding the
    /// subject itself.
    fn friendly_others<'s>(
        ctx: &'s ConditionContext<'s>,
    ) -> impl Iterator<Item = &'s crate::cards::CharacterInPlay> + 's {
        let subject = ctx.subject;
        ctx.state
            .missions
            .get(ctx.mission)
            .into_iter()
            .flat_map(move |m| m.visible(ctx.controller))
            .filter(move |c| Some(c.id) != subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, CharacterInPlay};
    use crate::core::{ActiveMission, MissionRank, RulesConfig};

    fn board() -> GameState {
        let mut state = GameState::new(RulesConfig::default(), 3);
        let mission = Card::mission(CardId::new(200), "Escort", 3).shared();
        state.missions.push_back(ActiveMission::new(mission, MissionRank::D, 1));
        state
    }

    fn place(state: &mut GameState, name: &str, keyword: &str, player: PlayerId, hidden: bool) -> InstanceId {
        let id = state.alloc_instance();
        let card = Card::character(CardId::new(id.raw() + 10), name, 2, 2)
            .with_keyword(keyword)
            .shared();
        state.place_character(CharacterInPlay::new(id, card, player, 0, hidden));
        id
    }

    #[test]
    fn test_companion_requires_visible_friend() {
        let mut state = board();
        let kiba = place(&mut state, "Kiba Inuzuka", "Team 8", PlayerId::ONE, false);
        let kiba_ch = state.character(kiba).cloned().unwrap();
        let cond = Condition::companion("Akamaru");

        assert!(!ConditionEvaluator::evaluate(&cond, &ConditionContext::for_character(&state, &kiba_ch)));

        let akamaru = place(&mut state, "Akamaru", "Team 8", PlayerId::ONE, true);
        assert!(!ConditionEvaluator::evaluate(&cond, &ConditionContext::for_character(&state, &kiba_ch)));

        state.update_character(akamaru, |c| c.hidden = false);
        assert!(ConditionEvaluator::evaluate(&cond, &ConditionContext::for_character(&state, &kiba_ch)));
    }

    #[test]
    fn test_subject_does_not_count_itself() {
        let mut state = board();
        let shino = place(&mut state, "Shino Aburame", "Team 8", PlayerId::ONE, false);
        let ch = state.character(shino).cloned().unwrap();
        let cond = Condition::keyword_ally("Team 8");

        assert!(!ConditionEvaluator::evaluate(&cond, &ConditionContext::for_character(&state, &ch)));
        assert!(ConditionEvaluator::evaluate(&cond, &ConditionContext::for_play(&state, PlayerId::ONE, 0)));
    }

    #[test]
    fn test_edge_and_combinators() {
        let mut state = board();
        state.edge_holder = PlayerId::TWO;
        let ctx = ConditionContext::for_play(&state, PlayerId::TWO, 0);

        assert!(ConditionEvaluator::evaluate(&Condition::HoldingEdge, &ctx));
        assert!(!ConditionEvaluator::evaluate(&Condition::HoldingEdge.negate(), &ctx));
        assert!(!ConditionEvaluator::evaluate(&Condition::HoldingEdge.and(Condition::EnemyInMission), &ctx));

        place(&mut state, "Zabuza Momochi", "Mist", PlayerId::ONE, true);
        let ctx = ConditionContext::for_play(&state, PlayerId::TWO, 0);
        assert!(ConditionEvaluator::evaluate(&Condition::HoldingEdge.and(Condition::EnemyInMission), &ctx));
        assert!(ConditionEvaluator::evaluate(
            &Condition::Any(vec![Condition::EnemyInMission, Condition::Always.negate()]),
            &ctx
        ));
    }
}
