//! Two-stage move effects: choose a character, then its destination.

use super::{can_enter, chosen_character, chosen_mission, relocate, EffectHandler};
use crate::core::{GameState, InstanceId, Target};
use crate::effects::pending::{Continuation, EffectContext, EffectOutcome, Selection, SelectionKind};
use crate::effects::targeting::TargetQuery;
use crate::error::EffectError;

const PICK_CHARACTER: u8 = 0;
const PICK_DESTINATION: u8 = 1;

/// Missions a character could be moved to on its controller's side.
fn destinations(state: &GameState, id: InstanceId) -> Vec<Target> {
    let Some(character) = state.character(id) else {
        return Vec::new();
    };
    (0..state.missions.len())
        .filter(|&m| m != character.mission && can_enter(state, character, character.controller, m))
        .map(Target::Mission)
        .collect()
}

fn movable(state: &GameState, query: TargetQuery) -> Vec<Target> {
    query
        .collect(state)
        .into_iter()
        .filter(|&id| !destinations(state, id).is_empty())
        .map(Target::Character)
        .collect()
}

/// Shared second stage: character chosen, ask where to, then move it.
fn advance(
    state: &mut GameState,
    ctx: &EffectContext,
    step: &Continuation,
    choice: Target,
) -> Result<EffectOutcome, EffectError> {
    match step.step {
        PICK_CHARACTER => {
            let id = chosen_character(choice)?;
            let options = destinations(state, id);
            Ok(EffectOutcome::Await(
                Selection::new(SelectionKind::Target, options, format!("Choose a mission for {}", id))
                    .at(Continuation::then(PICK_DESTINATION, choice)),
            ))
        }
        PICK_DESTINATION => {
            let mission = chosen_mission(choice)?;
            let memo = step
                .memo
                .ok_or_else(|| EffectError::Inconsistent("move has no chosen character".into()))?;
            let id = chosen_character(memo)?;
            let side = state
                .character(id)
                .map(|c| c.controller)
                .ok_or(EffectError::MissingCharacter(id))?;
            relocate(state, id, mission, side)?;
            state.push_log(
                Some(ctx.controller),
                format!("{} moves {} to mission {}", ctx.card.name, id, mission),
            );
            Ok(EffectOutcome::Done)
        }
        other => Err(EffectError::UnknownStep(other)),
    }
}

/// Move one of your characters to another mission.
#[derive(Debug, Clone, Copy)]
pub struct MoveFriendly;

impl EffectHandler for MoveFriendly {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        let candidates = movable(state, TargetQuery::friendly(ctx.controller));
        Ok(EffectOutcome::Await(
            Selection::new(SelectionKind::Target, candidates, "Move one of your characters").optional(),
        ))
    }

    fn resume(
        &self,
        state: &mut GameState,
        ctx: &EffectContext,
        step: &Continuation,
        choice: Target,
    ) -> Result<EffectOutcome, EffectError> {
        advance(state, ctx, step, choice)
    }
}

/// Move a face-up enemy with effective power at most `max_power`.
#[derive(Debug, Clone, Copy)]
pub struct MoveEnemy {
    pub max_power: u32,
}

impl EffectHandler for MoveEnemy {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        let query = TargetQuery::enemy(ctx.controller).visible().max_power(self.max_power);
        let candidates = movable(state, query);
        Ok(EffectOutcome::Await(Selection::new(
            SelectionKind::Target,
            candidates,
            format!("Move an enemy with {} or less power", self.max_power),
        )))
    }

    fn resume(
        &self,
        state: &mut GameState,
        ctx: &EffectContext,
        step: &Continuation,
        choice: Target,
    ) -> Result<EffectOutcome, EffectError> {
        advance(state, ctx, step, choice)
    }
}
