//! Control-changing effects.

use super::{can_enter, chosen_character, relocate, EffectHandler};
use crate::core::{GameState, Target};
use crate::effects::pending::{Continuation, EffectContext, EffectOutcome, Selection, SelectionKind};
use crate::effects::targeting::TargetQuery;
use crate::error::EffectError;

/// Take control of a face-up enemy in the source's mission. The character
/// crosses to the thief's side of the same mission; its owner is unchanged.
#[derive(Debug, Clone, Copy)]
pub struct StealEnemy {
    pub max_power: u32,
}

impl EffectHandler for StealEnemy {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        let candidates = TargetQuery::enemy(ctx.controller)
            .visible()
            .in_mission(ctx.mission)
            .max_power(self.max_power)
            .collect(state)
            .into_iter()
            .filter(|&id| {
                state
                    .character(id)
                    .is_some_and(|c| can_enter(state, c, ctx.controller, ctx.mission))
            })
            .map(Target::Character)
            .collect();
        Ok(EffectOutcome::Await(Selection::new(
            SelectionKind::Target,
            candidates,
            format!("Take control of an enemy with {} or less power", self.max_power),
        )))
    }

    fn resume(
        &self,
        state: &mut GameState,
        ctx: &EffectContext,
        _step: &Continuation,
        choice: Target,
    ) -> Result<EffectOutcome, EffectError> {
        let id = chosen_character(choice)?;
        let mission = state
            .character(id)
            .map(|c| c.mission)
            .ok_or(EffectError::MissingCharacter(id))?;
        relocate(state, id, mission, ctx.controller)?;
        state.push_log(Some(ctx.controller), format!("{} takes control of {}", ctx.card.name, id));
        Ok(EffectOutcome::Done)
    }
}
