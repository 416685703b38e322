//! Power token effects.

use super::{chosen_character, source_instance, EffectHandler};
use crate::cards::{CharacterFilter, Scope};
use crate::core::{GameState, Target};
use crate::effects::pending::{Continuation, EffectContext, EffectOutcome, Selection, SelectionKind};
use crate::effects::targeting::TargetQuery;
use crate::error::EffectError;

/// Put power tokens on the source character.
#[derive(Debug, Clone, Copy)]
pub struct PowerUpSelf(pub u32);

impl EffectHandler for PowerUpSelf {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        let id = source_instance(ctx)?;
        if !state.update_character(id, |c| c.power_tokens += self.0) {
            return Err(EffectError::MissingCharacter(id));
        }
        state.push_log(Some(ctx.controller), format!("{} gains {} power", ctx.card.name, self.0));
        Ok(EffectOutcome::Done)
    }
}

/// Put power tokens on a chosen friendly face-up character.
#[derive(Debug, Clone)]
pub struct PowerUpFriendly {
    pub amount: u32,
    pub scope: Scope,
    pub filter: CharacterFilter,
}

impl EffectHandler for PowerUpFriendly {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        let candidates = TargetQuery::friendly(ctx.controller)
            .visible()
            .within(self.scope, ctx.mission)
            .matching(self.filter.clone())
            .targets(state);
        Ok(EffectOutcome::Await(Selection::new(
            SelectionKind::Target,
            candidates,
            format!("Give {} power to a friendly character", self.amount),
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
        if !state.update_character(id, |c| c.power_tokens += self.amount) {
            return Err(EffectError::MissingCharacter(id));
        }
        state.push_log(Some(ctx.controller), format!("{} powers up {}", ctx.card.name, id));
        Ok(EffectOutcome::Done)
    }
}

/// Remove every power token from a chosen enemy.
#[derive(Debug, Clone, Copy)]
pub struct StripTokens {
    pub scope: Scope,
}

impl EffectHandler for StripTokens {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        let candidates = TargetQuery::enemy(ctx.controller)
            .within(self.scope, ctx.mission)
            .with_tokens()
            .targets(state);
        Ok(EffectOutcome::Await(Selection::new(
            SelectionKind::Target,
            candidates,
            "Remove all power tokens from an enemy",
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
        if !state.update_character(id, |c| c.power_tokens = 0) {
            return Err(EffectError::MissingCharacter(id));
        }
        state.push_log(Some(ctx.controller), format!("{} strips tokens from {}", ctx.card.name, id));
        Ok(EffectOutcome::Done)
    }
}
