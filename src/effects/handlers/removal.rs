//! Defeat and hide effects.
//!
//! Defeats go through [`crate::effects::defeat`], which applies
//! replacement rules before anything leaves play.

use super::{chosen_character, hide, EffectHandler};
use crate::cards::Scope;
use crate::core::{GameState, Target};
use crate::effects::pending::{Continuation, EffectContext, EffectOutcome, Selection, SelectionKind};
use crate::effects::resolver::defeat;
use crate::effects::targeting::TargetQuery;
use crate::error::EffectError;

/// Defeat a face-up enemy with effective power at most `max_power`.
#[derive(Debug, Clone, Copy)]
pub struct DefeatEnemy {
    pub max_power: u32,
    pub scope: Scope,
}

impl EffectHandler for DefeatEnemy {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        let candidates = TargetQuery::enemy(ctx.controller)
            .visible()
            .within(self.scope, ctx.mission)
            .max_power(self.max_power)
            .targets(state);
        Ok(EffectOutcome::Await(Selection::new(
            SelectionKind::Target,
            candidates,
            format!("Defeat an enemy with {} or less power", self.max_power),
        )))
    }

    fn resume(
        &self,
        state: &mut GameState,
        _ctx: &EffectContext,
        _step: &Continuation,
        choice: Target,
    ) -> Result<EffectOutcome, EffectError> {
        defeat(state, chosen_character(choice)?)?;
        Ok(EffectOutcome::Done)
    }
}

/// Defeat a face-down enemy.
#[derive(Debug, Clone, Copy)]
pub struct DefeatHiddenEnemy {
    pub scope: Scope,
}

impl EffectHandler for DefeatHiddenEnemy {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        let candidates = TargetQuery::enemy(ctx.controller)
            .hidden()
            .within(self.scope, ctx.mission)
            .targets(state);
        Ok(EffectOutcome::Await(Selection::new(
            SelectionKind::Target,
            candidates,
            "Defeat a hidden enemy",
        )))
    }

    fn resume(
        &self,
        state: &mut GameState,
        _ctx: &EffectContext,
        _step: &Continuation,
        choice: Target,
    ) -> Result<EffectOutcome, EffectError> {
        defeat(state, chosen_character(choice)?)?;
        Ok(EffectOutcome::Done)
    }
}

/// Turn a face-up enemy with printed cost at most `max_cost` face-down.
#[derive(Debug, Clone, Copy)]
pub struct HideEnemy {
    pub max_cost: u32,
    pub scope: Scope,
}

impl EffectHandler for HideEnemy {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        let candidates = TargetQuery::enemy(ctx.controller)
            .visible()
            .within(self.scope, ctx.mission)
            .max_cost(self.max_cost)
            .targets(state);
        Ok(EffectOutcome::Await(Selection::new(
            SelectionKind::Target,
            candidates,
            format!("Hide an enemy costing {} or less", self.max_cost),
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
        hide(state, id)?;
        state.push_log(Some(ctx.controller), format!("{} hides {}", ctx.card.name, id));
        Ok(EffectOutcome::Done)
    }
}
