//! Chakra and Edge effects. These never ask for a choice.

use tracing::debug;

use super::EffectHandler;
use crate::core::GameState;
use crate::effects::pending::{EffectContext, EffectOutcome};
use crate::error::EffectError;

/// Controller gains chakra.
#[derive(Debug, Clone, Copy)]
pub struct GainChakra(pub u32);

impl EffectHandler for GainChakra {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        state.players[ctx.controller].chakra += self.0;
        state.push_log(Some(ctx.controller), format!("{} grants {} chakra", ctx.card.name, self.0));
        Ok(EffectOutcome::Done)
    }
}

/// Controller takes the Edge token.
#[derive(Debug, Clone, Copy)]
pub struct TakeEdge;

impl EffectHandler for TakeEdge {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        if state.edge_holder != ctx.controller {
            debug!(player = %ctx.controller, "edge taken");
            state.edge_holder = ctx.controller;
            state.push_log(Some(ctx.controller), format!("{} takes the Edge", ctx.card.name));
        }
        Ok(EffectOutcome::Done)
    }
}
