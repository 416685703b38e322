//! Deck manipulation.

use super::EffectHandler;
use crate::core::{GameState, Target};
use crate::effects::pending::{Continuation, EffectContext, EffectOutcome, Selection, SelectionKind};
use crate::error::EffectError;

/// Look at the top cards of your deck, put one into your hand and the rest
/// on the bottom in their current order.
#[derive(Debug, Clone, Copy)]
pub struct Scout {
    pub look: u32,
}

impl Scout {
    fn window(&self, state: &GameState, ctx: &EffectContext) -> usize {
        (self.look as usize).min(state.players[ctx.controller].deck.len())
    }
}

impl EffectHandler for Scout {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        let n = self.window(state, ctx);
        let cards: Vec<_> = state.players[ctx.controller]
            .deck
            .iter()
            .take(n)
            .cloned()
            .collect();
        let candidates = (0..n).map(Target::ListCard).collect();
        Ok(EffectOutcome::Await(
            Selection::new(
                SelectionKind::ChooseFromList,
                candidates,
                format!("Choose one of the top {} cards", n),
            )
            .showing(cards),
        ))
    }

    fn resume(
        &self,
        state: &mut GameState,
        ctx: &EffectContext,
        _step: &Continuation,
        choice: Target,
    ) -> Result<EffectOutcome, EffectError> {
        let Target::ListCard(index) = choice else {
            return Err(EffectError::UnexpectedTarget(choice));
        };
        let n = self.window(state, ctx);
        if index >= n {
            return Err(EffectError::MissingCard(index));
        }

        let player = &mut state.players[ctx.controller];
        let rest = player.deck.split_off(n);
        let mut looked = std::mem::replace(&mut player.deck, rest);
        let chosen = looked.remove(index);
        player.hand.push_back(chosen);
        player.deck.append(looked);

        state.push_log(Some(ctx.controller), format!("{} finds a card", ctx.card.name));
        Ok(EffectOutcome::Done)
    }
}
