//! Effects on hands: draw, discard, recall.

use super::{chosen_hand_card, EffectHandler};
use crate::core::{GameState, PlayerId, Target};
use crate::effects::pending::{Continuation, EffectContext, EffectOutcome, Selection, SelectionKind};
use crate::effects::targeting::hand_targets;
use crate::error::EffectError;

/// Remove the card at `index` from a player's hand.
fn take_from_hand(
    state: &mut GameState,
    player: PlayerId,
    index: usize,
) -> Result<std::sync::Arc<crate::cards::Card>, EffectError> {
    let hand = &mut state.players[player].hand;
    if index >= hand.len() {
        return Err(EffectError::MissingCard(index));
    }
    Ok(hand.remove(index))
}

/// Controller draws cards.
#[derive(Debug, Clone, Copy)]
pub struct Draw(pub u32);

impl EffectHandler for Draw {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        let drawn = state.draw(ctx.controller, self.0);
        state.push_log(Some(ctx.controller), format!("{} draws {} card(s)", ctx.card.name, drawn));
        Ok(EffectOutcome::Done)
    }
}

/// Optionally discard a card; if you do, draw.
#[derive(Debug, Clone, Copy)]
pub struct DiscardToDraw {
    pub draw: u32,
}

impl EffectHandler for DiscardToDraw {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        let candidates = hand_targets(state, ctx.controller);
        Ok(EffectOutcome::Await(
            Selection::new(
                SelectionKind::DiscardFromHand,
                candidates,
                format!("Discard a card to draw {}", self.draw),
            )
            .optional(),
        ))
    }

    fn resume(
        &self,
        state: &mut GameState,
        ctx: &EffectContext,
        _step: &Continuation,
        choice: Target,
    ) -> Result<EffectOutcome, EffectError> {
        let card = take_from_hand(state, ctx.controller, chosen_hand_card(choice)?)?;
        state.push_log(Some(ctx.controller), format!("discards {}", card.name));
        state.players[ctx.controller].discard.push_back(card);
        state.draw(ctx.controller, self.draw);
        Ok(EffectOutcome::Done)
    }
}

/// The opponent chooses a card from their own hand and discards it.
#[derive(Debug, Clone, Copy)]
pub struct OpponentDiscards;

impl EffectHandler for OpponentDiscards {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        let opponent = ctx.controller.opponent();
        Ok(EffectOutcome::Await(
            Selection::new(
                SelectionKind::DiscardFromHand,
                hand_targets(state, opponent),
                format!("{}: discard a card", ctx.card.name),
            )
            .chosen_by(opponent),
        ))
    }

    fn resume(
        &self,
        state: &mut GameState,
        ctx: &EffectContext,
        _step: &Continuation,
        choice: Target,
    ) -> Result<EffectOutcome, EffectError> {
        let opponent = ctx.controller.opponent();
        let card = take_from_hand(state, opponent, chosen_hand_card(choice)?)?;
        state.push_log(Some(opponent), format!("discards {}", card.name));
        state.players[opponent].discard.push_back(card);
        Ok(EffectOutcome::Done)
    }
}

/// Optionally put a card from hand on top of the deck; if you do, gain
/// chakra.
#[derive(Debug, Clone, Copy)]
pub struct Recall {
    pub chakra: u32,
}

impl EffectHandler for Recall {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        Ok(EffectOutcome::Await(
            Selection::new(
                SelectionKind::PlaceOnDeck,
                hand_targets(state, ctx.controller),
                format!("Put a card on top of your deck to gain {} chakra", self.chakra),
            )
            .optional(),
        ))
    }

    fn resume(
        &self,
        state: &mut GameState,
        ctx: &EffectContext,
        _step: &Continuation,
        choice: Target,
    ) -> Result<EffectOutcome, EffectError> {
        let card = take_from_hand(state, ctx.controller, chosen_hand_card(choice)?)?;
        let player = &mut state.players[ctx.controller];
        player.deck.push_front(card);
        player.chakra += self.chakra;
        state.push_log(Some(ctx.controller), format!("recalls a card for {} chakra", self.chakra));
        Ok(EffectOutcome::Done)
    }
}
