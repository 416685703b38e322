//! Effect resolution.
//!
//! The `EffectEngine` runs the handlers registered for a card's triggers in
//! order. When a handler asks for a choice with at least one candidate, the
//! engine freezes a `PendingEffect`/`PendingAction` pair and stops; the
//! remaining handlers and trigger kinds are recorded on the pending effect
//! and resumed by [`EffectEngine::resolve_selection`].
//!
//! A handler that returns `Err` fizzles: the engine restores the state it
//! had before the call, logs a warning, and carries on with the next
//! handler.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cards::CharacterInPlay;
use crate::core::{GameState, InstanceId, PendingId, PlayerId, Target};
use crate::error::{ActionError, EffectError};
use crate::triggers::{EffectTrigger, HandlerRegistry};

use super::continuous;
use super::handlers::hide;
use super::pending::{EffectContext, EffectOutcome, PendingAction, PendingEffect, Selection};

/// What actually happened to a character that would have been defeated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefeatOutcome {
    /// Left play; its stack went to its owner's discard.
    Defeated(InstanceId),
    /// Turned face-down instead.
    Hidden(InstanceId),
    /// A distinct ally was defeated in its place.
    Sacrificed { saved: InstanceId, by: InstanceId },
}

/// Defeat a character, applying replacement rules first.
///
/// Hide-instead is checked before sacrifice. A sacrificed substitute is
/// defeated outright; its own replacement rules are not consulted.
pub fn defeat(state: &mut GameState, id: InstanceId) -> Result<DefeatOutcome, EffectError> {
    let character = state
        .character(id)
        .cloned()
        .ok_or(EffectError::MissingCharacter(id))?;

    if continuous::hides_instead_of_defeat(&character) {
        hide(state, id)?;
        state.push_log(Some(character.controller), format!("{} hides instead of being defeated", character.name()));
        return Ok(DefeatOutcome::Hidden(id));
    }

    if let Some(substitute) = continuous::sacrifice_for(state, &character) {
        remove_defeated(state, substitute)?;
        state.push_log(
            Some(character.controller),
            format!("{} is defeated in place of {}", substitute, character.name()),
        );
        return Ok(DefeatOutcome::Sacrificed {
            saved: id,
            by: substitute,
        });
    }

    remove_defeated(state, id)?;
    Ok(DefeatOutcome::Defeated(id))
}

/// Take a character out of play, discard its stack to its owner, and fire
/// on-defeat chakra.
fn remove_defeated(state: &mut GameState, id: InstanceId) -> Result<(), EffectError> {
    let character: CharacterInPlay = state
        .remove_character(id)
        .ok_or(EffectError::MissingCharacter(id))?;
    let refund = continuous::chakra_on_defeat(&character);
    let controller = character.controller;

    debug!(character = %id, name = character.name(), "defeated");
    state.push_log(Some(controller), format!("{} is defeated", character.name()));
    state.discard_stack(character);

    if refund > 0 {
        state.players[controller].chakra += refund;
        state.push_log(Some(controller), format!("gains {} chakra on defeat", refund));
    }
    Ok(())
}

/// Dispatches card effects through a handler registry.
#[derive(Clone, Debug)]
pub struct EffectEngine {
    registry: Arc<HandlerRegistry>,
}

impl Default for EffectEngine {
    fn default() -> Self {
        Self::new(Arc::new(HandlerRegistry::new()))
    }
}

impl EffectEngine {
    #[must_use]
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Fire `triggers` for a source in order.
    ///
    /// Returns true if resolution suspended on a selection.
    pub fn fire(
        &self,
        state: &mut GameState,
        source: EffectContext,
        triggers: &[EffectTrigger],
    ) -> bool {
        let Some((&first, rest)) = triggers.split_first() else {
            return false;
        };
        self.run_from(state, source.with_trigger(first), 0, rest.to_vec())
    }

    /// Run handlers for `source.trigger` starting at `index`, then each
    /// trigger in `remaining`.
    ///
    /// Returns true if resolution suspended on a selection.
    pub fn run_from(
        &self,
        state: &mut GameState,
        mut source: EffectContext,
        mut index: usize,
        mut remaining: Vec<EffectTrigger>,
    ) -> bool {
        loop {
            let handlers = self.registry.handlers_for(&source.card, source.trigger);
            while let Some(handler) = handlers.get(index) {
                source.follow(state);
                let outcome = Self::invoke(state, &source, |s| handler.begin(s, &source));
                if let Some(selection) = Self::awaiting(outcome) {
                    Self::suspend(state, &source, index, selection, remaining);
                    return true;
                }
                index += 1;
            }

            if remaining.is_empty() {
                return false;
            }
            source = source.with_trigger(remaining.remove(0));
            index = 0;
        }
    }

    /// Answer a pending selection, then continue the interrupted chain.
    ///
    /// `choice` of `None` declines an optional selection. Returns true if
    /// resolution suspended again.
    pub fn resolve_selection(
        &self,
        state: &mut GameState,
        player: PlayerId,
        pending: PendingId,
        choice: Option<Target>,
    ) -> Result<bool, ActionError> {
        let effect_pos = state
            .pending_effects
            .iter()
            .position(|p| p.id == pending)
            .ok_or(ActionError::UnknownPending(pending))?;
        let action_pos = state
            .pending_actions
            .iter()
            .position(|a| a.id == pending)
            .ok_or(ActionError::UnknownPending(pending))?;

        let chooser = state.pending_actions[action_pos].player;
        if chooser != player {
            return Err(ActionError::NotYourSelection(player, pending));
        }
        let record = state.pending_effects[effect_pos].clone();
        match choice {
            Some(target) if !record.candidates.contains(&target) => {
                return Err(ActionError::InvalidTarget(target));
            }
            None if !record.optional => return Err(ActionError::NotOptional),
            _ => {}
        }

        state.pending_effects.remove(effect_pos);
        state.pending_actions.remove(action_pos);

        let PendingEffect {
            source,
            effect_index,
            remaining,
            continuation,
            ..
        } = record;

        let outcome = match self
            .registry
            .handler_at(&source.card, source.trigger, effect_index)
        {
            Some(handler) => Self::invoke(state, &source, |s| match choice {
                Some(target) => handler.resume(s, &source, &continuation, target),
                None => handler.decline(s, &source, &continuation),
            }),
            None => {
                warn!(card = %source.card.id, index = effect_index, "pending effect lost its handler");
                EffectOutcome::Done
            }
        };

        if let Some(selection) = Self::awaiting(outcome) {
            Self::suspend(state, &source, effect_index, selection, remaining);
            return Ok(true);
        }
        Ok(self.run_from(state, source, effect_index + 1, remaining))
    }

    /// Call a handler, restoring the state if it faults.
    fn invoke(
        state: &mut GameState,
        source: &EffectContext,
        call: impl FnOnce(&mut GameState) -> Result<EffectOutcome, EffectError>,
    ) -> EffectOutcome {
        let snapshot = state.clone();
        match call(state) {
            Ok(outcome) => outcome,
            Err(error) => {
                *state = snapshot;
                warn!(
                    card = %source.card.id,
                    trigger = %source.trigger,
                    %error,
                    "effect fizzled"
                );
                state.push_log(
                    Some(source.controller),
                    format!("{} {} effect fizzled: {}", source.card.name, source.trigger, error),
                );
                EffectOutcome::Done
            }
        }
    }

    /// A selection worth suspending for. Nothing to choose means nothing
    /// happens.
    fn awaiting(outcome: EffectOutcome) -> Option<Selection> {
        match outcome {
            EffectOutcome::Await(selection) if !selection.candidates.is_empty() => Some(selection),
            _ => None,
        }
    }

    fn suspend(
        state: &mut GameState,
        source: &EffectContext,
        effect_index: usize,
        selection: Selection,
        remaining: Vec<EffectTrigger>,
    ) {
        let id = state.alloc_pending();
        let player = selection.chooser.unwrap_or(source.controller);
        debug!(pending = %id, %player, card = %source.card.id, "effect awaiting selection");

        state.pending_actions.push_back(PendingAction {
            id,
            player,
            kind: selection.kind,
            description: selection.description,
            optional: selection.optional,
            cards: selection.cards,
        });
        state.pending_effects.push_back(PendingEffect {
            id,
            source: source.clone(),
            effect_index,
            candidates: selection.candidates,
            optional: selection.optional,
            remaining,
            continuation: selection.continuation,
        });
    }
}
