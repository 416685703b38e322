//! Effect handler registry.
//!
//! Handlers are stored under `(CardId, EffectTrigger)` in printed order.
//! `from_catalog` pre-builds the built-in handler for every typed effect in a
//! catalog; `register` replaces the list for one key, so a card whose
//! behaviour cannot be expressed with the built-in actions can supply its
//! own handler. Cards that were never registered fall back to handlers
//! built from their printed effects on demand.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::EffectTrigger;
use crate::cards::{Card, CardCatalog, CardId};
use crate::effects::handlers::{builtin_handler, EffectHandler};

/// Handlers for one `(card, trigger)` key.
pub type HandlerList = SmallVec<[Arc<dyn EffectHandler>; 2]>;

/// Registry of effect handlers.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: FxHashMap<(CardId, EffectTrigger), HandlerList>,
}

impl HandlerRegistry {
    /// Create an empty registry. Every card uses its built-in handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build handlers for every card in a catalog.
    #[must_use]
    pub fn from_catalog(catalog: &CardCatalog) -> Self {
        let mut registry = Self::new();
        for card in catalog.iter() {
            for trigger in [
                EffectTrigger::Main,
                EffectTrigger::Upgrade,
                EffectTrigger::Ambush,
                EffectTrigger::Score,
            ] {
                let list = Self::builtin_list(card, trigger);
                if !list.is_empty() {
                    registry.handlers.insert((card.id, trigger), list);
                }
            }
        }
        registry
    }

    /// Replace the handlers for one key.
    pub fn register(
        &mut self,
        card: CardId,
        trigger: EffectTrigger,
        handlers: impl IntoIterator<Item = Arc<dyn EffectHandler>>,
    ) {
        self.handlers
            .insert((card, trigger), handlers.into_iter().collect());
    }

    /// Handlers to run for `card` on `trigger`, in order.
    #[must_use]
    pub fn handlers_for(&self, card: &Card, trigger: EffectTrigger) -> HandlerList {
        match self.handlers.get(&(card.id, trigger)) {
            Some(list) => list.clone(),
            None => Self::builtin_list(card, trigger),
        }
    }

    /// One handler by position.
    #[must_use]
    pub fn handler_at(
        &self,
        card: &Card,
        trigger: EffectTrigger,
        index: usize,
    ) -> Option<Arc<dyn EffectHandler>> {
        self.handlers_for(card, trigger).into_iter().nth(index)
    }

    /// Number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn builtin_list(card: &Card, trigger: EffectTrigger) -> HandlerList {
        card.effects_for(trigger)
            .filter_map(|effect| builtin_handler(&effect.action))
            .collect()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("keys", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardEffect, ContinuousRule, EffectAction};
    use crate::core::{GameState, Target};
    use crate::effects::{Continuation, EffectContext, EffectOutcome};
    use crate::error::EffectError;

    #[derive(Debug)]
    struct Nothing;

    impl EffectHandler for Nothing {
        fn begin(&self, _: &mut GameState, _: &EffectContext) -> Result<EffectOutcome, EffectError> {
            Ok(EffectOutcome::Done)
        }

        fn resume(
            &self,
            _: &mut GameState,
            _: &EffectContext,
            _: &Continuation,
            choice: Target,
        ) -> Result<EffectOutcome, EffectError> {
            Err(EffectError::UnexpectedTarget(choice))
        }
    }

    fn card() -> Card {
        Card::character(CardId::new(900), "Test Subject", 2, 2)
            .with_effect(CardEffect::new(EffectTrigger::Main, "Draw", EffectAction::Draw(1)))
            .with_effect(CardEffect::new(EffectTrigger::Main, "Chakra", EffectAction::GainChakra(1)))
            .with_rule("Keeps tokens", ContinuousRule::RetainTokens)
    }

    #[test]
    fn test_builtin_fallback_skips_continuous() {
        let registry = HandlerRegistry::new();
        assert_eq!(registry.handlers_for(&card(), EffectTrigger::Main).len(), 2);
    }

    #[test]
    fn test_from_catalog_indexes_cards() {
        let mut catalog = CardCatalog::new();
        catalog.insert(card());
        let registry = HandlerRegistry::from_catalog(&catalog);

        assert_eq!(registry.len(), 1);
        assert!(registry.handler_at(&card(), EffectTrigger::Main, 1).is_some());
        assert!(registry.handler_at(&card(), EffectTrigger::Main, 2).is_none());
    }

    #[test]
    fn test_register_overrides() {
        let mut registry = HandlerRegistry::new();
        registry.register(
            CardId::new(900),
            EffectTrigger::Score,
            [Arc::new(Nothing) as Arc<dyn EffectHandler>],
        );

        assert_eq!(registry.handlers_for(&card(), EffectTrigger::Score).len(), 1);
    }
}
