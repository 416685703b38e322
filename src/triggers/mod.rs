//! Effect triggers, conditions, and the handler registry.
//!
//! Cards carry effects tagged with one of four trigger kinds. When a
//! character is played, revealed, upgraded or its mission is won, the effect
//! engine asks the [`HandlerRegistry`] for the handlers registered under
//! `(card id, trigger)` and runs them in printed order.
//!
//! ## Key Components
//!
//! - [`EffectTrigger`]: MAIN, UPGRADE, AMBUSH, SCORE
//! - [`Condition`]: board predicates used by continuous rules
//! - [`ConditionContext`]: the character or pending play a condition is
//!   evaluated for
//! - [`HandlerRegistry`]: `(CardId, EffectTrigger)` to handler dispatch
//!
//! ## Example Usage
//!
//! ```
//! use mythos_engine::cards::{Card, CardId, CardEffect, EffectAction};
//! use mythos_engine::triggers::{EffectTrigger, HandlerRegistry};
//!
//! let card = Card::character(CardId::new(900), "Iruka Umino", 2, 1)
//!     .with_effect(CardEffect::new(EffectTrigger::Main, "Draw a card.", EffectAction::Draw(1)));
//!
//! let registry = HandlerRegistry::new();
//! assert_eq!(registry.handlers_for(&card, EffectTrigger::Main).len(), 1);
//! assert!(registry.handlers_for(&card, EffectTrigger::Score).is_empty());
//! ```

mod condition;
mod registry;

use serde::{Deserialize, Serialize};

pub use condition::{Condition, ConditionContext, ConditionEvaluator};
pub use registry::{HandlerList, HandlerRegistry};

/// When a printed effect fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTrigger {
    /// Character played face-up or revealed. Continuous rules also use this
    /// tag.
    Main,
    /// Character played as an upgrade.
    Upgrade,
    /// Hidden character revealed.
    Ambush,
    /// Character's (or mission's) mission won.
    Score,
}

impl EffectTrigger {
    /// Triggers owed when a character is played face-up from hand.
    pub const ON_PLAY: &'static [EffectTrigger] = &[EffectTrigger::Main];

    /// Triggers owed when a hidden character is revealed.
    pub const ON_REVEAL: &'static [EffectTrigger] = &[EffectTrigger::Main, EffectTrigger::Ambush];

    /// Triggers owed when a character is upgraded.
    pub const ON_UPGRADE: &'static [EffectTrigger] = &[EffectTrigger::Main, EffectTrigger::Upgrade];
}

impl std::fmt::Display for EffectTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Main => "MAIN",
            Self::Upgrade => "UPGRADE",
            Self::Ambush => "AMBUSH",
            Self::Score => "SCORE",
        };
        write!(f, "{}", name)
    }
}
