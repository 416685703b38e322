//! Card system: definitions, typed effects, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `Card`: Static card data with typed effects
//! - `CardEffect` / `EffectAction` / `ContinuousRule`: effect metadata
//!   resolved once by the catalog layer
//! - `CharacterInPlay`: Runtime character state (stack, tokens, controller)
//! - `CardCatalog`: Card definition lookup
//!
//! The `starter` module holds a small built-in set and two legal decks.

pub mod definition;
pub mod effect;
pub mod instance;
pub mod registry;
pub mod starter;

pub use definition::{Card, CardId, CardKind};
pub use effect::{CardEffect, CharacterFilter, ContinuousRule, EffectAction, Scope};
pub use instance::CharacterInPlay;
pub use registry::CardCatalog;
