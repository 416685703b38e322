//! # mythos-engine
//!
//! Rules engine and AI opponents for a two-player, hidden-information card
//! game. Characters are committed face-up or face-down onto shared missions
//! over four turns; missions score by total power.
//!
//! ## Design Principles
//!
//! 1. **Pure Reducer**: `GameState` is a value. Every engine call takes a
//!    state and returns a new one; the input is never mutated.
//!
//! 2. **Deterministic**: The RNG lives in the state. Same seed and same
//!    actions produce the same game, which replays and AI search rely on.
//!
//! 3. **Suspendable Effects**: An effect that needs a choice parks itself
//!    as a pending record and resumes when the choice arrives as an action.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so search can
//!   branch freely.
//!
//! - **Typed Effects**: Card text is resolved once into `EffectAction` and
//!   `ContinuousRule` values; handlers are looked up by card and trigger.
//!
//! - **Information Sets**: AI strategies see a sanitized state with the
//!   opponent's hand, deck and face-down cards removed.
//!
//! ## Modules
//!
//! - `core`: Identifiers, players, state, actions, RNG, configuration
//! - `cards`: Card definitions, effect metadata, instances, catalog
//! - `triggers`: Trigger kinds, board conditions, handler registry
//! - `effects`: Targeting, continuous effects, effect resolution
//! - `rules`: Validation, phases, the `RulesEngine`, visibility
//! - `ai`: Easy, Medium, Hard and Expert strategies
//! - `error`: Error types

pub mod ai;
pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod rules;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, ActiveMission, GameConfig, GameRng, GameState, InstanceId, MissionRank,
    Phase, PlayerId, PlayerMap, RulesConfig, Target,
};

pub use crate::cards::{Card, CardCatalog, CardId, CharacterInPlay};

pub use crate::rules::{GameEngine, GameResult, RulesEngine, VisibleGameState};

pub use crate::effects::{EffectEngine, EffectHandler, PendingAction};

pub use crate::triggers::{Condition, EffectTrigger, HandlerRegistry};

pub use crate::ai::{AiConfig, AiPlayer, Difficulty, Strategy};

pub use crate::error::{ActionError, DeckError, EffectError, SnapshotError};
