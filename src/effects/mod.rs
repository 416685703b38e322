//! Effect system.
//!
//! - `targeting`: legal target queries over the board
//! - `continuous`: passive rules, recomputed on demand
//! - `pending`: suspension records for effects awaiting a choice
//! - `handlers`: one handler per typed effect
//! - `resolver`: the engine that runs handlers, suspends and resumes them
//!
//! ## Resolution model
//!
//! Effects are resolved synchronously against `&mut GameState`. A handler
//! that needs a player's choice returns `EffectOutcome::Await`; the engine
//! records a `PendingEffect`/`PendingAction` pair and returns control to the
//! caller. The next action the game accepts is the answer to that choice.

pub mod continuous;
pub mod handlers;
mod pending;
mod resolver;
mod targeting;

pub use handlers::EffectHandler;
pub use pending::{
    Continuation, EffectContext, EffectOutcome, PendingAction, PendingEffect, Selection,
    SelectionKind,
};
pub use resolver::{defeat, DefeatOutcome, EffectEngine};
pub use targeting::{hand_targets, other_missions, Allegiance, TargetQuery, Visibility};
