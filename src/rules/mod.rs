//! Game rules.
//!
//! - `validation`: pure legality predicates and deck checks
//! - `phases`: start, action, mission and end executors
//! - `engine`: the `RulesEngine` trait and `GameEngine`
//! - `visibility`: per-player projections of the state
//!
//! Callers only need `GameEngine`; it routes actions and selections to the
//! phases and the effect engine and runs the automatic phases in between.

pub mod engine;
mod phases;
pub mod validation;
pub mod visibility;

pub use engine::{GameEngine, GameResult, RulesEngine};
pub use validation::{
    can_play_face_up, can_play_hidden, can_reveal, can_upgrade, check_turn, name_conflict,
    validate_deck,
};
pub use visibility::{
    sanitize_for, visible_state, OpponentView, OwnView, VisibleCharacter, VisibleGameState,
    VisibleMission,
};
