//! Phase executors.
//!
//! - `start`: reveal the turn's mission, pay income, draw
//! - `action`: the player-initiated actions and pass
//! - `mission`: score missions in rank order, firing SCORE effects
//! - `end`: clear chakra and tokens, return characters, advance the turn
//!
//! Start and end never suspend. Action and mission may stop on a pending
//! selection; the engine picks up where they left off once it is answered.

pub(crate) mod action;
pub(crate) mod end;
pub(crate) mod mission;
pub(crate) mod start;
