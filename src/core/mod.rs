//! Core engine types: identifiers, players, state, actions, RNG, configuration.
//!
//! Everything here is plain data. The rules that transform it live in
//! `rules` and `effects`.

pub mod action;
pub mod config;
pub mod entity;
pub mod log;
pub mod mission;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord, Target};
pub use config::{DeckList, GameConfig, RulesConfig};
pub use entity::{InstanceId, PendingId};
pub use log::LogEntry;
pub use mission::{ActiveMission, MissionRank};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, Phase, PlayerState, ScoreSource, ScoringCursor};
