//! Append-only game log.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::state::Phase;

/// One line of the game log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u8,
    pub phase: Phase,
    pub player: Option<PlayerId>,
    pub message: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.player {
            Some(p) => write!(f, "[T{} {:?}] {}: {}", self.turn, self.phase, p, self.message),
            None => write!(f, "[T{} {:?}] {}", self.turn, self.phase, self.message),
        }
    }
}
