//! Error types.
//!
//! Illegal actions surface as `ActionError` from the checked entry point
//! (`GameEngine::try_apply`); the total `apply_action` swallows them and
//! returns the state unchanged. Effect handlers report `EffectError`, which
//! the effect engine turns into a fizzle.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::{InstanceId, PendingId, Phase, PlayerId, Target};

/// Why an action was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("game is over")]
    GameOver,

    #[error("action not allowed in {0:?} phase")]
    WrongPhase(Phase),

    #[error("{0} is not the active player")]
    NotYourTurn(PlayerId),

    #[error("{0} has already passed")]
    AlreadyPassed(PlayerId),

    #[error("{0} has already made the mulligan decision")]
    AlreadyMulliganed(PlayerId),

    #[error("a pending effect must be resolved first")]
    AwaitingSelection,

    #[error("insufficient chakra: need {needed}, have {available}")]
    InsufficientChakra { needed: u32, available: u32 },

    #[error("a visible {0} is already on that side of the mission")]
    NameConflict(String),

    #[error("{0} cannot upgrade that character")]
    NotAnUpgrade(String),

    #[error("restricted: {0}")]
    Restricted(String),

    #[error("no hand card at index {0}")]
    BadHandIndex(usize),

    #[error("no active mission at index {0}")]
    BadMission(usize),

    #[error("{0} is not a character")]
    NotACharacter(CardId),

    #[error("{0} is not in play")]
    UnknownCharacter(InstanceId),

    #[error("{0} is not controlled by {1}")]
    NotYourCharacter(InstanceId, PlayerId),

    #[error("{0} is already face-up")]
    AlreadyVisible(InstanceId),

    #[error("{0} is face-down")]
    NotVisible(InstanceId),

    #[error("no pending effect {0}")]
    UnknownPending(PendingId),

    #[error("{0} is not deciding {1}")]
    NotYourSelection(PlayerId, PendingId),

    #[error("{0} is not a valid choice")]
    InvalidTarget(Target),

    #[error("that effect is not optional")]
    NotOptional,
}

/// An effect handler fault. Caught by the effect engine and fizzled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    #[error("{0} is no longer in play")]
    MissingCharacter(InstanceId),

    #[error("no active mission at index {0}")]
    MissingMission(usize),

    #[error("unexpected choice {0}")]
    UnexpectedTarget(Target),

    #[error("no card at position {0}")]
    MissingCard(usize),

    #[error("continuation step {0} is not defined")]
    UnknownStep(u8),

    #[error("no handler for {card} effect #{index}")]
    MissingHandler { card: CardId, index: usize },

    #[error("{0}")]
    Inconsistent(String),
}

/// Deck legality violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck has {found} characters, at least {min} required")]
    TooFewCards { found: usize, min: usize },

    #[error("{name} appears {count} times, at most {max} allowed")]
    TooManyCopies {
        name: String,
        count: usize,
        max: usize,
    },

    #[error("expected {expected} missions, found {found}")]
    MissionCount { expected: usize, found: usize },

    #[error("{0} is not a character card")]
    NotACharacter(String),

    #[error("{0} is not a mission card")]
    NotAMission(String),
}

/// Failure encoding or decoding a state snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}
