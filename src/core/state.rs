//! Game state.
//!
//! ## PlayerState
//!
//! One seat's cards and counters:
//! - Hand, deck (top = index 0), discard pile
//! - Chakra pool and mission points
//! - Passed / mulliganed flags and the cached in-play count
//!
//! ## GameState
//!
//! The complete authoritative value the engine reduces over:
//! - Both `PlayerState`s, the mission deck and active missions
//! - Turn, phase, active player, Edge holder
//! - Pending effect/selection queues and the scoring cursor
//! - Log, action history and the deterministic RNG
//!
//! Every collection is an `im` persistent structure, so cloning a state for
//! search or for the fizzle snapshot in the effect engine is O(1).

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::RulesConfig;
use super::entity::{InstanceId, PendingId};
use super::log::LogEntry;
use super::mission::ActiveMission;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Card, CharacterInPlay};
use crate::effects::{PendingAction, PendingEffect};
use crate::error::SnapshotError;

/// Game phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Both players decide keep / redraw once.
    Mulligan,
    /// Automatic: reveal mission, income, draw.
    Start,
    /// Players alternate actions until both pass.
    Action,
    /// Automatic: score missions D, C, B, A.
    Mission,
    /// Automatic: clear chakra and tokens, return characters.
    End,
    /// Terminal.
    GameOver,
}

/// One seat's state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Cards in hand, in draw order.
    pub hand: Vector<Arc<Card>>,

    /// Deck; the top card is at index 0.
    pub deck: Vector<Arc<Card>>,

    /// Discard pile, oldest first.
    pub discard: Vector<Arc<Card>>,

    /// Chakra available this turn.
    pub chakra: u32,

    /// Mission points scored so far. Never decreases.
    pub mission_points: u32,

    /// Passed this action phase.
    pub passed: bool,

    /// Made the mulligan decision.
    pub mulliganed: bool,

    /// Characters this player controls in play (hidden included).
    pub characters_in_play: u32,

    /// Hand cards removed by sanitisation; zero in authoritative state.
    pub concealed_hand: usize,

    /// Deck cards removed by sanitisation; zero in authoritative state.
    pub concealed_deck: usize,
}

impl PlayerState {
    /// Number of cards in hand, including concealed ones.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len() + self.concealed_hand
    }

    /// Number of cards in deck, including concealed ones.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck.len() + self.concealed_deck
    }
}

/// A source still owed SCORE effects during the mission phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreSource {
    /// The mission card itself.
    Mission(usize),
    /// One of the winner's visible characters.
    Character(InstanceId),
}

/// Mission-phase progress, kept so scoring resumes after a selection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringCursor {
    /// Next position in `MissionRank::SCORING_ORDER` to evaluate.
    pub next_rank: usize,
    /// SCORE sources still to fire for the mission just won.
    pub queue: Vector<ScoreSource>,
}

/// Complete game state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub players: PlayerMap<PlayerState>,

    /// Face-down missions still to be revealed, top at index 0.
    pub mission_deck: Vector<Arc<Card>>,

    /// Revealed missions in reveal order. Grows by one per turn.
    pub missions: Vector<ActiveMission>,

    /// Turn number, 1 to `rules.turns`.
    pub turn: u8,

    pub phase: Phase,

    /// Whose move it is in the action phase.
    pub active_player: PlayerId,

    /// Holder of the Edge tiebreak token.
    pub edge_holder: PlayerId,

    /// First player to pass this turn.
    pub first_passer: Option<PlayerId>,

    pub log: Vector<LogEntry>,

    /// Suspended effects, oldest first.
    pub pending_effects: Vector<PendingEffect>,

    /// Selections owed, paired with `pending_effects` by id.
    pub pending_actions: Vector<PendingAction>,

    /// Player whose action is waiting on a pending selection before the
    /// turn passes to the opponent.
    pub awaiting_turn_end: Option<PlayerId>,

    /// Set while the mission phase is in progress.
    pub scoring: Option<ScoringCursor>,

    /// Every accepted action.
    pub history: Vector<ActionRecord>,

    pub rules: RulesConfig,

    pub rng: GameRng,

    next_instance: u32,
    next_pending: u32,
}

impl GameState {
    /// Create an empty state in the mulligan phase.
    #[must_use]
    pub fn new(rules: RulesConfig, seed: u64) -> Self {
        Self {
            players: PlayerMap::with_default(),
            mission_deck: Vector::new(),
            missions: Vector::new(),
            turn: 1,
            phase: Phase::Mulligan,
            active_player: PlayerId::ONE,
            edge_holder: PlayerId::ONE,
            first_passer: None,
            log: Vector::new(),
            pending_effects: Vector::new(),
            pending_actions: Vector::new(),
            awaiting_turn_end: None,
            scoring: None,
            history: Vector::new(),
            rules,
            rng: GameRng::new(seed),
            next_instance: 1,
            next_pending: 1,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Whether any effect is waiting on a selection.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending_actions.is_empty()
    }

    // === Ids ===

    pub fn alloc_instance(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        id
    }

    pub fn alloc_pending(&mut self) -> PendingId {
        let id = PendingId(self.next_pending);
        self.next_pending += 1;
        id
    }

    // === Characters ===

    /// All characters in play, mission by mission, player one's side first.
    pub fn characters(&self) -> impl Iterator<Item = &CharacterInPlay> {
        self.missions.iter().flat_map(|m| {
            PlayerId::all().flat_map(move |p| m.characters[p].iter())
        })
    }

    /// Find a character anywhere in play.
    #[must_use]
    pub fn character(&self, id: InstanceId) -> Option<&CharacterInPlay> {
        self.characters().find(|c| c.id == id)
    }

    /// Locate a character: (mission index, side, position).
    #[must_use]
    pub fn locate(&self, id: InstanceId) -> Option<(usize, PlayerId, usize)> {
        self.missions
            .iter()
            .enumerate()
            .find_map(|(m, mission)| mission.locate(id).map(|(side, pos)| (m, side, pos)))
    }

    /// Modify a character in place. Returns false if it is not in play.
    pub fn update_character(
        &mut self,
        id: InstanceId,
        f: impl FnOnce(&mut CharacterInPlay),
    ) -> bool {
        let Some((m, side, pos)) = self.locate(id) else {
            return false;
        };
        let Some(mission) = self.missions.get_mut(m) else {
            return false;
        };
        match mission.characters[side].get_mut(pos) {
            Some(character) => {
                f(character);
                true
            }
            None => false,
        }
    }

    /// Take a character out of play without sending its cards anywhere.
    pub fn remove_character(&mut self, id: InstanceId) -> Option<CharacterInPlay> {
        let (m, side, pos) = self.locate(id)?;
        let removed = self.missions.get_mut(m)?.characters[side].remove(pos);
        self.refresh_counts();
        Some(removed)
    }

    /// Put a character on its controller's side of its mission.
    pub fn place_character(&mut self, character: CharacterInPlay) -> bool {
        let side = character.controller;
        match self.missions.get_mut(character.mission) {
            Some(mission) => {
                mission.characters[side].push_back(character);
                self.refresh_counts();
                true
            }
            None => false,
        }
    }

    /// Recompute each player's cached in-play count.
    pub fn refresh_counts(&mut self) {
        for player in PlayerId::all() {
            let count = self
                .missions
                .iter()
                .map(|m| m.characters[player].len() as u32)
                .sum();
            self.players[player].characters_in_play = count;
        }
    }

    /// Send a character's whole stack to its owner's discard pile.
    pub fn discard_stack(&mut self, character: CharacterInPlay) {
        let owner = character.owner;
        let discard = &mut self.players[owner].discard;
        for card in character.into_cards() {
            discard.push_back(card);
        }
    }

    // === Cards ===

    /// Draw up to `count` cards. Drawing from an empty deck yields nothing.
    ///
    /// Returns the number of cards drawn.
    pub fn draw(&mut self, player: PlayerId, count: u32) -> u32 {
        let mut drawn = 0;
        let state = &mut self.players[player];
        for _ in 0..count {
            match state.deck.pop_front() {
                Some(card) => {
                    state.hand.push_back(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Shuffle a player's deck with the game RNG.
    pub fn shuffle_deck(&mut self, player: PlayerId) {
        let deck = self.players[player].deck.clone();
        self.players[player].deck = self.rng.shuffled(&deck);
    }

    // === Log ===

    /// Append to the game log.
    pub fn push_log(&mut self, player: Option<PlayerId>, message: impl Into<String>) {
        self.log.push_back(LogEntry {
            turn: self.turn,
            phase: self.phase,
            player,
            message: message.into(),
        });
    }

    /// Record an accepted action.
    pub fn record(&mut self, player: PlayerId, action: super::action::Action) {
        let sequence = self.history.len() as u32;
        self.history.push_back(ActionRecord {
            player,
            action,
            turn: self.turn,
            sequence,
        });
    }

    // === Snapshots ===

    /// Encode the whole state with bincode.
    pub fn to_snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a state written by [`GameState::to_snapshot`].
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
