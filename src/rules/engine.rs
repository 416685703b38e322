//! Game engine.
//!
//! `RulesEngine` is the boundary the outside world and the AI talk to:
//! - `create_game` builds the opening state from a `GameConfig`
//! - `try_apply` / `apply_action` are the single mutation entry point
//! - `valid_actions` enumerates every legal action for a player
//! - `visible_state` and `result` answer read-only questions
//!
//! `GameEngine` implements it on top of the phase executors and the effect
//! engine. Every call works on a clone of the input state; callers never
//! see a partially applied action.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cards::CardCatalog;
use crate::core::{Action, GameConfig, GameState, Phase, PlayerId, PlayerMap};
use crate::effects::EffectEngine;
use crate::error::ActionError;
use crate::triggers::HandlerRegistry;

use super::phases::{action, end, mission, start};
use super::validation;
use super::visibility::{self, VisibleGameState};

/// Final outcome of a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub winner: PlayerId,
    /// Mission points per player.
    pub points: PlayerMap<u32>,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }

    /// Point difference from `player`'s point of view.
    #[must_use]
    pub fn margin(&self, player: PlayerId) -> i64 {
        i64::from(self.points[player]) - i64::from(self.points[player.opponent()])
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `try_apply` must be deterministic: the RNG lives in the state
/// - `valid_actions` returns empty if the player can't act right now
/// - `result` returns `None` until the game is over
pub trait RulesEngine {
    /// Build the opening state: Edge assigned, missions drawn from each
    /// pool, decks shuffled and hands dealt.
    fn create_game(&self, config: &GameConfig) -> GameState;

    /// Apply an action to a copy of `state`, or say why it is illegal.
    fn try_apply(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<GameState, ActionError>;

    /// Every legal action for `player` right now.
    fn valid_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Outcome once the game is over.
    fn result(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Apply an action; an illegal action leaves the state unchanged.
    fn apply_action(&self, state: &GameState, player: PlayerId, action: &Action) -> GameState {
        match self.try_apply(state, player, action) {
            Ok(next) => next,
            Err(error) => {
                debug!(%player, ?action, %error, "action rejected");
                state.clone()
            }
        }
    }

    /// The winner, defined only once the game is over.
    fn winner(&self, state: &GameState) -> Option<PlayerId> {
        self.result(state).map(|r| r.winner)
    }

    /// What `player` is allowed to see.
    fn visible_state(&self, state: &GameState, player: PlayerId) -> VisibleGameState {
        visibility::visible_state(state, player)
    }
}

/// The game's rules engine.
#[derive(Clone, Debug, Default)]
pub struct GameEngine {
    effects: EffectEngine,
}

impl GameEngine {
    /// Engine dispatching effects through `registry`.
    #[must_use]
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self {
            effects: EffectEngine::new(registry),
        }
    }

    /// Engine with handlers prebuilt for every card in a catalog.
    #[must_use]
    pub fn with_catalog(catalog: &CardCatalog) -> Self {
        Self::new(Arc::new(HandlerRegistry::from_catalog(catalog)))
    }

    #[must_use]
    pub fn effects(&self) -> &EffectEngine {
        &self.effects
    }

    /// Who the game is waiting on, if anyone.
    #[must_use]
    pub fn next_actor(&self, state: &GameState) -> Option<PlayerId> {
        if state.is_over() {
            return None;
        }
        if let Some(pending) = state.pending_actions.front() {
            return Some(pending.player);
        }
        match state.phase {
            Phase::Mulligan => PlayerId::all().find(|&p| !state.players[p].mulliganed),
            Phase::Action => Some(state.active_player),
            _ => None,
        }
    }

    fn mulligan(state: &mut GameState, player: PlayerId, keep: bool) -> Result<(), ActionError> {
        if state.phase != Phase::Mulligan {
            return Err(ActionError::WrongPhase(state.phase));
        }
        if state.players[player].mulliganed {
            return Err(ActionError::AlreadyMulliganed(player));
        }

        if keep {
            state.push_log(Some(player), "keeps their hand");
        } else {
            let seat = &mut state.players[player];
            let size = seat.hand.len() as u32;
            let mut deck = std::mem::take(&mut seat.hand);
            deck.append(std::mem::take(&mut seat.deck));
            seat.deck = deck;
            state.shuffle_deck(player);
            state.draw(player, size);
            state.push_log(Some(player), "redraws their hand");
        }
        state.players[player].mulliganed = true;

        if PlayerId::all().all(|p| state.players[p].mulliganed) {
            state.phase = Phase::Start;
        }
        Ok(())
    }

    /// Run automatic phases until a player has to act.
    fn settle(&self, state: &mut GameState) {
        loop {
            if state.has_pending() {
                return;
            }
            if let Some(player) = state.awaiting_turn_end.take() {
                action::end_action(state, player);
            }
            match state.phase {
                Phase::Start => start::run(state),
                Phase::Mission => {
                    if mission::run(&self.effects, state) {
                        return;
                    }
                    state.phase = Phase::End;
                }
                Phase::End => end::run(state),
                Phase::Mulligan | Phase::Action | Phase::GameOver => return,
            }
        }
    }

    fn selection_actions(state: &GameState, player: PlayerId) -> Vec<Action> {
        let Some(pending) = state.pending_actions.front().filter(|a| a.player == player) else {
            return Vec::new();
        };
        let Some(effect) = state.pending_effects.iter().find(|e| e.id == pending.id) else {
            return Vec::new();
        };

        let mut actions: Vec<Action> = effect
            .candidates
            .iter()
            .map(|&target| Action::SelectTarget {
                pending: pending.id,
                target,
            })
            .collect();
        if effect.optional {
            actions.push(Action::DeclineOptionalEffect { pending: pending.id });
        }
        actions
    }

    fn board_actions(state: &GameState, player: PlayerId) -> Vec<Action> {
        let mut actions = Vec::new();
        let missions = state.missions.len();
        let own: Vec<_> = state
            .characters()
            .filter(|c| c.controller == player)
            .map(|c| (c.id, c.hidden))
            .collect();

        for hand_index in 0..state.players[player].hand.len() {
            for mission in 0..missions {
                if validation::can_play_face_up(state, player, hand_index, mission).is_ok() {
                    actions.push(Action::PlayFaceUp { hand_index, mission });
                }
                if validation::can_play_hidden(state, player, hand_index, mission).is_ok() {
                    actions.push(Action::PlayHidden { hand_index, mission });
                }
            }
            for &(character, hidden) in &own {
                if !hidden && validation::can_upgrade(state, player, hand_index, character).is_ok() {
                    actions.push(Action::Upgrade {
                        hand_index,
                        character,
                    });
                }
            }
        }

        for &(character, hidden) in &own {
            if hidden && validation::can_reveal(state, player, character).is_ok() {
                actions.push(Action::Reveal { character });
            }
        }

        actions.push(Action::Pass);
        actions
    }
}

impl RulesEngine for GameEngine {
    fn create_game(&self, config: &GameConfig) -> GameState {
        let rules = config.rules.clone();
        let mut state = GameState::new(rules.clone(), config.seed);

        state.edge_holder = if state.rng.gen_bool(0.5) {
            PlayerId::ONE
        } else {
            PlayerId::TWO
        };
        state.active_player = state.edge_holder;

        let mut missions = Vec::new();
        for player in PlayerId::all() {
            let deck = &config.decks[player];
            let mut pool = deck.missions.clone();
            state.rng.shuffle(&mut pool);
            missions.extend(pool.into_iter().take(rules.missions_per_player));

            state.players[player].deck = deck.characters.iter().cloned().collect();
            state.shuffle_deck(player);
            state.draw(player, rules.starting_hand);
        }
        state.rng.shuffle(&mut missions);
        state.mission_deck = missions.into_iter().collect();

        state.push_log(None, format!("game created, {} holds the Edge", state.edge_holder));
        info!(seed = config.seed, edge = %state.edge_holder, "game created");
        state
    }

    fn try_apply(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<GameState, ActionError> {
        if state.is_over() {
            return Err(ActionError::GameOver);
        }
        let mut next = state.clone();

        match *action {
            Action::SelectTarget { pending, target } => {
                self.effects
                    .resolve_selection(&mut next, player, pending, Some(target))?;
            }
            Action::DeclineOptionalEffect { pending } => {
                self.effects.resolve_selection(&mut next, player, pending, None)?;
            }
            _ if next.has_pending() => return Err(ActionError::AwaitingSelection),
            Action::Mulligan { keep } => Self::mulligan(&mut next, player, keep)?,
            Action::Pass => action::pass(&mut next, player)?,
            Action::PlayFaceUp { hand_index, mission } => {
                action::play_face_up(&self.effects, &mut next, player, hand_index, mission)?;
                next.awaiting_turn_end = Some(player);
            }
            Action::PlayHidden { hand_index, mission } => {
                action::play_hidden(&mut next, player, hand_index, mission)?;
                next.awaiting_turn_end = Some(player);
            }
            Action::Reveal { character } => {
                action::reveal(&self.effects, &mut next, player, character)?;
                next.awaiting_turn_end = Some(player);
            }
            Action::Upgrade {
                hand_index,
                character,
            } => {
                action::upgrade(&self.effects, &mut next, player, hand_index, character)?;
                next.awaiting_turn_end = Some(player);
            }
        }

        next.record(player, action.clone());
        self.settle(&mut next);
        Ok(next)
    }

    fn valid_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        if state.is_over() {
            return Vec::new();
        }
        if state.has_pending() {
            return Self::selection_actions(state, player);
        }
        match state.phase {
            Phase::Mulligan if !state.players[player].mulliganed => vec![
                Action::Mulligan { keep: true },
                Action::Mulligan { keep: false },
            ],
            Phase::Action if validation::check_turn(state, player).is_ok() => {
                Self::board_actions(state, player)
            }
            _ => Vec::new(),
        }
    }

    fn result(&self, state: &GameState) -> Option<GameResult> {
        if !state.is_over() {
            return None;
        }
        let points = state.players.map(|_, p| p.mission_points);
        let winner = match points[PlayerId::ONE].cmp(&points[PlayerId::TWO]) {
            std::cmp::Ordering::Greater => PlayerId::ONE,
            std::cmp::Ordering::Less => PlayerId::TWO,
            std::cmp::Ordering::Equal => state.edge_holder,
        };
        Some(GameResult { winner, points })
    }
}
