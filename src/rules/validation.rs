//! Legality predicates.
//!
//! Each `can_*` function answers whether an action may happen right now and,
//! if so, what it costs. They never mutate state; the action phase calls
//! them before applying anything, and `valid_actions` calls them to
//! enumerate choices.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::cards::{Card, CardId, CharacterInPlay};
use crate::core::{DeckList, GameState, InstanceId, Phase, PlayerId, RulesConfig};
use crate::effects::continuous;
use crate::error::{ActionError, DeckError};

/// Whether `player` already has a face-up character named `name` on
/// `mission`, ignoring `except`.
#[must_use]
pub fn name_conflict(
    state: &GameState,
    player: PlayerId,
    mission: usize,
    name: &str,
    except: Option<InstanceId>,
) -> bool {
    state.missions.get(mission).is_some_and(|m| {
        m.visible(player)
            .any(|c| Some(c.id) != except && c.card().same_name_as(name))
    })
}

/// Whether `player` may take a board action or pass now.
pub fn check_turn(state: &GameState, player: PlayerId) -> Result<(), ActionError> {
    if state.is_over() {
        return Err(ActionError::GameOver);
    }
    if state.phase != Phase::Action {
        return Err(ActionError::WrongPhase(state.phase));
    }
    if state.has_pending() {
        return Err(ActionError::AwaitingSelection);
    }
    if state.players[player].passed {
        return Err(ActionError::AlreadyPassed(player));
    }
    if state.active_player != player {
        return Err(ActionError::NotYourTurn(player));
    }
    Ok(())
}

fn hand_card(state: &GameState, player: PlayerId, hand_index: usize) -> Result<&Arc<Card>, ActionError> {
    let card = state.players[player]
        .hand
        .get(hand_index)
        .ok_or(ActionError::BadHandIndex(hand_index))?;
    if !card.is_character() {
        return Err(ActionError::NotACharacter(card.id));
    }
    Ok(card)
}

fn check_mission(state: &GameState, mission: usize) -> Result<(), ActionError> {
    if mission < state.missions.len() {
        Ok(())
    } else {
        Err(ActionError::BadMission(mission))
    }
}

fn afford(state: &GameState, player: PlayerId, needed: u32) -> Result<u32, ActionError> {
    let available = state.players[player].chakra;
    if needed > available {
        return Err(ActionError::InsufficientChakra { needed, available });
    }
    Ok(needed)
}

fn own_character(
    state: &GameState,
    player: PlayerId,
    id: InstanceId,
) -> Result<&CharacterInPlay, ActionError> {
    let character = state.character(id).ok_or(ActionError::UnknownCharacter(id))?;
    if character.controller != player {
        return Err(ActionError::NotYourCharacter(id, player));
    }
    Ok(character)
}

/// Cost of playing a hand card face-up on a mission, if legal.
pub fn can_play_face_up(
    state: &GameState,
    player: PlayerId,
    hand_index: usize,
    mission: usize,
) -> Result<u32, ActionError> {
    check_turn(state, player)?;
    let card = hand_card(state, player, hand_index)?;
    check_mission(state, mission)?;

    if name_conflict(state, player, mission, &card.name, None) {
        return Err(ActionError::NameConflict(card.name.clone()));
    }
    if continuous::play_restricted(state, player, card, mission) {
        return Err(ActionError::Restricted(format!(
            "{} can only be played where you are winning",
            card.name
        )));
    }
    afford(state, player, continuous::play_cost(state, player, card, mission))
}

/// Cost of playing a hand card face-down, if legal. Hidden characters skip
/// the name check.
pub fn can_play_hidden(
    state: &GameState,
    player: PlayerId,
    hand_index: usize,
    mission: usize,
) -> Result<u32, ActionError> {
    check_turn(state, player)?;
    hand_card(state, player, hand_index)?;
    check_mission(state, mission)?;
    afford(state, player, state.rules.hidden_cost)
}

/// Cost of revealing one of `player`'s hidden characters, if legal.
pub fn can_reveal(state: &GameState, player: PlayerId, id: InstanceId) -> Result<u32, ActionError> {
    check_turn(state, player)?;
    let character = own_character(state, player, id)?;
    if character.is_visible() {
        return Err(ActionError::AlreadyVisible(id));
    }
    if character.card().is_concealed() {
        return Err(ActionError::Restricted("card data is unavailable".into()));
    }
    if name_conflict(state, player, character.mission, character.name(), Some(id)) {
        return Err(ActionError::NameConflict(character.name().to_string()));
    }
    afford(state, player, continuous::reveal_cost(state, character))
}

/// Cost of upgrading a face-up character with a hand card, if legal.
///
/// The new card must share the name and cost strictly more than the current
/// top card; the price is exactly the difference.
pub fn can_upgrade(
    state: &GameState,
    player: PlayerId,
    hand_index: usize,
    id: InstanceId,
) -> Result<u32, ActionError> {
    check_turn(state, player)?;
    let card = hand_card(state, player, hand_index)?;
    let character = own_character(state, player, id)?;
    if !character.is_visible() {
        return Err(ActionError::NotVisible(id));
    }

    let current = character.card();
    if !current.same_name_as(&card.name) || card.chakra <= current.chakra {
        return Err(ActionError::NotAnUpgrade(card.name.clone()));
    }
    afford(state, player, card.chakra - current.chakra)
}

/// Check a deck against the construction rules.
pub fn validate_deck(deck: &DeckList, rules: &RulesConfig) -> Result<(), DeckError> {
    if let Some(card) = deck.characters.iter().find(|c| !c.is_character()) {
        return Err(DeckError::NotACharacter(card.name.clone()));
    }
    if let Some(card) = deck.missions.iter().find(|c| !c.is_mission()) {
        return Err(DeckError::NotAMission(card.name.clone()));
    }
    if deck.characters.len() < rules.min_deck_size {
        return Err(DeckError::TooFewCards {
            found: deck.characters.len(),
            min: rules.min_deck_size,
        });
    }
    if deck.missions.len() != rules.mission_pool_size {
        return Err(DeckError::MissionCount {
            expected: rules.mission_pool_size,
            found: deck.missions.len(),
        });
    }

    let mut counts: FxHashMap<CardId, (usize, &str)> = FxHashMap::default();
    for card in &deck.characters {
        counts.entry(card.id).or_insert((0, card.name.as_str())).0 += 1;
    }
    let mut over: Vec<_> = counts
        .into_iter()
        .filter(|(_, (count, _))| *count > rules.max_copies)
        .collect();
    over.sort_by_key(|(id, _)| *id);
    if let Some((_, (count, name))) = over.into_iter().next() {
        return Err(DeckError::TooManyCopies {
            name: name.to_string(),
            count,
            max: rules.max_copies,
        });
    }
    Ok(())
}
