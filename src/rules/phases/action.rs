//! Action phase: the four board actions and pass.
//!
//! Each board action validates through `rules::validation`, pays, changes
//! the board and then fires the card's triggers. The return value says
//! whether effect resolution suspended on a selection.

use tracing::{debug, info};

use crate::cards::CharacterInPlay;
use crate::core::{GameState, InstanceId, Phase, PlayerId};
use crate::effects::{EffectContext, EffectEngine};
use crate::error::ActionError;
use crate::rules::validation;
use crate::triggers::EffectTrigger;

/// Play a hand card face-up and fire its MAIN effects.
pub(crate) fn play_face_up(
    effects: &EffectEngine,
    state: &mut GameState,
    player: PlayerId,
    hand_index: usize,
    mission: usize,
) -> Result<bool, ActionError> {
    let cost = validation::can_play_face_up(state, player, hand_index, mission)?;
    let seat = &mut state.players[player];
    let card = seat.hand.remove(hand_index);
    seat.chakra -= cost;

    let id = state.alloc_instance();
    state.place_character(CharacterInPlay::new(id, card.clone(), player, mission, false));
    state.push_log(
        Some(player),
        format!("plays {} on mission {} for {} chakra", card.name, mission, cost),
    );
    debug!(%player, card = %card.id, mission, cost, "played face-up");

    let source = EffectContext::character(card, id, mission, player, EffectTrigger::Main);
    Ok(effects.fire(state, source, EffectTrigger::ON_PLAY))
}

/// Play a hand card face-down. Hidden characters have no effects.
pub(crate) fn play_hidden(
    state: &mut GameState,
    player: PlayerId,
    hand_index: usize,
    mission: usize,
) -> Result<bool, ActionError> {
    let cost = validation::can_play_hidden(state, player, hand_index, mission)?;
    let seat = &mut state.players[player];
    let card = seat.hand.remove(hand_index);
    seat.chakra -= cost;

    let id = state.alloc_instance();
    state.place_character(CharacterInPlay::new(id, card, player, mission, true));
    state.push_log(Some(player), format!("plays a hidden character on mission {}", mission));
    Ok(false)
}

/// Turn a hidden character face-up and fire MAIN then AMBUSH.
pub(crate) fn reveal(
    effects: &EffectEngine,
    state: &mut GameState,
    player: PlayerId,
    id: InstanceId,
) -> Result<bool, ActionError> {
    let cost = validation::can_reveal(state, player, id)?;
    state.players[player].chakra -= cost;
    state.update_character(id, |c| c.hidden = false);

    let character = state
        .character(id)
        .cloned()
        .ok_or(ActionError::UnknownCharacter(id))?;
    state.push_log(
        Some(player),
        format!("reveals {} for {} chakra", character.name(), cost),
    );

    let source = EffectContext::character(
        character.card().clone(),
        id,
        character.mission,
        player,
        EffectTrigger::Main,
    );
    Ok(effects.fire(state, source, EffectTrigger::ON_REVEAL))
}

/// Put a higher-cost same-name card on a character and fire MAIN then
/// UPGRADE. Tokens and mission are kept.
pub(crate) fn upgrade(
    effects: &EffectEngine,
    state: &mut GameState,
    player: PlayerId,
    hand_index: usize,
    id: InstanceId,
) -> Result<bool, ActionError> {
    let cost = validation::can_upgrade(state, player, hand_index, id)?;
    let seat = &mut state.players[player];
    let card = seat.hand.remove(hand_index);
    seat.chakra -= cost;

    state.update_character(id, |c| c.push_upgrade(card.clone()));
    let mission = state
        .character(id)
        .map(|c| c.mission)
        .ok_or(ActionError::UnknownCharacter(id))?;
    state.push_log(
        Some(player),
        format!("upgrades to {} for {} chakra", card.name, cost),
    );

    let source = EffectContext::character(card, id, mission, player, EffectTrigger::Main).upgraded();
    Ok(effects.fire(state, source, EffectTrigger::ON_UPGRADE))
}

/// Pass for the rest of the turn. The first to pass takes the Edge. Once
/// both have passed the mission phase begins.
pub(crate) fn pass(state: &mut GameState, player: PlayerId) -> Result<(), ActionError> {
    validation::check_turn(state, player)?;
    state.players[player].passed = true;

    if state.first_passer.is_none() {
        state.first_passer = Some(player);
        if state.edge_holder != player {
            state.push_log(Some(player), "takes the Edge");
        }
        state.edge_holder = player;
    }
    state.push_log(Some(player), "passes");

    let opponent = player.opponent();
    if state.players[opponent].passed {
        state.phase = Phase::Mission;
        info!(turn = state.turn, "both players passed");
    } else {
        state.active_player = opponent;
    }
    Ok(())
}

/// Hand the turn to the opponent after a board action, unless they have
/// already passed.
pub(crate) fn end_action(state: &mut GameState, player: PlayerId) {
    let opponent = player.opponent();
    if state.phase == Phase::Action && !state.players[opponent].passed {
        state.active_player = opponent;
    }
}
