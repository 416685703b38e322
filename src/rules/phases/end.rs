//! End phase.

use tracing::info;

use crate::core::{GameState, InstanceId, Phase, PlayerId};
use crate::effects::continuous;

/// Clear chakra and tokens, return characters to hand, then advance to the
/// next turn or end the game.
pub(crate) fn run(state: &mut GameState) {
    for player in PlayerId::all() {
        state.players[player].chakra = 0;
    }

    let stripped: Vec<InstanceId> = state
        .characters()
        .filter(|c| c.power_tokens > 0 && !continuous::retains_tokens(c))
        .map(|c| c.id)
        .collect();
    for id in stripped {
        state.update_character(id, |c| c.power_tokens = 0);
    }

    let returning: Vec<InstanceId> = state
        .characters()
        .filter(|c| continuous::returns_at_end(state, c))
        .map(|c| c.id)
        .collect();
    for id in returning {
        return_to_hand(state, id);
    }

    if state.turn >= state.rules.turns {
        state.phase = Phase::GameOver;
        let points = state.players.map(|_, p| p.mission_points);
        state.push_log(
            None,
            format!("game over: {} to {}", points[PlayerId::ONE], points[PlayerId::TWO]),
        );
        info!(one = points[PlayerId::ONE], two = points[PlayerId::TWO], "game over");
    } else {
        state.turn += 1;
        state.phase = Phase::Start;
    }
}

/// Top card to the owner's hand, the rest of the stack to their discard.
fn return_to_hand(state: &mut GameState, id: InstanceId) {
    let Some(character) = state.remove_character(id) else {
        return;
    };
    let owner = character.owner;
    let mut cards = character.into_cards();
    let Some(top) = cards.pop() else {
        return;
    };
    state.push_log(Some(owner), format!("{} returns to hand", top.name));

    let seat = &mut state.players[owner];
    seat.discard.extend(cards);
    seat.hand.push_back(top);
}
