//! Start phase.

use tracing::info;

use crate::core::{ActiveMission, GameState, MissionRank, Phase, PlayerId};
use crate::effects::continuous;

/// Reveal a mission, grant income, draw, and open the action phase.
pub(crate) fn run(state: &mut GameState) {
    let rank = MissionRank::for_turn(state.turn).unwrap_or(MissionRank::A);
    match state.mission_deck.pop_front() {
        Some(card) => {
            let bonus = state.rules.bonus_for(rank);
            state.push_log(None, format!("mission {} revealed as rank {}", card.name, rank));
            state.missions.push_back(ActiveMission::new(card, rank, bonus));
        }
        None => state.push_log(None, "no mission left to reveal"),
    }

    for player in PlayerId::all() {
        let income = state.rules.base_chakra
            + state.players[player].characters_in_play
            + continuous::chakra_bonus(state, player);
        state.players[player].chakra += income;
        let count = state.rules.cards_per_turn;
        let drawn = state.draw(player, count);
        state.push_log(
            Some(player),
            format!("gains {} chakra and draws {} card(s)", income, drawn),
        );
        state.players[player].passed = false;
    }

    state.first_passer = None;
    state.active_player = state.edge_holder;
    state.phase = Phase::Action;
    info!(turn = state.turn, edge = %state.edge_holder, "turn started");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, CharacterInPlay};
    use crate::core::RulesConfig;

    #[test]
    fn test_start_reveals_ranked_mission_and_pays_income() {
        let mut state = GameState::new(RulesConfig::default(), 5);
        state.phase = Phase::Start;
        state.turn = 2;
        state.mission_deck.push_back(Card::mission(CardId::new(201), "Escort", 3).shared());
        state.missions.push_back(ActiveMission::new(
            Card::mission(CardId::new(200), "First", 1).shared(),
            MissionRank::D,
            1,
        ));
        for i in 0..3 {
            state.players[PlayerId::ONE]
                .deck
                .push_back(Card::character(CardId::new(i), "Filler", 1, 1).shared());
        }
        let id = state.alloc_instance();
        let card = Card::character(CardId::new(9), "Iruka", 1, 1).shared();
        state.place_character(CharacterInPlay::new(id, card, PlayerId::ONE, 0, true));
        state.edge_holder = PlayerId::TWO;

        run(&mut state);

        assert_eq!(state.phase, Phase::Action);
        assert_eq!(state.missions[1].rank, MissionRank::C);
        assert_eq!(state.missions[1].rank_bonus, 2);
        assert_eq!(state.players[PlayerId::ONE].chakra, 6);
        assert_eq!(state.players[PlayerId::TWO].chakra, 5);
        assert_eq!(state.players[PlayerId::ONE].hand.len(), 2);
        assert!(state.players[PlayerId::TWO].hand.is_empty());
        assert_eq!(state.active_player, PlayerId::TWO);
    }
}
