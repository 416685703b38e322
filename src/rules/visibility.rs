//! Per-player views of the game.
//!
//! Two projections of the authoritative state:
//! - [`visible_state`]: a presentation view for one player. The opponent's
//!   hand collapses to a count and their face-down characters to
//!   existence-only records.
//! - [`sanitize_for`]: a full `GameState` with the same information
//!   removed, so the AI can keep driving the engine on it without reading
//!   anything its player could not know.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CharacterInPlay};
use crate::core::{
    GameState, InstanceId, LogEntry, MissionRank, Phase, PlayerId, PlayerMap,
};
use crate::effects::{continuous, PendingAction};

/// The viewing player's own seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnView {
    pub hand: Vec<Arc<Card>>,
    pub deck_size: usize,
    pub discard: Vec<Arc<Card>>,
    pub chakra: u32,
    pub mission_points: u32,
    pub passed: bool,
    pub mulliganed: bool,
}

/// The opponent's seat as the viewer sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentView {
    pub hand_size: usize,
    pub deck_size: usize,
    pub discard: Vec<Arc<Card>>,
    pub chakra: u32,
    pub mission_points: u32,
    pub passed: bool,
    pub characters_in_play: u32,
}

/// A character as the viewer sees it. `card` is `None` for an opponent's
/// face-down character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleCharacter {
    pub id: InstanceId,
    pub hidden: bool,
    pub card: Option<Arc<Card>>,
    pub power: u32,
    pub power_tokens: u32,
    pub controller: PlayerId,
    pub owner: PlayerId,
    pub stack_len: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleMission {
    pub card: Arc<Card>,
    pub rank: MissionRank,
    pub base_points: u32,
    pub rank_bonus: u32,
    pub characters: PlayerMap<Vec<VisibleCharacter>>,
    /// Face-up power per side.
    pub power: PlayerMap<u32>,
    pub won_by: Option<PlayerId>,
}

/// Everything one player may see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleGameState {
    pub viewer: PlayerId,
    pub turn: u8,
    pub phase: Phase,
    pub active_player: PlayerId,
    pub edge_holder: PlayerId,
    pub you: OwnView,
    pub opponent: OpponentView,
    pub missions: Vec<VisibleMission>,
    pub mission_deck_size: usize,
    /// Selections in progress. Revealed cards are only listed for the
    /// player deciding.
    pub pending: Vec<PendingAction>,
    pub log: Vec<LogEntry>,
}

fn view_character(state: &GameState, character: &CharacterInPlay, viewer: PlayerId) -> VisibleCharacter {
    let known = character.is_visible() || character.controller == viewer;
    VisibleCharacter {
        id: character.id,
        hidden: character.hidden,
        card: known.then(|| character.card().clone()),
        power: continuous::effective_power(state, character),
        power_tokens: character.power_tokens,
        controller: character.controller,
        owner: character.owner,
        stack_len: character.stack_len(),
    }
}

fn hide_listed_cards(pending: &mut PendingAction) {
    pending.cards = pending.cards.iter().map(|_| Card::concealed()).collect();
}

/// Project the state down to what `viewer` may see.
#[must_use]
pub fn visible_state(state: &GameState, viewer: PlayerId) -> VisibleGameState {
    let own = &state.players[viewer];
    let other = &state.players[viewer.opponent()];

    let missions = state
        .missions
        .iter()
        .enumerate()
        .map(|(index, mission)| VisibleMission {
            card: mission.card.clone(),
            rank: mission.rank,
            base_points: mission.base_points,
            rank_bonus: mission.rank_bonus,
            characters: mission.characters.map(|_, side| {
                side.iter().map(|c| view_character(state, c, viewer)).collect()
            }),
            power: PlayerMap::new(|p| continuous::mission_power(state, index, p)),
            won_by: mission.won_by,
        })
        .collect();

    let pending = state
        .pending_actions
        .iter()
        .cloned()
        .map(|mut p| {
            if p.player != viewer {
                hide_listed_cards(&mut p);
            }
            p
        })
        .collect();

    VisibleGameState {
        viewer,
        turn: state.turn,
        phase: state.phase,
        active_player: state.active_player,
        edge_holder: state.edge_holder,
        you: OwnView {
            hand: own.hand.iter().cloned().collect(),
            deck_size: own.deck_size(),
            discard: own.discard.iter().cloned().collect(),
            chakra: own.chakra,
            mission_points: own.mission_points,
            passed: own.passed,
            mulliganed: own.mulliganed,
        },
        opponent: OpponentView {
            hand_size: other.hand_size(),
            deck_size: other.deck_size(),
            discard: other.discard.iter().cloned().collect(),
            chakra: other.chakra,
            mission_points: other.mission_points,
            passed: other.passed,
            characters_in_play: other.characters_in_play,
        },
        missions,
        mission_deck_size: state.mission_deck.len(),
        pending,
        log: state.log.iter().cloned().collect(),
    }
}

/// A copy of the state holding only what `viewer` knows.
///
/// The opponent's hand and deck are emptied (their sizes move to
/// `concealed_hand`/`concealed_deck`), their face-down characters carry
/// placeholder cards, and the viewer's deck and the mission deck are
/// reshuffled so their order is not leaked. The view's RNG is a fork of the
/// game's, which carries nothing the game's seed or future draws can be
/// recovered from.
#[must_use]
pub fn sanitize_for(state: &GameState, viewer: PlayerId) -> GameState {
    let mut view = state.clone();
    let opponent = viewer.opponent();

    let seat = &mut view.players[opponent];
    seat.concealed_hand += seat.hand.len();
    seat.concealed_deck += seat.deck.len();
    seat.hand.clear();
    seat.deck.clear();

    for mission in view.missions.iter_mut() {
        for character in mission.characters[opponent].iter_mut() {
            if character.hidden {
                character.conceal();
            }
        }
    }

    for pending in view.pending_actions.iter_mut() {
        if pending.player != viewer {
            hide_listed_cards(pending);
        }
    }

    view.rng = view.rng.fork();
    view.shuffle_deck(viewer);
    let missions = view.mission_deck.clone();
    view.mission_deck = view.rng.shuffled(&missions);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::core::{ActiveMission, RulesConfig};

    fn board() -> (GameState, InstanceId, InstanceId) {
        let mut state = GameState::new(RulesConfig::default(), 4);
        let mission = Card::mission(CardId::new(200), "Escort", 3).shared();
        state.missions.push_back(ActiveMission::new(mission, MissionRank::D, 1));
        for player in PlayerId::all() {
            state.players[player]
                .hand
                .push_back(Card::character(CardId::new(1), "Secret", 2, 2).shared());
            state.players[player]
                .deck
                .push_back(Card::character(CardId::new(2), "Deck", 1, 1).shared());
        }

        let hidden = state.alloc_instance();
        let card = Card::character(CardId::new(3), "Lurker", 4, 4).shared();
        state.place_character(CharacterInPlay::new(hidden, card, PlayerId::TWO, 0, true));
        let shown = state.alloc_instance();
        let card = Card::character(CardId::new(4), "Guard", 2, 3).shared();
        state.place_character(CharacterInPlay::new(shown, card, PlayerId::TWO, 0, false));
        (state, hidden, shown)
    }

    #[test]
    fn test_visible_state_hides_opponent_hand_and_hidden_cards() {
        let (state, hidden, shown) = board();
        let view = visible_state(&state, PlayerId::ONE);

        assert_eq!(view.you.hand.len(), 1);
        assert_eq!(view.opponent.hand_size, 1);
        let side = &view.missions[0].characters[PlayerId::TWO];
        let lurker = side.iter().find(|c| c.id == hidden).unwrap();
        assert!(lurker.card.is_none());
        assert_eq!(lurker.power, 0);
        let guard = side.iter().find(|c| c.id == shown).unwrap();
        assert_eq!(guard.card.as_ref().map(|c| c.name.as_str()), Some("Guard"));
        assert_eq!(view.missions[0].power[PlayerId::TWO], 3);
    }

    #[test]
    fn test_owner_sees_own_hidden_card() {
        let (state, hidden, _) = board();
        let view = visible_state(&state, PlayerId::TWO);
        let side = &view.missions[0].characters[PlayerId::TWO];
        assert!(side.iter().find(|c| c.id == hidden).unwrap().card.is_some());
    }

    #[test]
    fn test_sanitize_for() {
        let (state, hidden, shown) = board();
        let view = sanitize_for(&state, PlayerId::ONE);

        let opponent = &view.players[PlayerId::TWO];
        assert!(opponent.hand.is_empty());
        assert_eq!(opponent.hand_size(), 1);
        assert_eq!(opponent.deck_size(), 1);
        assert!(view.character(hidden).unwrap().card().is_concealed());
        assert_eq!(view.character(shown).unwrap().name(), "Guard");
        assert_eq!(view.players[PlayerId::ONE].hand.len(), 1);

        // The authoritative state is untouched.
        assert_eq!(state.players[PlayerId::TWO].hand.len(), 1);
        assert_eq!(state.character(hidden).unwrap().name(), "Lurker");
    }
}
