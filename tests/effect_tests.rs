//! Effect integration tests: selections, multi-stage effects, replacement
//! rules and continuous modifiers, driven through the engine.

use std::sync::Arc;

use mythos_engine::cards::{starter, CardCatalog, CardId, CharacterInPlay};
use mythos_engine::core::{
    Action, ActiveMission, GameState, InstanceId, MissionRank, Phase, PlayerId, RulesConfig, Target,
};
use mythos_engine::effects::{continuous, defeat, DefeatOutcome, EffectContext, EffectHandler, EffectOutcome};
use mythos_engine::error::{ActionError, EffectError};
use mythos_engine::rules::{GameEngine, RulesEngine};
use mythos_engine::triggers::{EffectTrigger, HandlerRegistry};

// =============================================================================
// Helpers
// =============================================================================

fn table(missions: usize) -> (CardCatalog, GameEngine, GameState) {
    let catalog = starter::catalog();
    let engine = GameEngine::with_catalog(&catalog);
    let mut state = GameState::new(RulesConfig::default(), 29);
    let ranks = [MissionRank::D, MissionRank::C, MissionRank::B];
    for (index, rank) in ranks.iter().take(missions).enumerate() {
        let card = catalog.get(CardId::new(201 + index as u32)).unwrap().clone();
        let bonus = state.rules.bonus_for(*rank);
        state.missions.push_back(ActiveMission::new(card, *rank, bonus));
    }
    state.phase = Phase::Action;
    for player in PlayerId::all() {
        state.players[player].chakra = 10;
        state.players[player].mulliganed = true;
    }
    (catalog, engine, state)
}

fn give(state: &mut GameState, catalog: &CardCatalog, player: PlayerId, id: u32) {
    let card = catalog.get(CardId::new(id)).unwrap().clone();
    state.players[player].hand.push_back(card);
}

fn stock_deck(state: &mut GameState, catalog: &CardCatalog, player: PlayerId, ids: &[u32]) {
    for &id in ids {
        let card = catalog.get(CardId::new(id)).unwrap().clone();
        state.players[player].deck.push_back(card);
    }
}

fn put(
    state: &mut GameState,
    catalog: &CardCatalog,
    id: u32,
    player: PlayerId,
    mission: usize,
) -> InstanceId {
    let card = catalog.get(CardId::new(id)).unwrap().clone();
    let instance = state.alloc_instance();
    state.place_character(CharacterInPlay::new(instance, card, player, mission, false));
    instance
}

fn play(engine: &GameEngine, state: &GameState, player: PlayerId, hand_index: usize, mission: usize) -> GameState {
    engine
        .try_apply(state, player, &Action::PlayFaceUp { hand_index, mission })
        .unwrap()
}

fn select(engine: &GameEngine, state: &GameState, player: PlayerId, target: Target) -> GameState {
    let pending = state.pending_actions.front().unwrap().id;
    engine
        .try_apply(state, player, &Action::SelectTarget { pending, target })
        .unwrap()
}

// =============================================================================
// Selections
// =============================================================================

#[test]
fn test_scout_takes_one_and_bottoms_the_rest() {
    let (catalog, engine, mut state) = table(1);
    give(&mut state, &catalog, PlayerId::ONE, 109);
    stock_deck(&mut state, &catalog, PlayerId::ONE, &[101, 103, 104, 106]);

    let state = play(&engine, &state, PlayerId::ONE, 0, 0);
    let pending = state.pending_actions.front().unwrap();
    assert_eq!(pending.cards.len(), 3);
    assert_eq!(pending.cards[1].id, CardId::new(103));

    let state = select(&engine, &state, PlayerId::ONE, Target::ListCard(1));
    let seat = &state.players[PlayerId::ONE];
    assert_eq!(seat.hand.len(), 1);
    assert_eq!(seat.hand[0].id, CardId::new(103));
    let order: Vec<u32> = seat.deck.iter().map(|c| c.id.0).collect();
    assert_eq!(order, vec![106, 101, 104]);
}

#[test]
fn test_opponent_chooses_their_own_discard() {
    let (catalog, engine, mut state) = table(1);
    give(&mut state, &catalog, PlayerId::ONE, 120);
    give(&mut state, &catalog, PlayerId::TWO, 101);
    give(&mut state, &catalog, PlayerId::TWO, 113);

    let state = play(&engine, &state, PlayerId::ONE, 0, 0);
    let pending = state.pending_actions.front().cloned().unwrap();
    assert_eq!(pending.player, PlayerId::TWO);
    assert_eq!(engine.next_actor(&state), Some(PlayerId::TWO));

    let wrong = engine.try_apply(
        &state,
        PlayerId::ONE,
        &Action::SelectTarget {
            pending: pending.id,
            target: Target::HandCard(0),
        },
    );
    assert_eq!(wrong.err(), Some(ActionError::NotYourSelection(PlayerId::ONE, pending.id)));

    let state = select(&engine, &state, PlayerId::TWO, Target::HandCard(0));
    let seat = &state.players[PlayerId::TWO];
    assert_eq!(seat.hand.len(), 1);
    assert_eq!(seat.discard[0].id, CardId::new(101));
    assert_eq!(state.active_player, PlayerId::TWO);
}

#[test]
fn test_optional_discard_to_draw() {
    let (catalog, engine, mut state) = table(1);
    give(&mut state, &catalog, PlayerId::ONE, 121);
    give(&mut state, &catalog, PlayerId::ONE, 113);
    stock_deck(&mut state, &catalog, PlayerId::ONE, &[101, 103]);

    let played = play(&engine, &state, PlayerId::ONE, 0, 0);
    let pending = played.pending_actions.front().cloned().unwrap();
    assert!(pending.optional);

    let declined = engine
        .try_apply(&played, PlayerId::ONE, &Action::DeclineOptionalEffect { pending: pending.id })
        .unwrap();
    assert_eq!(declined.players[PlayerId::ONE].hand.len(), 1);
    assert!(!declined.has_pending());

    let taken = select(&engine, &played, PlayerId::ONE, Target::HandCard(0));
    let seat = &taken.players[PlayerId::ONE];
    assert_eq!(seat.discard.len(), 1);
    assert_eq!(seat.hand.len(), 2);
    assert!(seat.deck.is_empty());
}

#[test]
fn test_mandatory_selection_cannot_be_declined() {
    let (catalog, engine, mut state) = table(1);
    give(&mut state, &catalog, PlayerId::ONE, 120);
    give(&mut state, &catalog, PlayerId::TWO, 101);

    let state = play(&engine, &state, PlayerId::ONE, 0, 0);
    let pending = state.pending_actions.front().unwrap().id;
    let declined = engine.try_apply(&state, PlayerId::TWO, &Action::DeclineOptionalEffect { pending });
    assert_eq!(declined.err(), Some(ActionError::NotOptional));

    let bogus = engine.try_apply(
        &state,
        PlayerId::TWO,
        &Action::SelectTarget {
            pending,
            target: Target::HandCard(5),
        },
    );
    assert_eq!(bogus.err(), Some(ActionError::InvalidTarget(Target::HandCard(5))));
}

#[test]
fn test_effect_without_candidates_completes() {
    let (catalog, engine, mut state) = table(1);
    // Orochimaru's discard with an empty opposing hand.
    give(&mut state, &catalog, PlayerId::ONE, 120);

    let state = play(&engine, &state, PlayerId::ONE, 0, 0);
    assert!(!state.has_pending());
    assert_eq!(state.active_player, PlayerId::TWO);
}

// =============================================================================
// Multi-stage and Control
// =============================================================================

#[test]
fn test_move_enemy_two_stages() {
    let (catalog, engine, mut state) = table(2);
    let akamaru = put(&mut state, &catalog, 108, PlayerId::TWO, 0);
    give(&mut state, &catalog, PlayerId::ONE, 114);

    let state = play(&engine, &state, PlayerId::ONE, 0, 0);
    let first = state.pending_actions.front().unwrap().id;
    let state = select(&engine, &state, PlayerId::ONE, Target::Character(akamaru));

    let second = state.pending_actions.front().unwrap();
    assert_ne!(second.id, first);
    assert_eq!(state.active_player, PlayerId::ONE);

    let state = select(&engine, &state, PlayerId::ONE, Target::Mission(1));
    let moved = state.character(akamaru).unwrap();
    assert_eq!(moved.mission, 1);
    assert_eq!(moved.controller, PlayerId::TWO);
    assert_eq!(state.active_player, PlayerId::TWO);
}

#[test]
fn test_steal_changes_controller_not_owner() {
    let (catalog, engine, mut state) = table(1);
    let akamaru = put(&mut state, &catalog, 108, PlayerId::TWO, 0);
    give(&mut state, &catalog, PlayerId::ONE, 115);

    let state = play(&engine, &state, PlayerId::ONE, 0, 0);
    let mut state = select(&engine, &state, PlayerId::ONE, Target::Character(akamaru));

    let stolen = state.character(akamaru).unwrap();
    assert_eq!(stolen.controller, PlayerId::ONE);
    assert_eq!(stolen.owner, PlayerId::TWO);
    assert_eq!(state.players[PlayerId::ONE].characters_in_play, 2);
    assert_eq!(state.players[PlayerId::TWO].characters_in_play, 0);

    // Leaving play sends it home.
    assert_eq!(defeat(&mut state, akamaru), Ok(DefeatOutcome::Defeated(akamaru)));
    assert_eq!(state.players[PlayerId::TWO].discard.len(), 1);
    assert!(state.players[PlayerId::ONE].discard.is_empty());
}

// =============================================================================
// Replacement Rules
// =============================================================================

#[test]
fn test_upgrade_defeat_hides_gaara_instead() {
    let (catalog, engine, mut state) = table(1);
    put(&mut state, &catalog, 104, PlayerId::ONE, 0);
    let gaara = put(&mut state, &catalog, 117, PlayerId::TWO, 0);
    give(&mut state, &catalog, PlayerId::ONE, 105);
    let sasuke = state.characters().find(|c| c.controller == PlayerId::ONE).unwrap().id;

    let state = engine
        .try_apply(&state, PlayerId::ONE, &Action::Upgrade { hand_index: 0, character: sasuke })
        .unwrap();
    let state = select(&engine, &state, PlayerId::ONE, Target::Character(gaara));

    let gaara = state.character(gaara).unwrap();
    assert!(gaara.hidden);
    assert!(state.players[PlayerId::TWO].discard.is_empty());
}

#[test]
fn test_haku_is_defeated_for_zabuza() {
    let (catalog, _, mut state) = table(1);
    let zabuza = put(&mut state, &catalog, 126, PlayerId::TWO, 0);
    let haku = put(&mut state, &catalog, 127, PlayerId::TWO, 0);

    assert_eq!(
        defeat(&mut state, zabuza),
        Ok(DefeatOutcome::Sacrificed { saved: zabuza, by: haku })
    );
    assert!(state.character(zabuza).is_some());
    assert!(state.character(haku).is_none());
}

#[test]
fn test_chakra_on_defeat_goes_to_controller() {
    let (catalog, _, mut state) = table(1);
    state.players[PlayerId::TWO].chakra = 0;
    let kabuto = put(&mut state, &catalog, 121, PlayerId::TWO, 0);

    defeat(&mut state, kabuto).unwrap();
    assert_eq!(state.players[PlayerId::TWO].chakra, 2);
}

// =============================================================================
// Continuous Effects
// =============================================================================

#[test]
fn test_power_modifiers() {
    let (catalog, _, mut state) = table(2);
    let naruto = put(&mut state, &catalog, 101, PlayerId::ONE, 0);
    put(&mut state, &catalog, 106, PlayerId::ONE, 0);
    let orochimaru = put(&mut state, &catalog, 120, PlayerId::TWO, 1);
    put(&mut state, &catalog, 127, PlayerId::TWO, 1);
    let shikamaru = put(&mut state, &catalog, 114, PlayerId::ONE, 1);

    let power = |state: &GameState, id| continuous::effective_power(state, state.character(id).unwrap());

    // Kakashi's aura.
    assert_eq!(power(&state, naruto), 3);
    // One other friendly character.
    assert_eq!(power(&state, orochimaru), 5);

    state.edge_holder = PlayerId::TWO;
    assert_eq!(power(&state, shikamaru), 2);
    state.edge_holder = PlayerId::ONE;
    assert_eq!(power(&state, shikamaru), 4);

    assert_eq!(continuous::mission_power(&state, 0, PlayerId::ONE), 7);
}

#[test]
fn test_cost_modifiers_stack_to_floor() {
    let (catalog, _, mut state) = table(1);
    let gamabunta = catalog.get(CardId::new(124)).unwrap().clone();
    assert_eq!(continuous::play_cost(&state, PlayerId::ONE, &gamabunta, 0), 6);

    put(&mut state, &catalog, 122, PlayerId::ONE, 0);
    assert_eq!(continuous::play_cost(&state, PlayerId::ONE, &gamabunta, 0), 3);
    // The discounts only apply on Jiraiya's side.
    assert_eq!(continuous::play_cost(&state, PlayerId::TWO, &gamabunta, 0), 6);
}

#[test]
fn test_only_where_winning() {
    let (catalog, engine, mut state) = table(1);
    give(&mut state, &catalog, PlayerId::ONE, 129);
    let play = Action::PlayFaceUp { hand_index: 0, mission: 0 };
    assert!(matches!(
        engine.try_apply(&state, PlayerId::ONE, &play),
        Err(ActionError::Restricted(_))
    ));

    put(&mut state, &catalog, 104, PlayerId::ONE, 0);
    assert!(engine.try_apply(&state, PlayerId::ONE, &play).is_ok());
}

// =============================================================================
// Fizzle
// =============================================================================

#[derive(Debug)]
struct Faulty;

impl EffectHandler for Faulty {
    fn begin(&self, state: &mut GameState, ctx: &EffectContext) -> Result<EffectOutcome, EffectError> {
        state.players[ctx.controller].chakra += 50;
        Err(EffectError::Inconsistent("faulty handler".into()))
    }
}

#[test]
fn test_failing_handler_fizzles_without_side_effects() {
    let catalog = starter::catalog();
    let mut registry = HandlerRegistry::from_catalog(&catalog);
    registry.register(
        CardId::new(103),
        EffectTrigger::Main,
        [Arc::new(Faulty) as Arc<dyn EffectHandler>],
    );
    let engine = GameEngine::new(Arc::new(registry));

    let (_, _, mut state) = table(1);
    give(&mut state, &catalog, PlayerId::ONE, 103);
    let state = engine
        .try_apply(&state, PlayerId::ONE, &Action::PlayFaceUp { hand_index: 0, mission: 0 })
        .unwrap();

    // Paid 2, the handler's 50 rolled back; the play itself stands.
    assert_eq!(state.players[PlayerId::ONE].chakra, 8);
    assert_eq!(state.players[PlayerId::ONE].characters_in_play, 1);
    assert!(state.log.iter().any(|e| e.message.contains("fizzled")));
    assert_eq!(state.active_player, PlayerId::TWO);
}
