//! AI players driving full starter games.

use mythos_engine::ai::{AiConfig, AiPlayer, Difficulty};
use mythos_engine::cards::{starter, CardCatalog};
use mythos_engine::core::{Action, GameState, PlayerId, PlayerMap};
use mythos_engine::rules::{GameEngine, GameResult, RulesEngine};

const MAX_STEPS: usize = 600;

fn light_config(seed: u64) -> AiConfig {
    AiConfig::default()
        .with_seed(seed)
        .with_depth(2)
        .with_branch_limit(4)
        .with_simulations(3)
}

/// Play one game to the end, checking every decision against the legal set.
fn play(
    seed: u64,
    one: Difficulty,
    two: Difficulty,
    config: impl Fn(PlayerId) -> AiConfig,
) -> (GameState, GameResult, Vec<(PlayerId, Action)>) {
    let catalog: CardCatalog = starter::catalog();
    let engine = GameEngine::with_catalog(&catalog);
    let mut seats = PlayerMap::new(|p| {
        let difficulty = if p == PlayerId::ONE { one } else { two };
        AiPlayer::new(p, difficulty, &engine, &catalog, config(p))
    });

    let mut state = engine.create_game(&starter::starter_config(seed));
    let mut decisions = Vec::new();
    for _ in 0..MAX_STEPS {
        let Some(actor) = engine.next_actor(&state) else {
            break;
        };
        let valid = engine.valid_actions(&state, actor);
        let action = seats[actor].decide(&engine, &state).expect("a decision");
        assert!(valid.contains(&action), "{} chose {:?} outside {:?}", actor, action, valid);
        state = engine
            .try_apply(&state, actor, &action)
            .unwrap_or_else(|e| panic!("{} chose illegal {:?}: {}", actor, action, e));
        decisions.push((actor, action));
    }

    let result = engine.result(&state).expect("game finished");
    (state, result, decisions)
}

#[test]
fn test_each_difficulty_finishes_a_game() {
    for (i, difficulty) in Difficulty::ALL.into_iter().enumerate() {
        let (state, result, decisions) = play(100 + i as u64, difficulty, Difficulty::Easy, |p| {
            light_config(p.index() as u64)
        });
        assert!(state.is_over(), "{} did not finish", difficulty);
        assert!(decisions.len() > 4);
        assert_eq!(result.points[PlayerId::ONE], state.players[PlayerId::ONE].mission_points);
    }
}

#[test]
fn test_search_players_meet() {
    let (state, result, _) = play(7, Difficulty::Expert, Difficulty::Hard, |p| {
        light_config(p.index() as u64).with_parallel(false)
    });
    assert!(state.is_over());
    assert!(result.is_winner(result.winner));
    assert!(!result.is_winner(result.winner.opponent()));
}

#[test]
fn test_games_are_reproducible() {
    let config = |p: PlayerId| light_config(11 + p.index() as u64).with_parallel(false);
    let (first, _, one) = play(31, Difficulty::Hard, Difficulty::Easy, config);
    let (second, _, two) = play(31, Difficulty::Hard, Difficulty::Easy, config);
    assert_eq!(one, two);
    assert_eq!(first.history, second.history);
}

#[test]
fn test_parallel_expert_is_reproducible() {
    let config = |p: PlayerId| light_config(5 + p.index() as u64);
    let (_, _, one) = play(57, Difficulty::Expert, Difficulty::Medium, config);
    let (_, _, two) = play(57, Difficulty::Expert, Difficulty::Medium, config);
    assert_eq!(one, two);
}

#[test]
fn test_player_reports_its_difficulty() {
    let catalog = starter::catalog();
    let engine = GameEngine::with_catalog(&catalog);
    let ai = AiPlayer::new(PlayerId::TWO, Difficulty::Hard, &engine, &catalog, AiConfig::default());
    assert_eq!(ai.player(), PlayerId::TWO);
    assert_eq!(ai.difficulty(), Difficulty::Hard);
    assert!(format!("{:?}", ai).contains("Hard"));
}

#[test]
fn test_no_decision_when_waiting_on_the_opponent() {
    let catalog = starter::catalog();
    let engine = GameEngine::with_catalog(&catalog);
    let mut state = engine.create_game(&starter::starter_config(2));
    for player in PlayerId::all() {
        state = engine.apply_action(&state, player, &Action::Mulligan { keep: true });
    }
    let idle = state.active_player.opponent();
    let mut ai = AiPlayer::new(idle, Difficulty::Medium, &engine, &catalog, AiConfig::default());
    assert_eq!(ai.decide(&engine, &state), None);
}
