//! Tests for solver configuration files and the match driver used by the CLI

use std::fs;

use noughts::{
    SearchStrategy, SolverConfig,
    agents::{DefensiveAgent, OptimalAgent, RandomAgent, play_game},
    cli::{
        commands::play::{OpponentKind, run_match},
        config::{SolverArgs, load_solver_config},
    },
    tictactoe::{Board, GameOutcome, Player},
};
use tempfile::TempDir;

#[test]
fn config_file_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("solver.json");

    let config = SolverConfig::new(SearchStrategy::AlphaBeta).with_parallel_root(true);
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = load_solver_config(&path).expect("Failed to load config");
    assert_eq!(loaded, config);
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"alpha-beta\""));
}

#[test]
fn strategy_flag_overrides_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("solver.json");
    fs::write(&path, r#"{"strategy": "memoized"}"#).unwrap();

    let args = SolverArgs {
        config: Some(path.clone()),
        strategy: None,
        parallel: false,
    };
    assert_eq!(args.resolve().unwrap().strategy, SearchStrategy::Memoized);

    let args = SolverArgs {
        config: Some(path),
        strategy: Some(SearchStrategy::Plain),
        parallel: false,
    };
    assert_eq!(args.resolve().unwrap().strategy, SearchStrategy::Plain);
}

#[test]
fn malformed_config_is_a_serialization_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("solver.json");
    fs::write(&path, r#"{"strategy": "greedy"}"#).unwrap();

    let err = load_solver_config(&path).unwrap_err();
    assert!(matches!(err, noughts::Error::Serialization(_)));
}

#[test]
fn engine_never_loses_as_either_side() {
    let config = SolverConfig::new(SearchStrategy::Memoized);
    for (opponent, side) in [
        (OpponentKind::Random, Player::X),
        (OpponentKind::Random, Player::O),
        (OpponentKind::Defensive, Player::O),
    ] {
        let summary = run_match(config, opponent, 20, 2024, Some(side)).unwrap();
        assert_eq!(summary.losses, 0, "{opponent:?} as {side:?}");
    }
}

#[test]
fn optimal_beats_random_sometimes() {
    let mut engine = OptimalAgent::new(noughts::Solver::with_strategy(SearchStrategy::AlphaBeta));
    let mut wins = 0;
    for seed in 0..20 {
        let mut random = RandomAgent::with_seed(seed);
        let game = play_game(Board::new(), &mut engine, &mut random).unwrap();
        match game.outcome().unwrap() {
            GameOutcome::XWins => wins += 1,
            GameOutcome::Draw => {}
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    assert!(wins > 0);
}

#[test]
fn defensive_self_play_finishes() {
    let mut x = DefensiveAgent::with_seed(1);
    let mut o = DefensiveAgent::with_seed(2);
    let game = play_game(Board::new(), &mut x, &mut o).unwrap();
    assert!(game.outcome().unwrap().is_over());
    assert_eq!(
        game.state_sequence().unwrap().len(),
        game.moves.len() + 1
    );
}
