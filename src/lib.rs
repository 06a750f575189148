//! Exact Tic-Tac-Toe solver
//!
//! This crate provides:
//! - Immutable board model and game rules with explicit errors
//! - Full-depth minimax search with deterministic row-major tie-breaking
//! - Optional alpha-beta, symmetry-keyed value cache and parallel root search
//! - A command-line front end for querying and verifying the engine

pub mod agents;
pub mod cli;
pub mod error;
pub mod search;
pub mod tictactoe;

pub use error::{Error, Result};
pub use search::{
    SearchStrategy, Solver, SolverConfig, best_move, evaluate_actions, max_value, min_value,
    optimal_actions,
};
pub use tictactoe::{
    Action, Board, Cell, GameOutcome, Player, apply_action, current_player, initial_state,
    is_terminal, legal_actions, utility, winner,
};
