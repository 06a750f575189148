//! Minimax search over Tic-Tac-Toe boards
//!
//! The free functions run the plain unpruned search. Use a [`Solver`] to pick
//! a different [`SearchStrategy`]; all strategies choose the same move.

pub mod cache;
pub mod config;
pub mod minimax;

pub use cache::ValueCache;
pub use config::{SearchStrategy, SolverConfig};
pub use minimax::{SearchReport, SearchStats, Solver, max_value, min_value};

use crate::tictactoe::{Action, Board};

/// Optimal action for the player to move, `None` on a terminal board.
///
/// Among equally good actions the first in row-major order is returned.
pub fn best_move(board: &Board) -> Option<Action> {
    Solver::default().best_move(board)
}

/// Minimax value of every legal action, in row-major order
pub fn evaluate_actions(board: &Board) -> Vec<(Action, i32)> {
    Solver::default().evaluate_actions(board)
}

/// Every action achieving the optimal value, in row-major order
pub fn optimal_actions(board: &Board) -> Vec<Action> {
    Solver::default().optimal_actions(board)
}
