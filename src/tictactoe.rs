//! Tic-Tac-Toe state and rules
//!
//! The free functions mirror the methods on [`Board`] for callers that
//! prefer a functional surface.

use std::collections::BTreeSet;

pub mod board;
pub mod game;
pub mod game_tree;
pub mod lines;
pub mod symmetry;

pub use board::{Action, Board, Cell, GameOutcome, Player};
pub use game::{Game, Move};
pub use game_tree::{GameTreeStats, game_tree_stats, reachable_boards};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use symmetry::D4Transform;

/// The empty starting board
pub fn initial_state() -> Board {
    Board::new()
}

pub fn current_player(board: &Board) -> Player {
    board.current_player()
}

pub fn legal_actions(board: &Board) -> BTreeSet<Action> {
    board.legal_actions()
}

pub fn apply_action(board: &Board, action: Action) -> crate::Result<Board> {
    board.apply_action(action)
}

pub fn winner(board: &Board) -> Option<Player> {
    board.winner()
}

pub fn is_terminal(board: &Board) -> bool {
    board.is_terminal()
}

pub fn utility(board: &Board) -> crate::Result<i32> {
    board.utility()
}
