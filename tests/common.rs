//! Common test utilities for the noughts test suite.

#![allow(dead_code)]

use noughts::{Action, Board};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Parse a board literal, panicking on malformed input.
pub fn board(s: &str) -> Board {
    s.parse()
        .unwrap_or_else(|e| panic!("bad board literal '{s}': {e}"))
}

/// Play uniformly random legal moves from the empty board, returning every
/// board visited including the final one.
///
/// # Arguments
///
/// * `rng` - Random number generator
pub fn random_playout(rng: &mut StdRng) -> Vec<Board> {
    let mut boards = vec![Board::new()];
    let mut current = Board::new();
    loop {
        let actions: Vec<Action> = current.legal_actions().into_iter().collect();
        if actions.is_empty() {
            return boards;
        }
        let action = actions[rng.random_range(0..actions.len())];
        current = current.apply_action(action).expect("legal action applies");
        boards.push(current);
    }
}

/// Boards from `games` seeded random playouts.
pub fn sampled_boards(seed: u64, games: usize) -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..games).flat_map(|_| random_playout(&mut rng)).collect()
}
