//! Transposition cache for exact minimax values

use std::collections::HashMap;

use crate::tictactoe::Board;

/// Exact minimax values keyed by canonical board and the side being evaluated.
///
/// Only exact values go in here; pruned searches never write to it.
#[derive(Debug, Default)]
pub struct ValueCache {
    values: HashMap<(String, bool), i32>,
    hits: u64,
}

impl ValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, board: &Board, maximizing: bool) -> Option<i32> {
        let value = self.values.get(&(board.canonical_key(), maximizing)).copied();
        if value.is_some() {
            self.hits += 1;
        }
        value
    }

    pub fn insert(&mut self, board: &Board, maximizing: bool, value: i32) {
        self.values.insert((board.canonical_key(), maximizing), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }
}
