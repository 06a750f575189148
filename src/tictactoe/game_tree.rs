//! Enumeration of the boards reachable by legal play

use std::collections::{HashSet, VecDeque};

use super::board::Board;

/// Summary counts over the reachable state space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTreeStats {
    pub reachable: usize,
    pub terminal: usize,
    pub canonical: usize,
}

/// Every board reachable from the empty board, in breadth-first (ply) order.
///
/// Terminal boards are included but not expanded.
pub fn reachable_boards() -> Vec<Board> {
    let mut boards = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    let root = Board::new();
    visited.insert(root);
    queue.push_back(root);

    while let Some(board) = queue.pop_front() {
        boards.push(board);

        for action in board.legal_actions() {
            let Ok(next) = board.apply_action(action) else {
                continue;
            };
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    boards
}

/// Count reachable, terminal and symmetry-distinct boards
pub fn game_tree_stats() -> GameTreeStats {
    let boards = reachable_boards();
    let canonical: HashSet<String> = boards.iter().map(Board::canonical_key).collect();

    GameTreeStats {
        reachable: boards.len(),
        terminal: boards.iter().filter(|b| b.is_terminal()).count(),
        canonical: canonical.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reachable_counts_match_expected() {
        let stats = game_tree_stats();
        assert_eq!(stats.reachable, 5478);
        assert_eq!(stats.terminal, 958);
        assert_eq!(stats.canonical, 765);
    }

    #[test]
    fn boards_come_in_ply_order() {
        let boards = reachable_boards();
        assert_eq!(boards[0], Board::new());
        assert!(
            boards
                .windows(2)
                .all(|w| w[0].occupied_count() <= w[1].occupied_count())
        );
    }
}
