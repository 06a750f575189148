//! Exhaustive minimax search

use std::ops::AddAssign;

use tracing::{debug, trace, warn};

use super::{
    cache::ValueCache,
    config::{SearchStrategy, SolverConfig},
};
use crate::tictactoe::{Action, Board, Player};

/// Node counters for one search, returned to the caller rather than kept globally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Boards visited below the root
    pub nodes: u64,
    /// Value cache hits (memoized strategy only)
    pub cache_hits: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.cache_hits += other.cache_hits;
    }
}

/// Result of a root search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    /// Chosen action, `None` on a terminal board
    pub best: Option<Action>,
    /// Minimax value of the board from X's perspective
    pub value: i32,
    pub stats: SearchStats,
}

/// Successor boards in row-major action order
fn children(board: &Board) -> impl Iterator<Item = (Action, Board)> + '_ {
    board
        .legal_actions()
        .into_iter()
        .filter_map(move |action| board.apply_action(action).ok().map(|next| (action, next)))
}

/// Whether `value` strictly beats the incumbent for `player`.
///
/// Ties keep the incumbent, so the first optimal action in row-major order wins.
fn improves(player: Player, value: i32, incumbent: Option<(Action, i32)>) -> bool {
    match (incumbent, player) {
        (None, _) => true,
        (Some((_, best)), Player::X) => value > best,
        (Some((_, best)), Player::O) => value < best,
    }
}

/// State for a single tree walk
struct Search {
    strategy: SearchStrategy,
    cache: Option<ValueCache>,
    stats: SearchStats,
}

impl Search {
    fn new(strategy: SearchStrategy) -> Self {
        let cache = (strategy == SearchStrategy::Memoized).then(ValueCache::new);
        Search {
            strategy,
            cache,
            stats: SearchStats::default(),
        }
    }

    fn finish(self) -> SearchStats {
        let mut stats = self.stats;
        if let Some(cache) = &self.cache {
            stats.cache_hits = cache.hits();
        }
        stats
    }

    fn max_value(&mut self, board: &Board) -> i32 {
        self.stats.nodes += 1;
        if let Ok(value) = board.utility() {
            return value;
        }
        if let Some(value) = self.cache.as_mut().and_then(|c| c.get(board, true)) {
            return value;
        }

        let mut value = i32::MIN;
        for (_, child) in children(board) {
            value = value.max(self.min_value(&child));
        }

        if let Some(cache) = self.cache.as_mut() {
            cache.insert(board, true, value);
        }
        value
    }

    fn min_value(&mut self, board: &Board) -> i32 {
        self.stats.nodes += 1;
        if let Ok(value) = board.utility() {
            return value;
        }
        if let Some(value) = self.cache.as_mut().and_then(|c| c.get(board, false)) {
            return value;
        }

        let mut value = i32::MAX;
        for (_, child) in children(board) {
            value = value.min(self.max_value(&child));
        }

        if let Some(cache) = self.cache.as_mut() {
            cache.insert(board, false, value);
        }
        value
    }

    /// Fail-hard alpha-beta for the maximizer. The result is exact when it
    /// lies strictly inside `(alpha, beta)`.
    fn alpha_beta_max(&mut self, board: &Board, mut alpha: i32, beta: i32) -> i32 {
        self.stats.nodes += 1;
        if let Ok(value) = board.utility() {
            return value;
        }

        for (_, child) in children(board) {
            let value = self.alpha_beta_min(&child, alpha, beta);
            if value >= beta {
                return beta;
            }
            alpha = alpha.max(value);
        }
        alpha
    }

    fn alpha_beta_min(&mut self, board: &Board, alpha: i32, mut beta: i32) -> i32 {
        self.stats.nodes += 1;
        if let Ok(value) = board.utility() {
            return value;
        }

        for (_, child) in children(board) {
            let value = self.alpha_beta_max(&child, alpha, beta);
            if value <= alpha {
                return alpha;
            }
            beta = beta.min(value);
        }
        beta
    }

    /// Exact value of `child`, evaluated for the side that replies to `player`
    fn reply_value(&mut self, player: Player, child: &Board) -> i32 {
        match (self.strategy, player) {
            (SearchStrategy::AlphaBeta, Player::X) => self.alpha_beta_min(child, i32::MIN, i32::MAX),
            (SearchStrategy::AlphaBeta, Player::O) => self.alpha_beta_max(child, i32::MIN, i32::MAX),
            (_, Player::X) => self.min_value(child),
            (_, Player::O) => self.max_value(child),
        }
    }

    /// Value of `child` that is exact whenever it beats `incumbent`
    fn candidate_value(
        &mut self,
        player: Player,
        child: &Board,
        incumbent: Option<(Action, i32)>,
    ) -> i32 {
        match (self.strategy, player, incumbent) {
            (SearchStrategy::AlphaBeta, Player::X, Some((_, best))) => {
                self.alpha_beta_min(child, best, i32::MAX)
            }
            (SearchStrategy::AlphaBeta, Player::O, Some((_, best))) => {
                self.alpha_beta_max(child, i32::MIN, best)
            }
            _ => self.reply_value(player, child),
        }
    }

    fn select(&mut self, board: &Board) -> Option<(Action, i32)> {
        let player = board.current_player();
        let mut best = None;
        for (action, child) in children(board) {
            let value = self.candidate_value(player, &child, best);
            trace!(%action, value, "root action");
            if improves(player, value, best) {
                best = Some((action, value));
            }
        }
        best
    }
}

/// Minimax solver.
///
/// The solver owns only its configuration; each call builds fresh search
/// state, so a `Solver` can be shared freely between threads.
///
/// # Examples
///
/// ```
/// use noughts::{search::Solver, tictactoe::{Action, Board}};
///
/// let board: Board = "XX. OO. ...".parse().unwrap();
/// let solver = Solver::default();
/// assert_eq!(solver.best_move(&board), Some(Action::new(0, 2)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        if config.parallel_root && !cfg!(feature = "parallel") {
            warn!("parallel_root requested but the `parallel` feature is disabled; searching sequentially");
        }
        Solver { config }
    }

    pub fn with_strategy(strategy: SearchStrategy) -> Self {
        Self::new(SolverConfig::new(strategy))
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Optimal action for the player to move, `None` on a terminal board
    pub fn best_move(&self, board: &Board) -> Option<Action> {
        self.search(board).best
    }

    /// Minimax value of the board from X's perspective
    pub fn value(&self, board: &Board) -> i32 {
        self.search(board).value
    }

    /// Full root search: chosen action, board value and node counts
    pub fn search(&self, board: &Board) -> SearchReport {
        if let Ok(value) = board.utility() {
            return SearchReport {
                best: None,
                value,
                stats: SearchStats::default(),
            };
        }

        let (best, stats) = if self.parallel() {
            self.select_parallel(board)
        } else {
            let mut search = Search::new(self.config.strategy);
            let best = search.select(board);
            (best, search.finish())
        };

        debug!(
            board = %board.encode(),
            strategy = %self.config.strategy,
            nodes = stats.nodes,
            cache_hits = stats.cache_hits,
            "search complete"
        );

        match best {
            Some((action, value)) => SearchReport {
                best: Some(action),
                value,
                stats,
            },
            // A non-terminal board always has a legal action.
            None => SearchReport {
                best: None,
                value: 0,
                stats,
            },
        }
    }

    /// Exact minimax value of every legal action, in row-major order
    pub fn evaluate_actions(&self, board: &Board) -> Vec<(Action, i32)> {
        let player = board.current_player();
        let mut search = Search::new(self.config.strategy);
        let values = children(board)
            .map(|(action, child)| (action, search.reply_value(player, &child)))
            .collect();
        debug!(nodes = search.stats.nodes, "evaluated root actions");
        values
    }

    /// Every action achieving the optimal value, in row-major order
    pub fn optimal_actions(&self, board: &Board) -> Vec<Action> {
        let values = self.evaluate_actions(board);
        let best = match board.current_player() {
            Player::X => values.iter().map(|&(_, v)| v).max(),
            Player::O => values.iter().map(|&(_, v)| v).min(),
        };
        values
            .into_iter()
            .filter(|&(_, v)| Some(v) == best)
            .map(|(action, _)| action)
            .collect()
    }

    fn parallel(&self) -> bool {
        self.config.parallel_root && cfg!(feature = "parallel")
    }

    #[cfg(feature = "parallel")]
    fn select_parallel(&self, board: &Board) -> (Option<(Action, i32)>, SearchStats) {
        use rayon::prelude::*;

        let player = board.current_player();
        let branches: Vec<(Action, Board)> = children(board).collect();
        // collect() keeps action order, so merging below is deterministic.
        let results: Vec<(Action, i32, SearchStats)> = branches
            .par_iter()
            .map(|(action, child)| {
                let mut search = Search::new(self.config.strategy);
                let value = search.reply_value(player, child);
                (*action, value, search.finish())
            })
            .collect();

        let mut best = None;
        let mut stats = SearchStats::default();
        for (action, value, branch_stats) in results {
            stats += branch_stats;
            if improves(player, value, best) {
                best = Some((action, value));
            }
        }
        (best, stats)
    }

    #[cfg(not(feature = "parallel"))]
    fn select_parallel(&self, board: &Board) -> (Option<(Action, i32)>, SearchStats) {
        let mut search = Search::new(self.config.strategy);
        let best = search.select(board);
        (best, search.finish())
    }
}

/// Largest value X can force from `board`, unpruned
pub fn max_value(board: &Board) -> i32 {
    Search::new(SearchStrategy::Plain).max_value(board)
}

/// Smallest value O can force from `board`, unpruned
pub fn min_value(board: &Board) -> i32 {
    Search::new(SearchStrategy::Plain).min_value(board)
}
