//! Solver configuration

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// How the minimax tree is walked.
///
/// Every strategy returns the same move for every board; they differ only in
/// how many nodes they visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    /// Full unpruned mutual recursion
    #[default]
    Plain,
    /// Alpha-beta cutoffs
    AlphaBeta,
    /// Unpruned search with a value cache keyed by canonical board
    Memoized,
}

impl SearchStrategy {
    pub const ALL: [SearchStrategy; 3] = [
        SearchStrategy::Plain,
        SearchStrategy::AlphaBeta,
        SearchStrategy::Memoized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStrategy::Plain => "plain",
            SearchStrategy::AlphaBeta => "alpha-beta",
            SearchStrategy::Memoized => "memoized",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchStrategy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| crate::Error::InvalidConfiguration {
                message: format!(
                    "unknown search strategy '{s}'. Expected one of: plain, alpha-beta, memoized"
                ),
            })
    }
}

/// Configuration for a [`Solver`](super::Solver).
///
/// # Examples
///
/// ```
/// use noughts::search::{SearchStrategy, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_strategy(SearchStrategy::AlphaBeta)
///     .with_parallel_root(true);
/// assert_eq!(config.strategy, SearchStrategy::AlphaBeta);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Tree walk used below the root
    pub strategy: SearchStrategy,
    /// Evaluate root actions on the rayon pool (needs the `parallel` feature)
    pub parallel_root: bool,
}

impl SolverConfig {
    pub fn new(strategy: SearchStrategy) -> Self {
        Self {
            strategy,
            parallel_root: false,
        }
    }

    /// Set the search strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable root-level parallelism.
    pub fn with_parallel_root(mut self, parallel_root: bool) -> Self {
        self.parallel_root = parallel_root;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_names_round_trip() {
        for strategy in SearchStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<SearchStrategy>().unwrap(), strategy);
        }
        assert!("negamax".parse::<SearchStrategy>().is_err());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: SolverConfig = serde_json::from_str(r#"{"strategy":"memoized"}"#).unwrap();
        assert_eq!(config, SolverConfig::new(SearchStrategy::Memoized));

        let config: SolverConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SolverConfig::default());
    }
}
