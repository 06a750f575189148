//! Shared configuration for CLI commands

use std::{fs, path::Path};

use clap::Args;

use crate::search::{SearchStrategy, SolverConfig};

/// Solver options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct SolverArgs {
    /// JSON file holding a solver configuration
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Search strategy (plain, alpha-beta, memoized); overrides the config file
    #[arg(long, global = true)]
    pub strategy: Option<SearchStrategy>,

    /// Evaluate root actions in parallel (requires the `parallel` feature)
    #[arg(long, global = true)]
    pub parallel: bool,
}

impl SolverArgs {
    /// Resolve the effective configuration: file first, then flag overrides
    pub fn resolve(&self) -> crate::Result<SolverConfig> {
        let mut config = match &self.config {
            Some(path) => load_solver_config(path)?,
            None => SolverConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config = config.with_strategy(strategy);
        }
        if self.parallel {
            config = config.with_parallel_root(true);
        }
        Ok(config)
    }
}

/// Load a [`SolverConfig`] from a JSON file.
///
/// Missing fields take their defaults.
pub fn load_solver_config(path: &Path) -> crate::Result<SolverConfig> {
    let text = fs::read_to_string(path).map_err(|source| crate::Error::Io {
        operation: format!("read solver config '{}'", path.display()),
        source,
    })?;
    let config = serde_json::from_str(&text)?;
    Ok(config)
}
