//! noughts CLI - exact Tic-Tac-Toe solver
//!
//! This CLI provides:
//! - Optimal move queries for arbitrary boards
//! - Optimal self-play and matches against baseline opponents
//! - Exhaustive verification over every reachable board

use anyhow::Result;
use clap::{Parser, Subcommand};
use noughts::cli::{commands, config::SolverArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Exact minimax solver for Tic-Tac-Toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    solver: SolverArgs,

    /// Log search details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the optimal move for a board
    BestMove(commands::best_move::BestMoveArgs),

    /// Play the optimal engine against itself
    SelfPlay(commands::self_play::SelfPlayArgs),

    /// Play the optimal engine against a baseline opponent
    Play(commands::play::PlayArgs),

    /// Check every reachable board
    Verify(commands::verify::VerifyArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "noughts=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.solver.resolve()?;
    tracing::debug!(?config, "solver configuration");

    match cli.command {
        Commands::BestMove(args) => commands::best_move::execute(args, config),
        Commands::SelfPlay(args) => commands::self_play::execute(args, config),
        Commands::Play(args) => commands::play::execute(args, config),
        Commands::Verify(args) => commands::verify::execute(args, config),
    }
}
