//! Self-play command - optimal engine against itself

use anyhow::Result;
use clap::Parser;

use super::parse_board;
use crate::{
    agents::{OptimalAgent, play_game},
    cli::output::{print_board, print_kv, print_section},
    search::{Solver, SolverConfig},
    tictactoe::Board,
};

#[derive(Parser, Debug)]
#[command(about = "Play the optimal engine against itself")]
pub struct SelfPlayArgs {
    /// Starting board (defaults to the empty board)
    #[arg(long)]
    pub from: Option<String>,
}

pub fn execute(args: SelfPlayArgs, config: SolverConfig) -> Result<()> {
    let start = match &args.from {
        Some(s) => parse_board(s)?,
        None => Board::new(),
    };

    let mut x = OptimalAgent::new(Solver::new(config));
    let mut o = OptimalAgent::new(Solver::new(config));
    let game = play_game(start, &mut x, &mut o)?;

    print_section("Self-play");
    print_board(&start);
    for (ply, (mv, board)) in game
        .moves
        .iter()
        .zip(game.state_sequence()?.into_iter().skip(1))
        .enumerate()
    {
        println!("\nPly {}: {} plays {}", ply + 1, mv.player, mv.action);
        print_board(&board);
    }

    println!();
    print_kv("Outcome", &format!("{:?}", game.outcome()?));
    Ok(())
}
