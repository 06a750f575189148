//! Best-move command - report the optimal action for a board

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use super::parse_board;
use crate::{
    cli::output::{format_number, print_board, print_kv, print_section},
    search::{SolverConfig, Solver},
    tictactoe::{Action, Board, GameOutcome, LineAnalyzer, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Compute the optimal move for a board")]
pub struct BestMoveArgs {
    /// Board as 9 cells, row-major ('X', 'O', '.'); '/' and spaces are ignored
    #[arg(default_value = ".........")]
    pub board: String,

    /// List every optimal action instead of the tie-break winner only
    #[arg(long)]
    pub all: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct BestMoveReport {
    board: Board,
    to_move: Player,
    outcome: GameOutcome,
    best_move: Option<Action>,
    value: i32,
    nodes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimal_actions: Option<Vec<Action>>,
}

pub fn execute(args: BestMoveArgs, config: SolverConfig) -> Result<()> {
    let board = parse_board(&args.board)?;
    let solver = Solver::new(config);
    let search = solver.search(&board);

    let optimal = args.all.then(|| solver.optimal_actions(&board));

    if args.json {
        let report = BestMoveReport {
            board,
            to_move: board.current_player(),
            outcome: board.outcome(),
            best_move: search.best,
            value: search.value,
            nodes: search.stats.nodes,
            optimal_actions: optimal,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_section("Position");
    print_board(&board);
    println!();

    let Some(best) = search.best else {
        print_kv("Outcome", &format!("{:?}", board.outcome()));
        print_kv("Utility", &search.value.to_string());
        return Ok(());
    };

    let player = board.current_player();
    print_kv("To move", &player.to_string());
    print_kv("Best move", &best.to_string());
    print_kv("Value", &describe_value(search.value));
    print_kv("Nodes searched", &format_number(search.stats.nodes));
    if search.stats.cache_hits > 0 {
        print_kv("Cache hits", &format_number(search.stats.cache_hits));
    }

    for side in [player, player.opponent()] {
        let threats = LineAnalyzer::winning_moves(board.cells(), side);
        if !threats.is_empty() {
            print_kv(&format!("{side} threatens"), &join_actions(&threats));
        }
    }

    if let Some(actions) = optimal {
        print_kv("Optimal actions", &join_actions(&actions));
    }

    Ok(())
}

fn describe_value(value: i32) -> String {
    match value {
        1 => "1 (X wins)".to_string(),
        -1 => "-1 (O wins)".to_string(),
        _ => format!("{value} (draw)"),
    }
}

fn join_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(Action::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
