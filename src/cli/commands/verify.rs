//! Verify command - exhaustive consistency check over every reachable board

use anyhow::{Result, bail};
use clap::Parser;
use tracing::{info, warn};

use crate::{
    cli::output::{create_progress, format_number, print_kv, print_section},
    search::{SearchStrategy, Solver, SolverConfig},
    tictactoe::{Action, Board, LineAnalyzer, Player, game_tree_stats, reachable_boards},
};

#[derive(Parser, Debug)]
#[command(about = "Check every reachable board: rules invariants and strategy agreement")]
pub struct VerifyArgs {
    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,
}

/// A board where the strategies disagree or a rule invariant fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    pub board: Board,
    pub detail: String,
}

/// Totals from a verification run
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub boards: usize,
    pub terminal: usize,
    pub canonical: usize,
    pub nodes: u64,
    pub discrepancies: Vec<Discrepancy>,
}

/// Check one board, returning the number of nodes searched
fn check_board(
    board: &Board,
    solvers: &[Solver],
    discrepancies: &mut Vec<Discrepancy>,
) -> u64 {
    let mut nodes = 0;

    if board.legal_actions().is_empty() != board.is_terminal() {
        discrepancies.push(Discrepancy {
            board: *board,
            detail: "legal actions empty does not match terminal".to_string(),
        });
    }

    let mut reference: Option<(SearchStrategy, Option<Action>)> = None;
    for solver in solvers {
        let report = solver.search(board);
        nodes += report.stats.nodes;
        let strategy = solver.config().strategy;

        match reference {
            None => reference = Some((strategy, report.best)),
            Some((ref_strategy, ref_best)) if ref_best != report.best => {
                discrepancies.push(Discrepancy {
                    board: *board,
                    detail: format!(
                        "{ref_strategy} chose {ref_best:?} but {strategy} chose {:?}",
                        report.best
                    ),
                });
            }
            Some(_) => {}
        }

        let to_move = board.current_player();
        if !board.is_terminal() && LineAnalyzer::has_immediate_win(board.cells(), to_move) {
            let won = match to_move {
                Player::X => report.value == 1,
                Player::O => report.value == -1,
            };
            if !won {
                discrepancies.push(Discrepancy {
                    board: *board,
                    detail: format!("{strategy} misses an immediate win for {to_move}"),
                });
            }
        }

        if let Some(action) = report.best {
            match board.apply_action(action) {
                Ok(next) if next.current_player() == board.current_player() => {
                    discrepancies.push(Discrepancy {
                        board: *board,
                        detail: format!("turn did not pass after {action}"),
                    });
                }
                Ok(_) => {}
                Err(err) => discrepancies.push(Discrepancy {
                    board: *board,
                    detail: format!("{strategy} chose illegal {action}: {err}"),
                }),
            }
        }
    }

    nodes
}

/// Run every strategy on every reachable board
pub fn verify_all(config: SolverConfig, show_progress: bool) -> VerifyReport {
    let boards = reachable_boards();
    let stats = game_tree_stats();
    let solvers: Vec<Solver> = SearchStrategy::ALL
        .into_iter()
        .map(|strategy| Solver::new(config.with_strategy(strategy)))
        .collect();

    let progress = show_progress.then(|| create_progress(boards.len() as u64, "boards"));
    let mut report = VerifyReport {
        boards: stats.reachable,
        terminal: stats.terminal,
        canonical: stats.canonical,
        ..VerifyReport::default()
    };

    for board in &boards {
        report.nodes += check_board(board, &solvers, &mut report.discrepancies);
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    info!(
        boards = report.boards,
        nodes = report.nodes,
        discrepancies = report.discrepancies.len(),
        "verification finished"
    );
    report
}

pub fn execute(args: VerifyArgs, config: SolverConfig) -> Result<()> {
    let report = verify_all(config, !args.quiet);

    print_section("Verification");
    print_kv("Reachable boards", &format_number(report.boards as u64));
    print_kv("Terminal boards", &format_number(report.terminal as u64));
    print_kv("Canonical boards", &format_number(report.canonical as u64));
    print_kv("Nodes searched", &format_number(report.nodes));
    print_kv("Discrepancies", &report.discrepancies.len().to_string());

    for d in &report.discrepancies {
        warn!(board = %d.board.encode(), "{}", d.detail);
    }

    if !report.discrepancies.is_empty() {
        bail!("{} discrepancies found", report.discrepancies.len());
    }
    Ok(())
}
