//! Subcommands of the `noughts` binary

pub mod best_move;
pub mod play;
pub mod self_play;
pub mod verify;

use anyhow::{Context, Result};

use crate::tictactoe::Board;

/// Parse a board argument, attaching the raw input to any error
pub(crate) fn parse_board(input: &str) -> Result<Board> {
    input
        .parse::<Board>()
        .with_context(|| format!("invalid board '{input}'"))
}
