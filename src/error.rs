//! Error types for the noughts crate

use thiserror::Error;

/// Main error type for the noughts crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action: cell ({row}, {col}) is out of bounds (must be 0-2)")]
    OutOfBounds { row: usize, col: usize },

    #[error("invalid action: cell ({row}, {col}) is already occupied")]
    OccupiedCell { row: usize, col: usize },

    #[error("invalid action: game already over")]
    GameOver,

    #[error("malformed board: X={x_count}, O={o_count} (X must equal O or lead by 1)")]
    MalformedBoard { x_count: usize, o_count: usize },

    #[error("malformed board: both players cannot have winning lines")]
    ConflictingWinners,

    #[error("utility is only defined for terminal boards")]
    NotTerminal,

    #[error("board string has wrong length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error rejects an action passed to `apply_action`.
    pub fn is_invalid_action(&self) -> bool {
        matches!(
            self,
            Error::OutOfBounds { .. } | Error::OccupiedCell { .. } | Error::GameOver
        )
    }

    /// Whether this error rejects a board that could not arise from alternating play.
    pub fn is_malformed_board(&self) -> bool {
        matches!(
            self,
            Error::MalformedBoard { .. } | Error::ConflictingWinners
        )
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
