//! Board state representation and rules

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::{Error, Result};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player owning this mark, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The mark this player places on the board
    pub fn mark(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark().to_char())
    }
}

/// A move target: the (row, column) of the cell to mark.
///
/// Actions order row-major, so any ordered collection of actions iterates
/// them in the same fixed order used for tie-breaking during search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub fn new(row: usize, col: usize) -> Self {
        Action { row, col }
    }

    /// Build an action from a row-major cell index (0-8)
    pub fn from_index(index: usize) -> Self {
        Action {
            row: index / 3,
            col: index % 3,
        }
    }

    /// Row-major cell index, or `None` when the action leaves the grid
    pub fn index(self) -> Option<usize> {
        if self.row < 3 && self.col < 3 {
            Some(self.row * 3 + self.col)
        } else {
            None
        }
    }
}

impl From<(usize, usize)> for Action {
    fn from((row, col): (usize, usize)) -> Self {
        Action::new(row, col)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Result of a game as read off a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    XWins,
    OWins,
    Draw,
    InProgress,
}

impl GameOutcome {
    pub fn is_over(self) -> bool {
        self != GameOutcome::InProgress
    }
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
    empty: usize,
}

/// An immutable 3x3 board.
///
/// Boards can only be obtained from [`Board::new`], [`Board::apply_action`]
/// or the validating constructors, so the mark counts always satisfy
/// `X == O` or `X == O + 1` and at most one player holds a complete line.
/// Every transition returns a fresh copy; the board is 9 bytes and `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// Create a board from row-major cells, rejecting grids that cannot arise
    /// from alternating play starting with X.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedBoard`] when the counts are off and
    /// [`Error::ConflictingWinners`] when both players have a complete line.
    pub fn from_cells(cells: [Cell; 9]) -> Result<Self> {
        let count = Self::count_pieces(&cells);
        if !(count.x == count.o || count.x == count.o + 1) {
            return Err(Error::MalformedBoard {
                x_count: count.x,
                o_count: count.o,
            });
        }

        if LineAnalyzer::has_won(&cells, Player::X) && LineAnalyzer::has_won(&cells, Player::O) {
            return Err(Error::ConflictingWinners);
        }

        Ok(Board { cells })
    }

    /// Create a board from a 3x3 grid of rows
    pub fn from_rows(rows: [[Cell; 3]; 3]) -> Result<Self> {
        let mut cells = [Cell::Empty; 9];
        for (r, row) in rows.iter().enumerate() {
            cells[r * 3..r * 3 + 3].copy_from_slice(row);
        }
        Self::from_cells(cells)
    }

    /// Row-major view of the cells
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// The grid as three rows
    pub fn rows(&self) -> [[Cell; 3]; 3] {
        let mut rows = [[Cell::Empty; 3]; 3];
        for (i, &cell) in self.cells.iter().enumerate() {
            rows[i / 3][i % 3] = cell;
        }
        rows
    }

    /// Cell at the given action's coordinates, `None` when out of bounds
    pub fn get(&self, action: Action) -> Option<Cell> {
        action.index().map(|idx| self.cells[idx])
    }

    fn count_pieces(cells: &[Cell; 9]) -> PieceCount {
        let mut count = PieceCount {
            x: 0,
            o: 0,
            empty: 0,
        };
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => count.empty += 1,
            }
        }
        count
    }

    /// Count the number of occupied cells (plies played so far)
    pub fn occupied_count(&self) -> usize {
        9 - Self::count_pieces(&self.cells).empty
    }

    /// Player whose turn it is, derived from the mark counts.
    ///
    /// X moves when the counts are equal (including the empty board) and O
    /// moves when X leads by one. No other relationship can be constructed.
    pub fn current_player(&self) -> Player {
        let count = Self::count_pieces(&self.cells);
        if count.x == count.o {
            Player::X
        } else {
            Player::O
        }
    }

    /// Empty cells in row-major order, ignoring whether the game is over
    pub fn empty_actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Action::from_index(i))
    }

    /// Legal actions: every empty cell, or nothing once the game is over
    pub fn legal_actions(&self) -> BTreeSet<Action> {
        if self.is_terminal() {
            return BTreeSet::new();
        }
        self.empty_actions().collect()
    }

    /// Mark the action's cell for the player to move and return the new board.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfBounds`] if row or column is greater than 2
    /// - [`Error::OccupiedCell`] if the cell already holds a mark
    /// - [`Error::GameOver`] if the board is terminal
    #[must_use = "apply_action returns a new board; the original is unchanged"]
    pub fn apply_action(&self, action: Action) -> Result<Board> {
        let idx = action.index().ok_or(Error::OutOfBounds {
            row: action.row,
            col: action.col,
        })?;

        if self.cells[idx] != Cell::Empty {
            return Err(Error::OccupiedCell {
                row: action.row,
                col: action.col,
            });
        }

        if self.winner().is_some() {
            return Err(Error::GameOver);
        }

        let mut next = *self;
        next.cells[idx] = self.current_player().mark();
        Ok(next)
    }

    /// Check if a player has three in a row
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Check if the game is over (win or full grid)
    pub fn is_terminal(&self) -> bool {
        !self.cells.contains(&Cell::Empty) || self.winner().is_some()
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        !self.cells.contains(&Cell::Empty) && self.winner().is_none()
    }

    /// Outcome read off the board
    pub fn outcome(&self) -> GameOutcome {
        match self.winner() {
            Some(Player::X) => GameOutcome::XWins,
            Some(Player::O) => GameOutcome::OWins,
            None if self.is_draw() => GameOutcome::Draw,
            None => GameOutcome::InProgress,
        }
    }

    /// Zero-sum value of a finished game from X's perspective.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotTerminal`] for a game still in progress.
    pub fn utility(&self) -> Result<i32> {
        match self.outcome() {
            GameOutcome::XWins => Ok(1),
            GameOutcome::OWins => Ok(-1),
            GameOutcome::Draw => Ok(0),
            GameOutcome::InProgress => Err(Error::NotTerminal),
        }
    }

    /// Compact 9-character encoding, row-major
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }

    pub(crate) fn from_cells_unchecked(cells: [Cell; 9]) -> Self {
        Board { cells }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parse 9 cell characters; whitespace and `/` separators are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if chars.len() != 9 {
            return Err(Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Board::from_cells(cells)
    }
}

impl TryFrom<String> for Board {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.current_player(), Player::X);
        assert!(board.cells().iter().all(|&c| c == Cell::Empty));
        assert_eq!(board.legal_actions().len(), 9);
    }

    #[test]
    fn test_apply_action() {
        let board = Board::new();

        let next = board.apply_action(Action::new(1, 1)).unwrap();
        assert_eq!(next.get(Action::new(1, 1)), Some(Cell::X));
        assert_eq!(next.current_player(), Player::O);
        // Original untouched
        assert_eq!(board, Board::new());

        let err = next.apply_action(Action::new(1, 1)).unwrap_err();
        assert!(matches!(err, Error::OccupiedCell { row: 1, col: 1 }));
        assert!(err.to_string().contains("occupied"));
    }

    #[test]
    fn test_apply_action_out_of_bounds() {
        let err = Board::new().apply_action(Action::new(3, 0)).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { row: 3, col: 0 }));
        assert!(err.is_invalid_action());
    }

    #[test]
    fn test_apply_action_after_win() {
        let won = board("XXX OO. ...");
        let err = won.apply_action(Action::new(2, 2)).unwrap_err();
        assert!(matches!(err, Error::GameOver));
    }

    #[test]
    fn test_legal_actions_row_major() {
        let board = board("X.. .O. ...");
        let actions: Vec<Action> = board.legal_actions().into_iter().collect();
        assert_eq!(actions.len(), 7);
        assert_eq!(actions[0], Action::new(0, 1));
        assert_eq!(actions[6], Action::new(2, 2));
        assert!(actions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_win_detection_vertical() {
        let board = board("XO. XO. ...").apply_action(Action::new(2, 0)).unwrap();
        assert!(board.is_terminal());
        assert_eq!(board.winner(), Some(Player::X));
        assert_eq!(board.utility().unwrap(), 1);
    }

    #[test]
    fn test_win_detection_diagonal() {
        let board = board("O.X .OX X.O");
        assert_eq!(board.winner(), Some(Player::O));
        assert_eq!(board.outcome(), GameOutcome::OWins);
        assert_eq!(board.utility().unwrap(), -1);
    }

    #[test]
    fn test_draw_detection() {
        let board = board("XOX XOO OXX");
        assert!(board.is_terminal());
        assert!(board.is_draw());
        assert_eq!(board.winner(), None);
        assert_eq!(board.utility().unwrap(), 0);
        assert!(board.legal_actions().is_empty());
    }

    #[test]
    fn test_utility_requires_terminal() {
        let err = board("X.. ... ...").utility().unwrap_err();
        assert!(matches!(err, Error::NotTerminal));
        assert_eq!(board("X.. ... ...").outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn test_from_str_rejects_bad_input() {
        assert!(matches!(
            "XO".parse::<Board>(),
            Err(Error::InvalidBoardLength { got: 2, .. })
        ));
        assert!(matches!(
            "XOZ......".parse::<Board>(),
            Err(Error::InvalidCellCharacter { character: 'Z', position: 2, .. })
        ));
        assert!(matches!(
            "XX.......".parse::<Board>(),
            Err(Error::MalformedBoard { x_count: 2, o_count: 0 })
        ));
        assert!(matches!(
            "O........".parse::<Board>(),
            Err(Error::MalformedBoard { x_count: 0, o_count: 1 })
        ));
    }

    #[test]
    fn test_from_rows_rejects_conflicting_winners() {
        use Cell::{O, X};
        let err = Board::from_rows([[X, X, X], [O, O, O], [X, O, Cell::Empty]]).unwrap_err();
        assert!(matches!(err, Error::ConflictingWinners));
        assert!(err.is_malformed_board());
    }

    #[test]
    fn test_display_round_trip() {
        let board = board("XOX/.O./X..");
        let display = format!("{board}");
        assert_eq!(display, "XOX\n.O.\nX..");
        assert_eq!(display.parse::<Board>().unwrap(), board);
        assert_eq!(board.encode(), "XOX.O.X..");
    }

    #[test]
    fn test_serde_uses_encoding() {
        let board = board("XO. ... ...");
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "\"XO.......\"");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
        assert!(serde_json::from_str::<Board>("\"OO.......\"").is_err());
    }

    #[test]
    fn test_player_alternation() {
        let mut board = Board::new();
        let actions: [(usize, usize); 4] = [(0, 0), (0, 1), (0, 2), (1, 1)];
        for (i, action) in actions.into_iter().enumerate() {
            let expected = if i % 2 == 0 { Player::X } else { Player::O };
            assert_eq!(board.current_player(), expected);
            board = board.apply_action(action.into()).unwrap();
        }
        assert_eq!(board.current_player(), Player::X);
        assert_eq!(board.occupied_count(), 4);
    }
}
