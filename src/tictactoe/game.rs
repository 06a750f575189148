//! Game record with move history

use serde::{Deserialize, Serialize};

use super::board::{Action, Board, GameOutcome, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub action: Action,
    pub player: Player,
}

/// A game: a starting board plus the moves played from it.
///
/// The current board is always derived by replaying the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub initial: Board,
    pub moves: Vec<Move>,
}

impl Game {
    /// Create a new game from the empty board
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// Create a game starting from an arbitrary valid board
    pub fn from_board(initial: Board) -> Self {
        Game {
            initial,
            moves: Vec::new(),
        }
    }

    /// Play an action for the player to move.
    ///
    /// # Errors
    ///
    /// Same as [`Board::apply_action`]; the history is unchanged on failure.
    pub fn play(&mut self, action: Action) -> Result<Board, crate::Error> {
        let current = self.current_state()?;
        let next = current.apply_action(action)?;

        self.moves.push(Move {
            action,
            player: current.current_player(),
        });

        Ok(next)
    }

    /// Get current board
    ///
    /// # Errors
    ///
    /// Returns error if the history holds a move that is illegal where it was
    /// played. This only happens for hand-edited or deserialized games.
    pub fn current_state(&self) -> Result<Board, crate::Error> {
        self.moves
            .iter()
            .try_fold(self.initial, |board, m| board.apply_action(m.action))
    }

    /// Every board from the initial one to the current one
    pub fn state_sequence(&self) -> Result<Vec<Board>, crate::Error> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        let mut board = self.initial;
        states.push(board);

        for m in &self.moves {
            board = board.apply_action(m.action)?;
            states.push(board);
        }

        Ok(states)
    }

    /// Outcome of the current board
    pub fn outcome(&self) -> Result<GameOutcome, crate::Error> {
        Ok(self.current_state()?.outcome())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_records_players() {
        let mut game = Game::new();
        game.play(Action::new(1, 1)).unwrap();
        game.play(Action::new(0, 0)).unwrap();

        assert_eq!(game.moves[0].player, Player::X);
        assert_eq!(game.moves[1].player, Player::O);
        assert_eq!(game.state_sequence().unwrap().len(), 3);
        assert_eq!(game.outcome().unwrap(), GameOutcome::InProgress);
    }

    #[test]
    fn test_failed_play_leaves_history() {
        let mut game = Game::new();
        game.play(Action::new(1, 1)).unwrap();
        let err = game.play(Action::new(1, 1)).unwrap_err();

        assert!(err.is_invalid_action());
        assert_eq!(game.moves.len(), 1);
    }

    #[test]
    fn test_game_over_rejects_moves() {
        let mut game = Game::new();
        let actions: [(usize, usize); 5] = [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)];
        for action in actions {
            game.play(action.into()).unwrap();
        }
        assert_eq!(game.outcome().unwrap(), GameOutcome::XWins);
        assert!(matches!(
            game.play(Action::new(2, 2)),
            Err(crate::Error::GameOver)
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let mut game = Game::new();
        game.play(Action::new(0, 2)).unwrap();
        let json = serde_json::to_string(&game).unwrap();
        let back: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(back.current_state().unwrap(), game.current_state().unwrap());
    }
}
