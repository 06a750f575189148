//! Move-choosing agents and a match driver
//!
//! The optimal agent wraps a [`Solver`]; the random and defensive agents are
//! seeded baselines used to exercise it.

use rand::{Rng, SeedableRng, random, rngs::StdRng};
use tracing::debug;

use crate::{
    Error, Result,
    search::Solver,
    tictactoe::{Action, Board, Game, LineAnalyzer, Player},
};

/// Anything that can pick a move on a board
pub trait Agent: Send {
    /// Choose an action for the player to move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] on a terminal board.
    fn choose_action(&mut self, board: &Board) -> Result<Action>;

    fn name(&self) -> &str;
}

/// Plays the minimax move
#[derive(Debug, Clone, Default)]
pub struct OptimalAgent {
    solver: Solver,
}

impl OptimalAgent {
    pub fn new(solver: Solver) -> Self {
        Self { solver }
    }
}

impl Agent for OptimalAgent {
    fn choose_action(&mut self, board: &Board) -> Result<Action> {
        self.solver.best_move(board).ok_or(Error::GameOver)
    }

    fn name(&self) -> &str {
        "optimal"
    }
}

fn random_legal_action(rng: &mut StdRng, board: &Board) -> Result<Action> {
    let actions: Vec<Action> = board.legal_actions().into_iter().collect();
    if actions.is_empty() {
        return Err(Error::GameOver);
    }
    Ok(actions[rng.random_range(0..actions.len())])
}

/// Plays a uniformly random legal move
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self::with_seed(random())
    }

    /// Create a random agent with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn choose_action(&mut self, board: &Board) -> Result<Action> {
        random_legal_action(&mut self.rng, board)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Wins when it can, blocks when it must, otherwise plays randomly.
///
/// Unlike the optimal agent it never looks further than one move ahead.
pub struct DefensiveAgent {
    rng: StdRng,
}

impl DefensiveAgent {
    pub fn new() -> Self {
        Self::with_seed(random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for DefensiveAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for DefensiveAgent {
    fn choose_action(&mut self, board: &Board) -> Result<Action> {
        if board.is_terminal() {
            return Err(Error::GameOver);
        }

        let me = board.current_player();
        let wins = LineAnalyzer::winning_moves(board.cells(), me);
        if let Some(&action) = wins.first() {
            return Ok(action);
        }

        let blocks = LineAnalyzer::winning_moves(board.cells(), me.opponent());
        if let Some(&action) = blocks.first() {
            return Ok(action);
        }

        random_legal_action(&mut self.rng, board)
    }

    fn name(&self) -> &str {
        "defensive"
    }
}

/// Play `x` against `o` from `start` until the game ends
pub fn play_game(start: Board, x: &mut dyn Agent, o: &mut dyn Agent) -> Result<Game> {
    let mut game = Game::from_board(start);
    let mut board = start;

    while !board.is_terminal() {
        let player = board.current_player();
        let action = match player {
            Player::X => x.choose_action(&board)?,
            Player::O => o.choose_action(&board)?,
        };
        debug!(%player, %action, "move");
        board = game.play(action)?;
    }

    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::GameOutcome;

    #[test]
    fn optimal_self_play_draws() {
        let mut x = OptimalAgent::default();
        let mut o = OptimalAgent::default();
        let game = play_game(Board::new(), &mut x, &mut o).unwrap();
        assert_eq!(game.outcome().unwrap(), GameOutcome::Draw);
        assert_eq!(game.moves.len(), 9);
    }

    #[test]
    fn random_agent_is_reproducible() {
        let board = Board::new();
        let first: Vec<Action> = {
            let mut agent = RandomAgent::with_seed(7);
            (0..5).map(|_| agent.choose_action(&board).unwrap()).collect()
        };
        let mut agent = RandomAgent::with_seed(7);
        let second: Vec<Action> = (0..5).map(|_| agent.choose_action(&board).unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn defensive_agent_blocks() {
        let board: Board = "XX. .O. ...".parse().unwrap();
        let mut agent = DefensiveAgent::with_seed(1);
        assert_eq!(agent.choose_action(&board).unwrap(), Action::new(0, 2));
    }

    #[test]
    fn agents_refuse_terminal_boards() {
        let won: Board = "XXX OO. ...".parse().unwrap();
        assert!(matches!(
            OptimalAgent::default().choose_action(&won),
            Err(Error::GameOver)
        ));
        assert!(matches!(
            RandomAgent::with_seed(3).choose_action(&won),
            Err(Error::GameOver)
        ));
    }
}
