//! Play command - optimal engine against a baseline opponent

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use rand::random;

use crate::{
    agents::{Agent, DefensiveAgent, OptimalAgent, RandomAgent, play_game},
    cli::output::{print_kv, print_section},
    search::{Solver, SolverConfig},
    tictactoe::{Board, GameOutcome, Player},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OpponentKind {
    /// Uniformly random legal moves
    Random,
    /// Wins or blocks one move ahead, otherwise random
    Defensive,
}

#[derive(Parser, Debug)]
#[command(about = "Play the optimal engine against a baseline opponent")]
pub struct PlayArgs {
    /// Opponent type
    #[arg(long, short = 'o', value_enum, default_value = "random")]
    pub opponent: OpponentKind,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Side played by the engine (`x` or `o`); alternates when omitted
    #[arg(long)]
    pub engine_player: Option<String>,
}

/// Tally of finished games from the engine's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

fn parse_player_token(value: &str) -> Result<Player> {
    match value.to_ascii_lowercase().as_str() {
        "x" => Ok(Player::X),
        "o" => Ok(Player::O),
        other => bail!("invalid --engine-player '{other}' (expected 'x' or 'o')"),
    }
}

fn make_opponent(kind: OpponentKind, seed: u64) -> Box<dyn Agent> {
    match kind {
        OpponentKind::Random => Box::new(RandomAgent::with_seed(seed)),
        OpponentKind::Defensive => Box::new(DefensiveAgent::with_seed(seed)),
    }
}

/// Play `games` games and tally them for the engine
pub fn run_match(
    config: SolverConfig,
    opponent: OpponentKind,
    games: usize,
    seed: u64,
    engine_side: Option<Player>,
) -> crate::Result<MatchSummary> {
    let mut engine = OptimalAgent::new(Solver::new(config));
    let mut opponent = make_opponent(opponent, seed);
    let mut summary = MatchSummary::default();

    for i in 0..games {
        let side = engine_side.unwrap_or(if i % 2 == 0 { Player::X } else { Player::O });
        let game = match side {
            Player::X => play_game(Board::new(), &mut engine, opponent.as_mut())?,
            Player::O => play_game(Board::new(), opponent.as_mut(), &mut engine)?,
        };

        match (game.outcome()?, side) {
            (GameOutcome::XWins, Player::X) | (GameOutcome::OWins, Player::O) => summary.wins += 1,
            (GameOutcome::XWins, Player::O) | (GameOutcome::OWins, Player::X) => {
                summary.losses += 1
            }
            _ => summary.draws += 1,
        }
    }

    Ok(summary)
}

pub fn execute(args: PlayArgs, config: SolverConfig) -> Result<()> {
    let engine_side = args
        .engine_player
        .as_deref()
        .map(parse_player_token)
        .transpose()?;
    let seed = args.seed.unwrap_or_else(random);

    let summary = run_match(config, args.opponent, args.games, seed, engine_side)?;

    print_section("Match results");
    print_kv("Opponent", &format!("{:?}", args.opponent).to_lowercase());
    print_kv("Seed", &seed.to_string());
    print_kv("Games", &args.games.to_string());
    print_kv("Engine wins", &summary.wins.to_string());
    print_kv("Draws", &summary.draws.to_string());
    print_kv("Engine losses", &summary.losses.to_string());

    if summary.losses > 0 {
        bail!("optimal engine lost {} game(s)", summary.losses);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchStrategy;

    #[test]
    fn engine_never_loses_to_random() {
        let config = SolverConfig::new(SearchStrategy::AlphaBeta);
        let summary = run_match(config, OpponentKind::Random, 10, 42, None).unwrap();
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.wins + summary.draws, 10);
    }

    #[test]
    fn parses_player_tokens() {
        assert_eq!(parse_player_token("X").unwrap(), Player::X);
        assert_eq!(parse_player_token("o").unwrap(), Player::O);
        assert!(parse_player_token("z").is_err());
    }
}
