//! Game loop and match runner.

use core::fmt;
use std::time::Duration;

use log::{debug, info};
use rayon::prelude::*;

use crate::agent::Agent;
use crate::clock::TurnClock;
use crate::game::{Game, Player};

/// Why a player lost without the opponent connecting four.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForfeitReason {
    /// The agent returned no move although legal moves existed.
    NoMove,
    IllegalMove(usize),
    /// The agent answered after its turn budget ran out.
    Timeout { elapsed: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    FourInARow,
    OpponentForfeit(ForfeitReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win { player: Player, reason: WinReason },
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub outcome: Outcome,
    /// Columns played, in order.
    pub moves: Vec<usize>,
}

/// Plays one game on a standard board. `first` moves as [`Player::Player1`].
///
/// Every turn gets a fresh clock of `turn_budget`.
pub fn play_game(
    first: &dyn Agent<Game>,
    second: &dyn Agent<Game>,
    turn_budget: Duration,
) -> GameRecord {
    let mut game: Game = Game::new();
    let mut moves = Vec::new();

    loop {
        if let Some(player) = game.winner() {
            return GameRecord {
                outcome: Outcome::Win {
                    player,
                    reason: WinReason::FourInARow,
                },
                moves,
            };
        }
        if game.is_draw() {
            return GameRecord {
                outcome: Outcome::Draw,
                moves,
            };
        }

        let player = game.active();
        let agent = match player {
            Player::Player1 => first,
            Player::Player2 => second,
        };

        let clock = TurnClock::start(turn_budget);
        let choice = agent.choose_move(&game, &clock.probe());
        debug!(
            "{} ({player}) chose {choice:?} after {:?}",
            agent.name(),
            clock.elapsed()
        );

        let forfeit = match choice {
            None => Some(ForfeitReason::NoMove),
            Some(_) if clock.expired() => Some(ForfeitReason::Timeout {
                elapsed: clock.elapsed(),
            }),
            Some(col) => match game.play(col) {
                Ok(()) => {
                    moves.push(col);
                    None
                }
                Err(_) => Some(ForfeitReason::IllegalMove(col)),
            },
        };

        if let Some(reason) = forfeit {
            info!("{} ({player}) forfeits: {reason:?}", agent.name());
            return GameRecord {
                outcome: Outcome::Win {
                    player: player.opponent(),
                    reason: WinReason::OpponentForfeit(reason),
                },
                moves,
            };
        }
    }
}

/// Tally of a match between two agents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub a_name: String,
    pub b_name: String,
    pub a_wins: usize,
    pub b_wins: usize,
    pub draws: usize,
    /// Games decided by a forfeit instead of four in a row.
    pub forfeits: usize,
}

impl MatchSummary {
    #[must_use]
    pub const fn games(&self) -> usize {
        self.a_wins + self.b_wins + self.draws
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} wins: {}", self.a_name, self.a_wins)?;
        writeln!(f, "Draws:   {}", self.draws)?;
        writeln!(f, "{} wins: {}", self.b_name, self.b_wins)?;
        write!(f, "({} of {} games ended by forfeit)", self.forfeits, self.games())
    }
}

/// Plays `games` independent games in parallel. `a` starts the even-numbered
/// games and `b` the odd-numbered ones.
pub fn run_match(
    a: &dyn Agent<Game>,
    b: &dyn Agent<Game>,
    games: usize,
    turn_budget: Duration,
) -> MatchSummary {
    let results: Vec<(bool, GameRecord)> = (0..games)
        .into_par_iter()
        .map(|i| {
            let a_first = i % 2 == 0;
            let record = if a_first {
                play_game(a, b, turn_budget)
            } else {
                play_game(b, a, turn_budget)
            };
            info!("game {i}: {:?} after {} moves", record.outcome, record.moves.len());
            (a_first, record)
        })
        .collect();

    let mut summary = MatchSummary {
        a_name: a.name(),
        b_name: b.name(),
        ..MatchSummary::default()
    };
    for (a_first, record) in results {
        match record.outcome {
            Outcome::Draw => summary.draws += 1,
            Outcome::Win { player, reason } => {
                if matches!(reason, WinReason::OpponentForfeit(_)) {
                    summary.forfeits += 1;
                }
                if (player == Player::Player1) == a_first {
                    summary.a_wins += 1;
                } else {
                    summary.b_wins += 1;
                }
            }
        }
    }
    summary
}
