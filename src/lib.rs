//! Connect Four agent based on fixed-depth minimax search.
//!
//! The search ([`MinimaxPlayer`]) is generic over any [`GameState`] and
//! [`Evaluator`]; [`Game`] and [`Heuristic`] provide both for Connect Four.

#![deny(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::must_use_candidate,
    // clippy::restriction,
    // clippy::pedantic
)]
// now allow a few rules which are denied by the above statement
// --> they are ridiculous and not necessary
#![allow(
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::fallible_impl_from,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions
)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::all)]

pub mod agent;
pub mod clock;
pub mod game;
pub mod heuristic;
pub mod minimax;
pub mod state;
pub mod tournament;

pub use agent::{Agent, RandomPlayer};
pub use clock::TurnClock;
pub use game::{Game, Gameboard, GameboardError, NO_MOVE, Player, move_to_wire};
pub use heuristic::Heuristic;
pub use minimax::{ConfigError, MinimaxPlayer, SearchConfig, SearchError, SearchTimeout};
pub use state::{Evaluator, GameState};
pub use tournament::{GameRecord, MatchSummary, Outcome, play_game, run_match};
