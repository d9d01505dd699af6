use std::time::Duration;

use clap::{Parser, ValueEnum};
use connect4_agent::{Agent, Game, Heuristic, MinimaxPlayer, RandomPlayer, SearchConfig, run_match};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Opponent {
    Minimax,
    Random,
}

/// Pits the minimax agent against an opponent over many games.
#[derive(Debug, Parser)]
#[command(name = "connect4-tournament", version)]
struct Args {
    /// Number of games; the starting side alternates
    #[arg(long, default_value_t = 20)]
    games: usize,

    /// Search depth of the minimax agent
    #[arg(long, default_value_t = SearchConfig::DEFAULT_DEPTH)]
    depth: usize,

    /// Opponent kind
    #[arg(long, value_enum, default_value_t = Opponent::Random)]
    opponent: Opponent,

    /// Search depth of the opponent when it is a minimax agent
    #[arg(long, default_value_t = 1)]
    opponent_depth: usize,

    /// Thinking time per turn in milliseconds
    #[arg(long, default_value_t = 150)]
    turn_ms: u64,

    /// Milliseconds that must remain on the clock for a search to continue
    #[arg(long, default_value_t = SearchConfig::DEFAULT_TIMEOUT_THRESHOLD)]
    timeout_threshold: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let agent = MinimaxPlayer::new(
        SearchConfig::new(args.depth, args.timeout_threshold)?,
        Heuristic::new(),
    );
    let opponent: Box<dyn Agent<Game>> = match args.opponent {
        Opponent::Random => Box::new(RandomPlayer),
        Opponent::Minimax => Box::new(MinimaxPlayer::new(
            SearchConfig::new(args.opponent_depth, args.timeout_threshold)?,
            Heuristic::new(),
        )),
    };

    let summary = run_match(
        &agent,
        opponent.as_ref(),
        args.games,
        Duration::from_millis(args.turn_ms),
    );
    println!("{summary}");
    Ok(())
}
