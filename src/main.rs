#![deny(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::must_use_candidate,
    // clippy::restriction,
    // clippy::pedantic
)]
#![allow(
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::fallible_impl_from,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions
)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::all)]

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use connect4_agent::{
    Game, GameState, Heuristic, MinimaxPlayer, Player, SearchConfig, TurnClock, move_to_wire,
};

/// Play Connect Four against the computer.
#[derive(Debug, Parser)]
#[command(name = "connect4", version)]
struct Args {
    /// Plies the computer looks ahead
    #[arg(long, default_value_t = SearchConfig::DEFAULT_DEPTH)]
    depth: usize,

    /// Milliseconds that must remain on the clock for the search to continue
    #[arg(long, default_value_t = SearchConfig::DEFAULT_TIMEOUT_THRESHOLD)]
    timeout_threshold: f64,

    /// Thinking time per computer turn in milliseconds
    #[arg(long, default_value_t = 1000)]
    turn_ms: u64,

    /// Let the computer make the first move
    #[arg(long)]
    computer_first: bool,
}

/// Reads a 1-based column from stdin until the input names a legal move.
fn read_column(game: &Game, input: &mut impl BufRead) -> anyhow::Result<usize> {
    let legal = game.available_moves();
    loop {
        print!("Choose your move (column):");
        for col in &legal {
            print!(" {}", col + 1);
        }
        println!();
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read move")? == 0 {
            bail!("stdin closed");
        }

        match line.trim().parse::<usize>() {
            // adapt to index
            Ok(col) if col >= 1 && legal.contains(&(col - 1)) => return Ok(col - 1),
            _ => println!("'{}' is not a legal column.", line.trim()),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SearchConfig::new(args.depth, args.timeout_threshold)?;
    let computer = MinimaxPlayer::new(config, Heuristic::new());
    let turn_budget = Duration::from_millis(args.turn_ms);

    let human = if args.computer_first {
        Player::Player2
    } else {
        Player::Player1
    };
    let mut game = Game::<7, 6>::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Let's play Connect Four against the computer. You are {human}.");
    while !game.is_over() {
        println!("----------------");
        println!("{}", game.board());
        println!();

        let column = if game.active() == human {
            read_column(&game, &mut input)?
        } else {
            let clock = TurnClock::start(turn_budget);
            let choice = computer.search(&game, clock.probe());
            println!(
                "Computer chose column {} after {:?}",
                move_to_wire(choice.map(|col| col + 1)),
                clock.elapsed()
            );
            match choice {
                Some(col) => col,
                None => {
                    println!("Computer ran out of time. You won!");
                    return Ok(());
                }
            }
        };

        game.play(column)?;
    }

    println!("----------------");
    println!("{}", game.board());
    match game.winner() {
        Some(winner) if winner == human => println!("You won!"),
        Some(_) => println!("Computer won!"),
        None => println!("Gameover: draw"),
    }
    Ok(())
}
