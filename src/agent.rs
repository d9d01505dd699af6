//! Players that can take part in a game loop.

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::minimax::MinimaxPlayer;
use crate::state::{Evaluator, GameState};

pub trait Agent<S: GameState>: Send + Sync {
    fn name(&self) -> String;

    /// Picks a move for the active player of `state`, or `None` if it can't.
    ///
    /// `time_left` returns the milliseconds left in this turn.
    fn choose_move(&self, state: &S, time_left: &dyn Fn() -> f64) -> Option<S::Move>;
}

impl<S, E> Agent<S> for MinimaxPlayer<E>
where
    S: GameState,
    E: Evaluator<S> + Send + Sync,
{
    fn name(&self) -> String {
        format!("minimax(depth={})", self.config().search_depth())
    }

    fn choose_move(&self, state: &S, time_left: &dyn Fn() -> f64) -> Option<S::Move> {
        self.search(state, time_left)
    }
}

/// Picks uniformly among the legal moves. Never looks at the clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPlayer;

impl<S: GameState> Agent<S> for RandomPlayer {
    fn name(&self) -> String {
        "random".to_owned()
    }

    fn choose_move(&self, state: &S, _time_left: &dyn Fn() -> f64) -> Option<S::Move> {
        state.available_moves().choose(&mut thread_rng()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::minimax::SearchConfig;

    #[test]
    fn random_player_only_picks_legal_columns() {
        let game = Game::<7, 6>::from_columns(&[0, 0, 0, 0, 0, 0]).unwrap();
        for _ in 0..50 {
            let col = RandomPlayer.choose_move(&game, &|| 1_000.0).unwrap();
            assert!((1..7).contains(&col));
        }
    }

    #[test]
    fn random_player_passes_on_finished_game() {
        let game = Game::<7, 6>::from_columns(&[0, 1, 0, 1, 0, 1, 0]).unwrap();
        assert_eq!(RandomPlayer.choose_move(&game, &|| 1_000.0), None);
    }

    #[test]
    fn minimax_agent_reports_depth() {
        let agent = MinimaxPlayer::new(SearchConfig::new(4, 5.0).unwrap(), crate::Heuristic);
        assert_eq!(Agent::<Game>::name(&agent), "minimax(depth=4)");
    }
}
