//! Default board evaluation for Connect Four.

use crate::game::{Game, Player, SERIES_LEN};
use crate::state::Evaluator;

/// Score of a decided game. Dominates every non-terminal score.
pub const WIN_SCORE: f64 = 1_000_000.0;

const THREE_OPEN: f64 = 5.0;
const TWO_OPEN: f64 = 2.0;
const OPPONENT_THREE_OPEN: f64 = -4.0;
const CENTRE_CHIP: f64 = 3.0;

/// Window counting heuristic.
///
/// Looks at every run of four cells and rewards runs that only one player can
/// still complete. Chips in the centre column take part in the most runs and
/// get a flat bonus on top.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Heuristic;

impl Heuristic {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn score_window(window: &[Option<Player>; SERIES_LEN], perspective: Player) -> f64 {
        let own = window.iter().filter(|&&c| c == Some(perspective)).count();
        let theirs = window
            .iter()
            .filter(|&&c| c == Some(perspective.opponent()))
            .count();
        let empty = SERIES_LEN - own - theirs;

        match (own, theirs, empty) {
            (3, 0, 1) => THREE_OPEN,
            (2, 0, 2) => TWO_OPEN,
            (0, 3, 1) => OPPONENT_THREE_OPEN,
            _ => 0.0,
        }
    }

    /// Score of `game` for `perspective`, independent of whose turn it is.
    #[must_use]
    pub fn get_score<const W: usize, const H: usize>(
        &self,
        game: &Game<W, H>,
        perspective: Player,
    ) -> f64 {
        match game.winner() {
            Some(winner) if winner == perspective => return WIN_SCORE,
            Some(_) => return -WIN_SCORE,
            None if game.is_draw() => return 0.0,
            None => {}
        }

        let board = game.board();
        let centre = W / 2;
        #[allow(clippy::cast_precision_loss)]
        let centre_balance = board.chips_in_column(centre, perspective) as f64
            - board.chips_in_column(centre, perspective.opponent()) as f64;

        board
            .windows()
            .map(|window| Self::score_window(&window, perspective))
            .sum::<f64>()
            + CENTRE_CHIP * centre_balance
    }
}

impl<const W: usize, const H: usize> Evaluator<Game<W, H>> for Heuristic {
    fn score(&self, state: &Game<W, H>, perspective: Player) -> f64 {
        self.get_score(state, perspective)
    }
}
