//! Contracts between the search and the game it searches.

use core::fmt::Debug;

/// A position of a two-player, turn-based game.
///
/// States are treated as immutable values: [`GameState::apply`] builds the
/// successor and leaves `self` untouched, so every branch of the search tree
/// works on its own copy.
pub trait GameState: Clone {
    /// One legal action, e.g. a column index.
    type Move: Copy + Eq + Debug;
    /// Identity of a participant.
    type Player: Copy + Eq + Debug;

    /// Legal moves for [`GameState::active_player`] in a stable order.
    ///
    /// Empty once the game has ended.
    fn available_moves(&self) -> Vec<Self::Move>;

    /// Returns the state after the active player performed `mv`.
    ///
    /// `mv` must be one of [`GameState::available_moves`].
    #[must_use]
    fn apply(&self, mv: Self::Move) -> Self;

    /// The player who moves next.
    fn active_player(&self) -> Self::Player;

    /// Returns whether no legal moves remain.
    fn is_terminal(&self) -> bool {
        self.available_moves().is_empty()
    }
}

/// Heuristic desirability of a state, seen from a fixed player.
///
/// Higher is better for `perspective`. Implementations must be pure and must
/// never return NaN.
pub trait Evaluator<S: GameState> {
    fn score(&self, state: &S, perspective: S::Player) -> f64;
}

impl<S, F> Evaluator<S> for F
where
    S: GameState,
    F: Fn(&S, S::Player) -> f64,
{
    fn score(&self, state: &S, perspective: S::Player) -> f64 {
        self(state, perspective)
    }
}
