//! Fixed-depth minimax search with cooperative time checks.
//!
//! Every node of the search asks the caller's clock how much time is left.
//! Once it drops below the configured threshold the whole search unwinds
//! through `?` and [`MinimaxPlayer::search`] reports "no move".

use log::{debug, warn};

use crate::heuristic::Heuristic;
use crate::state::{Evaluator, GameState};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("search depth must be at least one ply")]
    ZeroDepth,
    #[error("timeout threshold must be a positive number of milliseconds, got {0}")]
    InvalidThreshold(f64),
}

/// Per-agent search parameters. Fixed for the lifetime of the agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    search_depth: usize,
    timeout_threshold: f64,
}

impl SearchConfig {
    pub const DEFAULT_DEPTH: usize = 3;
    pub const DEFAULT_TIMEOUT_THRESHOLD: f64 = 10.0;

    /// `search_depth` is the number of plies below the root, and
    /// `timeout_threshold` the number of milliseconds that must still be left
    /// on the clock for the search to go on.
    pub fn new(search_depth: usize, timeout_threshold: f64) -> Result<Self, ConfigError> {
        if search_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if !timeout_threshold.is_finite() || timeout_threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold(timeout_threshold));
        }
        Ok(Self {
            search_depth,
            timeout_threshold,
        })
    }

    #[must_use]
    pub const fn search_depth(&self) -> usize {
        self.search_depth
    }

    #[must_use]
    pub const fn timeout_threshold(&self) -> f64 {
        self.timeout_threshold
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_depth: Self::DEFAULT_DEPTH,
            timeout_threshold: Self::DEFAULT_TIMEOUT_THRESHOLD,
        }
    }
}

/// The clock reported less time than the configured threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("remaining time fell below the timeout threshold")]
pub struct SearchTimeout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("search aborted: {0}")]
    Timeout(#[from] SearchTimeout),
    #[error("no legal moves at the root")]
    NoLegalMoves,
}

/// Minimax value of a node, or the abort signal.
type Value = Result<f64, SearchTimeout>;

/// What a node turned out to be once the clock was checked.
enum Expansion<M> {
    Leaf(f64),
    Inner(Vec<M>),
}

/// State of a single `search` call. Dropped when the call returns.
struct Search<'a, S: GameState, E> {
    evaluator: &'a E,
    time_left: &'a dyn Fn() -> f64,
    timeout_threshold: f64,
    /// Player the whole tree is scored for.
    perspective: S::Player,
    nodes: u64,
}

impl<S, E> Search<'_, S, E>
where
    S: GameState,
    E: Evaluator<S>,
{
    fn check_time(&self) -> Result<(), SearchTimeout> {
        if (self.time_left)() < self.timeout_threshold {
            Err(SearchTimeout)
        } else {
            Ok(())
        }
    }

    /// Folds the values of all successors with `better`, starting from
    /// `initial_score`. Earlier moves win ties.
    fn minimax_step(
        &mut self,
        state: &S,
        moves: Vec<S::Move>,
        depth: usize,
        initial_score: f64,
        better_score: fn(f64, f64) -> bool,
        child_value: fn(&mut Self, &S, usize) -> Value,
    ) -> Value {
        debug_assert!(!moves.is_empty());

        let mut best_score = initial_score;
        for mv in moves {
            let score = child_value(self, &state.apply(mv), depth - 1)?;
            if better_score(score, best_score) {
                best_score = score;
            }
        }
        Ok(best_score)
    }

    /// Checks the clock, then scores `state` if it is terminal or the depth is
    /// used up.
    fn enter(&mut self, state: &S, depth: usize) -> Result<Expansion<S::Move>, SearchTimeout> {
        self.check_time()?;
        self.nodes += 1;

        let moves = state.available_moves();
        if depth == 0 || moves.is_empty() {
            return Ok(Expansion::Leaf(
                self.evaluator.score(state, self.perspective),
            ));
        }
        Ok(Expansion::Inner(moves))
    }

    fn max_value(&mut self, state: &S, depth: usize) -> Value {
        match self.enter(state, depth)? {
            Expansion::Leaf(score) => Ok(score),
            Expansion::Inner(moves) => self.minimax_step(
                state,
                moves,
                depth,
                f64::NEG_INFINITY,
                |new, best| new > best,
                Self::min_value,
            ),
        }
    }

    fn min_value(&mut self, state: &S, depth: usize) -> Value {
        match self.enter(state, depth)? {
            Expansion::Leaf(score) => Ok(score),
            Expansion::Inner(moves) => self.minimax_step(
                state,
                moves,
                depth,
                f64::INFINITY,
                |new, best| new < best,
                Self::max_value,
            ),
        }
    }

    /// Picks the root move whose opponent reply is best for us.
    fn minimax(&mut self, root: &S, depth: usize) -> Result<S::Move, SearchError> {
        self.check_time()?;

        let mut best: Option<(S::Move, f64)> = None;
        for mv in root.available_moves() {
            let score = self.min_value(&root.apply(mv), depth - 1)?;
            // strict comparison: the first of equally good moves is kept
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        best.map(|(mv, _)| mv).ok_or(SearchError::NoLegalMoves)
    }
}

/// Game-playing agent that chooses its move with fixed-depth minimax.
#[derive(Debug, Clone)]
pub struct MinimaxPlayer<E = Heuristic> {
    config: SearchConfig,
    evaluator: E,
}

impl<E> MinimaxPlayer<E> {
    #[must_use]
    pub const fn new(config: SearchConfig, evaluator: E) -> Self {
        Self { config, evaluator }
    }

    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[must_use]
    pub const fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Searches `state` and returns the best move found.
    ///
    /// `time_left` returns the milliseconds left in the current turn. It is
    /// queried at every node, so it must track a real clock.
    pub fn try_search<S>(
        &self,
        state: &S,
        time_left: impl Fn() -> f64,
    ) -> Result<S::Move, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let mut search: Search<'_, S, E> = Search {
            evaluator: &self.evaluator,
            time_left: &time_left,
            timeout_threshold: self.config.timeout_threshold,
            perspective: state.active_player(),
            nodes: 0,
        };

        let result = search.minimax(state, self.config.search_depth);
        debug!(
            "minimax depth {} for {:?}: {} nodes, result {:?}",
            self.config.search_depth, search.perspective, search.nodes, result
        );
        result
    }

    /// Like [`MinimaxPlayer::try_search`], but returns `None` if there is no
    /// legal move or the clock ran out first.
    pub fn search<S>(&self, state: &S, time_left: impl Fn() -> f64) -> Option<S::Move>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        match self.try_search(state, time_left) {
            Ok(mv) => Some(mv),
            Err(err @ SearchError::Timeout(_)) => {
                warn!("{err}");
                None
            }
            Err(SearchError::NoLegalMoves) => None,
        }
    }
}

impl Default for MinimaxPlayer<Heuristic> {
    fn default() -> Self {
        Self::new(SearchConfig::default(), Heuristic::new())
    }
}
