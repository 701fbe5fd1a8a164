//! Alpha-beta search.
//!
//! This module implements:
//! - Iterative deepening with aspiration windows
//! - Fail-soft negamax with transposition table cutoffs
//! - Quiescence search over captures, promotions and check evasions
//! - Move ordering (TT move, MVV-LVA, killers, history)
//! - Triangular principal variation tracking
//!
//! A search owns nothing but its `SearchState`; the board is borrowed
//! mutably for the whole call and is restored move by move on the way out.

pub mod constants;
mod context;
mod iterative;
mod move_order;
mod negamax;
pub mod params;
mod pv;
mod quiescence;
pub mod tables;

use std::sync::Arc;
use std::time::{Duration, Instant};

pub use constants::{DRAW_SCORE, INFINITY, MATE_SCORE, MATE_THRESHOLD};
pub use params::SearchParams;
pub use tables::{HistoryTable, KillerTable};

use self::context::SearchContext;
use self::pv::PvTable;
use crate::board::error::OptionError;
use crate::board::eval::{Evaluator, MaterialEvaluator};
use crate::board::{Board, Move, MAX_PLY};
use crate::sync::{SearchClock, StopFlag};
use crate::tt::TranspositionTable;

/// Everything that persists between searches of one engine instance.
pub struct SearchState {
    pub(crate) tt: TranspositionTable,
    pub(crate) killers: KillerTable,
    pub(crate) history: HistoryTable,
    pub(crate) pv: PvTable,
    pub(crate) params: SearchParams,
    pub(crate) evaluator: Box<dyn Evaluator>,
}

impl SearchState {
    #[must_use]
    pub fn new(params: SearchParams) -> Self {
        Self::with_evaluator(params, MaterialEvaluator)
    }

    /// Search state scoring leaves with a custom evaluator
    #[must_use]
    pub fn with_evaluator(params: SearchParams, evaluator: impl Evaluator + 'static) -> Self {
        SearchState {
            tt: TranspositionTable::new(params.hash_mb),
            killers: KillerTable::default(),
            history: HistoryTable::default(),
            pv: PvTable::default(),
            params,
            evaluator: Box::new(evaluator),
        }
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Replace the parameters, reallocating the table if its size changed.
    pub fn set_params(&mut self, params: SearchParams) {
        if params.hash_mb != self.params.hash_mb {
            self.resize_tt(params.hash_mb);
        }
        self.params = params;
    }

    /// Apply a textual option, see [`SearchParams::set_option`].
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionError> {
        let mut params = self.params.clone();
        params.set_option(name, value)?;
        self.set_params(params);
        Ok(())
    }

    pub fn set_evaluator(&mut self, evaluator: impl Evaluator + 'static) {
        self.evaluator = Box::new(evaluator);
    }

    #[must_use]
    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        self.tt.hashfull_per_mille()
    }

    /// Forget everything learned from previous searches.
    pub fn clear(&mut self) {
        self.tt.clear();
        self.killers.reset();
        self.history.reset();
    }

    fn resize_tt(&mut self, hash_mb: usize) {
        self.tt = TranspositionTable::new(hash_mb);
        log::debug!(
            "transposition table resized to {hash_mb} MiB ({} slots)",
            self.tt.capacity()
        );
    }

    fn new_search(&mut self) {
        self.killers.reset();
        self.history.age();
    }
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::new(SearchParams::default())
    }
}

/// Budget for one search. Every limit that is set applies; the search stops
/// at whichever is reached first.
#[derive(Clone, Debug)]
pub struct SearchLimits {
    pub max_depth: u32,
    pub clock: Option<Arc<SearchClock>>,
    pub stop: StopFlag,
    /// 0 means unlimited
    pub node_limit: u64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_depth: (MAX_PLY - 1) as u32,
            clock: None,
            stop: StopFlag::new(),
            node_limit: 0,
        }
    }
}

impl SearchLimits {
    /// Fixed-depth search
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchLimits {
            max_depth,
            ..Default::default()
        }
    }

    /// Search until `budget` has elapsed
    #[must_use]
    pub fn move_time(budget: Duration) -> Self {
        Self::with_clock(Arc::new(SearchClock::with_budget(budget)))
    }

    /// Search until the wall clock reaches `deadline`
    #[must_use]
    pub fn deadline(deadline: Instant) -> Self {
        Self::with_clock(Arc::new(SearchClock::with_deadline(deadline)))
    }

    /// Search against a clock another thread may adjust
    #[must_use]
    pub fn with_clock(clock: Arc<SearchClock>) -> Self {
        SearchLimits {
            clock: Some(clock),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_stop(mut self, stop: StopFlag) -> Self {
        self.stop = stop;
        self
    }

    #[must_use]
    pub fn with_nodes(mut self, node_limit: u64) -> Self {
        self.node_limit = node_limit;
        self
    }

    #[must_use]
    pub fn with_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Outcome of the deepest completed iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the root has no legal move
    pub best_move: Option<Move>,
    /// Relative to the side to move at the root
    pub score: i32,
    pub nodes: u64,
    pub depth: u32,
    pub pv: Vec<Move>,
}

impl SearchResult {
    /// Full moves to mate: positive when the side to move mates, negative
    /// when it is being mated, `None` for ordinary scores.
    #[must_use]
    pub fn mate_in(&self) -> Option<i32> {
        if self.score >= MATE_THRESHOLD {
            Some((MATE_SCORE - self.score + 1) / 2)
        } else if self.score <= -MATE_THRESHOLD {
            Some(-(MATE_SCORE + self.score) / 2)
        } else {
            None
        }
    }
}

/// Run iterative deepening on `board` within `limits`.
///
/// The board is returned to its original state. A position without legal
/// moves yields the mate or stalemate score with an empty PV. Depth requests
/// are clamped to `1..=params.max_depth`.
pub fn search(board: &mut Board, state: &mut SearchState, limits: &SearchLimits) -> SearchResult {
    let max_depth = limits
        .max_depth
        .min(state.params.max_depth)
        .clamp(1, (MAX_PLY - 1) as u32);
    let start = Instant::now();
    state.new_search();

    let result = SearchContext::new(board, state, limits).iterative_deepening(max_depth);

    log::debug!(
        "search finished: best {} score {} depth {} nodes {} in {:?}",
        result.best_move.map_or_else(|| "none".to_string(), |m| m.to_string()),
        result.score,
        result.depth,
        result.nodes,
        start.elapsed()
    );
    result
}

/// Fixed-depth search
pub fn find_best_move(board: &mut Board, state: &mut SearchState, depth: u32) -> SearchResult {
    search(board, state, &SearchLimits::depth(depth))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(score: i32) -> SearchResult {
        SearchResult {
            best_move: None,
            score,
            nodes: 0,
            depth: 1,
            pv: Vec::new(),
        }
    }

    #[test]
    fn mate_in_moves() {
        assert_eq!(result_with(MATE_SCORE - 1).mate_in(), Some(1));
        assert_eq!(result_with(MATE_SCORE - 3).mate_in(), Some(2));
        assert_eq!(result_with(-MATE_SCORE + 2).mate_in(), Some(-1));
        assert_eq!(result_with(-MATE_SCORE).mate_in(), Some(0));
        assert_eq!(result_with(250).mate_in(), None);
    }

    #[test]
    fn set_option_resizes_table() {
        let mut state = SearchState::new(SearchParams {
            hash_mb: 1,
            ..SearchParams::default()
        });
        let small = state.tt().capacity();
        state.set_option("Hash", "2").unwrap();
        assert_eq!(state.tt().capacity(), small * 2);
        assert!(state.set_option("Hash", "zero").is_err());
        assert_eq!(state.params().hash_mb, 2);
    }

    #[test]
    fn limits_builders() {
        let stop = StopFlag::new();
        let limits = SearchLimits::move_time(Duration::from_millis(50))
            .with_stop(stop.clone())
            .with_nodes(1000)
            .with_depth(7);
        assert!(limits.clock.is_some());
        assert_eq!(limits.node_limit, 1000);
        assert_eq!(limits.max_depth, 7);
        stop.stop();
        assert!(limits.stop.is_stopped());
    }
}
