//! Per-call search state: the board being searched, node accounting and
//! cancellation.

use super::constants::{MATE_THRESHOLD, NODE_CHECK_INTERVAL};
use super::{SearchLimits, SearchState};
use crate::board::{Board, RepetitionScope};

pub(super) struct SearchContext<'a> {
    pub board: &'a mut Board,
    pub state: &'a mut SearchState,
    pub limits: &'a SearchLimits,
    pub nodes: u64,
    /// Set once cancellation is observed; every frame then unwinds
    pub aborted: bool,
    /// Cancellation is ignored until the first iteration completes
    pub can_abort: bool,
    /// History entries below this index are outside repetition scope
    pub repetition_floor: usize,
}

impl<'a> SearchContext<'a> {
    pub fn new(board: &'a mut Board, state: &'a mut SearchState, limits: &'a SearchLimits) -> Self {
        let repetition_floor = match state.params.repetition_scope {
            RepetitionScope::Game => 0,
            RepetitionScope::SearchTree => board.history_len(),
        };
        SearchContext {
            board,
            state,
            limits,
            nodes: 0,
            aborted: false,
            can_abort: false,
            repetition_floor,
        }
    }

    /// Count a node and report whether the search must unwind.
    #[inline]
    pub fn visit(&mut self) -> bool {
        self.nodes += 1;
        if self.aborted {
            return true;
        }
        if !self.can_abort {
            return false;
        }
        let limit_hit = self.limits.node_limit > 0 && self.nodes >= self.limits.node_limit;
        if limit_hit || (self.nodes % NODE_CHECK_INTERVAL == 0 && self.external_stop()) {
            self.aborted = true;
        }
        self.aborted
    }

    /// Stop flag or deadline, checked without the node interval.
    pub fn external_stop(&self) -> bool {
        self.limits.stop.is_stopped()
            || self.limits.clock.as_ref().is_some_and(|clock| clock.expired())
    }

    /// Static evaluation kept strictly inside the mate band.
    #[inline]
    pub fn evaluate(&self) -> i32 {
        self.state
            .evaluator
            .evaluate(self.board)
            .clamp(-(MATE_THRESHOLD - 1), MATE_THRESHOLD - 1)
    }

    /// Fifty-move rule or a recurrence of the current position in scope.
    /// Checkmate on the hundredth half-move still counts as mate.
    pub fn is_draw(&mut self) -> bool {
        if self.board.repetitions_at_least(1, self.repetition_floor) {
            return true;
        }
        self.board.is_fifty_move_draw() && !self.board.is_checkmate()
    }
}
