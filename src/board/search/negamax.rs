//! Fail-soft alpha-beta negamax and the root move loop.

use super::constants::{DRAW_SCORE, INFINITY, MATE_SCORE, MATE_THRESHOLD};
use super::context::SearchContext;
use super::move_order::OrderingContext;
use crate::board::{Move, MoveList, MAX_PLY};
use crate::tt::BoundType;

/// Mate scores are stored relative to the node so they stay valid when the
/// same position is reached at another ply.
#[inline]
pub(crate) fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

#[inline]
pub(crate) fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

/// Bound kind of a fail-soft result relative to the window it was searched with
#[inline]
fn bound_for(score: i32, alpha: i32, beta: i32) -> BoundType {
    if score >= beta {
        BoundType::LowerBound
    } else if score > alpha {
        BoundType::Exact
    } else {
        BoundType::UpperBound
    }
}

impl SearchContext<'_> {
    /// Search every root move at `depth` within `(alpha, beta)`.
    ///
    /// Each move is searched one point below the running best so that equal
    /// scores come back exact; ties go to the smallest move encoding, which
    /// makes the chosen move independent of ordering. Returns the best score
    /// and move; the score is meaningless if the search was aborted.
    pub fn search_root(
        &mut self,
        root_moves: &MoveList,
        preferred: Option<Move>,
        depth: u32,
        alpha: i32,
        beta: i32,
    ) -> (i32, Option<Move>) {
        self.state.pv.clear(0);
        self.visit();

        let hash = self.board.hash();
        let tt_move = preferred.or_else(|| self.probe_move(hash));
        let mut ordered = self.ordering(tt_move, 0).order(root_moves);

        let mut best_score = -INFINITY;
        let mut best_move: Option<Move> = None;
        let mut idx = 0;
        while let Some(scored) = ordered.pick_best(idx) {
            idx += 1;
            let mv = scored.mv;
            let floor = alpha.max(best_score) - 1;

            let backup = self.board.make_move(mv);
            let score = -self.negamax(depth - 1, -beta, -floor, 1);
            self.board.unmake_move(mv, backup);

            if self.aborted {
                return (best_score, best_move);
            }

            let better = score > best_score
                || (score == best_score && best_move.is_some_and(|b| mv.as_u32() < b.as_u32()));
            if better {
                best_score = score;
                best_move = Some(mv);
                self.state.pv.update(0, mv);
                if score >= beta {
                    break;
                }
            }
        }

        if self.state.params.use_transposition_table {
            let bound = bound_for(best_score, alpha, beta);
            self.state
                .tt
                .store(hash, depth, score_to_tt(best_score, 0), bound, best_move);
        }
        (best_score, best_move)
    }

    /// Negamax below the root. `ply` is the distance from the root.
    pub fn negamax(&mut self, depth: u32, mut alpha: i32, beta: i32, ply: usize) -> i32 {
        self.state.pv.clear(ply);
        if self.visit() {
            return DRAW_SCORE;
        }
        if self.is_draw() {
            return DRAW_SCORE;
        }
        if ply >= MAX_PLY {
            return self.evaluate();
        }
        if depth == 0 {
            return self.quiescence(alpha, beta, ply);
        }

        let hash = self.board.hash();
        let mut tt_move = None;
        if self.state.params.use_transposition_table {
            if let Some(entry) = self.state.tt.probe(hash) {
                tt_move = entry.best_move;
                // Deeper entries only seed ordering; their scores are not this depth's value.
                if entry.depth() == depth {
                    let score = score_from_tt(entry.score(), ply);
                    let cutoff = match entry.bound_type {
                        BoundType::Exact => true,
                        BoundType::LowerBound => score >= beta,
                        BoundType::UpperBound => score <= alpha,
                    };
                    if cutoff {
                        return score;
                    }
                }
            }
        }

        let in_check = self.board.is_in_check();
        let moves = self.board.generate_pseudo_moves();
        let mut ordered = self.ordering(tt_move, ply).order(&moves);

        let original_alpha = alpha;
        let mut best_score = -INFINITY;
        let mut best_move: Option<Move> = None;
        let mut legal = 0usize;
        let mut idx = 0;
        while let Some(scored) = ordered.pick_best(idx) {
            idx += 1;
            let mv = scored.mv;
            if !self.board.is_legal(mv) {
                continue;
            }
            legal += 1;

            let backup = self.board.make_move(mv);
            let score = -self.negamax(depth - 1, -beta, -alpha, ply + 1);
            self.board.unmake_move(mv, backup);

            if self.aborted {
                return DRAW_SCORE;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
                if score > alpha {
                    alpha = score;
                    self.state.pv.update(ply, mv);
                    if score >= beta {
                        self.record_cutoff(mv, depth, ply);
                        break;
                    }
                }
            }
        }

        if legal == 0 {
            return if in_check {
                -MATE_SCORE + ply as i32
            } else {
                DRAW_SCORE
            };
        }

        if self.state.params.use_transposition_table {
            let bound = bound_for(best_score, original_alpha, beta);
            self.state
                .tt
                .store(hash, depth, score_to_tt(best_score, ply), bound, best_move);
        }
        best_score
    }

    fn probe_move(&self, hash: u64) -> Option<Move> {
        if !self.state.params.use_transposition_table {
            return None;
        }
        self.state.tt.probe(hash).and_then(|entry| entry.best_move)
    }

    pub(super) fn ordering(&self, tt_move: Option<Move>, ply: usize) -> OrderingContext<'_> {
        let params = &self.state.params;
        OrderingContext {
            tt_move,
            killers: params.use_killers.then_some(&self.state.killers),
            history: params.use_history.then_some(&self.state.history),
            side: self.board.side_to_move(),
            ply,
        }
    }

    fn record_cutoff(&mut self, mv: Move, depth: u32, ply: usize) {
        if !mv.is_quiet() {
            return;
        }
        if self.state.params.use_killers {
            self.state.killers.update(ply, mv);
        }
        if self.state.params.use_history {
            let side = self.board.side_to_move();
            self.state.history.update(side, mv, depth);
        }
    }
}
