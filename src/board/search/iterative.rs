use super::constants::{DRAW_SCORE, INFINITY, MATE_SCORE, MATE_THRESHOLD};
use super::context::SearchContext;
use super::SearchResult;
use crate::board::{Move, MoveList};

impl SearchContext<'_> {
    /// Deepen from 1 to `max_depth`, keeping the last completed iteration.
    ///
    /// Cancellation is only honoured once depth 1 has completed, and an
    /// interrupted iteration is discarded.
    pub fn iterative_deepening(&mut self, max_depth: u32) -> SearchResult {
        let root_moves = self.board.generate_moves();
        if root_moves.is_empty() {
            self.visit();
            let score = if self.board.is_in_check() {
                -MATE_SCORE
            } else {
                DRAW_SCORE
            };
            return SearchResult {
                best_move: None,
                score,
                nodes: self.nodes,
                depth: 0,
                pv: Vec::new(),
            };
        }

        let mut result = SearchResult {
            best_move: None,
            score: DRAW_SCORE,
            nodes: 0,
            depth: 0,
            pv: Vec::new(),
        };

        for depth in 1..=max_depth {
            if self.can_abort && self.external_stop() {
                break;
            }

            let (score, best) = self.aspiration(&root_moves, result.best_move, depth, result.score);
            if self.aborted {
                break;
            }
            let Some(best) = best else {
                break;
            };

            let mut pv = self.state.pv.line(0).to_vec();
            if pv.first() != Some(&best) {
                pv = vec![best];
            }
            log::debug!(
                "depth {depth} score {score} nodes {} pv {}",
                self.nodes,
                format_line(&pv)
            );

            result = SearchResult {
                best_move: Some(best),
                score,
                nodes: self.nodes,
                depth,
                pv,
            };
            self.can_abort = true;

            // A mate proven within the horizon cannot change at greater depth
            let mate_distance = MATE_SCORE - score.abs();
            if score.abs() >= MATE_THRESHOLD && mate_distance as u32 <= depth {
                break;
            }
        }

        result.nodes = self.nodes;
        result
    }

    /// Search one depth inside a window around the previous score, widening
    /// to the full window when the result falls outside it.
    fn aspiration(
        &mut self,
        root_moves: &MoveList,
        preferred: Option<Move>,
        depth: u32,
        previous: i32,
    ) -> (i32, Option<Move>) {
        let window = self.state.params.aspiration_window;
        if depth > 1 && window > 0 && previous.abs() < MATE_THRESHOLD {
            let alpha = previous - window;
            let beta = previous + window;
            let (score, best) = self.search_root(root_moves, preferred, depth, alpha, beta);
            if self.aborted || (alpha <= score && score < beta) {
                return (score, best);
            }
            log::trace!(
                "aspiration ({alpha}, {beta}) failed at depth {depth} with {score}, re-searching"
            );
        }
        self.search_root(root_moves, preferred, depth, -INFINITY, INFINITY)
    }
}

fn format_line(moves: &[Move]) -> String {
    moves
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
