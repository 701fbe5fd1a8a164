use super::constants::{DRAW_SCORE, MATE_SCORE, MAX_QUIESCENCE_PLY};
use super::context::SearchContext;
use super::move_order::order_tactical;

impl SearchContext<'_> {
    /// Resolve captures and promotions past the horizon.
    ///
    /// When the side to move is in check (and evasions are enabled) every
    /// move is searched and no stand-pat is allowed, so mates at the horizon
    /// are still seen.
    pub fn quiescence(&mut self, mut alpha: i32, beta: i32, ply: usize) -> i32 {
        self.state.pv.clear(ply);
        if self.visit() {
            return DRAW_SCORE;
        }
        if ply >= MAX_QUIESCENCE_PLY {
            return self.evaluate();
        }

        let evasions = self.state.params.quiescence_check_evasions && self.board.is_in_check();
        let mut best_score;
        let moves = if evasions {
            best_score = -MATE_SCORE + ply as i32;
            self.board.generate_pseudo_moves()
        } else {
            let stand_pat = self.evaluate();
            if stand_pat >= beta {
                return stand_pat;
            }
            alpha = alpha.max(stand_pat);
            best_score = stand_pat;
            self.board.generate_pseudo_tactical()
        };

        let mut ordered = if evasions {
            self.ordering(None, ply).order(&moves)
        } else {
            order_tactical(&moves)
        };

        let mut idx = 0;
        while let Some(scored) = ordered.pick_best(idx) {
            idx += 1;
            let mv = scored.mv;
            if !self.board.is_legal(mv) {
                continue;
            }

            let backup = self.board.make_move(mv);
            let score = -self.quiescence(-beta, -alpha, ply + 1);
            self.board.unmake_move(mv, backup);

            if self.aborted {
                return DRAW_SCORE;
            }

            if score > best_score {
                best_score = score;
                if score > alpha {
                    alpha = score;
                    self.state.pv.update(ply, mv);
                    if score >= beta {
                        break;
                    }
                }
            }
        }

        best_score
    }
}
