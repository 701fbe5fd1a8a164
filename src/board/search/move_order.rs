//! Move ordering utilities for search.

use super::constants::{
    CAPTURE_SCORE, KILLER1_SCORE, KILLER2_SCORE, PROMOTION_SCORE, TT_MOVE_SCORE,
};
use super::tables::{HistoryTable, KillerTable};
use crate::board::{Color, Move, MoveList, Piece, ScoredMoveList};

/// Most valuable victim first, cheapest attacker breaking ties.
#[inline]
pub fn mvv_lva(victim: Piece, attacker: Piece) -> i32 {
    victim.index() as i32 * 8 + (5 - attacker.index() as i32)
}

/// Score for captures and promotions, 0 for quiet moves.
#[inline]
pub fn tactical_score(mv: Move) -> i32 {
    let mut score = 0;
    if let Some(victim) = mv.captured() {
        score += CAPTURE_SCORE + mvv_lva(victim, mv.piece());
    }
    if let Some(promoted) = mv.promotion_piece() {
        if score == 0 {
            score = PROMOTION_SCORE;
        }
        score += promoted.index() as i32;
    }
    score
}

/// Heuristics consulted when ordering a node's moves. Disabled heuristics
/// are `None`.
pub struct OrderingContext<'a> {
    pub tt_move: Option<Move>,
    pub killers: Option<&'a KillerTable>,
    pub history: Option<&'a HistoryTable>,
    pub side: Color,
    pub ply: usize,
}

impl OrderingContext<'_> {
    pub fn score(&self, mv: Move) -> i32 {
        if self.tt_move == Some(mv) {
            return TT_MOVE_SCORE;
        }
        let tactical = tactical_score(mv);
        if tactical != 0 {
            return tactical;
        }
        if let Some(killers) = self.killers {
            if killers.primary(self.ply) == mv {
                return KILLER1_SCORE;
            }
            if killers.secondary(self.ply) == mv {
                return KILLER2_SCORE;
            }
        }
        self.history.map_or(0, |h| h.score(self.side, mv))
    }

    pub fn order(&self, moves: &MoveList) -> ScoredMoveList {
        let mut scored = ScoredMoveList::new();
        for &mv in moves {
            scored.push(mv, self.score(mv));
        }
        scored
    }
}

/// Captures and promotions ordered for quiescence
pub fn order_tactical(moves: &MoveList) -> ScoredMoveList {
    let mut scored = ScoredMoveList::new();
    for &mv in moves {
        scored.push(mv, tactical_score(mv));
    }
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn victims_dominate_attackers() {
        assert!(mvv_lva(Piece::Queen, Piece::King) > mvv_lva(Piece::Rook, Piece::Pawn));
        assert!(mvv_lva(Piece::Rook, Piece::Pawn) > mvv_lva(Piece::Rook, Piece::Queen));
    }

    #[test]
    fn priority_bands() {
        let tt = Move::quiet(sq("g1"), sq("f3"), Piece::Knight);
        let capture = Move::capture(sq("e4"), sq("d5"), Piece::Pawn, Piece::Pawn);
        let promo = Move::promotion(sq("a7"), sq("a8"), Piece::Queen, None);
        let killer = Move::quiet(sq("b1"), sq("c3"), Piece::Knight);
        let quiet = Move::quiet(sq("h2"), sq("h3"), Piece::Pawn);

        let mut killers = KillerTable::default();
        killers.update(0, killer);
        let mut history = HistoryTable::default();
        history.update(Color::White, quiet, 40);

        let ctx = OrderingContext {
            tt_move: Some(tt),
            killers: Some(&killers),
            history: Some(&history),
            side: Color::White,
            ply: 0,
        };
        let scores: Vec<i32> = [tt, capture, promo, killer, quiet]
            .iter()
            .map(|&m| ctx.score(m))
            .collect();
        assert!(scores.windows(2).all(|w| w[0] > w[1]), "{scores:?}");
        assert!(scores[4] > 0);

        let plain = OrderingContext {
            tt_move: None,
            killers: None,
            history: None,
            side: Color::White,
            ply: 0,
        };
        assert_eq!(plain.score(killer), 0);
        assert_eq!(plain.score(quiet), 0);
    }
}
