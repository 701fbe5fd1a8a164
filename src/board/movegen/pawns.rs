use super::GenKind;
use crate::board::{Bitboard, Board, Color, Move, MoveList, Piece, Square, PROMOTION_PIECES};

#[inline]
fn push_forward(bb: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => bb.shift_north(),
        Color::Black => bb.shift_south(),
    }
}

fn push_promotions(moves: &mut MoveList, from: Square, to: Square, captured: Option<Piece>) {
    for promoted in PROMOTION_PIECES {
        moves.push(Move::promotion(from, to, promoted, captured));
    }
}

impl Board {
    pub(super) fn generate_pawn_moves(&self, moves: &mut MoveList, us: Color, kind: GenKind) {
        let them = us.opponent();
        let empty = !self.all_occupied;
        let enemies = self.occupancy(them);
        let promotion_rank = us.pawn_promotion_rank();

        for from in self.pieces(us, Piece::Pawn) {
            let single = push_forward(from.bitboard(), us) & empty;
            if let Some(to) = single.lsb() {
                if to.rank() == promotion_rank {
                    push_promotions(moves, from, to, None);
                } else if kind == GenKind::All {
                    moves.push(Move::quiet(from, to, Piece::Pawn));
                    if from.rank() == us.pawn_start_rank() {
                        if let Some(double) = (push_forward(single, us) & empty).lsb() {
                            moves.push(Move::double_push(from, double));
                        }
                    }
                }
            }

            let attacks = self.tables.attacks().pawn(us, from);
            for to in attacks & enemies {
                let Some(captured) = self.piece_of(them, to) else {
                    continue;
                };
                if to.rank() == promotion_rank {
                    push_promotions(moves, from, to, Some(captured));
                } else {
                    moves.push(Move::capture(from, to, Piece::Pawn, captured));
                }
            }

            if let Some(ep) = self.en_passant_target {
                let victim = crate::board::make_unmake::en_passant_victim(ep, us);
                if attacks.contains(ep) && self.pieces(them, Piece::Pawn).contains(victim) {
                    moves.push(Move::en_passant(from, ep));
                }
            }
        }
    }
}
