use super::GenKind;
use crate::board::{Bitboard, Board, Color, Move, MoveList, Piece, Square};

impl Board {
    /// Attack set of a non-pawn piece standing on `from` given the current occupancy
    #[inline]
    fn piece_attacks(&self, piece: Piece, from: Square) -> Bitboard {
        let attacks = self.tables.attacks();
        match piece {
            Piece::Knight => attacks.knight(from),
            Piece::Bishop => attacks.bishop(from, self.all_occupied),
            Piece::Rook => attacks.rook(from, self.all_occupied),
            Piece::Queen => attacks.queen(from, self.all_occupied),
            Piece::King => attacks.king(from),
            Piece::Pawn => attacks.pawn(self.side_to_move, from),
        }
    }

    /// Knight, bishop, rook and queen moves
    pub(super) fn generate_piece_moves(
        &self,
        moves: &mut MoveList,
        us: Color,
        piece: Piece,
        kind: GenKind,
    ) {
        for from in self.pieces(us, piece) {
            let targets = self.piece_attacks(piece, from) & !self.occupancy(us);
            self.push_targets(moves, us, piece, from, targets, kind);
        }
    }

    /// Emit one move per target square; captures record the victim.
    pub(super) fn push_targets(
        &self,
        moves: &mut MoveList,
        us: Color,
        piece: Piece,
        from: Square,
        targets: Bitboard,
        kind: GenKind,
    ) {
        let them = us.opponent();
        for to in targets & self.occupancy(them) {
            if let Some(captured) = self.piece_of(them, to) {
                moves.push(Move::capture(from, to, piece, captured));
            }
        }
        if kind == GenKind::All {
            for to in targets & !self.all_occupied {
                moves.push(Move::quiet(from, to, piece));
            }
        }
    }
}
