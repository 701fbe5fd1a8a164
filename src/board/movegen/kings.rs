use super::GenKind;
use crate::board::{Board, Color, Move, MoveList, Piece, Square};

impl Board {
    pub(super) fn generate_king_moves(&self, moves: &mut MoveList, us: Color, kind: GenKind) {
        let Some(from) = self.king_square(us) else {
            return;
        };
        let targets = self.tables.attacks().king(from) & !self.occupancy(us);
        self.push_targets(moves, us, Piece::King, from, targets, kind);

        if kind == GenKind::All {
            self.generate_castling_moves(moves, us, from);
        }
    }

    /// Castles whose right is held, with king and rook on their home squares
    /// and nothing between them. Attacked squares are checked at legality time.
    fn generate_castling_moves(&self, moves: &mut MoveList, us: Color, king: Square) {
        let rank = us.back_rank();
        let home = |file: usize| Square::from_index_unchecked(rank * 8 + file);
        if king != home(4) {
            return;
        }
        let rooks = self.pieces(us, Piece::Rook);

        if self.castling_rights.has(us, true)
            && rooks.contains(home(7))
            && !self.all_occupied.contains(home(5))
            && !self.all_occupied.contains(home(6))
        {
            moves.push(Move::castle(king, home(6)));
        }

        if self.castling_rights.has(us, false)
            && rooks.contains(home(0))
            && !self.all_occupied.contains(home(1))
            && !self.all_occupied.contains(home(2))
            && !self.all_occupied.contains(home(3))
        {
            moves.push(Move::castle(king, home(2)));
        }
    }

    /// The king may not castle out of check or across an attacked square.
    /// The landing square is covered by the usual king-safety test.
    pub(crate) fn castle_path_is_safe(&self, mv: Move) -> bool {
        let them = self.side_to_move.opponent();
        let crossed = Square::from_index_unchecked((mv.from().index() + mv.to().index()) / 2);
        !self.is_square_attacked(mv.from(), them) && !self.is_square_attacked(crossed, them)
    }

    /// Whether any piece of `by` attacks `sq`, looking outward from `sq`
    /// with each piece's attack pattern.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let attacks = self.tables.attacks();
        let occ = self.all_occupied;

        // A pawn of `by` attacks sq iff a pawn of the other color on sq would attack it
        if !(attacks.pawn(by.opponent(), sq) & self.pieces(by, Piece::Pawn)).is_empty() {
            return true;
        }
        if !(attacks.knight(sq) & self.pieces(by, Piece::Knight)).is_empty() {
            return true;
        }
        if !(attacks.king(sq) & self.pieces(by, Piece::King)).is_empty() {
            return true;
        }

        let queens = self.pieces(by, Piece::Queen);
        let diagonal = self.pieces(by, Piece::Bishop) | queens;
        if !(attacks.bishop(sq, occ) & diagonal).is_empty() {
            return true;
        }
        let straight = self.pieces(by, Piece::Rook) | queens;
        !(attacks.rook(sq, occ) & straight).is_empty()
    }
}
