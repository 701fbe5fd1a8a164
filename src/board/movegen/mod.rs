mod kings;
mod pawns;
mod pieces;

use super::{Board, Color, Move, MoveList, Piece};

/// Which moves a generation pass emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GenKind {
    All,
    /// Captures (en passant included) and every promotion
    Tactical,
}

impl Board {
    /// All pseudo-legal moves for the side to move. Castling is emitted when
    /// the right is held and the path is empty; attacked-square checks and
    /// king safety are left to [`Board::is_legal`].
    #[must_use]
    pub fn generate_pseudo_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_into(&mut moves, GenKind::All);
        moves
    }

    /// Pseudo-legal captures and promotions
    #[must_use]
    pub fn generate_pseudo_tactical(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_into(&mut moves, GenKind::Tactical);
        moves
    }

    fn generate_into(&self, moves: &mut MoveList, kind: GenKind) {
        let us = self.side_to_move;
        self.generate_pawn_moves(moves, us, kind);
        for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
            self.generate_piece_moves(moves, us, piece, kind);
        }
        self.generate_king_moves(moves, us, kind);
    }

    /// Decide legality of a pseudo-legal move by playing it and checking
    /// whether the mover's king is left attacked.
    pub fn is_legal(&mut self, mv: Move) -> bool {
        if mv.is_castle() && !self.castle_path_is_safe(mv) {
            return false;
        }
        let us = self.side_to_move;
        let backup = self.make_move(mv);
        let safe = !self.is_king_attacked(us);
        self.unmake_move(mv, backup);
        safe
    }

    /// All legal moves for the side to move
    pub fn generate_moves(&mut self) -> MoveList {
        let mut moves = self.generate_pseudo_moves();
        moves.retain(|mv| self.is_legal(mv));
        moves
    }

    /// Legal captures and promotions
    pub fn generate_captures(&mut self) -> MoveList {
        let mut moves = self.generate_pseudo_tactical();
        moves.retain(|mv| self.is_legal(mv));
        moves
    }

    /// Stops at the first legal move found.
    pub fn has_legal_move(&mut self) -> bool {
        let moves = self.generate_pseudo_moves();
        moves.iter().any(|&mv| self.is_legal(mv))
    }

    #[inline]
    #[must_use]
    pub fn is_in_check(&self) -> bool {
        self.is_king_attacked(self.side_to_move)
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.is_in_check() && !self.has_legal_move()
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.is_in_check() && !self.has_legal_move()
    }

    /// True if `color` has a king and it stands on an attacked square
    #[inline]
    #[must_use]
    pub fn is_king_attacked(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.is_square_attacked(king, color.opponent()),
            None => false,
        }
    }
}
