use super::{Board, Color, Move, Piece, Square, StateBackup};

/// Rook origin and destination for a castle, keyed by the king's target
#[inline]
pub(crate) fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    match king_to {
        Square::G1 => (Square::H1, Square::F1),
        Square::C1 => (Square::A1, Square::D1),
        Square::G8 => (Square::H8, Square::F8),
        _ => (Square::A8, Square::D8),
    }
}

/// Square of the pawn removed by an en-passant capture landing on `to`
#[inline]
pub(crate) fn en_passant_victim(to: Square, mover: Color) -> Square {
    match mover {
        Color::White => Square::from_index_unchecked(to.index() - 8),
        Color::Black => Square::from_index_unchecked(to.index() + 8),
    }
}

impl Board {
    /// XOR a piece in or out, keeping the hash in step.
    #[inline(always)]
    fn toggle_piece(&mut self, color: Color, piece: Piece, sq: Square) {
        self.flip_piece(color, piece, sq);
        self.hash ^= self.tables.zobrist().piece(color, piece, sq);
    }

    /// XOR a piece in or out of the bitboards only.
    #[inline(always)]
    fn flip_piece(&mut self, color: Color, piece: Piece, sq: Square) {
        let bit = sq.bitboard();
        self.pieces[color.index()][piece.index()] ^= bit;
        self.occupied[color.index()] ^= bit;
        self.all_occupied ^= bit;
    }

    #[inline]
    #[must_use]
    pub fn state_backup(&self) -> StateBackup {
        StateBackup {
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
        }
    }

    /// Apply a pseudo-legal move generated for this position.
    ///
    /// Returns the backup that [`Board::unmake_move`] needs to restore the
    /// position exactly. Legality is not checked here.
    pub fn make_move(&mut self, mv: Move) -> StateBackup {
        let backup = self.state_backup();
        let us = self.side_to_move;
        let them = us.opponent();
        let (from, to, piece) = (mv.from(), mv.to(), mv.piece());

        self.history.push(self.hash);

        if let Some(ep) = self.en_passant_target.take() {
            self.hash ^= self.tables.zobrist().en_passant(ep);
        }
        self.hash ^= self.tables.zobrist().castling(self.castling_rights);

        if let Some(captured) = mv.captured() {
            let victim = if mv.is_en_passant() {
                en_passant_victim(to, us)
            } else {
                to
            };
            self.toggle_piece(them, captured, victim);
        }

        self.toggle_piece(us, piece, from);
        self.toggle_piece(us, mv.promotion_piece().unwrap_or(piece), to);

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(to);
            self.toggle_piece(us, Piece::Rook, rook_from);
            self.toggle_piece(us, Piece::Rook, rook_to);
        }

        if mv.is_double_push() {
            let skipped = Square::from_index_unchecked((from.index() + to.index()) / 2);
            self.en_passant_target = Some(skipped);
            self.hash ^= self.tables.zobrist().en_passant(skipped);
        }

        self.castling_rights = self.castling_rights.after_move(from, to);
        self.hash ^= self.tables.zobrist().castling(self.castling_rights);

        if piece == Piece::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = them;
        self.hash ^= self.tables.zobrist().black_to_move();

        backup
    }

    /// Reverse `make_move(mv)`; `backup` must be the value it returned.
    pub fn unmake_move(&mut self, mv: Move, backup: StateBackup) {
        let them = self.side_to_move;
        let us = them.opponent();
        let (from, to, piece) = (mv.from(), mv.to(), mv.piece());

        self.side_to_move = us;
        if us == Color::Black {
            self.fullmove_number -= 1;
        }

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(to);
            self.flip_piece(us, Piece::Rook, rook_to);
            self.flip_piece(us, Piece::Rook, rook_from);
        }

        self.flip_piece(us, mv.promotion_piece().unwrap_or(piece), to);
        self.flip_piece(us, piece, from);

        if let Some(captured) = mv.captured() {
            let victim = if mv.is_en_passant() {
                en_passant_victim(to, us)
            } else {
                to
            };
            self.flip_piece(them, captured, victim);
        }

        self.castling_rights = backup.castling_rights;
        self.en_passant_target = backup.en_passant_target;
        self.halfmove_clock = backup.halfmove_clock;
        self.hash = backup.hash;
        self.history.pop();
    }
}
