use std::fmt;
use std::sync::Arc;

use super::history::RepetitionHistory;
use super::{Bitboard, CastlingRights, Color, Piece, Square};
use crate::tables::Tables;

/// Snapshot taken by `make_move` and consumed by the matching `unmake_move`.
///
/// Everything else needed to reverse the move is encoded in the move itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateBackup {
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) hash: u64,
}

/// Which earlier positions count when the search looks for repetitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepetitionScope {
    /// Every position since the last irreversible move, including the game
    /// played before the search started
    #[default]
    Game,
    /// Only positions reached inside the current search tree
    SearchTree,
}

#[derive(Clone)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
    pub(crate) history: RepetitionHistory,
    pub(crate) tables: Arc<Tables>,
}

impl Board {
    /// Standard starting position using the process-wide tables.
    ///
    /// # Panics
    ///
    /// Panics if the shared tables fail to initialise (see [`Tables::shared`]).
    #[must_use]
    pub fn new() -> Self {
        Board::with_tables(Tables::shared())
    }

    /// Standard starting position using caller-owned tables
    #[must_use]
    pub fn with_tables(tables: Arc<Tables>) -> Self {
        let mut board = Board::empty(tables);
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            board.put_piece(Color::White, *piece, Square::from_index_unchecked(file));
            board.put_piece(Color::White, Piece::Pawn, Square::from_index_unchecked(8 + file));
            board.put_piece(Color::Black, Piece::Pawn, Square::from_index_unchecked(48 + file));
            board.put_piece(Color::Black, *piece, Square::from_index_unchecked(56 + file));
        }
        board.castling_rights = CastlingRights::all();
        board.hash = board.compute_hash();
        board
    }

    pub(crate) fn empty(tables: Arc<Tables>) -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            history: RepetitionHistory::new(),
            tables,
        }
    }

    #[must_use]
    pub fn tables(&self) -> &Arc<Tables> {
        &self.tables
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn all_occupied(&self) -> Bitboard {
        self.all_occupied
    }

    /// Piece type of `color` on `sq`, if any
    #[inline]
    #[must_use]
    pub fn piece_of(&self, color: Color, sq: Square) -> Option<Piece> {
        if !self.occupied[color.index()].contains(sq) {
            return None;
        }
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces[color.index()][piece.index()].contains(sq))
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        Color::BOTH
            .into_iter()
            .find_map(|color| self.piece_of(color, sq).map(|piece| (color, piece)))
    }

    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).lsb()
    }

    /// Place a piece without touching the hash; callers recompute it.
    pub(crate) fn put_piece(&mut self, color: Color, piece: Piece, sq: Square) {
        let bit = sq.bitboard();
        self.pieces[color.index()][piece.index()] |= bit;
        self.occupied[color.index()] |= bit;
        self.all_occupied |= bit;
    }

    /// Hash of the current state computed from scratch
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let keys = self.tables.zobrist();
        let mut hash = 0u64;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces(color, piece) {
                    hash ^= keys.piece(color, piece, sq);
                }
            }
        }
        if let Some(ep) = self.en_passant_target {
            hash ^= keys.en_passant(ep);
        }
        hash ^= keys.castling(self.castling_rights);
        if self.side_to_move == Color::Black {
            hash ^= keys.black_to_move();
        }
        hash
    }

    /// Check the structural invariants: per-color occupancy is the union of
    /// that color's piece sets, no square holds two pieces, each side has
    /// exactly one king, and the hash matches a full recomputation.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = Bitboard::EMPTY;
        for color in Color::BOTH {
            let mut union = Bitboard::EMPTY;
            for piece in Piece::ALL {
                let bb = self.pieces(color, piece);
                if !(seen & bb).is_empty() {
                    return false;
                }
                seen |= bb;
                union |= bb;
            }
            if union != self.occupancy(color) || self.pieces(color, Piece::King).popcount() != 1 {
                return false;
            }
        }
        seen == self.all_occupied && self.hash == self.compute_hash()
    }

    /// Fifty-move rule: 100 plies without a capture or pawn move
    #[inline]
    #[must_use]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// True if the current position already occurred at least `times` times
    /// among history entries at or above `floor`.
    pub(crate) fn repetitions_at_least(&self, times: usize, floor: usize) -> bool {
        self.history
            .occurrences(self.hash, self.halfmove_clock as usize, floor)
            >= times
    }

    /// The current position has occurred twice before in this game
    #[must_use]
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetitions_at_least(2, 0)
    }

    /// Draw by fifty-move rule, threefold repetition or insufficient material
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.is_fifty_move_draw() || self.is_threefold_repetition() || self.is_insufficient_material()
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// bishops that all stand on one square color.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let both = |piece: Piece| self.pieces(Color::White, piece) | self.pieces(Color::Black, piece);
        if !(both(Piece::Pawn) | both(Piece::Rook) | both(Piece::Queen)).is_empty() {
            return false;
        }

        let knights = both(Piece::Knight).popcount();
        let bishops = both(Piece::Bishop);
        match knights + bishops.popcount() {
            0 | 1 => true,
            _ if knights == 0 => {
                (bishops & Bitboard::LIGHT_SQUARES).is_empty()
                    || (bishops & Bitboard::DARK_SQUARES).is_empty()
            }
            _ => false,
        }
    }

    pub(crate) fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// Two boards are equal when every position field, clock and the game
/// history match; which table instance they use is irrelevant.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.occupied == other.occupied
            && self.all_occupied == other.all_occupied
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant_target == other.en_passant_target
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
            && self.hash == other.hash
            && self.history == other.history
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("fen", &self.to_fen())
            .field("hash", &format_args!("{:#018x}", self.hash))
            .field("history", &self.history.len())
            .finish()
    }
}

/// ASCII diagram, rank 8 at the top
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let sq = Square::from_index_unchecked(rank * 8 + file);
                let c = match self.piece_at(sq) {
                    Some((color, piece)) => piece.to_fen_char(color),
                    None => '.',
                };
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}
