//! Move types and move lists.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::square::Square;

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const CAPTURED_SHIFT: u32 = 15;
const PROMOTED_SHIFT: u32 = 18;
const SQUARE_MASK: u32 = 0x3F;
const PIECE_MASK: u32 = 0x7;

const FLAG_DOUBLE_PUSH: u32 = 1 << 21;
const FLAG_EN_PASSANT: u32 = 1 << 22;
const FLAG_CASTLE: u32 = 1 << 23;

/// Densely packed move record.
///
/// Encoding:
/// - bits 0-5:   from square
/// - bits 6-11:  to square
/// - bits 12-14: moved piece (piece index + 1)
/// - bits 15-17: captured piece (0 = none)
/// - bits 18-20: promoted piece (0 = none)
/// - bit 21:     double pawn push
/// - bit 22:     en passant capture
/// - bit 23:     castle
///
/// The move carries everything needed to undo it, so `unmake_move` never
/// has to look at the board to find out what was captured.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

impl Move {
    /// The empty move (no piece code); used to fill fixed-size tables
    pub const NULL: Move = Move(0);

    #[inline]
    const fn pack(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        promoted: Option<Piece>,
        flags: u32,
    ) -> Self {
        Move(
            ((from.index() as u32) << FROM_SHIFT)
                | ((to.index() as u32) << TO_SHIFT)
                | (piece_code(Some(piece)) << PIECE_SHIFT)
                | (piece_code(captured) << CAPTURED_SHIFT)
                | (piece_code(promoted) << PROMOTED_SHIFT)
                | flags,
        )
    }

    /// A non-capturing move with no special flags
    #[inline]
    #[must_use]
    pub const fn quiet(from: Square, to: Square, piece: Piece) -> Self {
        Move::pack(from, to, piece, None, None, 0)
    }

    #[inline]
    #[must_use]
    pub const fn capture(from: Square, to: Square, piece: Piece, captured: Piece) -> Self {
        Move::pack(from, to, piece, Some(captured), None, 0)
    }

    #[inline]
    #[must_use]
    pub const fn double_push(from: Square, to: Square) -> Self {
        Move::pack(from, to, Piece::Pawn, None, None, FLAG_DOUBLE_PUSH)
    }

    /// En passant capture; `to` is the empty target square
    #[inline]
    #[must_use]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Move::pack(
            from,
            to,
            Piece::Pawn,
            Some(Piece::Pawn),
            None,
            FLAG_EN_PASSANT,
        )
    }

    /// Castle, encoded as the king's two-square move
    #[inline]
    #[must_use]
    pub const fn castle(from: Square, to: Square) -> Self {
        Move::pack(from, to, Piece::King, None, None, FLAG_CASTLE)
    }

    /// Pawn promotion, optionally capturing
    #[inline]
    #[must_use]
    pub const fn promotion(
        from: Square,
        to: Square,
        promoted: Piece,
        captured: Option<Piece>,
    ) -> Self {
        Move::pack(from, to, Piece::Pawn, captured, Some(promoted), 0)
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index_unchecked(((self.0 >> FROM_SHIFT) & SQUARE_MASK) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index_unchecked(((self.0 >> TO_SHIFT) & SQUARE_MASK) as usize)
    }

    /// The moving piece. The null move reports a pawn.
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Piece {
        match decode_piece(self.0 >> PIECE_SHIFT) {
            Some(piece) => piece,
            None => Piece::Pawn,
        }
    }

    #[inline]
    #[must_use]
    pub const fn captured(self) -> Option<Piece> {
        decode_piece(self.0 >> CAPTURED_SHIFT)
    }

    #[inline]
    #[must_use]
    pub const fn promotion_piece(self) -> Option<Piece> {
        decode_piece(self.0 >> PROMOTED_SHIFT)
    }

    /// Returns true if this move captures a piece (including en passant)
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        (self.0 >> CAPTURED_SHIFT) & PIECE_MASK != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        (self.0 >> PROMOTED_SHIFT) & PIECE_MASK != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_double_push(self) -> bool {
        self.0 & FLAG_DOUBLE_PUSH != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.0 & FLAG_EN_PASSANT != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_castle(self) -> bool {
        self.0 & FLAG_CASTLE != 0
    }

    /// Neither a capture nor a promotion
    #[inline]
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Raw packed value (for storage in the transposition table)
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Move(value & 0x00FF_FFFF)
    }
}

#[inline]
const fn piece_code(piece: Option<Piece>) -> u32 {
    match piece {
        Some(p) => p.index() as u32 + 1,
        None => 0,
    }
}

#[inline]
const fn decode_piece(bits: u32) -> Option<Piece> {
    match bits & PIECE_MASK {
        0 => None,
        code => Piece::from_index(code as usize - 1),
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "Move(null)");
        }
        write!(f, "Move({}{} {:?}", self.from(), self.to(), self.piece())?;
        if let Some(promo) = self.promotion_piece() {
            write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
        }
        if let Some(captured) = self.captured() {
            write!(f, " x{captured:?}")?;
        }
        if self.is_castle() {
            write!(f, " castle")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        if self.is_double_push() {
            write!(f, " double")?;
        }
        write!(f, ")")
    }
}

/// Coordinate notation: `e2e4`, `a7a8q`, `0000` for the null move
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion_piece() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;
/// Deepest ply the search tables are sized for
pub const MAX_PLY: usize = 128;

/// List of moves with fixed-size backing array.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        self.as_slice().get(idx).copied()
    }

    /// Keep only the moves matching `keep`, preserving order
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(Move) -> bool) {
        let mut write = 0;
        for read in 0..self.len {
            let mv = self.moves[read];
            if keep(mv) {
                self.moves[write] = mv;
                write += 1;
            }
        }
        self.len = write;
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

/// Owning iterator over moves in a `MoveList`
pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx < self.list.len {
            let mv = self.list.moves[self.idx];
            self.idx += 1;
            Some(mv)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "MoveList index {} out of bounds (len {})",
            idx,
            self.len
        );
        &self.moves[idx]
    }
}

/// A move paired with its ordering score.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Fixed-size list of scored moves for incremental best-first selection.
#[derive(Clone, Debug)]
pub(crate) struct ScoredMoveList {
    moves: [ScoredMove; MAX_MOVES],
    len: usize,
}

impl ScoredMoveList {
    pub fn new() -> Self {
        ScoredMoveList {
            moves: [ScoredMove {
                mv: Move::NULL,
                score: 0,
            }; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move, score: i32) {
        self.moves[self.len] = ScoredMove { mv, score };
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Partial selection sort: swap the best move from `start` onwards into
    /// position `start` and return it. Ties keep generation order.
    #[inline]
    pub fn pick_best(&mut self, start: usize) -> Option<ScoredMove> {
        if start >= self.len {
            return None;
        }

        let mut best_idx = start;
        let mut best_score = self.moves[start].score;
        for i in (start + 1)..self.len {
            if self.moves[i].score > best_score {
                best_score = self.moves[i].score;
                best_idx = i;
            }
        }

        if best_idx != start {
            self.moves.swap(start, best_idx);
        }

        Some(self.moves[start])
    }
}
