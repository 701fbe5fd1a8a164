use std::str::FromStr;
use std::sync::Arc;

use super::error::{FenError, MoveParseError};
use super::{castle_bit, Board, Color, Move, Piece, Square};
use crate::tables::Tables;

/// FEN of the standard starting position
pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a board position from FEN notation using the shared tables.
    ///
    /// The half-move clock and full-move number may be omitted and default
    /// to 0 and 1.
    ///
    /// # Errors
    ///
    /// Returns a [`FenError`] naming the first malformed field.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        Board::try_from_fen_with_tables(fen, Tables::shared())
    }

    /// Parse a FEN position onto caller-owned tables.
    ///
    /// # Errors
    ///
    /// Returns a [`FenError`] naming the first malformed field.
    pub fn try_from_fen_with_tables(fen: &str, tables: Arc<Tables>) -> Result<Self, FenError> {
        let mut board = Board::empty(tables);
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }
        if parts.len() > 6 {
            return Err(FenError::TooManyParts { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (row, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - row;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10) {
                    if !(1..=8).contains(&run) {
                        return Err(FenError::InvalidPiece { char: c });
                    }
                    file += run as usize;
                } else {
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let sq = Square::new(rank, file).ok_or(FenError::WrongFileCount {
                        rank: rank + 1,
                        files: file + 1,
                    })?;
                    board.put_piece(color, piece, sq);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::WrongFileCount {
                    rank: rank + 1,
                    files: file,
                });
            }
        }

        for color in Color::BOTH {
            let count = board.pieces(color, Piece::King).popcount();
            if count != 1 {
                return Err(FenError::WrongKingCount {
                    color: if color == Color::White { "White" } else { "Black" },
                    count,
                });
            }
        }

        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                let bit = castle_bit(c).ok_or(FenError::InvalidCastling { char: c })?;
                board.castling_rights.insert_bit(bit);
            }
        }

        board.en_passant_target = match parts[3] {
            "-" => None,
            text => {
                let invalid = || FenError::InvalidEnPassant {
                    found: text.to_string(),
                };
                let sq: Square = text.parse().map_err(|_| invalid())?;
                let expected_rank = match board.side_to_move {
                    Color::White => 5,
                    Color::Black => 2,
                };
                if sq.rank() != expected_rank {
                    return Err(invalid());
                }
                Some(sq)
            }
        };

        if let Some(text) = parts.get(4) {
            board.halfmove_clock = text.parse().map_err(|_| FenError::InvalidCounter {
                field: "half-move clock",
                found: (*text).to_string(),
            })?;
        }
        if let Some(text) = parts.get(5) {
            board.fullmove_number = match text.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(FenError::InvalidCounter {
                        field: "full-move number",
                        found: (*text).to_string(),
                    })
                }
            };
        }

        board.hash = board.compute_hash();
        Ok(board)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        match Self::try_from_fen(fen) {
            Ok(board) => board,
            Err(err) => panic!("invalid FEN '{fen}': {err}"),
        }
    }

    /// Convert the board position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let sq = Square::from_index_unchecked(rank * 8 + file);
                if let Some((color, piece)) = self.piece_at(sq) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let mut castling = String::new();
        for (color, kingside, c) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if self.castling_rights.has(color, kingside) {
                castling.push(c);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }
        let ep = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a move in coordinate notation (e.g., "e2e4", "e7e8q") by
    /// matching it against the legal moves of this position.
    ///
    /// # Errors
    ///
    /// Fails on malformed text or when no legal move matches.
    ///
    /// # Example
    /// ```
    /// use chess_core::board::Board;
    ///
    /// let mut board = Board::new();
    /// let mv = board.parse_move("e2e4").unwrap();
    /// assert!(mv.is_double_push());
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&mut self, text: &str) -> Result<Move, MoveParseError> {
        if !text.is_ascii() || text.len() < 4 || text.len() > 5 {
            return Err(MoveParseError::InvalidLength {
                len: text.chars().count(),
            });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: text.to_string(),
        };
        let from: Square = text[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match text[4..].chars().next() {
            Some(c) => match Piece::from_char(c) {
                Some(piece) if !matches!(piece, Piece::Pawn | Piece::King) => Some(piece),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
            None => None,
        };

        self.generate_moves()
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion_piece() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: text.to_string(),
            })
    }

    /// Parse a coordinate-notation move and make it on the board.
    ///
    /// # Errors
    ///
    /// Same as [`Board::parse_move`]; the board is untouched on error.
    pub fn make_move_str(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(text)?;
        self.make_move(mv);
        Ok(mv)
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_round_trip() {
        let board = Board::try_from_fen(STARTPOS_FEN).unwrap();
        assert_eq!(board.to_fen(), STARTPOS_FEN);
        assert_eq!(board, Board::new());
        assert_eq!(board.hash(), Board::new().hash());
    }

    #[test]
    fn black_to_move_with_en_passant() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = Board::try_from_fen(fen).unwrap();
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.en_passant_target(), Some("e3".parse().unwrap()));
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn counters_default_when_omitted() {
        let board = Board::try_from_fen("8/8/8/8/8/8/8/K6k w - -").unwrap();
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
    }

    #[test]
    fn rejects_malformed_fields() {
        let cases: [(&str, fn(&FenError) -> bool); 10] = [
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w", |e| {
                matches!(e, FenError::TooFewParts { found: 2 })
            }),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1", |e| {
                matches!(e, FenError::WrongRankCount { found: 7 })
            }),
            ("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", |e| {
                matches!(e, FenError::InvalidPiece { char: 'x' })
            }),
            ("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", |e| {
                matches!(e, FenError::WrongFileCount { rank: 7, .. })
            }),
            ("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", |e| {
                matches!(e, FenError::WrongFileCount { rank: 7, files: 7 })
            }),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1", |e| {
                matches!(e, FenError::InvalidSideToMove { .. })
            }),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1", |e| {
                matches!(e, FenError::InvalidCastling { char: 'X' })
            }),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1", |e| {
                matches!(e, FenError::InvalidEnPassant { .. })
            }),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1", |e| {
                matches!(e, FenError::InvalidCounter { .. })
            }),
            ("rnbq1bnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", |e| {
                matches!(e, FenError::WrongKingCount { count: 0, .. })
            }),
        ];
        for (fen, check) in cases {
            let err = Board::try_from_fen(fen).unwrap_err();
            assert!(check(&err), "{fen}: unexpected {err:?}");
        }
    }

    #[test]
    fn partial_castling_rights() {
        let board =
            Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        assert!(board.castling_rights().has(Color::White, true));
        assert!(!board.castling_rights().has(Color::White, false));
        assert!(!board.castling_rights().has(Color::Black, true));
        assert!(board.castling_rights().has(Color::Black, false));
    }

    #[test]
    fn parse_move_promotion_and_errors() {
        let mut board = Board::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
        let mv = board.parse_move("a7a8n").unwrap();
        assert_eq!(mv.promotion_piece(), Some(Piece::Knight));

        assert_eq!(
            board.parse_move("a7a8"),
            Err(MoveParseError::IllegalMove {
                notation: "a7a8".to_string()
            })
        );
        assert_eq!(
            board.parse_move("a7a8k"),
            Err(MoveParseError::InvalidPromotion { char: 'k' })
        );
        assert_eq!(
            board.parse_move("a7"),
            Err(MoveParseError::InvalidLength { len: 2 })
        );
        assert!(matches!(
            board.parse_move("z7a8"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
    }

    #[test]
    fn illegal_move_leaves_board_unchanged() {
        let mut board = Board::new();
        let before = board.clone();
        assert!(board.make_move_str("e2e5").is_err());
        assert!(board.make_move_str("e7e5").is_err());
        assert_eq!(board, before);

        board.make_move_str("e2e4").unwrap();
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }
}
