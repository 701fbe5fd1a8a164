//! Position commands: a starting point plus moves to replay.

use std::str::FromStr;
use std::sync::Arc;

use crate::board::{Board, PositionError};
use crate::tables::Tables;

/// Where a position command starts from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PositionSpec {
    StartPos,
    Fen(String),
}

impl FromStr for PositionSpec {
    type Err = PositionError;

    /// `startpos` or a FEN string
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PositionError::MissingPosition {
                command: s.to_string(),
            });
        }
        if s == "startpos" {
            Ok(PositionSpec::StartPos)
        } else {
            Ok(PositionSpec::Fen(s.strip_prefix("fen ").unwrap_or(s).trim().to_string()))
        }
    }
}

/// A parsed `[position] (startpos | fen <fields>) [moves <m1> <m2> ...]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionCommand {
    pub start: PositionSpec,
    pub moves: Vec<String>,
}

impl PositionCommand {
    /// Build the resulting board from scratch.
    ///
    /// The caller's board is never touched, so a bad FEN or move leaves it
    /// exactly as it was.
    pub fn build(&self, tables: Arc<Tables>) -> Result<Board, PositionError> {
        let mut board = match &self.start {
            PositionSpec::StartPos => Board::with_tables(tables),
            PositionSpec::Fen(fen) => Board::try_from_fen_with_tables(fen, tables)?,
        };
        for text in &self.moves {
            board.make_move_str(text)?;
        }
        Ok(board)
    }
}

impl FromStr for PositionCommand {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let missing = || PositionError::MissingPosition {
            command: s.trim().to_string(),
        };
        let mut parts = s.split_whitespace().peekable();
        if parts.peek() == Some(&"position") {
            parts.next();
        }

        let start = match parts.next() {
            Some("startpos") => PositionSpec::StartPos,
            Some("fen") => {
                let mut fields = Vec::with_capacity(6);
                while let Some(&field) = parts.peek() {
                    if field == "moves" {
                        break;
                    }
                    fields.push(field);
                    parts.next();
                }
                if fields.is_empty() {
                    return Err(missing());
                }
                PositionSpec::Fen(fields.join(" "))
            }
            _ => return Err(missing()),
        };

        let moves = match parts.next() {
            None => Vec::new(),
            Some("moves") => parts.map(str::to_string).collect(),
            Some(_) => return Err(missing()),
        };

        Ok(PositionCommand { start, moves })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{FenError, MoveParseError, STARTPOS_FEN};

    #[test]
    fn parses_startpos_with_moves() {
        let cmd: PositionCommand = "position startpos moves e2e4 e7e5".parse().unwrap();
        assert_eq!(cmd.start, PositionSpec::StartPos);
        assert_eq!(cmd.moves, vec!["e2e4", "e7e5"]);
    }

    #[test]
    fn parses_fen_without_prefix() {
        let text = format!("fen {STARTPOS_FEN} moves g1f3");
        let cmd: PositionCommand = text.parse().unwrap();
        assert_eq!(cmd.start, PositionSpec::Fen(STARTPOS_FEN.to_string()));
        assert_eq!(cmd.moves, vec!["g1f3"]);
    }

    #[test]
    fn short_fen_is_accepted() {
        let cmd: PositionCommand = "fen 8/8/8/8/8/8/8/K6k w - -".parse().unwrap();
        let board = cmd.build(Tables::shared()).unwrap();
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
    }

    #[test]
    fn rejects_missing_start() {
        assert!(matches!(
            "position moves e2e4".parse::<PositionCommand>(),
            Err(PositionError::MissingPosition { .. })
        ));
        assert!("position fen".parse::<PositionCommand>().is_err());
        assert!("startpos e2e4".parse::<PositionCommand>().is_err());
    }

    #[test]
    fn build_reports_bad_input() {
        let bad_move: PositionCommand = "startpos moves e2e5".parse().unwrap();
        assert_eq!(
            bad_move.build(Tables::shared()),
            Err(PositionError::Move(MoveParseError::IllegalMove {
                notation: "e2e5".to_string()
            }))
        );
        let bad_fen: PositionCommand = "fen 8/8/8 w - - 0 1".parse().unwrap();
        assert!(matches!(
            bad_fen.build(Tables::shared()),
            Err(PositionError::Fen(FenError::WrongRankCount { found: 3 }))
        ));
    }

    #[test]
    fn start_from_str() {
        assert_eq!("startpos".parse::<PositionSpec>().unwrap(), PositionSpec::StartPos);
        assert_eq!(
            format!("fen {STARTPOS_FEN}").parse::<PositionSpec>().unwrap(),
            PositionSpec::Fen(STARTPOS_FEN.to_string())
        );
        assert!("  ".parse::<PositionSpec>().is_err());
    }
}
