//! Engine facade: one board plus one search state.
//!
//! Front ends hold an `Engine` and translate their commands into
//! [`Engine::set_position`], [`Engine::find_best_move`] and
//! [`Engine::perft`].

mod position;

use std::sync::Arc;

pub use position::{PositionCommand, PositionSpec};

use crate::board::search::{search, SearchLimits, SearchParams, SearchResult, SearchState};
use crate::board::{Board, Evaluator, Move, OptionError, PositionError};
use crate::tables::Tables;

pub struct Engine {
    board: Board,
    state: SearchState,
    tables: Arc<Tables>,
}

impl Engine {
    /// Engine at the start position with default parameters
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(SearchParams::default())
    }

    #[must_use]
    pub fn with_params(params: SearchParams) -> Self {
        Self::with_tables(Tables::shared(), params)
    }

    /// Engine whose boards use `tables` instead of the process-wide set
    #[must_use]
    pub fn with_tables(tables: Arc<Tables>, params: SearchParams) -> Self {
        Engine {
            board: Board::with_tables(Arc::clone(&tables)),
            state: SearchState::new(params),
            tables,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn search_state(&self) -> &SearchState {
        &self.state
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        self.state.params()
    }

    pub fn set_evaluator(&mut self, evaluator: impl Evaluator + 'static) {
        self.state.set_evaluator(evaluator);
    }

    /// Set up `position` (`startpos` or a FEN string) and replay `moves` in
    /// coordinate notation.
    ///
    /// # Errors
    ///
    /// Invalid FEN or an unplayable move; the current position is kept.
    pub fn set_position(&mut self, position: &str, moves: &[&str]) -> Result<(), PositionError> {
        let command = PositionCommand {
            start: position.parse()?,
            moves: moves.iter().map(|m| (*m).to_string()).collect(),
        };
        self.apply(&command)
    }

    /// Set up a position from a full command such as
    /// `position startpos moves e2e4 e7e5`.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::set_position`], plus a command naming neither
    /// `startpos` nor `fen`.
    pub fn set_position_str(&mut self, command: &str) -> Result<(), PositionError> {
        let command: PositionCommand = command.parse()?;
        self.apply(&command)
    }

    fn apply(&mut self, command: &PositionCommand) -> Result<(), PositionError> {
        self.board = command.build(Arc::clone(&self.tables))?;
        Ok(())
    }

    /// Search the current position. The board is left unchanged.
    pub fn find_best_move(&mut self, limits: &SearchLimits) -> SearchResult {
        search(&mut self.board, &mut self.state, limits)
    }

    /// Leaf count of the legal move tree below the current position
    pub fn perft(&mut self, depth: u32) -> u64 {
        self.board.perft(depth)
    }

    pub fn perft_divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        self.board.perft_divide(depth)
    }

    /// Back to the start position with empty search tables
    pub fn new_game(&mut self) {
        self.board = Board::with_tables(Arc::clone(&self.tables));
        self.state.clear();
    }

    /// Apply a named option. `Hash` reallocates the transposition table.
    ///
    /// # Errors
    ///
    /// Unknown option name or a value that does not parse.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionError> {
        self.state.set_option(name, value)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
