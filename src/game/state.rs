use super::{Board, Piece, Position};
use crate::error::{ConfigError, MoveError};

/// A drop that has happened: the piece, and the cell it settled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub piece: Piece,
    pub column: usize,
    pub row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    InProgress,
    /// `line` runs from one end of the connecting run to the other.
    Won { piece: Piece, line: Vec<Position> },
    Tie,
}

impl GameOutcome {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, GameOutcome::InProgress)
    }

    pub fn winner(&self) -> Option<Piece> {
        match self {
            GameOutcome::Won { piece, .. } => Some(*piece),
            _ => None,
        }
    }
}

/// The game engine: board, turn, outcome and the move history since the last
/// reset.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    win_run_length: usize,
    current_turn: Piece,
    outcome: GameOutcome,
    history: Vec<MoveRecord>,
}

impl GameState {
    /// Create an empty game. `Player1` moves first.
    pub fn new(win_run_length: usize, width: usize, height: usize) -> Result<Self, ConfigError> {
        if win_run_length == 0 {
            return Err(ConfigError::Validation("win_run_length must be >= 1".into()));
        }
        if width == 0 || height == 0 {
            return Err(ConfigError::Validation(format!(
                "board must be at least 1x1, got {width}x{height}"
            )));
        }

        Ok(GameState {
            board: Board::new(width, height),
            win_run_length,
            current_turn: Piece::Player1,
            outcome: GameOutcome::InProgress,
            history: Vec::new(),
        })
    }

    /// Start a new game on the same board dimensions.
    pub fn reset(&mut self) {
        self.board.clear();
        self.history.clear();
        self.outcome = GameOutcome::InProgress;
        self.current_turn = Piece::Player1;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn win_run_length(&self) -> usize {
        self.win_run_length
    }

    pub fn current_turn(&self) -> Piece {
        self.current_turn
    }

    pub fn outcome(&self) -> &GameOutcome {
        &self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        !self.outcome.is_in_progress()
    }

    /// Every drop since the last reset, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    fn check_column(&self, column: usize) -> Result<(), MoveError> {
        if column >= self.width() {
            return Err(MoveError::OutOfRange {
                column,
                width: self.width(),
            });
        }
        Ok(())
    }

    pub fn is_column_full(&self, column: usize) -> Result<bool, MoveError> {
        self.check_column(column)?;
        Ok(self.board.is_column_full(column))
    }

    /// The row a piece dropped into `column` would settle in, `None` if full.
    pub fn drop_row(&self, column: usize) -> Result<Option<usize>, MoveError> {
        self.check_column(column)?;
        Ok(self.board.drop_row(column))
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..self.width())
            .filter(|&column| !self.board.is_column_full(column))
            .collect()
    }

    /// Drop `piece` into `column`.
    ///
    /// On success the move is appended to the history and the outcome is
    /// updated; the turn passes to the other player only if the game goes on.
    pub fn drop(&mut self, piece: Piece, column: usize) -> Result<MoveRecord, MoveError> {
        if !piece.is_player() {
            return Err(MoveError::InvalidPiece);
        }
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        self.check_column(column)?;
        if self.board.is_column_full(column) {
            return Err(MoveError::ColumnFull(column));
        }
        if piece != self.current_turn {
            return Err(MoveError::WrongTurn {
                expected: self.current_turn,
                got: piece,
            });
        }

        let row = self
            .board
            .place(column, piece)
            .ok_or(MoveError::ColumnFull(column))?;
        let record = MoveRecord { piece, column, row };
        self.history.push(record);

        if let Some(line) = self.board.winning_line(column, row, self.win_run_length) {
            self.outcome = GameOutcome::Won { piece, line };
        } else if self.board.is_full() {
            self.outcome = GameOutcome::Tie;
        } else {
            self.current_turn = self.current_turn.other();
        }

        Ok(record)
    }

    /// Drop a piece for whoever's turn it is.
    pub fn drop_current(&mut self, column: usize) -> Result<MoveRecord, MoveError> {
        self.drop(self.current_turn, column)
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            board: Board::default(),
            win_run_length: 4,
            current_turn: Piece::Player1,
            outcome: GameOutcome::InProgress,
            history: Vec::new(),
        }
    }
}
