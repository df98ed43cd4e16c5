use std::path::PathBuf;

use crate::game::Piece;

/// Reasons a drop is rejected. The engine state is unchanged whenever one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {width} columns)")]
    OutOfRange { column: usize, width: usize },

    #[error("cannot drop an empty piece")]
    InvalidPiece,

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is over")]
    GameOver,

    #[error("it is {expected}'s turn, not {got}'s")]
    WrongTurn { expected: Piece, got: Piece },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = MoveError::OutOfRange { column: 9, width: 7 };
        assert_eq!(
            err.to_string(),
            "column 9 is out of range (board has 7 columns)"
        );
    }

    #[test]
    fn test_wrong_turn_display() {
        let err = MoveError::WrongTurn {
            expected: Piece::Player1,
            got: Piece::Player2,
        };
        assert_eq!(err.to_string(), "it is Player 1's turn, not Player 2's");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("game.width must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: game.width must be >= 1"
        );
    }
}
