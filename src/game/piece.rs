use std::fmt;

/// Contents of a board cell, and the actor of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Piece {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Piece {
    /// Get the opposing player. `Empty` has no opponent and maps to itself.
    pub fn other(self) -> Piece {
        match self {
            Piece::Player1 => Piece::Player2,
            Piece::Player2 => Piece::Player1,
            Piece::Empty => Piece::Empty,
        }
    }

    /// True for the two player pieces.
    pub fn is_player(self) -> bool {
        self != Piece::Empty
    }

    /// Get piece name for display
    pub fn name(self) -> &'static str {
        match self {
            Piece::Empty => "Nobody",
            Piece::Player1 => "Player 1",
            Piece::Player2 => "Player 2",
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Piece::Player1.other(), Piece::Player2);
        assert_eq!(Piece::Player2.other(), Piece::Player1);
        assert_eq!(Piece::Empty.other(), Piece::Empty);
    }

    #[test]
    fn test_piece_name() {
        assert_eq!(Piece::Player1.to_string(), "Player 1");
        assert_eq!(Piece::Player2.name(), "Player 2");
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(Piece::default(), Piece::Empty);
        assert!(!Piece::Empty.is_player());
    }
}
