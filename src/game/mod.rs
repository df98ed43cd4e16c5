//! Core Connect Four game logic: board representation, pieces, and the game
//! engine with its move history.

mod board;
mod piece;
mod state;

pub use board::{Board, Position};
pub use piece::Piece;
pub use state::{GameOutcome, GameState, MoveRecord};
