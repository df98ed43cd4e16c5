//! # Connect Four
//!
//! A two-player gravity-drop game on a board of any size, won by connecting
//! any number of pieces in a row. Dropped pieces fall and bounce into place in
//! a terminal UI built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`] : Board, pieces, and the game engine with its move history
//! - [`animation`] : Closed-form fall and bounce trajectories for dropped pieces
//! - [`ui`] : Terminal UI: controller loop, board view, key bindings, menu
//! - [`config`] : TOML configuration loading and validation
//! - [`error`] : Structured error types

pub mod animation;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
