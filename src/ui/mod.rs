//! Terminal UI: the game controller loop, board rendering with falling
//! pieces, key bindings, and overlay layers such as the main menu.

mod app;
pub mod board_widget;
mod game_view;
pub mod keys;
pub mod layer;
pub mod menu;

pub use app::App;
pub use keys::{Action, ControlsConfig, KeyBindings};
pub use layer::{Command, Layer, LayerResponse};
