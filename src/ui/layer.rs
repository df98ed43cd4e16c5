use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use super::keys::Action;

/// A request a layer makes of the game controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NewGame,
    Quit,
}

/// What a layer did with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerResponse {
    /// Not handled; the game sees the key.
    Ignored,
    /// Handled; the game does not see the key.
    Consumed,
    /// Handled, and the controller should carry out the command.
    Command(Command),
}

/// Something drawn over the game board.
pub trait Layer {
    /// True if the layer changed since it was last drawn.
    fn is_dirty(&self) -> bool;

    fn draw(&mut self, frame: &mut Frame, area: Rect);

    /// Called once per display tick.
    fn tick(&mut self);

    /// Offered every key press before the game, topmost layer first.
    fn handle_key(&mut self, _key: &KeyEvent, _action: Option<Action>) -> LayerResponse {
        LayerResponse::Ignored
    }
}
