use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::keys::Action;
use super::layer::{Command, Layer, LayerResponse};

const FADE_START: i16 = 255;
const FADE_SPEED: i16 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    NewGame,
    Controls,
    Quit,
}

impl MenuEntry {
    pub fn text(self) -> &'static str {
        match self {
            MenuEntry::NewGame => "New Game",
            MenuEntry::Controls => "Controls",
            MenuEntry::Quit => "Quit",
        }
    }
}

/// The main menu overlay. Starts open.
///
/// While open it takes every key except the ones bound to quitting and to
/// toggling the menu. Up/Down move the selection (wrapping), Enter selects.
/// Hovering `Controls` lists the key bindings beside the entries.
#[derive(Debug, Clone)]
pub struct MainMenu {
    entries: Vec<MenuEntry>,
    current_index: usize,
    enabled: bool,
    dirty: bool,
    /// Remaining brightness of the closing animation.
    fade: Option<i16>,
    controls: Vec<String>,
}

impl MainMenu {
    pub fn new(controls: Vec<String>) -> Self {
        MainMenu {
            entries: vec![MenuEntry::NewGame, MenuEntry::Controls, MenuEntry::Quit],
            current_index: 0,
            enabled: true,
            dirty: true,
            fade: None,
            controls,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        self.dirty = true;
    }

    pub fn current_entry(&self) -> MenuEntry {
        self.entries[self.current_index]
    }

    pub fn change_current_index(&mut self, delta: isize) {
        let len = self.entries.len() as isize;
        self.current_index = (self.current_index as isize + delta).rem_euclid(len) as usize;
        self.dirty = true;
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    fn select_current(&mut self) -> LayerResponse {
        match self.current_entry() {
            MenuEntry::NewGame => {
                self.toggle();
                self.fade = Some(FADE_START);
                LayerResponse::Command(Command::NewGame)
            }
            MenuEntry::Controls => LayerResponse::Consumed,
            MenuEntry::Quit => LayerResponse::Command(Command::Quit),
        }
    }

    fn popup_area(&self, area: Rect) -> Rect {
        let entries_width = self
            .entries
            .iter()
            .map(|e| e.text().len() as u16)
            .max()
            .unwrap_or(0)
            + 6;
        let controls_width = if self.current_entry() == MenuEntry::Controls {
            self.controls.iter().map(|c| c.chars().count() as u16).max().unwrap_or(0) + 4
        } else {
            0
        };
        let rows = (self.entries.len().max(self.controls_len()) as u16) + 2;

        let width = (entries_width + controls_width).min(area.width);
        let height = rows.min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    fn controls_len(&self) -> usize {
        if self.current_entry() == MenuEntry::Controls {
            self.controls.len()
        } else {
            0
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect, brightness: u8) {
        let popup = self.popup_area(area);
        let fg = Color::Rgb(brightness, brightness, brightness);

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Menu")
            .style(Style::default().fg(fg));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let entries_width = self.entries.iter().map(|e| e.text().len() as u16).max().unwrap_or(0) + 4;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(entries_width), Constraint::Min(0)])
            .split(inner);

        let lines: Vec<Line> = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let style = if index == self.current_index && self.enabled {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(fg)
                };
                Line::styled(format!("  {}  ", entry.text()), style)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), columns[0]);

        if self.enabled && self.current_entry() == MenuEntry::Controls {
            let lines: Vec<Line> = self.controls.iter().map(|c| Line::from(c.as_str())).collect();
            frame.render_widget(Paragraph::new(lines).style(Style::default().fg(fg)), columns[1]);
        }
    }
}

impl Layer for MainMenu {
    fn is_dirty(&self) -> bool {
        self.dirty || self.fade.is_some()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) {
        if self.enabled {
            self.draw_menu(frame, area, 255);
        } else if let Some(alpha) = self.fade {
            self.draw_menu(frame, area, alpha.clamp(0, 255) as u8);
        }
        self.dirty = false;
    }

    fn tick(&mut self) {
        if let Some(alpha) = self.fade {
            let alpha = alpha - FADE_SPEED;
            self.fade = (alpha >= 0).then_some(alpha);
            self.dirty = true;
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, action: Option<Action>) -> LayerResponse {
        if action == Some(Action::ToggleMenu) {
            self.toggle();
            self.fade = None;
            return LayerResponse::Consumed;
        }
        if !self.enabled || action == Some(Action::Quit) {
            return LayerResponse::Ignored;
        }

        match key.code {
            KeyCode::Enter => self.select_current(),
            KeyCode::Up => {
                self.change_current_index(-1);
                LayerResponse::Consumed
            }
            KeyCode::Down => {
                self.change_current_index(1);
                LayerResponse::Consumed
            }
            _ => LayerResponse::Consumed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn menu() -> MainMenu {
        MainMenu::new(vec!["Down: Drop Piece".into()])
    }

    #[test]
    fn test_starts_enabled_on_new_game() {
        let menu = menu();
        assert!(menu.is_enabled());
        assert_eq!(menu.current_entry(), MenuEntry::NewGame);
    }

    #[test]
    fn test_selection_wraps() {
        let mut menu = menu();
        menu.change_current_index(-1);
        assert_eq!(menu.current_entry(), MenuEntry::Quit);
        menu.change_current_index(1);
        assert_eq!(menu.current_entry(), MenuEntry::NewGame);
        menu.change_current_index(4);
        assert_eq!(menu.current_entry(), MenuEntry::Controls);
    }

    #[test]
    fn test_arrow_keys_move_selection() {
        let mut menu = menu();
        assert_eq!(menu.handle_key(&key(KeyCode::Down), Some(Action::DropPiece)), LayerResponse::Consumed);
        assert_eq!(menu.current_entry(), MenuEntry::Controls);
        assert_eq!(menu.handle_key(&key(KeyCode::Up), None), LayerResponse::Consumed);
        assert_eq!(menu.current_entry(), MenuEntry::NewGame);
    }

    #[test]
    fn test_select_new_game_closes_and_fades() {
        let mut menu = menu();
        let response = menu.handle_key(&key(KeyCode::Enter), None);
        assert_eq!(response, LayerResponse::Command(Command::NewGame));
        assert!(!menu.is_enabled());
        assert!(menu.is_fading());

        for _ in 0..=(FADE_START / FADE_SPEED) {
            menu.tick();
        }
        assert!(!menu.is_fading());
    }

    #[test]
    fn test_select_quit() {
        let mut menu = menu();
        menu.change_current_index(2);
        assert_eq!(
            menu.handle_key(&key(KeyCode::Enter), None),
            LayerResponse::Command(Command::Quit)
        );
    }

    #[test]
    fn test_quit_passes_through() {
        let mut menu = menu();
        assert_eq!(
            menu.handle_key(&key(KeyCode::Char('q')), Some(Action::Quit)),
            LayerResponse::Ignored
        );
    }

    #[test]
    fn test_toggle_and_ignore_when_closed() {
        let mut menu = menu();
        assert_eq!(
            menu.handle_key(&key(KeyCode::Esc), Some(Action::ToggleMenu)),
            LayerResponse::Consumed
        );
        assert!(!menu.is_enabled());
        assert_eq!(
            menu.handle_key(&key(KeyCode::Down), Some(Action::DropPiece)),
            LayerResponse::Ignored
        );
        menu.handle_key(&key(KeyCode::Esc), Some(Action::ToggleMenu));
        assert!(menu.is_enabled());
    }
}
