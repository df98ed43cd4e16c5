use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::ConfigError;

/// Something the player asked for, independent of which key asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    DropPiece,
    MoveLeft,
    MoveRight,
    NewGame,
    ToggleMenu,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::ToggleMenu,
        Action::Quit,
        Action::DropPiece,
        Action::MoveLeft,
        Action::MoveRight,
        Action::NewGame,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::Quit => "Quit",
            Action::DropPiece => "Drop Piece",
            Action::MoveLeft => "Move Left",
            Action::MoveRight => "Move Right",
            Action::NewGame => "New Game",
            Action::ToggleMenu => "Toggle Menu",
        }
    }
}

/// A key plus the modifiers that must be held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    pub fn new(code: KeyCode) -> Self {
        Key {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Parse names like `"Down"`, `"q"`, `"F4"` or `"Alt+F4"`.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::Validation(format!("unknown key '{name}'"));

        let mut modifiers = KeyModifiers::NONE;
        let mut rest = name.trim();
        while let Some((prefix, tail)) = rest.split_once('+').filter(|(_, tail)| !tail.is_empty()) {
            modifiers |= match prefix.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(invalid()),
            };
            rest = tail;
        }

        let code = match rest.to_ascii_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "space" => KeyCode::Char(' '),
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            lower => {
                let mut chars = rest.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => {
                        let n = lower
                            .strip_prefix('f')
                            .and_then(|n| n.parse::<u8>().ok())
                            .filter(|n| (1..=12).contains(n))
                            .ok_or_else(invalid)?;
                        KeyCode::F(n)
                    }
                }
            }
        };

        Ok(Key { code, modifiers })
    }

    fn from_event(event: &KeyEvent) -> Self {
        // Shift is already folded into the character for printable keys
        let mut modifiers = event.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
        if matches!(event.code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Key {
            code: event.code,
            modifiers,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("Alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("Shift+")?;
        }
        match self.code {
            KeyCode::Up => f.write_str("Up"),
            KeyCode::Down => f.write_str("Down"),
            KeyCode::Left => f.write_str("Left"),
            KeyCode::Right => f.write_str("Right"),
            KeyCode::Enter => f.write_str("Enter"),
            KeyCode::Esc => f.write_str("Esc"),
            KeyCode::Tab => f.write_str("Tab"),
            KeyCode::Backspace => f.write_str("Backspace"),
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Key names for each action, as written in the `[controls]` config section.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub drop: String,
    pub left: String,
    pub right: String,
    pub new_game: String,
    pub menu: String,
    pub quit: String,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        ControlsConfig {
            drop: "Down".into(),
            left: "Left".into(),
            right: "Right".into(),
            new_game: "n".into(),
            menu: "Esc".into(),
            quit: "q".into(),
        }
    }
}

impl ControlsConfig {
    /// Parse every key name and build the two-way binding table.
    pub fn bindings(&self) -> Result<KeyBindings, ConfigError> {
        let entries = [
            (Action::DropPiece, &self.drop),
            (Action::MoveLeft, &self.left),
            (Action::MoveRight, &self.right),
            (Action::NewGame, &self.new_game),
            (Action::ToggleMenu, &self.menu),
            (Action::Quit, &self.quit),
        ];

        let mut bindings = KeyBindings::default();
        for (action, name) in entries {
            let key = Key::parse(name)?;
            if let Some(previous) = bindings.key_to_action.insert(key, action) {
                return Err(ConfigError::Validation(format!(
                    "key '{key}' is bound to both {} and {}",
                    previous.label(),
                    action.label()
                )));
            }
            bindings.action_to_key.insert(action, key);
        }
        Ok(bindings)
    }
}

/// Lookup between keys and actions in both directions.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    action_to_key: HashMap<Action, Key>,
    key_to_action: HashMap<Key, Action>,
}

impl KeyBindings {
    pub fn action_for(&self, event: &KeyEvent) -> Option<Action> {
        self.key_to_action.get(&Key::from_event(event)).copied()
    }

    pub fn key_for(&self, action: Action) -> Option<Key> {
        self.action_to_key.get(&action).copied()
    }

    /// One `key: action` line per bound action.
    pub fn controls_summary(&self) -> Vec<String> {
        Action::ALL
            .iter()
            .filter_map(|&action| {
                self.key_for(action)
                    .map(|key| format!("{key}: {}", action.label()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(Key::parse("Down").unwrap(), Key::new(KeyCode::Down));
        assert_eq!(Key::parse("q").unwrap(), Key::new(KeyCode::Char('q')));
        assert_eq!(Key::parse("space").unwrap(), Key::new(KeyCode::Char(' ')));
        assert_eq!(Key::parse("F4").unwrap(), Key::new(KeyCode::F(4)));
        assert_eq!(
            Key::parse("Alt+F4").unwrap(),
            Key {
                code: KeyCode::F(4),
                modifiers: KeyModifiers::ALT
            }
        );
        assert_eq!(Key::parse("+").unwrap(), Key::new(KeyCode::Char('+')));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(Key::parse("F13").is_err());
        assert!(Key::parse("PageSideways").is_err());
        assert!(Key::parse("Hyper+q").is_err());
    }

    #[test]
    fn test_key_display_roundtrips() {
        for name in ["Down", "Esc", "Alt+F4", "Ctrl+c", "Space", "n"] {
            let key = Key::parse(name).unwrap();
            assert_eq!(Key::parse(&key.to_string()).unwrap(), key);
        }
    }

    #[test]
    fn test_default_bindings() {
        let bindings = ControlsConfig::default().bindings().unwrap();
        assert_eq!(
            bindings.action_for(&press(KeyCode::Down, KeyModifiers::NONE)),
            Some(Action::DropPiece)
        );
        assert_eq!(
            bindings.action_for(&press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(
            bindings.action_for(&press(KeyCode::Char('x'), KeyModifiers::NONE)),
            None
        );
        assert_eq!(bindings.key_for(Action::MoveLeft), Some(Key::new(KeyCode::Left)));
    }

    #[test]
    fn test_modifiers_must_match() {
        let controls = ControlsConfig {
            quit: "Alt+F4".into(),
            ..ControlsConfig::default()
        };
        let bindings = controls.bindings().unwrap();
        assert_eq!(
            bindings.action_for(&press(KeyCode::F(4), KeyModifiers::ALT)),
            Some(Action::Quit)
        );
        assert_eq!(bindings.action_for(&press(KeyCode::F(4), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_shifted_char_matches() {
        let controls = ControlsConfig {
            new_game: "N".into(),
            ..ControlsConfig::default()
        };
        let bindings = controls.bindings().unwrap();
        assert_eq!(
            bindings.action_for(&press(KeyCode::Char('N'), KeyModifiers::SHIFT)),
            Some(Action::NewGame)
        );
    }

    #[test]
    fn test_duplicate_binding_rejected() {
        let controls = ControlsConfig {
            quit: "Down".into(),
            ..ControlsConfig::default()
        };
        assert!(controls.bindings().is_err());
    }

    #[test]
    fn test_controls_summary() {
        let bindings = ControlsConfig::default().bindings().unwrap();
        let summary = bindings.controls_summary();
        assert_eq!(summary.len(), 6);
        assert_eq!(summary[0], "Esc: Toggle Menu");
        assert!(summary.contains(&"Down: Drop Piece".to_string()));
    }
}
