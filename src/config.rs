use std::path::Path;

use crate::animation::AnimationConfig;
use crate::error::ConfigError;
use crate::game::GameState;
use crate::ui::ControlsConfig;

/// Board dimensions and the run length needed to win.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub win_run_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 7,
            height: 6,
            win_run_length: 4,
        }
    }
}

impl GameConfig {
    pub fn build_engine(&self) -> Result<GameState, ConfigError> {
        GameState::new(self.win_run_length, self.width, self.height)
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub animation: AnimationConfig,
    pub controls: ControlsConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.width == 0 {
            return Err(ConfigError::Validation("game.width must be >= 1".into()));
        }
        if self.game.height == 0 {
            return Err(ConfigError::Validation("game.height must be >= 1".into()));
        }
        if self.game.win_run_length == 0 {
            return Err(ConfigError::Validation(
                "game.win_run_length must be >= 1".into(),
            ));
        }

        if !(0.0..1.0).contains(&self.animation.restitution) {
            return Err(ConfigError::Validation(
                "animation.restitution must be in [0, 1)".into(),
            ));
        }
        if self.animation.speed_multiplier <= 0.0 || !self.animation.speed_multiplier.is_finite() {
            return Err(ConfigError::Validation(
                "animation.speed_multiplier must be > 0".into(),
            ));
        }
        if self.animation.fps == 0 {
            return Err(ConfigError::Validation("animation.fps must be > 0".into()));
        }

        self.controls.bindings()?;

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[game]
win_run_length = 5
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.win_run_length, 5);
        // Other fields should be defaults
        assert_eq!(config.game.width, 7);
        assert!((config.animation.restitution - 0.3).abs() < 1e-12);
        assert_eq!(config.controls.drop, "Down");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.game.height, default.game.height);
        assert_eq!(config.animation.fps, default.animation.fps);
    }

    #[test]
    fn test_build_engine() {
        let config = GameConfig {
            width: 4,
            height: 3,
            win_run_length: 3,
        };
        let engine = config.build_engine().unwrap();
        assert_eq!((engine.width(), engine.height(), engine.win_run_length()), (4, 3, 3));
    }

    #[test]
    fn test_validation_rejects_zero_width() {
        let mut config = AppConfig::default();
        config.game.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_run_length() {
        let mut config = AppConfig::default();
        config.game.win_run_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_restitution_of_one() {
        let mut config = AppConfig::default();
        config.animation.restitution = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_negative_restitution() {
        let mut config = AppConfig::default();
        config.animation.restitution = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_speed() {
        let mut config = AppConfig::default();
        config.animation.speed_multiplier = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_fps() {
        let mut config = AppConfig::default();
        config.animation.fps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_clashing_keys() {
        let mut config = AppConfig::default();
        config.controls.left = "Right".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.game.width, 7);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[game]
width = 9
height = 8

[animation]
bounce = false
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!((config.game.width, config.game.height), (9, 8));
        assert!(!config.animation.bounce);
        // Others are defaults
        assert_eq!(config.game.win_run_length, 4);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[game]\nheight = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
