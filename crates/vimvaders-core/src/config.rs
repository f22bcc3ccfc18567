//! Game configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[serde(default)]` fills every missing field from `Default`, so a
//! config file only needs the keys it changes:
//!
//! ```toml
//! [gameplay]
//! area_attack_count = 3
//!
//! [keyboard.bindings]
//! l = "word-forward"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::tutorial::{TutorialStage, default_page};

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gameplay tuning
    pub gameplay: GameplayConfig,

    /// Tutorial page overrides
    pub tutorial: TutorialConfig,

    /// Extra key bindings
    pub keyboard: KeyboardConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Using default config: {}", err);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("vimvaders").join("config.toml"))
    }

    /// Renders the config as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the config to a file, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Page shown for a tutorial stage.
    pub fn page(&self, stage: TutorialStage) -> Vec<String> {
        let custom = match stage.get() {
            1 => &self.tutorial.stage1,
            2 => &self.tutorial.stage2,
            _ => &self.tutorial.stage3,
        };
        custom.clone().unwrap_or_else(|| default_page(stage))
    }
}

/// Gameplay tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Enemies removed by a visual delete
    pub area_attack_count: u32,

    /// Stage the game opens at
    pub starting_stage: TutorialStage,

    /// Total kills that unlock `w` and `b`
    pub movement_unlock_kills: u32,

    /// Total kills that unlock `v` and `d`
    pub visual_unlock_kills: u32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            area_attack_count: 2,
            starting_stage: TutorialStage::SHOOTING,
            movement_unlock_kills: 2,
            visual_unlock_kills: 5,
        }
    }
}

/// Optional replacement pages, one per stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorialConfig {
    pub stage1: Option<Vec<String>>,
    pub stage2: Option<Vec<String>>,
    pub stage3: Option<Vec<String>>,
}

/// Keyboard configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Key name to action name, e.g. `l = "word-forward"`
    pub bindings: HashMap<String, String>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.gameplay.area_attack_count, 2);
        assert_eq!(config.gameplay.starting_stage, TutorialStage::SHOOTING);
        assert!(config.keyboard.bindings.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(
            parsed.gameplay.visual_unlock_kills,
            config.gameplay.visual_unlock_kills
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [gameplay]
            area_attack_count = 4
            starting_stage = 9

            [tutorial]
            stage2 = ["custom"]
            "#,
        )
        .unwrap();

        assert_eq!(parsed.gameplay.area_attack_count, 4);
        assert_eq!(parsed.gameplay.starting_stage, TutorialStage::VISUAL);
        assert_eq!(parsed.gameplay.movement_unlock_kills, 2);
        assert_eq!(parsed.page(TutorialStage::MOVEMENT), vec!["custom"]);
        assert_eq!(parsed.page(TutorialStage::SHOOTING)[0], "Dear Vim Warrior,");
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.gameplay.area_attack_count = 7;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.gameplay.area_attack_count, 7);
    }

    #[test]
    fn test_bad_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "gameplay = 3").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
