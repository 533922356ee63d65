//! Session tuning loaded from a RON file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DAY_LENGTH: f32 = 140.0;
pub const DEFAULT_REACH: i32 = 8;
pub const DEFAULT_SAVE_PATH: &str = "gascraft2d_save.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse RON config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Gameplay settings. Every field is optional in the file.
///
/// ```ron
/// (
///     seed: Some(77),
///     day_length: 90.0,
///     reach: 6,
///     save_path: "saves/world.json",
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed seed for new worlds; `None` picks one from OS entropy
    pub seed: Option<u64>,
    /// Length of a full day/night cycle in seconds
    pub day_length: f32,
    /// Mining and placement reach in tiles, per axis
    pub reach: i32,
    pub save_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            day_length: DEFAULT_DAY_LENGTH,
            reach: DEFAULT_REACH,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
        }
    }
}

impl GameConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: GameConfig = ron::from_str(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config.sanitized())
    }

    /// Like [`GameConfig::load`], but any failure falls back to the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with their defaults
    fn sanitized(mut self) -> Self {
        if !(self.day_length.is_finite() && self.day_length > 0.0) {
            log::warn!(
                "Invalid day_length {}, using {}",
                self.day_length,
                DEFAULT_DAY_LENGTH
            );
            self.day_length = DEFAULT_DAY_LENGTH;
        }
        if self.reach < 0 {
            log::warn!("Negative reach {}, using {}", self.reach, DEFAULT_REACH);
            self.reach = DEFAULT_REACH;
        }
        self
    }
}
