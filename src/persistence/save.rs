use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::lenient;
use crate::entity::{InventorySnapshot, PlayerSnapshot};
use crate::world::WorldSnapshot;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub world: WorldSnapshot,
    pub player: PlayerSnapshot,
    pub inventory: InventorySnapshot,
    /// Seconds into the current day
    pub day_timer: f32,
}

impl SaveGame {
    /// Decode any JSON document. Each top-level field degrades on its own;
    /// a missing or mangled section never aborts the load.
    pub fn from_value(value: &Value) -> Self {
        let section = |key: &str| value.get(key).cloned().unwrap_or(Value::Null);

        Self {
            world: WorldSnapshot::from_value(&section("world")),
            player: PlayerSnapshot::from_value(&section("player"), Vec2::ZERO),
            inventory: InventorySnapshot::from_value(&section("inventory")),
            day_timer: lenient::f32_field(value, "day_timer").unwrap_or(0.0),
        }
    }

    /// Parse save text. Fails only when the text is not JSON at all.
    pub fn from_json_str(text: &str) -> Result<Self, SaveError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    pub fn to_json_string(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A save document on disk
#[derive(Debug, Clone)]
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the whole document
    pub fn save(&self, game: &SaveGame) -> Result<(), SaveError> {
        let text = game.to_json_string()?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, &text)?;
        std::fs::rename(&temp_path, &self.path)?;

        log::info!(
            "[SAVE] {} chunks, {} bytes -> {}",
            game.world.chunks.len(),
            text.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read the document. `Ok(None)` means no save exists yet.
    pub fn load(&self) -> Result<Option<SaveGame>, SaveError> {
        if !self.path.exists() {
            log::info!("[LOAD] No save at {}", self.path.display());
            return Ok(None);
        }

        let text = std::fs::read_to_string(&self.path)?;
        let game = SaveGame::from_json_str(&text)?;
        log::info!(
            "[LOAD] {} chunks from {}",
            game.world.chunks.len(),
            self.path.display()
        );
        Ok(Some(game))
    }
}
