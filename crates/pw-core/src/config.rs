//! Placement configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_CELL_SIZE;
use crate::dungeon::Vec2;
use crate::error::{read_json, ConfigError};

/// Tunables for the patchwork strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Grid cell size in world units
    pub cell_size: f32,
    /// Whether connected slots share their boundary tiles
    pub slot_overlap: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            slot_overlap: true,
        }
    }
}

impl PlacementConfig {
    /// Half a cell on both axes
    pub fn half_cell(&self) -> Vec2 {
        Vec2::new(self.cell_size / 2.0, self.cell_size / 2.0)
    }

    /// Parse from a JSON string; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_json(path.as_ref())
    }
}
