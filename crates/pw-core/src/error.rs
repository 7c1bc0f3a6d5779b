//! Error types for placement and configuration loading
//!
//! Placement failures are never fatal: the strategy turns every
//! [`PlacementError`] into an empty result and the level driver decides
//! whether to skip the room.

use thiserror::Error;

/// Why a placement attempt produced nothing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// A required input (room, parent, template set, template) was missing or empty
    #[error("placement input absent: {0}")]
    InputAbsent(&'static str),

    /// No candidate template offered a slot compatible with the parent
    #[error("no compatible slot pair found")]
    NoMatchFound,

    /// A room lacks the root position or tile map needed to compute geometry
    #[error("room geometry unavailable: {0}")]
    GeometryUnavailable(&'static str),
}

/// Errors loading configuration, templates or level files
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("template '{template}': slot {index} is neither horizontal nor vertical")]
    DiagonalSlot { template: String, index: usize },
}

impl ConfigError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Read a JSON file into any deserializable type
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}
