//! pw-core: Patchwork room placement for procedural levels
//!
//! Treats every room template as a puzzle piece: rooms expose "slots" (door
//! openings on their walls) and a new room is positioned so one of its slots
//! lines up with a free slot of an already placed parent room.
//!
//! Placement itself is pure computation. Rendering, asset loading and scene
//! management are reached only through narrow traits: template lookup,
//! map root attachment and [`RandomSource`].

pub mod config;
pub mod dungeon;
pub mod error;

mod consts;
mod rng;

pub use config::PlacementConfig;
pub use consts::*;
pub use error::{ConfigError, PlacementError};
pub use rng::{GameRng, RandomSource};
