//! Dungeon assembly
//!
//! Contains coordinates, rooms and their slots, template lookup, and the
//! placement strategy that stitches rooms together.

mod coords;
mod generator;
mod graph;
mod matcher;
mod placement;
mod position;
mod room;
mod template;

pub use coords::{
    orientation_of, tile_to_world, Orientation, OrientationDescriptor, TileMap, TilePos, TileRect,
    Vec2,
};
pub use generator::{LevelGenerator, LevelLayout};
pub use graph::{LevelGraph, RoomEdge, RoomNodeData};
pub use matcher::{find_match, slots_compatible, SlotMatch};
pub use placement::{
    MapRoot, PatchworkStrategy, RoomPlacementData, RoomPlacementStrategy, SceneChild, SceneRoot,
};
pub use position::{compute_position, try_compute_position};
pub use room::{Room, RoomSlot, RoomTemplate, SlotDefinition};
pub use template::{RoomTemplateRepository, TemplateLibrary};
