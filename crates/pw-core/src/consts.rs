//! Placement constants

/// Default grid cell size in world units
pub const DEFAULT_CELL_SIZE: f32 = 32.0;

/// Index of the starting room in a level graph
pub const START_NODE: usize = 0;
