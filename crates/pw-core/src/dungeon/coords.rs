//! Tile grid and world space coordinates
//!
//! Tile coordinates are integer cells with y growing downward. World
//! coordinates are `f32` positions; a tile maps to the world position of
//! its cell center.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};
use strum::Display;

/// A world space position or offset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A cell on a room's tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Inclusive rectangle of tiles, e.g. the used area of a room template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRect {
    /// Left x coordinate
    pub lx: i32,
    /// Top y coordinate
    pub ly: i32,
    /// Right x coordinate
    pub hx: i32,
    /// Bottom y coordinate
    pub hy: i32,
}

impl TileRect {
    pub fn new(lx: i32, ly: i32, hx: i32, hy: i32) -> Self {
        Self { lx, ly, hx, hy }
    }
}

/// Tile to world conversion context of one room
///
/// `origin` is where the tile grid sits relative to the room's root.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    pub origin: Vec2,
    pub cell_size: f32,
}

impl TileMap {
    pub fn new(origin: Vec2, cell_size: f32) -> Self {
        Self { origin, cell_size }
    }

    /// Center of a tile, relative to the tile grid
    pub fn map_to_local(&self, tile: TilePos) -> Vec2 {
        let half = self.cell_size / 2.0;
        Vec2::new(
            tile.x as f32 * self.cell_size + half,
            tile.y as f32 * self.cell_size + half,
        )
    }
}

/// World position of a tile for a room whose root sits at `root`
pub fn tile_to_world(root: Vec2, tile_map: &TileMap, tile: TilePos) -> Vec2 {
    root + tile_map.map_to_local(tile)
}

/// Side of a room's midpoint a slot sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Orientation {
    Left,
    Right,
    Top,
    Bottom,
}

/// `[side, offset]` location of a slot relative to its room's midpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrientationDescriptor {
    pub side: Orientation,
    /// Distance from the midpoint along the side's axis, in tiles
    pub offset: i64,
}

impl OrientationDescriptor {
    pub fn new(side: Orientation, offset: i64) -> Self {
        Self { side, offset }
    }
}

impl fmt::Display for OrientationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.side, self.offset)
    }
}

/// Classify a slot spanning `start..=end` against the midpoint of `used_rect`
///
/// The axis with the larger displacement decides the side; ties go to the
/// vertical axis.
pub fn orientation_of(
    start: TilePos,
    end: TilePos,
    used_rect: &TileRect,
) -> OrientationDescriptor {
    // Doubled coordinates keep half-tile midpoints exact; i64 holds any i32 sum.
    let dx = (i64::from(start.x) + i64::from(end.x))
        - (i64::from(used_rect.lx) + i64::from(used_rect.hx));
    let dy = (i64::from(start.y) + i64::from(end.y))
        - (i64::from(used_rect.ly) + i64::from(used_rect.hy));

    if dx.abs() > dy.abs() {
        let side = if dx < 0 { Orientation::Left } else { Orientation::Right };
        OrientationDescriptor::new(side, dx.abs() / 2)
    } else {
        let side = if dy < 0 { Orientation::Top } else { Orientation::Bottom };
        OrientationDescriptor::new(side, dy.abs() / 2)
    }
}
