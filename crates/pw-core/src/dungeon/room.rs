//! Room templates, slots and live rooms
//!
//! A [`RoomTemplate`] is the immutable blueprint shared by every room built
//! from it. A [`Room`] is one instance, carrying its own slot state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::coords::{orientation_of, OrientationDescriptor, TileMap, TilePos, TileRect, Vec2};

/// Slot as declared by a template: the first and last tile of the opening
///
/// Both ends must share a row (horizontal slot) or a column (vertical
/// slot); templates with diagonal slots are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDefinition {
    pub start: TilePos,
    pub end: TilePos,
}

impl SlotDefinition {
    /// Whether the slot runs along a single row or column
    pub fn is_straight(&self) -> bool {
        self.start.x == self.end.x || self.start.y == self.end.y
    }
}

/// Blueprint of a room: tile layout and slot openings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTemplate {
    /// Identifier used by room template sets
    pub id: String,
    /// Tile grid of the room; rooms without one cannot be positioned
    #[serde(default)]
    pub tile_map: Option<TileMap>,
    /// Used area of the tile grid; without it slots get no orientation
    #[serde(default)]
    pub used_rect: Option<TileRect>,
    #[serde(default)]
    pub slots: Vec<SlotDefinition>,
}

impl RoomTemplate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tile_map: None,
            used_rect: None,
            slots: Vec::new(),
        }
    }

    pub fn with_tile_map(mut self, tile_map: TileMap) -> Self {
        self.tile_map = Some(tile_map);
        self
    }

    pub fn with_used_rect(mut self, used_rect: TileRect) -> Self {
        self.used_rect = Some(used_rect);
        self
    }

    pub fn with_slot(mut self, start: TilePos, end: TilePos) -> Self {
        self.slots.push(SlotDefinition { start, end });
        self
    }

    /// Check that every slot runs along a row or a column
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.slots.iter().position(|def| !def.is_straight()) {
            Some(index) => Err(ConfigError::DiagonalSlot {
                template: self.id.clone(),
                index,
            }),
            None => Ok(()),
        }
    }

    /// Build a fresh room from this template
    ///
    /// The room's root sits at the local origin until it is placed. Slot
    /// descriptors are computed against `used_rect`, or left empty on every
    /// slot when the template has none.
    pub fn instantiate(self: &Arc<Self>) -> Room {
        let slots = self
            .slots
            .iter()
            .map(|def| {
                let descriptor = self
                    .used_rect
                    .as_ref()
                    .map(|rect| orientation_of(def.start, def.end, rect));
                RoomSlot::new(def.start, def.end, descriptor)
            })
            .collect();

        Room {
            template: Some(Arc::clone(self)),
            root_position: Some(Vec2::ZERO),
            tile_map: self.tile_map,
            slots,
        }
    }
}

/// A connection point on a room's wall
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSlot {
    /// Slot lies along a horizontal wall
    pub is_horizontal: bool,
    /// Number of cells the opening spans
    pub length: u64,
    pub start_position: TilePos,
    pub end_position: TilePos,
    pub distance_to_midpoint: Option<OrientationDescriptor>,
    /// Set once the slot has been consumed by a match
    pub matched: bool,
}

impl RoomSlot {
    /// Create an unmatched slot spanning `start..=end`
    ///
    /// A slot whose ends share a row is horizontal; any other slot is taken
    /// as vertical and measured along y.
    pub fn new(
        start: TilePos,
        end: TilePos,
        distance_to_midpoint: Option<OrientationDescriptor>,
    ) -> Self {
        let is_horizontal = start.y == end.y;
        let span = if is_horizontal {
            i64::from(end.x) - i64::from(start.x)
        } else {
            i64::from(end.y) - i64::from(start.y)
        };

        Self {
            is_horizontal,
            length: span.unsigned_abs() + 1,
            start_position: start,
            end_position: end,
            distance_to_midpoint,
            matched: false,
        }
    }
}

/// A room instance that is placed or can be placed
#[derive(Debug, Clone)]
pub struct Room {
    template: Option<Arc<RoomTemplate>>,
    /// Position of the room's root; `None` for a room without a scene root
    pub root_position: Option<Vec2>,
    pub tile_map: Option<TileMap>,
    slots: Vec<RoomSlot>,
}

impl Room {
    /// Create a room not backed by a template
    pub fn new(
        root_position: Option<Vec2>,
        tile_map: Option<TileMap>,
        slots: Vec<RoomSlot>,
    ) -> Self {
        Self {
            template: None,
            root_position,
            tile_map,
            slots,
        }
    }

    /// Template this room was built from
    pub fn template(&self) -> Option<&Arc<RoomTemplate>> {
        self.template.as_ref()
    }

    pub fn template_id(&self) -> Option<&str> {
        self.template.as_deref().map(|t| t.id.as_str())
    }

    /// Slots in declaration order
    pub fn slots(&self) -> &[RoomSlot] {
        &self.slots
    }

    /// Mutable slots; the slot count is fixed after instantiation
    pub fn slots_mut(&mut self) -> &mut [RoomSlot] {
        &mut self.slots
    }

    pub fn has_slots(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Slots not yet consumed by a match
    pub fn free_slot_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.matched).count()
    }
}
