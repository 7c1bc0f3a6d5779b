//! Position of a candidate room relative to a matched parent slot
//!
//! Only a parent slot facing `Left` paired with a candidate slot facing
//! `Right` gets the full alignment. Every other pairing, Top/Bottom included,
//! starts from the parent slot's world position as is.

use crate::config::PlacementConfig;
use crate::error::PlacementError;

use super::coords::{tile_to_world, Orientation, TilePos, Vec2};
use super::room::{Room, RoomSlot};

/// Compute where the candidate room's root goes, or `None` if either room
/// lacks geometry or a slot lacks an orientation
pub fn compute_position(
    parent: &Room,
    candidate: &Room,
    parent_slot: &RoomSlot,
    candidate_slot: &RoomSlot,
    overlap: bool,
    config: &PlacementConfig,
) -> Option<Vec2> {
    match try_compute_position(parent, candidate, parent_slot, candidate_slot, overlap, config) {
        Ok(position) => Some(position),
        Err(err) => {
            tracing::trace!("No position: {}", err);
            None
        }
    }
}

/// [`compute_position`] reporting why no position exists
pub fn try_compute_position(
    parent: &Room,
    candidate: &Room,
    parent_slot: &RoomSlot,
    candidate_slot: &RoomSlot,
    overlap: bool,
    config: &PlacementConfig,
) -> Result<Vec2, PlacementError> {
    let parent_root = parent
        .root_position
        .ok_or(PlacementError::GeometryUnavailable("parent root position"))?;
    let candidate_root = candidate
        .root_position
        .ok_or(PlacementError::GeometryUnavailable("candidate root position"))?;
    let parent_map = parent
        .tile_map
        .as_ref()
        .ok_or(PlacementError::GeometryUnavailable("parent tile map"))?;
    let candidate_map = candidate
        .tile_map
        .as_ref()
        .ok_or(PlacementError::GeometryUnavailable("candidate tile map"))?;

    let (Some(parent_desc), Some(candidate_desc)) =
        (parent_slot.distance_to_midpoint, candidate_slot.distance_to_midpoint)
    else {
        return Err(PlacementError::InputAbsent("slot orientation"));
    };

    let parent_slot_world = tile_to_world(parent_root, parent_map, parent_slot.start_position);
    let candidate_slot_world =
        tile_to_world(candidate_root, candidate_map, candidate_slot.start_position);

    let left_of_parent =
        parent_desc.side == Orientation::Left && candidate_desc.side == Orientation::Right;
    let mut result = if left_of_parent {
        // New room goes to the left of the parent
        let mut pos = parent_slot_world + candidate_map.origin
            - candidate_map.map_to_local(candidate_slot.start_position);
        pos.y -= candidate_slot_world.y - parent_slot_world.y;
        if !overlap {
            pos.x -= config.cell_size;
        }
        pos
    } else {
        parent_slot_world
    };

    let half_cell = config.half_cell();
    if parent_slot.is_horizontal {
        result +=
            candidate_map.map_to_local(TilePos::new(candidate_slot.end_position.x, 0)) - half_cell;
    } else {
        result -=
            candidate_map.map_to_local(TilePos::new(0, candidate_slot.end_position.y)) - half_cell;
    }

    Ok(result)
}
