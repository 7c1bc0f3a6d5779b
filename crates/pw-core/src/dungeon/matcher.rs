//! Slot matching between a placed room and a candidate room
//!
//! First fit in slot declaration order, no backtracking. A successful match
//! consumes both slots for good.

use super::room::{Room, RoomSlot};

/// Indices of a matched slot pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotMatch {
    /// Index into the parent room's slots
    pub parent_slot: usize,
    /// Index into the candidate room's slots
    pub candidate_slot: usize,
}

/// Whether two unmatched slots may connect
///
/// Both must lie on the same wall direction, span the same number of cells
/// and carry orientation descriptors. Identical descriptors are rejected;
/// nothing further checks that the sides are actually opposite, so e.g.
/// `Left` against `Top` is accepted.
pub fn slots_compatible(parent_slot: &RoomSlot, candidate_slot: &RoomSlot) -> bool {
    if parent_slot.matched || candidate_slot.matched {
        return false;
    }
    if parent_slot.is_horizontal != candidate_slot.is_horizontal {
        return false;
    }
    if parent_slot.length != candidate_slot.length {
        return false;
    }

    match (parent_slot.distance_to_midpoint, candidate_slot.distance_to_midpoint) {
        (Some(parent_desc), Some(candidate_desc)) => parent_desc != candidate_desc,
        _ => false,
    }
}

/// Find the first compatible slot pair and mark both slots matched
///
/// Returns `None` without touching either room when there is no parent, a
/// room has no slots, or no pair is compatible.
pub fn find_match(parent: Option<&mut Room>, candidate: &mut Room) -> Option<SlotMatch> {
    let parent = parent?;
    let found = first_compatible(parent.slots(), candidate.slots())?;

    parent.slots_mut()[found.parent_slot].matched = true;
    candidate.slots_mut()[found.candidate_slot].matched = true;
    Some(found)
}

fn first_compatible(parent_slots: &[RoomSlot], candidate_slots: &[RoomSlot]) -> Option<SlotMatch> {
    for (parent_idx, parent_slot) in parent_slots.iter().enumerate() {
        if parent_slot.matched {
            continue;
        }

        for (candidate_idx, candidate_slot) in candidate_slots.iter().enumerate() {
            if !slots_compatible(parent_slot, candidate_slot) {
                continue;
            }

            if let (Some(p), Some(c)) =
                (parent_slot.distance_to_midpoint, candidate_slot.distance_to_midpoint)
            {
                tracing::debug!("Slot {} matched slot {}", p, c);
            }
            return Some(SlotMatch {
                parent_slot: parent_idx,
                candidate_slot: candidate_idx,
            });
        }
    }
    None
}
