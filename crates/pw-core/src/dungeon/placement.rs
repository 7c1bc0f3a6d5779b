//! Room placement strategies
//!
//! A strategy turns room graph nodes into concrete, positioned rooms. The
//! level generator only talks to [`RoomPlacementStrategy`], so other layouts
//! can be swapped in without touching it.
//!
//! [`PatchworkStrategy`] treats each template as a puzzle piece: a new room
//! is built from the first candidate template whose slot fits a free slot of
//! the parent room, and is moved so the two slots line up.

use crate::config::PlacementConfig;
use crate::error::PlacementError;
use crate::rng::RandomSource;

use super::coords::Vec2;
use super::graph::RoomNodeData;
use super::matcher::find_match;
use super::position::try_compute_position;
use super::room::Room;
use super::template::RoomTemplateRepository;

/// A room together with the position its root should be attached at
#[derive(Debug, Clone)]
pub struct RoomPlacementData {
    pub room: Room,
    pub position: Vec2,
}

impl RoomPlacementData {
    /// The room with its root moved to the placement position
    pub fn into_placed_room(self) -> Room {
        let mut room = self.room;
        room.root_position = Some(self.position);
        room
    }
}

/// Scene node that placed rooms are attached under
pub trait MapRoot {
    fn attach_child(&mut self, room: Room, position: Vec2);
}

/// A room attached to a [`SceneRoot`]
#[derive(Debug, Clone)]
pub struct SceneChild {
    pub room: Room,
    pub position: Vec2,
}

/// In-memory map root recording children in attachment order
///
/// Attaching the same placement twice yields two children.
#[derive(Debug, Clone, Default)]
pub struct SceneRoot {
    children: Vec<SceneChild>,
}

impl SceneRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[SceneChild] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl MapRoot for SceneRoot {
    fn attach_child(&mut self, room: Room, position: Vec2) {
        self.children.push(SceneChild { room, position });
    }
}

/// Capability interface of a room placement strategy
pub trait RoomPlacementStrategy {
    /// Attach the placed room under `map_root`
    ///
    /// Returns false, attaching nothing, if the room has no root to attach.
    fn place_room(&self, map_root: &mut dyn MapRoot, placement: &RoomPlacementData) -> bool;

    /// Pick the first room of a level; it goes at the world origin
    fn calculate_starting_room_placement(
        &self,
        rng: &mut dyn RandomSource,
        start_node: &RoomNodeData,
    ) -> Option<RoomPlacementData>;

    /// Build and position a room for `new_node` connected to `parent_room`
    ///
    /// A successful attempt consumes one free slot of the parent.
    fn calculate_new_room_placement(
        &self,
        rng: &mut dyn RandomSource,
        parent_room: Option<&mut Room>,
        new_node: &RoomNodeData,
    ) -> Option<RoomPlacementData>;
}

/// Slot-matching placement strategy
#[derive(Debug, Clone)]
pub struct PatchworkStrategy<R> {
    templates: R,
    config: PlacementConfig,
}

impl<R: RoomTemplateRepository> PatchworkStrategy<R> {
    pub fn new(templates: R) -> Self {
        Self::with_config(templates, PlacementConfig::default())
    }

    pub fn with_config(templates: R, config: PlacementConfig) -> Self {
        Self { templates, config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn templates(&self) -> &R {
        &self.templates
    }

    /// Starting room placement, reporting why none was produced
    pub fn try_starting_room_placement(
        &self,
        rng: &mut dyn RandomSource,
        start_node: &RoomNodeData,
    ) -> Result<RoomPlacementData, PlacementError> {
        if start_node.room_template_set.is_empty() {
            return Err(PlacementError::InputAbsent("room template set"));
        }

        let candidates = self.templates.resolve_template_set(&start_node.room_template_set);
        if candidates.is_empty() {
            return Err(PlacementError::InputAbsent("room templates"));
        }

        let index = rng.next_uint() as usize % candidates.len();
        let room = self
            .templates
            .instantiate_room(&candidates[index])
            .ok_or(PlacementError::InputAbsent("room instance"))?;

        Ok(RoomPlacementData {
            room,
            position: Vec2::ZERO,
        })
    }

    /// New room placement, reporting why none was produced
    ///
    /// Candidates are tried in resolution order and the first one that both
    /// matches and yields a position wins.
    pub fn try_new_room_placement(
        &self,
        _rng: &mut dyn RandomSource,
        parent_room: Option<&mut Room>,
        new_node: &RoomNodeData,
    ) -> Result<RoomPlacementData, PlacementError> {
        if new_node.room_template_set.is_empty() {
            return Err(PlacementError::InputAbsent("room template set"));
        }
        let parent = parent_room.ok_or(PlacementError::InputAbsent("parent room"))?;

        let candidates = self.templates.resolve_template_set(&new_node.room_template_set);
        if candidates.is_empty() {
            return Err(PlacementError::InputAbsent("room templates"));
        }
        if !parent.has_slots() {
            return Err(PlacementError::InputAbsent("parent room slots"));
        }

        let mut failure = PlacementError::NoMatchFound;
        for template in &candidates {
            let Some(mut room) = self.templates.instantiate_room(template) else {
                tracing::trace!("Template '{}' could not be instantiated", template.id);
                continue;
            };

            let Some(found) = find_match(Some(&mut *parent), &mut room) else {
                tracing::trace!("Template '{}' has no compatible slot", template.id);
                continue;
            };

            let position = try_compute_position(
                parent,
                &room,
                &parent.slots()[found.parent_slot],
                &room.slots()[found.candidate_slot],
                self.config.slot_overlap,
                &self.config,
            );
            match position {
                Ok(position) => return Ok(RoomPlacementData { room, position }),
                Err(err) => {
                    tracing::debug!(
                        "Template '{}' matched but cannot be positioned: {}",
                        template.id,
                        err
                    );
                    failure = err;
                }
            }
        }

        Err(failure)
    }
}

impl<R: RoomTemplateRepository> RoomPlacementStrategy for PatchworkStrategy<R> {
    fn place_room(&self, map_root: &mut dyn MapRoot, placement: &RoomPlacementData) -> bool {
        if placement.room.root_position.is_none() {
            tracing::debug!("Room has no root to attach");
            return false;
        }

        let room = placement.clone().into_placed_room();
        map_root.attach_child(room, placement.position);
        true
    }

    fn calculate_starting_room_placement(
        &self,
        rng: &mut dyn RandomSource,
        start_node: &RoomNodeData,
    ) -> Option<RoomPlacementData> {
        match self.try_starting_room_placement(rng, start_node) {
            Ok(placement) => Some(placement),
            Err(err) => {
                tracing::debug!("No starting room: {}", err);
                None
            }
        }
    }

    fn calculate_new_room_placement(
        &self,
        rng: &mut dyn RandomSource,
        parent_room: Option<&mut Room>,
        new_node: &RoomNodeData,
    ) -> Option<RoomPlacementData> {
        match self.try_new_room_placement(rng, parent_room, new_node) {
            Ok(placement) => Some(placement),
            Err(err) => {
                tracing::debug!("No room placement: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dungeon::coords::{TileMap, TilePos, TileRect};
    use crate::dungeon::room::RoomTemplate;
    use crate::dungeon::template::TemplateLibrary;
    use crate::rng::GameRng;

    /// Always returns the same draw
    struct FixedRng(u32);

    impl RandomSource for FixedRng {
        fn next_uint(&mut self) -> u32 {
            self.0
        }
    }

    fn grid() -> TileMap {
        TileMap::new(Vec2::ZERO, 32.0)
    }

    /// 10x6 room with a 2-tile door on the left and right walls
    fn hall(id: &str) -> RoomTemplate {
        RoomTemplate::new(id)
            .with_tile_map(grid())
            .with_used_rect(TileRect::new(0, 0, 9, 5))
            .with_slot(TilePos::new(0, 2), TilePos::new(0, 3))
            .with_slot(TilePos::new(9, 2), TilePos::new(9, 3))
    }

    fn library() -> TemplateLibrary {
        let mut library: TemplateLibrary = ["hall", "hall2"].into_iter().map(hall).collect();
        // Only a 3-tile door: never fits a hall
        library.insert(
            RoomTemplate::new("closet")
                .with_tile_map(grid())
                .with_used_rect(TileRect::new(0, 0, 4, 4))
                .with_slot(TilePos::new(4, 1), TilePos::new(4, 3)),
        );
        library
    }

    fn placed(library: &TemplateLibrary, id: &str) -> Room {
        let template = library.get(id).unwrap();
        library.instantiate_room(template).unwrap()
    }

    #[test]
    fn test_starting_room_empty_set() {
        let strategy = PatchworkStrategy::new(library());
        let mut rng = GameRng::new(1);
        assert!(strategy
            .calculate_starting_room_placement(&mut rng, &RoomNodeData::default())
            .is_none());
        let unknown = RoomNodeData::new(["nope"]);
        assert_eq!(
            strategy.try_starting_room_placement(&mut rng, &unknown).unwrap_err(),
            PlacementError::InputAbsent("room templates")
        );
    }

    #[test]
    fn test_starting_room_single_template_at_origin() {
        let strategy = PatchworkStrategy::new(library());
        let node = RoomNodeData::new(["closet"]);
        for draw in [0, 1, 7, u32::MAX] {
            let placement = strategy
                .calculate_starting_room_placement(&mut FixedRng(draw), &node)
                .unwrap();
            assert_eq!(placement.room.template_id(), Some("closet"));
            assert_eq!(placement.position, Vec2::ZERO);
        }
    }

    #[test]
    fn test_starting_room_uses_draw_modulo() {
        let strategy = PatchworkStrategy::new(library());
        let node = RoomNodeData::new(["hall", "closet", "hall2"]);
        let placement = strategy
            .calculate_starting_room_placement(&mut FixedRng(4), &node)
            .unwrap();
        assert_eq!(placement.room.template_id(), Some("closet"));
    }

    #[test]
    fn test_new_room_fails_fast() {
        let library = library();
        let strategy = PatchworkStrategy::new(&library);
        let mut rng = FixedRng(0);

        let mut parent = placed(&library, "hall");
        assert_eq!(
            strategy
                .try_new_room_placement(&mut rng, Some(&mut parent), &RoomNodeData::default())
                .unwrap_err(),
            PlacementError::InputAbsent("room template set")
        );
        assert_eq!(
            strategy
                .try_new_room_placement(&mut rng, None, &RoomNodeData::new(["hall"]))
                .unwrap_err(),
            PlacementError::InputAbsent("parent room")
        );

        let mut slotless = Room::new(Some(Vec2::ZERO), Some(grid()), vec![]);
        let node = RoomNodeData::new(["hall"]);
        assert_eq!(
            strategy
                .try_new_room_placement(&mut rng, Some(&mut slotless), &node)
                .unwrap_err(),
            PlacementError::InputAbsent("parent room slots")
        );
    }

    #[test]
    fn test_new_room_skips_incompatible_templates() {
        let library = library();
        let strategy = PatchworkStrategy::new(&library);
        let mut parent = placed(&library, "hall");

        let node = RoomNodeData::new(["closet", "hall2"]);
        let placement = strategy
            .calculate_new_room_placement(&mut FixedRng(0), Some(&mut parent), &node)
            .unwrap();
        assert_eq!(placement.room.template_id(), Some("hall2"));
        assert_eq!(parent.free_slot_count(), 1);
        assert_eq!(placement.room.free_slot_count(), 1);
    }

    #[test]
    fn test_new_room_no_match() {
        let library = library();
        let strategy = PatchworkStrategy::new(&library);
        let mut parent = placed(&library, "hall");

        let node = RoomNodeData::new(["closet"]);
        assert_eq!(
            strategy
                .try_new_room_placement(&mut FixedRng(0), Some(&mut parent), &node)
                .unwrap_err(),
            PlacementError::NoMatchFound
        );
        assert_eq!(parent.free_slot_count(), 2);
    }

    #[test]
    fn test_new_room_without_tile_map_reports_geometry() {
        let mut library = library();
        library.insert(
            RoomTemplate::new("ghost")
                .with_used_rect(TileRect::new(0, 0, 9, 5))
                .with_slot(TilePos::new(9, 2), TilePos::new(9, 3)),
        );
        let strategy = PatchworkStrategy::new(&library);
        let mut parent = placed(&library, "hall");

        let node = RoomNodeData::new(["ghost"]);
        assert_eq!(
            strategy
                .try_new_room_placement(&mut FixedRng(0), Some(&mut parent), &node)
                .unwrap_err(),
            PlacementError::GeometryUnavailable("candidate tile map")
        );
        // The matched parent slot stays consumed
        assert_eq!(parent.free_slot_count(), 1);
    }

    #[test]
    fn test_parent_slots_run_out() {
        let library = library();
        let strategy = PatchworkStrategy::new(&library);
        let mut parent = placed(&library, "hall");
        let node = RoomNodeData::new(["hall"]);

        let mut next = || {
            strategy.calculate_new_room_placement(&mut FixedRng(0), Some(&mut parent), &node)
        };
        assert!(next().is_some());
        assert!(next().is_some());
        assert!(next().is_none());
    }

    #[test]
    fn test_place_room_attaches_every_call() {
        let strategy = PatchworkStrategy::new(library());
        let mut scene = SceneRoot::new();
        let placement = RoomPlacementData {
            room: Arc::new(hall("hall")).instantiate(),
            position: Vec2::new(64.0, -32.0),
        };

        assert!(strategy.place_room(&mut scene, &placement));
        assert!(strategy.place_room(&mut scene, &placement));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.children()[1].position, Vec2::new(64.0, -32.0));
        assert_eq!(scene.children()[0].room.root_position, Some(Vec2::new(64.0, -32.0)));
    }

    #[test]
    fn test_place_room_without_root() {
        let strategy = PatchworkStrategy::new(library());
        let mut scene = SceneRoot::new();
        let placement = RoomPlacementData {
            room: Room::new(None, Some(grid()), vec![]),
            position: Vec2::ZERO,
        };

        assert!(!strategy.place_room(&mut scene, &placement));
        assert!(scene.is_empty());
    }
}
