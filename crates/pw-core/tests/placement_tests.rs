use std::sync::Arc;

use pw_core::dungeon::{
    LevelGenerator, LevelGraph, Orientation, OrientationDescriptor, PatchworkStrategy, Room,
    RoomNodeData, RoomPlacementStrategy, RoomSlot, RoomTemplate, RoomTemplateRepository, SceneRoot,
    TileMap, TilePos, Vec2,
};
use pw_core::{GameRng, PlacementConfig, PlacementError};

/// Repository whose rooms all carry one hand-built slot
struct SingleSlotRepository {
    template: Arc<RoomTemplate>,
    slot: RoomSlot,
}

impl SingleSlotRepository {
    fn new(slot: RoomSlot) -> Self {
        Self {
            template: Arc::new(RoomTemplate::new("piece")),
            slot,
        }
    }
}

impl RoomTemplateRepository for SingleSlotRepository {
    fn resolve_template_set(&self, set: &[String]) -> Vec<Arc<RoomTemplate>> {
        set.iter()
            .filter(|id| **id == self.template.id)
            .map(|_| Arc::clone(&self.template))
            .collect()
    }

    fn instantiate_room(&self, _template: &Arc<RoomTemplate>) -> Option<Room> {
        Some(Room::new(Some(Vec2::ZERO), Some(grid()), vec![self.slot.clone()]))
    }
}

fn grid() -> TileMap {
    TileMap::new(Vec2::ZERO, 32.0)
}

fn horizontal_slot(x: i32, length: i32, side: Orientation, offset: i64) -> RoomSlot {
    RoomSlot::new(
        TilePos::new(x, 0),
        TilePos::new(x + length - 1, 0),
        Some(OrientationDescriptor::new(side, offset)),
    )
}

fn parent_room() -> Room {
    Room::new(
        Some(Vec2::ZERO),
        Some(grid()),
        vec![horizontal_slot(0, 3, Orientation::Left, 3)],
    )
}

#[test]
fn test_left_right_slots_connect() {
    let strategy = PatchworkStrategy::new(SingleSlotRepository::new(horizontal_slot(
        2,
        3,
        Orientation::Right,
        5,
    )));
    let mut parent = parent_room();
    let mut rng = GameRng::new(3);

    let placement = strategy
        .calculate_new_room_placement(&mut rng, Some(&mut parent), &RoomNodeData::new(["piece"]))
        .expect("compatible slots should connect");

    assert!(parent.slots()[0].matched);
    assert!(placement.room.slots()[0].matched);
    // parent slot (16, 16), candidate slot (80, 16), end-x shift (128, 0)
    assert_eq!(placement.position, Vec2::new(64.0, 0.0));
}

#[test]
fn test_length_mismatch_never_connects() {
    let strategy = PatchworkStrategy::new(SingleSlotRepository::new(horizontal_slot(
        2,
        4,
        Orientation::Right,
        5,
    )));
    let mut parent = parent_room();

    let result = strategy.try_new_room_placement(
        &mut GameRng::new(3),
        Some(&mut parent),
        &RoomNodeData::new(["piece"]),
    );
    assert_eq!(result.unwrap_err(), PlacementError::NoMatchFound);
    assert!(!parent.slots()[0].matched);
}

#[test]
fn test_non_overlapping_config_moves_room_one_cell() {
    let repository = SingleSlotRepository::new(horizontal_slot(2, 3, Orientation::Right, 5));
    let config = PlacementConfig {
        slot_overlap: false,
        ..PlacementConfig::default()
    };
    let strategy = PatchworkStrategy::with_config(repository, config);
    let mut parent = parent_room();

    let node = RoomNodeData::new(["piece"]);
    let placement = strategy
        .calculate_new_room_placement(&mut GameRng::new(3), Some(&mut parent), &node)
        .unwrap();
    assert_eq!(placement.position, Vec2::new(32.0, 0.0));
}

#[test]
fn test_level_from_json() {
    let json = r#"{
        "templates": [
            {
                "id": "hall",
                "tile_map": { "origin": { "x": 0.0, "y": 0.0 }, "cell_size": 32.0 },
                "used_rect": { "lx": 0, "ly": 0, "hx": 9, "hy": 5 },
                "slots": [
                    { "start": { "x": 0, "y": 2 }, "end": { "x": 0, "y": 3 } },
                    { "start": { "x": 9, "y": 2 }, "end": { "x": 9, "y": 3 } }
                ]
            },
            {
                "id": "closet",
                "tile_map": { "origin": { "x": 0.0, "y": 0.0 }, "cell_size": 32.0 },
                "used_rect": { "lx": 0, "ly": 0, "hx": 3, "hy": 3 },
                "slots": [ { "start": { "x": 3, "y": 1 }, "end": { "x": 3, "y": 2 } } ]
            }
        ],
        "graph": {
            "nodes": [
                { "room_template_set": ["hall"] },
                { "room_template_set": ["closet", "hall"] },
                { "room_template_set": ["closet"] }
            ],
            "edges": [ { "from": 0, "to": 1 }, { "from": 1, "to": 2 } ]
        }
    }"#;

    #[derive(serde::Deserialize)]
    struct LevelFile {
        templates: Vec<RoomTemplate>,
        graph: LevelGraph,
    }

    let level: LevelFile = serde_json::from_str(json).unwrap();
    let library = level.templates.into_iter().collect::<pw_core::dungeon::TemplateLibrary>();
    let generator = LevelGenerator::new(PatchworkStrategy::new(library));
    let mut scene = SceneRoot::new();
    let layout = generator.generate(&level.graph, &mut GameRng::new(9), &mut scene);

    // closet is tried first: its Right door fits the hall's Left door and is then spent
    assert_eq!(layout.room(1).and_then(Room::template_id), Some("closet"));
    assert_eq!(layout.dropped(), vec![2]);
    assert_eq!(scene.len(), 2);
    assert!(layout
        .placed()
        .all(|(_, room)| room.root_position.is_some()));
}
