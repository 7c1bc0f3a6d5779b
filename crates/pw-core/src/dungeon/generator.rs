//! Level assembly from a room graph
//!
//! Places the starting node at the origin, then walks the graph breadth
//! first and connects every child to its already placed parent. Rooms that
//! cannot be placed are left out of the level instead of aborting it.

use std::collections::VecDeque;

use crate::consts::START_NODE;
use crate::rng::RandomSource;

use super::graph::LevelGraph;
use super::placement::{MapRoot, RoomPlacementStrategy};
use super::room::Room;

/// Outcome of assembling one level
#[derive(Debug, Clone, Default)]
pub struct LevelLayout {
    /// Placed room per graph node, `None` for dropped nodes
    pub rooms: Vec<Option<Room>>,
}

impl LevelLayout {
    pub fn room(&self, node: usize) -> Option<&Room> {
        self.rooms.get(node).and_then(Option::as_ref)
    }

    /// Placed rooms with their node index
    pub fn placed(&self) -> impl Iterator<Item = (usize, &Room)> {
        self.rooms
            .iter()
            .enumerate()
            .filter_map(|(node, room)| room.as_ref().map(|r| (node, r)))
    }

    pub fn placed_count(&self) -> usize {
        self.rooms.iter().filter(|r| r.is_some()).count()
    }

    /// Nodes that were left out of the level
    pub fn dropped(&self) -> Vec<usize> {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| room.is_none())
            .map(|(node, _)| node)
            .collect()
    }
}

/// Drives a placement strategy over a whole room graph
#[derive(Debug, Clone)]
pub struct LevelGenerator<S> {
    strategy: S,
}

impl<S: RoomPlacementStrategy> LevelGenerator<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Place every reachable node of `graph` under `map_root`
    ///
    /// A node reachable from several parents is placed by the first edge
    /// that succeeds.
    pub fn generate(
        &self,
        graph: &LevelGraph,
        rng: &mut dyn RandomSource,
        map_root: &mut dyn MapRoot,
    ) -> LevelLayout {
        let mut rooms: Vec<Option<Room>> = vec![None; graph.nodes.len()];
        let Some(start_node) = graph.nodes.get(START_NODE) else {
            return LevelLayout { rooms };
        };

        let Some(start) = self.strategy.calculate_starting_room_placement(rng, start_node) else {
            tracing::warn!("Starting room could not be placed, level is empty");
            return LevelLayout { rooms };
        };
        if !self.strategy.place_room(map_root, &start) {
            tracing::warn!("Starting room could not be attached, level is empty");
            return LevelLayout { rooms };
        }
        rooms[START_NODE] = Some(start.into_placed_room());

        let mut queue = VecDeque::from([START_NODE]);
        while let Some(parent) = queue.pop_front() {
            for child in graph.children(parent) {
                let Some(node) = graph.nodes.get(child) else {
                    tracing::warn!("Edge {} -> {} points outside the graph", parent, child);
                    continue;
                };
                if rooms[child].is_some() {
                    continue;
                }

                let parent_room = rooms[parent].as_mut();
                let Some(placement) =
                    self.strategy.calculate_new_room_placement(rng, parent_room, node)
                else {
                    tracing::debug!("Node {} could not be connected to node {}", child, parent);
                    continue;
                };
                if !self.strategy.place_room(map_root, &placement) {
                    tracing::debug!("Node {} could not be attached", child);
                    continue;
                }

                tracing::debug!("Placed node {} at {}", child, placement.position);
                rooms[child] = Some(placement.into_placed_room());
                queue.push_back(child);
            }
        }

        let layout = LevelLayout { rooms };
        for node in layout.dropped() {
            tracing::warn!("Node {} dropped from level", node);
        }
        layout
    }
}
