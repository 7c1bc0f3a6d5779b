//! Abstract room graph handed to the level generator

use serde::{Deserialize, Serialize};

/// One desired room: the templates it may be built from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoomNodeData {
    #[serde(default)]
    pub room_template_set: Vec<String>,
}

impl RoomNodeData {
    pub fn new<I, S>(templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            room_template_set: templates.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parent to child connection between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomEdge {
    pub from: usize,
    pub to: usize,
}

/// Room graph; node 0 is the starting room
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelGraph {
    pub nodes: Vec<RoomNodeData>,
    #[serde(default)]
    pub edges: Vec<RoomEdge>,
}

impl LevelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its index
    pub fn add_node(&mut self, node: RoomNodeData) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn connect(&mut self, from: usize, to: usize) {
        self.edges.push(RoomEdge { from, to });
    }

    /// Children of a node in edge declaration order
    pub fn children(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges.iter().filter(move |e| e.from == node).map(|e| e.to)
    }
}
