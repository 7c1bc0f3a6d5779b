//! Level file: placement config, room templates and the room graph

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use pw_core::dungeon::{
    LevelGenerator, LevelGraph, PatchworkStrategy, RoomTemplate, SceneRoot, TemplateLibrary, Vec2,
};
use pw_core::{GameRng, PlacementConfig};

#[derive(Debug, Deserialize)]
pub struct LevelFile {
    #[serde(default)]
    pub config: PlacementConfig,
    #[serde(default)]
    pub templates: Vec<RoomTemplate>,
    pub graph: LevelGraph,
}

impl LevelFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading level file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing level file {}", path.display()))
    }
}

/// One placed room in the printed report
#[derive(Debug, Serialize)]
pub struct PlacedRoom {
    pub node: usize,
    pub template: Option<String>,
    pub position: Vec2,
}

/// Result of assembling a level
#[derive(Debug, Serialize)]
pub struct Report {
    /// Generator the level was built with, serialized as its seed
    pub seed: GameRng,
    pub rooms: Vec<PlacedRoom>,
    pub dropped: Vec<usize>,
}

/// Extra inputs layered over a level file
#[derive(Debug, Default)]
pub struct Overrides {
    /// Replaces the level file's config
    pub config: Option<PlacementConfig>,
    /// Added to the level file's templates, replacing same ids
    pub templates: Option<TemplateLibrary>,
}

/// Place the level's room graph and describe the result
pub fn assemble(level: LevelFile, overrides: Overrides, mut rng: GameRng) -> Result<Report> {
    let mut library = TemplateLibrary::from_templates(level.templates)
        .context("level file templates")?;
    if let Some(extra) = overrides.templates {
        library.merge(extra);
    }
    let config = overrides.config.unwrap_or(level.config);

    tracing::info!(
        "Assembling {} rooms from {} templates with seed {}",
        level.graph.nodes.len(),
        library.len(),
        rng.seed()
    );

    let generator = LevelGenerator::new(PatchworkStrategy::with_config(library, config));
    let mut scene = SceneRoot::new();
    let layout = generator.generate(&level.graph, &mut rng, &mut scene);
    tracing::debug!("{} rooms attached", scene.len());

    Ok(Report {
        rooms: layout
            .placed()
            .map(|(node, room)| PlacedRoom {
                node,
                template: room.template_id().map(str::to_string),
                position: room.root_position.unwrap_or_default(),
            })
            .collect(),
        dropped: layout.dropped(),
        seed: rng,
    })
}
