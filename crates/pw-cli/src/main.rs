//! Patchwork level assembly
//!
//! Reads a level file, places its room graph and prints where every room went.

mod level;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pw_core::dungeon::TemplateLibrary;
use pw_core::{GameRng, PlacementConfig};

use level::{assemble, LevelFile, Overrides};

/// Assemble a level from room templates and a room graph
#[derive(Parser, Debug)]
#[command(name = "pw-cli")]
#[command(author, version, about = "Patchwork room placement", long_about = None)]
struct Args {
    /// Level file (JSON with `graph` and optional `templates` and `config`)
    level: PathBuf,

    /// Seed for template selection (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Placement config file, replaces the level file's config
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Template file (JSON array), added to the level file's templates
    #[arg(short = 't', long = "templates")]
    templates: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long = "json")]
    json: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let level = LevelFile::load(&args.level)?;
    let overrides = Overrides {
        config: args.config.as_ref().map(PlacementConfig::load).transpose()?,
        templates: args.templates.as_ref().map(TemplateLibrary::load).transpose()?,
    };
    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };

    let report = assemble(level, overrides, rng)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("seed {}", report.seed.seed());
        for room in &report.rooms {
            println!(
                "node {:>3}  {:<16} {}",
                room.node,
                room.template.as_deref().unwrap_or("-"),
                room.position
            );
        }
        if !report.dropped.is_empty() {
            println!("dropped: {:?}", report.dropped);
        }
    }

    Ok(())
}
