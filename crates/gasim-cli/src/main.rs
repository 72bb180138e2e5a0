//! Headless runner for the gasim cell simulation.
//!
//! Usage: `gasim [CONFIG.json] [ANCESTOR.json]`
//!
//! Without a config file the built-in defaults are used. The optional ancestor
//! file holds a chromosome in JSON form that replaces the seed brain of the
//! centre cell. The run summary is printed to stdout as JSON.

mod telemetry;

use anyhow::{Context, Result};
use gasim_core::SimConfig;
use gasim_genome::Chromosome;
use gasim_world::World;
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<()> {
    telemetry::init_logging()?;

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let config_path = args.next();
    let ancestor_path = args.next();

    let config = match &config_path {
        Some(path) => SimConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimConfig::default(),
    };

    info!(
        seed = config.seed,
        width = config.world.width,
        height = config.world.height,
        num_ticks = config.num_ticks,
        "Starting gasim"
    );

    let mut world = match &ancestor_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read ancestor from {}", path.display()))?;
            let ancestor = Chromosome::from_json(&json)
                .with_context(|| format!("invalid ancestor chromosome in {}", path.display()))?;
            World::with_ancestor(config.clone(), ancestor)?
        }
        None => World::new(config.clone())?,
    };

    let summary = world.run(config.num_ticks, config.log_interval);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
