//! Drives the simulation the way a rendering harness would, without a window.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p dotsim_demo_headless -- --frames 600 --seed 7
//! ```

use std::path::PathBuf;

use clap::Parser;
use dotsim::{RenderRecord, SimConfig, SimulationWorld};
use log::info;

/// Headless dotsim harness
#[derive(Parser)]
#[command(version, about = "Runs the sprite simulation without drawing it")]
struct Cli {
    /// TOML file with simulation parameters; defaults are used when absent.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Fixed frame step in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Random seed, overriding the one in the config file.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut world = SimulationWorld::new();
    world.initialize(&config)?;
    let mut records = vec![RenderRecord::default(); world.render_capacity()];

    let mut count = 0;
    let mut time = 0.0f64;
    for _ in 0..cli.frames {
        count = world.update(time, cli.dt, &mut records);
        time += cli.dt as f64;
    }

    // hazards are never white, so anything colored has bumped into one
    let tinted = records[..count]
        .iter()
        .take(config.object_count)
        .filter(|r| [r.color_r, r.color_g, r.color_b] != [1.0, 1.0, 1.0])
        .count();
    info!(
        "Frame {}: {} sprites drawn, {} of {} movers carry a hazard color",
        world.frame_index(),
        count,
        tinted,
        config.object_count
    );
    info!("Replay with --seed {}", world.seed());

    world.shutdown();
    Ok(())
}
