//! Cadence CLI - runs the demo scripts on a fixed-rate loop
//!
//! Usage:
//!   cadence [--config <loop.toml>] [--fps <n>] [--frames <n>] [--wait sleep|yield|spin]

mod demo;

use anyhow::{Context, Result};
use cadence_runtime::{GameLoop, LoopConfig, ScriptCatalog, WaitStrategy};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Run the Cadence demo scripts at a fixed frame rate", long_about = None)]
#[command(version)]
struct Args {
    /// Loop config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Target frame rate, overrides the config file
    #[arg(long)]
    fps: Option<u32>,

    /// Stop after this many frames
    #[arg(long, default_value_t = 90)]
    frames: u64,

    /// How to wait between frames: sleep, yield or spin
    #[arg(long)]
    wait: Option<WaitStrategy>,

    /// Width of the track the bouncer runs on
    #[arg(long, default_value_t = 40)]
    width: usize,
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LoopConfig::load(path)
            .with_context(|| format!("Failed to load loop config {}", path.display()))?,
        None => LoopConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.target_frame_rate = fps;
    }
    if let Some(wait) = args.wait {
        config.wait = wait;
    }

    let mut catalog = ScriptCatalog::new();
    catalog
        .register(demo::Bouncer::new(args.width))
        .register(demo::FrameReporter::default())
        .register(demo::FrameLimit::new(args.frames));

    let mut game_loop = GameLoop::new(catalog, &config).context("Invalid loop config")?;
    let summary = game_loop.run().context("Run loop aborted")?;

    println!(
        "Ran {} frames in {:.2}s ({:.1} fps mean, target {})",
        summary.frames,
        summary.elapsed.as_secs_f64(),
        summary.mean_frame_rate(),
        game_loop.frame().target_frame_rate()
    );

    Ok(())
}
