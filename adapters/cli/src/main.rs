#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots Swamp Brawler.
//!
//! The binary opens a macroquad window by default. `--headless-ticks` runs the
//! same session without a window under an autopilot, which is handy for soak
//! runs and profiling.

mod headless;
mod scene;

use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use swamp_brawler_core::GameConfig;
use swamp_brawler_rendering::{Color, Presentation, RenderingBackend, Scene};
use swamp_brawler_rendering_macroquad::MacroquadBackend;
use swamp_brawler_simulation::{run, FrameStepper, Simulation};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::headless::HeadlessHost;

/// Command-line arguments accepted by the binary.
#[derive(Debug, Parser)]
#[command(name = "swamp-brawler", about = "Top-down swamp arcade brawler")]
struct Args {
    /// Seed for spawn placement, drops and boss patterns.
    #[arg(long, default_value_t = 0x5A4D_B0B5)]
    seed: u64,

    /// Optional TOML file overriding the default tuning.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Asset manifest listing sprites and sounds.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, overrides_with = "no_vsync")]
    vsync: bool,

    /// Render as fast as possible.
    #[arg(long = "no-vsync", overrides_with = "vsync")]
    no_vsync: bool,

    /// Log frame timing once per second.
    #[arg(long)]
    show_fps: bool,

    /// Draw primitives only, skipping sprite loading.
    #[arg(long)]
    no_sprites: bool,

    /// Master volume in `0.0..=1.0`.
    #[arg(long, default_value_t = 0.8)]
    volume: f32,

    /// Run this many ticks without a window, then exit.
    #[arg(long)]
    headless_ticks: Option<u64>,

    /// Skip the title screen and start at this wave.
    #[arg(long)]
    start_wave: Option<u32>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    log_filter: String,
}

impl Args {
    fn vsync(&self) -> Option<bool> {
        match (self.vsync, self.no_vsync) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Entry point for the Swamp Brawler command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_filter)?;

    let config = load_config(args.config.as_ref())?;
    let mut simulation = Simulation::new(config, args.seed);
    if let Some(wave) = args.start_wave {
        simulation.start_at_wave(wave);
    }
    info!(seed = args.seed, start_wave = ?args.start_wave, "session created");

    match args.headless_ticks {
        Some(ticks) => {
            let mut host = HeadlessHost::new(simulation.config().playfield.ticks_per_second);
            let summary = run(&mut simulation, &mut host, Some(ticks));
            info!(
                ticks = summary.ticks,
                frames = summary.frames,
                screen = ?summary.screen,
                wave = summary.wave,
                score = summary.score,
                restarts = host.restarts(),
                "headless run finished"
            );
            Ok(())
        }
        None => run_windowed(simulation, &args),
    }
}

fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .with_context(|| format!("invalid log filter `{default_filter}`"))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .context("failed to install tracing subscriber")
}

fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let config = match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => GameConfig::default(),
    };
    config.validate().context("configuration rejected")?;
    Ok(config)
}

fn run_windowed(simulation: Simulation, args: &Args) -> Result<()> {
    let playfield = Vec2::new(
        simulation.config().playfield.width,
        simulation.config().playfield.height,
    );
    let presentation = Presentation::new(
        "Swamp Brawler",
        Color::from_rgb_u8(24, 48, 32),
        playfield,
        Scene::default(),
    )?;

    let mut backend = MacroquadBackend::new()
        .with_show_fps(args.show_fps)
        .with_sprite_loading(!args.no_sprites)
        .with_volume(args.volume);
    if let Some(enabled) = args.vsync() {
        backend = backend.with_vsync(enabled);
    }
    if let Some(path) = &args.assets {
        backend = backend.with_manifest_path(path.clone());
    }

    let mut simulation = simulation;
    let mut stepper = FrameStepper::new(simulation.config().playfield.ticks_per_second);

    backend.run(presentation, move |frame, input, scene| {
        let started = Instant::now();
        scene.clear();
        let _ = stepper.advance(&mut simulation, input, frame, None, &mut scene.sounds);
        let simulated = started.elapsed();
        scene::populate(&simulation, scene);
        simulated
    })
}
