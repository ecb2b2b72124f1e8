//! Application entry point for the strand physics viewer.
//!
//! This binary parses command-line options, sets up logging and
//! eframe/egui, and delegates all per-frame logic and drawing to
//! [`Viewer`] from the `viewer` module.

mod viewer;

use clap::{Parser, ValueEnum};
use glam::Vec2;
use strand_core::{
    config::{DEFAULT_SEGMENTS_PER_STRAND, SimConfig},
    dispatch::{Dispatcher, available_workers},
    presets::GravityPreset,
    sim::Simulation,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewer::Viewer;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Gravity {
    /// 5000 units/s²
    Heavy,
    /// 250 units/s²
    Medium,
    /// 100 units/s²
    Light,
}

impl From<Gravity> for GravityPreset {
    fn from(g: Gravity) -> Self {
        match g {
            Gravity::Heavy => GravityPreset::Heavy,
            Gravity::Medium => GravityPreset::Medium,
            Gravity::Light => GravityPreset::Light,
        }
    }
}

/// Interactive multi-strand hair physics.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of strands around the body.
    #[arg(long, default_value_t = 1)]
    strands: usize,

    /// Segments in each strand, including the root.
    #[arg(long, default_value_t = DEFAULT_SEGMENTS_PER_STRAND)]
    segments: usize,

    /// Target distance between adjacent segments.
    #[arg(long, default_value_t = 20.0)]
    rest_length: f32,

    #[arg(long, value_enum, default_value_t = Gravity::Heavy)]
    gravity: Gravity,

    /// Worker threads per frame (defaults to available parallelism).
    #[arg(long)]
    workers: Option<usize>,

    /// Reuse a persistent worker pool instead of spawning threads per frame.
    #[arg(long)]
    pool: bool,

    #[arg(long, default_value_t = 1000.0)]
    width: f32,

    #[arg(long, default_value_t = 1000.0)]
    height: f32,
}

impl Args {
    fn sim_config(&self) -> SimConfig {
        SimConfig {
            strand_count: self.strands,
            segments_per_strand: self.segments,
            rest_length: self.rest_length,
            gravity: GravityPreset::from(self.gravity).value(),
            anchor_position: Vec2::new(self.width, self.height) * 0.5,
            ..SimConfig::default()
        }
    }
}

fn app_error(e: impl std::error::Error + Send + Sync + 'static) -> eframe::Error {
    eframe::Error::AppCreation(Box::new(e))
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the options are invalid, the worker pool cannot start, or
///   eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let workers = args.workers.unwrap_or_else(available_workers);
    let dispatcher = if args.pool {
        Dispatcher::pooled(workers)
    } else {
        Dispatcher::scoped(workers)
    }
    .map_err(app_error)?;
    let sim = Simulation::new(args.sim_config(), dispatcher).map_err(app_error)?;

    info!(
        strands = args.strands,
        segments = args.segments,
        workers,
        pool = args.pool,
        "starting viewer"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_title("Strand physics"),
        ..Default::default()
    };

    eframe::run_native(
        "Strand physics",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(sim)))),
    )
}
