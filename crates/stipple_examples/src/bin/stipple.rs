//! Command-line front end: load an image, stipple it, and write the outputs.
//!
//! Outputs in `--out-dir`:
//! - `stipple.png`: the final stipple grid
//! - `progressive.gif`: samples revealed in placement order
//! - `comparison.png`: original / importance / stipple (with `--make-comparison`)
//! - `sweep.png`: six parameter combinations side by side (with `--sweep`)
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use stipple::prelude::*;
use stipple_examples::{
    init_tracing, load_grayscale, run_sweep, save_comparison_png, save_progressive_gif,
    save_stipple_png, GifOptions,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "stipple",
    about = "Blue-noise stippling using a modified void-and-cluster algorithm"
)]
struct Cli {
    /// Path to the input image.
    #[arg(long, default_value = "assets/headshot.png")]
    image: PathBuf,

    /// Fraction of pixels to stipple.
    #[arg(long, default_value_t = 0.08)]
    percentage: f64,

    /// Gaussian sigma of the repulsion kernel, in pixels.
    #[arg(long, default_value_t = 0.9)]
    sigma: f32,

    /// Weight of the importance map in the initial energy.
    #[arg(long, default_value_t = 0.9)]
    content_bias: f32,

    /// Initial amplitude of the annealed noise.
    #[arg(long, default_value_t = 0.1)]
    noise_scale_factor: f32,

    /// Number of samples between animation frames.
    #[arg(long, default_value_t = 100)]
    frame_increment: usize,

    /// Animation frame rate.
    #[arg(long, default_value_t = 10)]
    fps: u32,

    /// Maximum length of the longest image side; 0 keeps the original size.
    #[arg(long, default_value_t = 512)]
    max_size: u32,

    /// Output directory.
    #[arg(long, default_value = "outputs")]
    out_dir: PathBuf,

    /// Also write an original / importance / stipple comparison.
    #[arg(long)]
    make_comparison: bool,

    /// Run the parameter sweep instead of a single stippling.
    #[arg(long)]
    sweep: bool,

    /// Seed for the annealing noise; derived from the clock when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let seed = cli.seed.unwrap_or_else(clock_seed);
    info!("Seed: {}.", seed);

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;

    info!("Loading image: {}.", cli.image.display());
    let brightness = load_grayscale(&cli.image, cli.max_size)?;
    info!("Image shape: {}x{}.", brightness.height(), brightness.width());

    let importance = compute_importance(&brightness, &ImportanceParams::default())?;

    if cli.sweep {
        let path = cli.out_dir.join("sweep.png");
        let counts = run_sweep(&importance, seed, &path)?;
        info!("Sweep sample counts: {:?}.", counts);
        info!("Saved sweep comparison: {}.", path.display());
        return Ok(());
    }

    let config = VoidAndClusterConfig::new(cli.percentage)
        .with_sigma(cli.sigma)
        .with_content_bias(cli.content_bias)
        .with_noise_scale_factor(cli.noise_scale_factor);
    info!("Generating stippling ({:.1}% coverage).", cli.percentage * 100.0);
    let result = void_and_cluster_seeded(&importance, &config, seed)?;
    info!("Placed {} stipples.", result.samples.len());

    let stipple_path = cli.out_dir.join("stipple.png");
    save_stipple_png(&result.stipple, &stipple_path)?;
    info!("Saved stipple image: {}.", stipple_path.display());

    if result.samples.is_empty() {
        info!("No samples placed; skipping animation.");
    } else {
        let gif_path = save_progressive_gif(
            &result.samples,
            brightness.height(),
            brightness.width(),
            cli.out_dir.join("progressive.gif"),
            GifOptions {
                frame_increment: cli.frame_increment,
                fps: cli.fps,
            },
        )?;
        info!("Saved progressive animation: {}.", gif_path.display());
    }

    if cli.make_comparison {
        let path = cli.out_dir.join("comparison.png");
        save_comparison_png(&brightness, &importance, &result.stipple, &path)?;
        info!("Saved comparison figure: {}.", path.display());
    }

    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
