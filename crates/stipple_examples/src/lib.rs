#![forbid(unsafe_code)]
//! Collaborators around the stipple core: image loading, PNG and GIF output,
//! comparison panels, parameter sweeps, and logging setup for the binaries.

mod loading;
mod rendering;
mod sweep;

pub use loading::{grid_from_luma, load_grayscale};
pub use rendering::{
    grid_to_luma, save_comparison_png, save_progressive_gif, save_stipple_png, viridis,
    GifOptions,
};
pub use sweep::{run_sweep, SweepCase, SWEEP_CASES};

/// Install a `tracing` fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
