use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stipple::prelude::*;
use stipple_examples::{init_tracing, save_comparison_png, save_stipple_png};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Dark disk in the middle fading out to white corners.
    let (h, w) = (192usize, 256usize);
    let center = Vec2::new(w as f32 * 0.5, h as f32 * 0.5);
    let max_d = center.length();
    let brightness = Grid::from_fn(h, w, |r, c| {
        let d = Vec2::new(c as f32, r as f32).distance(center);
        (d / max_d).clamp(0.0, 1.0)
    });

    let importance = compute_importance(&brightness, &ImportanceParams::default())?;

    let sampler = VoidAndClusterSampler::try_new(VoidAndClusterConfig::new(0.08))?;
    let mut rng = StdRng::seed_from_u64(42);
    let result = sampler.run(&importance, &mut rng)?;

    save_stipple_png(&result.stipple, "stipple-radial-gradient.png")?;
    save_comparison_png(
        &brightness,
        &importance,
        &result.stipple,
        "stipple-radial-gradient-comparison.png",
    )?;
    Ok(())
}
