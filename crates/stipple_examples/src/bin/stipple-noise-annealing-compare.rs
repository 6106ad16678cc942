use rand::rngs::StdRng;
use rand::SeedableRng;
use stipple::prelude::*;
use stipple_examples::{init_tracing, save_stipple_png};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Horizontal ramp, black on the left to white on the right.
    let (h, w) = (128usize, 256usize);
    let brightness = Grid::from_fn(h, w, |_, c| c as f32 / (w - 1) as f32);
    let importance = compute_importance(&brightness, &ImportanceParams::default())?;

    // Compare deterministic minimum seeking against increasingly noisy annealing.
    for noise in [0.0f32, 0.1, 0.4] {
        let config = VoidAndClusterConfig::new(0.1).with_noise_scale_factor(noise);

        // Log every 500th placement as it happens.
        let mut sink = FnSink::new(|event| {
            if let StippleEvent::SamplePlaced { index, sample } = event {
                if index % 500 == 0 {
                    info!(
                        "noise {:.1}: sample {} at ({}, {})",
                        noise, index, sample.row, sample.col
                    );
                }
            }
        });
        let result = VoidAndClusterSampler::try_new(config)?.run_with_events(
            &importance,
            &mut StdRng::seed_from_u64(7),
            &mut sink,
        )?;

        save_stipple_png(
            &result.stipple,
            format!("stipple-noise-annealing-{noise:.1}.png"),
        )?;
    }
    Ok(())
}
