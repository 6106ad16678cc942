use std::time::Duration;

use criterion::{Criterion, Throughput};
use stipple::field::Grid;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Radial gradient: dark center fading to white corners.
#[allow(dead_code)]
pub fn radial_brightness(side: usize) -> Grid {
    let c = (side as f32 - 1.0) * 0.5;
    let max_d = (2.0 * c * c).sqrt().max(1.0);
    Grid::from_fn(side, side, |r, col| {
        let dy = r as f32 - c;
        let dx = col as f32 - c;
        ((dx * dx + dy * dy).sqrt() / max_d).clamp(0.0, 1.0)
    })
}
