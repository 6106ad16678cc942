//! Parameter sweep rendered as a tiled grid of stipple panels.
use std::path::Path;

use anyhow::Context;
use image::{GrayImage, Luma};
use stipple::field::Grid;
use stipple::sampling::{void_and_cluster_seeded, VoidAndClusterConfig};
use tracing::info;

use crate::rendering::grid_to_luma;

/// One sweep configuration.
#[derive(Debug, Clone, Copy)]
pub struct SweepCase {
    pub name: &'static str,
    pub percentage: f64,
    pub sigma: f32,
}

pub const SWEEP_CASES: [SweepCase; 6] = [
    SweepCase {
        name: "Sparse, Small",
        percentage: 0.05,
        sigma: 0.7,
    },
    SweepCase {
        name: "Default",
        percentage: 0.08,
        sigma: 0.9,
    },
    SweepCase {
        name: "Dense, Large",
        percentage: 0.12,
        sigma: 1.1,
    },
    SweepCase {
        name: "Tight Repulsion",
        percentage: 0.08,
        sigma: 0.5,
    },
    SweepCase {
        name: "Wide Repulsion",
        percentage: 0.08,
        sigma: 1.5,
    },
    SweepCase {
        name: "Very Dense",
        percentage: 0.15,
        sigma: 0.9,
    },
];

const COLUMNS: u32 = 3;
const GUTTER_PX: u32 = 8;

/// Row and column of panel `index` in the sweep image.
pub fn panel_position(index: usize) -> (u32, u32) {
    (index as u32 / COLUMNS, index as u32 % COLUMNS)
}

/// Run every [`SWEEP_CASES`] entry over `importance` and tile the stipples into one PNG.
///
/// Panels are laid out row by row, three per row. Returns the sample count of each case.
pub fn run_sweep(
    importance: &Grid,
    seed: u64,
    path: impl AsRef<Path>,
) -> anyhow::Result<Vec<usize>> {
    let path = path.as_ref();
    let (w, h) = (importance.width() as u32, importance.height() as u32);
    let rows = (SWEEP_CASES.len() as u32).div_ceil(COLUMNS);
    let mut canvas = GrayImage::from_pixel(
        COLUMNS * w + (COLUMNS - 1) * GUTTER_PX,
        rows * h + (rows - 1) * GUTTER_PX,
        Luma([255]),
    );

    let mut counts = Vec::with_capacity(SWEEP_CASES.len());
    for (k, case) in SWEEP_CASES.iter().enumerate() {
        let (row, col) = panel_position(k);
        info!(
            "Sweep panel row {} col {}: '{}' (percentage={} sigma={}).",
            row, col, case.name, case.percentage, case.sigma
        );
        let config = VoidAndClusterConfig::new(case.percentage)
            .with_sigma(case.sigma)
            .with_content_bias(0.9)
            .with_noise_scale_factor(0.1);
        let result = void_and_cluster_seeded(importance, &config, seed)
            .with_context(|| format!("sweep case '{}'", case.name))?;
        counts.push(result.samples.len());

        let panel = grid_to_luma(&result.stipple);
        let (x0, y0) = (col * (w + GUTTER_PX), row * (h + GUTTER_PX));
        for (x, y, px) in panel.enumerate_pixels() {
            canvas.put_pixel(x0 + x, y0 + y, *px);
        }
    }

    canvas
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(counts)
}
