//! Decoding source images into normalized brightness grids.
use std::path::Path;

use anyhow::{bail, Context};
use image::imageops::FilterType;
use image::GrayImage;
use stipple::field::Grid;
use tracing::info;

/// Load `path` as grayscale in `[0, 1]`, shrinking so the longest side is at most `max_size`.
///
/// `max_size == 0` keeps the original resolution.
pub fn load_grayscale(path: impl AsRef<Path>, max_size: u32) -> anyhow::Result<Grid> {
    let path = path.as_ref();
    if !path.exists() {
        bail!(
            "image not found: {} (place an input image there or pass --image)",
            path.display()
        );
    }

    let img = image::open(path).with_context(|| format!("failed to decode {}", path.display()))?;
    let (w, h) = (img.width(), img.height());

    let img = match fit_within(w, h, max_size) {
        Some((nw, nh)) => {
            info!("Resizing {}x{} -> {}x{}.", w, h, nw, nh);
            img.resize_exact(nw, nh, FilterType::Lanczos3)
        }
        None => img,
    };

    grid_from_luma(&img.to_luma8())
}

/// New `(width, height)` whose longest side equals `max_size`, or `None` when no resize is needed.
fn fit_within(w: u32, h: u32, max_size: u32) -> Option<(u32, u32)> {
    if max_size == 0 || w.max(h) <= max_size {
        return None;
    }
    let scaled = |short: u32, long: u32| ((short as u64 * max_size as u64 / long as u64) as u32).max(1);
    if w > h {
        Some((max_size, scaled(h, w)))
    } else {
        Some((scaled(w, h), max_size))
    }
}

/// Convert an 8-bit luma image to a row-major grid in `[0, 1]`.
pub fn grid_from_luma(img: &GrayImage) -> anyhow::Result<Grid> {
    let data = img.pixels().map(|p| p.0[0] as f32 / 255.0).collect();
    Ok(Grid::from_vec(
        img.height() as usize,
        img.width() as usize,
        data,
    )?)
}

#[cfg(test)]
mod tests {
    use image::Luma;

    use super::*;

    #[test]
    fn fit_within_preserves_aspect_and_floors() {
        assert_eq!(fit_within(1024, 768, 512), Some((512, 384)));
        assert_eq!(fit_within(300, 1000, 512), Some((153, 512)));
        assert_eq!(fit_within(400, 400, 512), None);
        assert_eq!(fit_within(4000, 3000, 0), None);
        assert_eq!(fit_within(5000, 2, 100), Some((100, 1)));
    }

    #[test]
    fn luma_maps_to_unit_range_row_major() {
        let img = GrayImage::from_fn(3, 2, |x, y| Luma([if (x, y) == (2, 1) { 255 } else { 0 }]));
        let g = grid_from_luma(&img).unwrap();
        assert_eq!(g.shape(), (2, 3));
        assert_eq!(g.get(1, 2), Some(1.0));
        assert_eq!(g.get(0, 0), Some(0.0));
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let err = load_grayscale("definitely/not/here.png", 512).unwrap_err();
        assert!(err.to_string().contains("image not found"));
    }
}
