//! PNG and GIF output for stipple results.
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use stipple::field::Grid;
use stipple::sampling::SampleSequence;
use tracing::{info, warn};

/// White gap between comparison panels, in pixels.
const GUTTER_PX: u32 = 8;

/// Map grid values in `[0, 1]` to 8-bit luma, clamping out-of-range values.
pub fn grid_to_luma(grid: &Grid) -> GrayImage {
    GrayImage::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
        let v = grid.get(y as usize, x as usize).unwrap_or(1.0);
        Luma([to_u8(v)])
    })
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

/// Write the stipple grid as a black-on-white PNG.
pub fn save_stipple_png(stipple: &Grid, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    grid_to_luma(stipple)
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Settings for the progressive animation.
#[derive(Debug, Clone, Copy)]
pub struct GifOptions {
    /// Samples between consecutive frames.
    pub frame_increment: usize,
    pub fps: u32,
}

impl Default for GifOptions {
    fn default() -> Self {
        Self {
            frame_increment: 100,
            fps: 10,
        }
    }
}

/// Write an animation revealing `samples` in placement order.
///
/// Frames are taken every `frame_increment` samples and always include the final
/// sample. If GIF encoding fails, the frames are written as numbered PNGs into a
/// `<stem>_frames` directory next to `path` instead; the returned path names
/// whichever output was produced.
pub fn save_progressive_gif(
    samples: &SampleSequence,
    height: usize,
    width: usize,
    path: impl AsRef<Path>,
    options: GifOptions,
) -> anyhow::Result<PathBuf> {
    let path = path.as_ref();
    if options.frame_increment == 0 {
        bail!("frame increment must be > 0");
    }
    if options.fps == 0 {
        bail!("fps must be > 0");
    }
    if samples.is_empty() {
        bail!("cannot animate an empty sample sequence");
    }

    let frame_indices = samples.frame_indices(options.frame_increment);
    let frames: Vec<GrayImage> = frame_indices
        .iter()
        .map(|&i| grid_to_luma(&samples.prefix_stipple_grid(height, width, i + 1)))
        .collect();
    info!("Animating {} frames.", frames.len());

    match encode_gif(&frames, path, options.fps) {
        Ok(()) => Ok(path.to_path_buf()),
        Err(gif_err) => {
            warn!("GIF encoding failed ({:#}); writing PNG frames instead.", gif_err);
            let dir = frames_dir_for(path);
            write_png_frames(&frames, &dir).with_context(|| {
                format!("GIF encoding failed ({gif_err:#}) and PNG frame fallback failed")
            })?;
            Ok(dir)
        }
    }
}

fn encode_gif(frames: &[GrayImage], path: &Path, fps: u32) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), 10);
    encoder.set_repeat(Repeat::Infinite)?;

    let delay = Delay::from_numer_denom_ms(1000, fps);
    for frame in frames {
        let rgba = RgbaImage::from_fn(frame.width(), frame.height(), |x, y| {
            let v = frame.get_pixel(x, y).0[0];
            Rgba([v, v, v, 255])
        });
        encoder.encode_frame(Frame::from_parts(rgba, 0, 0, delay))?;
    }
    Ok(())
}

fn frames_dir_for(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "progressive".into());
    path.with_file_name(format!("{stem}_frames"))
}

fn write_png_frames(frames: &[GrayImage], dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;
    for (i, frame) in frames.iter().enumerate() {
        frame.save(dir.join(format!("frame_{i:05}.png")))?;
    }
    Ok(())
}

/// Approximate viridis color ramp for `t` in `[0, 1]`.
pub fn viridis(t: f32) -> [u8; 3] {
    const STOPS: [[f32; 3]; 5] = [
        [68.0, 1.0, 84.0],
        [59.0, 82.0, 139.0],
        [33.0, 145.0, 140.0],
        [94.0, 201.0, 98.0],
        [253.0, 231.0, 37.0],
    ];
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (STOPS.len() - 1) as f32;
    let i = (scaled.floor() as usize).min(STOPS.len() - 2);
    let f = scaled - i as f32;
    let (a, b) = (STOPS[i], STOPS[i + 1]);
    [0, 1, 2].map(|c| (a[c] + (b[c] - a[c]) * f).round() as u8)
}

/// Write original, importance (viridis), and stipple side by side.
pub fn save_comparison_png(
    original: &Grid,
    importance: &Grid,
    stipple: &Grid,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    original.ensure_same_shape(importance)?;
    original.ensure_same_shape(stipple)?;

    let (w, h) = (original.width() as u32, original.height() as u32);
    let mut canvas = RgbImage::from_pixel(3 * w + 2 * GUTTER_PX, h, Rgb([255, 255, 255]));

    let panels: [(&Grid, fn(f32) -> [u8; 3]); 3] = [
        (original, gray),
        (importance, viridis),
        (stipple, gray),
    ];
    for (k, (grid, color)) in panels.into_iter().enumerate() {
        let x0 = k as u32 * (w + GUTTER_PX);
        for y in 0..h {
            for x in 0..w {
                let v = grid.get(y as usize, x as usize).unwrap_or(1.0);
                canvas.put_pixel(x0 + x, y, Rgb(color(v)));
            }
        }
    }

    canvas
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn gray(v: f32) -> [u8; 3] {
    let g = to_u8(v);
    [g, g, g]
}

#[cfg(test)]
mod tests {
    use stipple::field::{BACKGROUND, MARK};

    use super::*;

    #[test]
    fn luma_maps_marks_to_black() {
        let mut g = Grid::filled(2, 3, BACKGROUND);
        g.set(1, 2, MARK);
        let img = grid_to_luma(&g);
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0[0], 0);
        assert_eq!(img.get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn viridis_endpoints_and_clamping() {
        assert_eq!(viridis(0.0), [68, 1, 84]);
        assert_eq!(viridis(1.0), [253, 231, 37]);
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(7.0), viridis(1.0));
        assert_eq!(viridis(f32::NAN), viridis(0.0));
    }

    #[test]
    fn frames_dir_sits_next_to_gif() {
        let dir = frames_dir_for(Path::new("out/progressive.gif"));
        assert_eq!(dir, PathBuf::from("out/progressive_frames"));
    }

    #[test]
    fn empty_sequence_cannot_be_animated() {
        let err = save_progressive_gif(
            &SampleSequence::new(),
            4,
            4,
            "unused.gif",
            GifOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn zero_increment_is_rejected() {
        let opts = GifOptions {
            frame_increment: 0,
            fps: 10,
        };
        assert!(save_progressive_gif(&SampleSequence::new(), 4, 4, "unused.gif", opts).is_err());
    }
}
