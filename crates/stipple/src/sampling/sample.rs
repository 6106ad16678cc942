//! Placed samples and the ordered sequence a run produces.
//!
//! The order of a [`SampleSequence`] is the placement order. Downstream renderers
//! rely on it for progressive reveal, so the sequence is append-only inside the
//! crate and read-only outside it.
use glam::Vec2;
use mint::Point2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::field::{Grid, BACKGROUND, MARK};

/// One placed stipple.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    pub row: usize,
    pub col: usize,
    /// Importance value at `(row, col)` when the sample was placed.
    pub importance: f32,
}

impl Sample {
    pub fn new(row: usize, col: usize, importance: f32) -> Self {
        Self {
            row,
            col,
            importance,
        }
    }

    /// Image-space position with `x = col`, `y = row`.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.col as f32, self.row as f32)
    }
}

impl From<Sample> for Point2<f32> {
    fn from(s: Sample) -> Self {
        s.position().into()
    }
}

/// Samples in placement order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleSequence {
    samples: Vec<Sample>,
}

impl SampleSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(cap: usize) -> Self {
        Self {
            samples: Vec::with_capacity(cap),
        }
    }

    pub(crate) fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn into_vec(self) -> Vec<Sample> {
        self.samples
    }

    /// Positions as `(x = col, y = row)` points, in placement order.
    pub fn positions(&self) -> Vec<Point2<f32>> {
        self.samples.iter().map(|&s| s.into()).collect()
    }

    /// Stipple grid showing every sample: [`MARK`] at sample cells, [`BACKGROUND`] elsewhere.
    pub fn to_stipple_grid(&self, height: usize, width: usize) -> Grid {
        self.prefix_stipple_grid(height, width, self.samples.len())
    }

    /// Stipple grid showing only the first `count` samples.
    ///
    /// Samples outside `height x width` are skipped.
    pub fn prefix_stipple_grid(&self, height: usize, width: usize, count: usize) -> Grid {
        let mut grid = Grid::filled(height, width, BACKGROUND);
        for s in self.samples.iter().take(count) {
            grid.set(s.row, s.col, MARK);
        }
        grid
    }

    /// Sequence indices at which a progressive animation takes a frame:
    /// every `increment`-th index starting at 0, plus the last index.
    ///
    /// A zero increment is treated as 1. Empty sequences have no frames.
    pub fn frame_indices(&self, increment: usize) -> Vec<usize> {
        let n = self.samples.len();
        if n == 0 {
            return Vec::new();
        }
        let mut frames: Vec<usize> = (0..n).step_by(increment.max(1)).collect();
        if frames.last() != Some(&(n - 1)) {
            frames.push(n - 1);
        }
        frames
    }
}

impl<'a> IntoIterator for &'a SampleSequence {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl std::ops::Index<usize> for SampleSequence {
    type Output = Sample;

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}
