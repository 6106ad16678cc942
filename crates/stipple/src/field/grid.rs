//! Dense row-major scalar grid.
//!
//! [`Grid`] backs every raster the crate touches: source brightness, importance,
//! energy, and the binary stipple output. Shapes are reported as `(height, width)`
//! and cells are addressed by `(row, col)`.
use crate::error::{Error, Result};

/// Value of a stipple grid cell that holds no mark.
pub const BACKGROUND: f32 = 1.0;
/// Value of a stipple grid cell that holds a mark.
pub const MARK: f32 = 0.0;

/// A 2D grid of `f32` values stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    height: usize,
    width: usize,
    data: Vec<f32>,
}

impl Grid {
    /// Create a grid of the given shape with every cell set to `value`.
    pub fn filled(height: usize, width: usize, value: f32) -> Self {
        Self {
            height,
            width,
            data: vec![value; height * width],
        }
    }

    /// Create a grid with all cells set to zero.
    pub fn zeros(height: usize, width: usize) -> Self {
        Self::filled(height, width, 0.0)
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(height: usize, width: usize, data: Vec<f32>) -> Result<Self> {
        let expected = height
            .checked_mul(width)
            .ok_or_else(|| Error::InvalidGrid(format!("shape {height}x{width} overflows")))?;
        if data.len() != expected {
            return Err(Error::InvalidGrid(format!(
                "buffer holds {} values but shape {height}x{width} needs {expected}",
                data.len()
            )));
        }
        Ok(Self {
            height,
            width,
            data,
        })
    }

    /// Build a grid by evaluating `f(row, col)` for every cell.
    pub fn from_fn(height: usize, width: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        Self {
            height,
            width,
            data,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Shape as `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat index of `(row, col)`. The caller keeps the coordinates in bounds.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height && col < self.width);
        row * self.width + col
    }

    /// Value at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.data[row * self.width + col])
    }

    /// Set the value at `(row, col)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        if row < self.height && col < self.width {
            let i = row * self.width + col;
            self.data[i] = value;
        }
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Apply `f` to every cell, producing a grid of the same shape.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            height: self.height,
            width: self.width,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Smallest and largest value, or `None` for an empty grid.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut it = self.data.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Number of cells equal to `value`.
    pub fn count_eq(&self, value: f32) -> usize {
        self.data.iter().filter(|&&v| v == value).count()
    }

    /// Fail unless `other` has the same shape as `self`.
    pub fn ensure_same_shape(&self, other: &Grid) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::InvalidGrid(format!(
                "shape mismatch: {:?} vs {:?}",
                self.shape(),
                other.shape()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_rejects_length_mismatch() {
        let err = Grid::from_vec(2, 3, vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, Error::InvalidGrid(_)));
        assert!(Grid::from_vec(2, 3, vec![0.0; 6]).is_ok());
    }

    #[test]
    fn from_fn_is_row_major() {
        let g = Grid::from_fn(2, 3, |r, c| (r * 10 + c) as f32);
        assert_eq!(g.data(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(g.get(1, 2), Some(12.0));
        assert_eq!(g.index(1, 0), 3);
    }

    #[test]
    fn get_and_set_ignore_out_of_bounds() {
        let mut g = Grid::zeros(2, 2);
        g.set(5, 0, 1.0);
        assert_eq!(g.get(5, 0), None);
        assert!(g.data().iter().all(|v| *v == 0.0));
        g.set(1, 1, 3.0);
        assert_eq!(g.get(1, 1), Some(3.0));
    }

    #[test]
    fn min_max_handles_empty_and_filled() {
        assert_eq!(Grid::zeros(0, 4).min_max(), None);
        let g = Grid::from_vec(1, 4, vec![0.3, -1.0, 2.5, 0.0]).unwrap();
        assert_eq!(g.min_max(), Some((-1.0, 2.5)));
    }

    #[test]
    fn count_eq_counts_marks() {
        let mut g = Grid::filled(3, 3, BACKGROUND);
        g.set(0, 0, MARK);
        g.set(2, 1, MARK);
        assert_eq!(g.count_eq(MARK), 2);
        assert_eq!(g.count_eq(BACKGROUND), 7);
    }

    #[test]
    fn ensure_same_shape_detects_transposed_grid() {
        let a = Grid::zeros(2, 3);
        let b = Grid::zeros(3, 2);
        assert!(a.ensure_same_shape(&a.clone()).is_ok());
        assert!(a.ensure_same_shape(&b).is_err());
    }
}
