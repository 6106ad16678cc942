//! Toroidal energy field for void-and-cluster placement.
//!
//! Lower energy is more attractive. Placing a sample stamps a repulsion
//! [`Kernel`] around it with wraparound on both axes, then pins the chosen cell
//! to `+inf` so it can never be picked again. The only infinite cells are the
//! chosen ones.
use crate::field::grid::Grid;
use crate::field::kernel::Kernel;

/// Half-open rectangle of cells `[row_start, row_end) x [col_start, col_end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl Region {
    /// The whole `height x width` grid.
    pub fn full(height: usize, width: usize) -> Self {
        Self {
            row_start: 0,
            row_end: height,
            col_start: 0,
            col_end: width,
        }
    }

    /// Box of half-width `min(height, width) / 4` around `(height / 2, width / 2)`,
    /// clipped to the grid. Collapses to an empty region on grids smaller than 4 cells
    /// on either side.
    pub fn center_window(height: usize, width: usize) -> Self {
        let half = height.min(width) / 4;
        let (cy, cx) = (height / 2, width / 2);
        Self {
            row_start: cy.saturating_sub(half),
            row_end: (cy + half).min(height),
            col_start: cx.saturating_sub(half),
            col_end: (cx + half).min(width),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_start >= self.row_end || self.col_start >= self.col_end
    }

    /// Restrict to the bounds of a `height x width` grid.
    pub fn clip(self, height: usize, width: usize) -> Self {
        Self {
            row_start: self.row_start.min(height),
            row_end: self.row_end.min(height),
            col_start: self.col_start.min(width),
            col_end: self.col_end.min(width),
        }
    }
}

/// Mutable energy grid owned by a single sampler run.
#[derive(Clone, Debug)]
pub struct EnergyField {
    grid: Grid,
}

impl EnergyField {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// Initial energy `-importance * content_bias`.
    pub fn from_importance(importance: &Grid, content_bias: f32) -> Self {
        Self {
            grid: importance.map(|v| -v * content_bias),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.grid.get(row, col)
    }

    /// Add `kernel` centered on `(row, col)`, wrapping each axis independently.
    ///
    /// Kernels wider than the grid wrap more than once, so a cell may receive
    /// several contributions from a single call.
    pub fn accumulate_kernel(&mut self, row: usize, col: usize, kernel: &Kernel) {
        let (h, w) = self.grid.shape();
        if h == 0 || w == 0 {
            return;
        }
        let (h, w) = (h as isize, w as isize);
        let (row, col) = (row as isize, col as isize);
        let width = self.grid.width();
        let data = self.grid.data_mut();
        for (dy, dx, value) in kernel.offsets() {
            let ty = (row + dy).rem_euclid(h) as usize;
            let tx = (col + dx).rem_euclid(w) as usize;
            data[ty * width + tx] += value;
        }
    }

    /// Pin `(row, col)` to `+inf`, removing it from every later minimum search.
    pub fn sentinel(&mut self, row: usize, col: usize) {
        self.grid.set(row, col, f32::INFINITY);
    }

    pub fn is_chosen(&self, row: usize, col: usize) -> bool {
        self.grid.get(row, col) == Some(f32::INFINITY)
    }

    /// Number of cells already pinned by [`EnergyField::sentinel`].
    pub fn chosen_count(&self) -> usize {
        self.grid.count_eq(f32::INFINITY)
    }

    /// Row-major-first location of the minimum over the whole grid.
    pub fn argmin(&self) -> Option<(usize, usize)> {
        let (h, w) = self.grid.shape();
        self.argmin_in(Region::full(h, w))
    }

    /// Row-major-first location of the minimum inside `region`.
    ///
    /// Returns `None` when the region is empty or every cell in it is already chosen.
    pub fn argmin_in(&self, region: Region) -> Option<(usize, usize)> {
        let (h, w) = self.grid.shape();
        let region = region.clip(h, w);
        let data = self.grid.data();
        let mut best: Option<(usize, usize, f32)> = None;
        for row in region.row_start..region.row_end {
            let base = row * w;
            for col in region.col_start..region.col_end {
                let v = data[base + col];
                if is_selectable(v) && best.is_none_or(|(_, _, b)| v < b) {
                    best = Some((row, col, v));
                }
            }
        }
        best.map(|(row, col, _)| (row, col))
    }

    /// Row-major-first minimum of `energy + amplitude * noise` over the whole grid.
    ///
    /// The perturbed values live only for the duration of the scan; the stored
    /// energy is left untouched. `noise` must have one value per cell.
    pub fn argmin_perturbed(&self, noise: &[f32], amplitude: f32) -> Option<(usize, usize)> {
        debug_assert_eq!(noise.len(), self.grid.len());
        let w = self.grid.width();
        let mut best: Option<(usize, f32)> = None;
        for (i, (&e, &n)) in self.grid.data().iter().zip(noise).enumerate() {
            if !is_selectable(e) {
                continue;
            }
            let v = e + n * amplitude;
            if best.is_none_or(|(_, b)| v < b) {
                best = Some((i, v));
            }
        }
        best.map(|(i, _)| (i / w, i % w))
    }
}

#[inline]
fn is_selectable(v: f32) -> bool {
    v < f32::INFINITY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_kernel_3() -> Kernel {
        Kernel::gaussian_with_side(3, 1.0).unwrap()
    }

    #[test]
    fn center_window_matches_clipped_quarter_box() {
        let r = Region::center_window(8, 12);
        assert_eq!(
            r,
            Region {
                row_start: 2,
                row_end: 6,
                col_start: 4,
                col_end: 8
            }
        );
        assert!(Region::center_window(3, 10).is_empty());
    }

    #[test]
    fn argmin_breaks_ties_row_major() {
        let g = Grid::from_vec(2, 3, vec![1.0, 0.0, 0.0, 0.0, 2.0, 0.0]).unwrap();
        let field = EnergyField::new(g);
        assert_eq!(field.argmin(), Some((0, 1)));
    }

    #[test]
    fn argmin_in_region_ignores_outside_cells() {
        let g = Grid::from_fn(4, 4, |r, c| if (r, c) == (0, 0) { -5.0 } else { (r + c) as f32 });
        let field = EnergyField::new(g);
        let region = Region {
            row_start: 1,
            row_end: 3,
            col_start: 1,
            col_end: 3,
        };
        assert_eq!(field.argmin(), Some((0, 0)));
        assert_eq!(field.argmin_in(region), Some((1, 1)));
    }

    #[test]
    fn sentinel_excludes_cell_and_full_field_yields_none() {
        let mut field = EnergyField::new(Grid::zeros(1, 2));
        field.sentinel(0, 0);
        assert!(field.is_chosen(0, 0));
        assert_eq!(field.argmin(), Some((0, 1)));
        field.sentinel(0, 1);
        assert_eq!(field.argmin(), None);
        assert_eq!(field.chosen_count(), 2);
    }

    #[test]
    fn accumulate_wraps_around_corner() {
        let mut field = EnergyField::new(Grid::zeros(5, 5));
        let k = unit_kernel_3();
        field.accumulate_kernel(0, 0, &k);

        let g = field.grid();
        assert_eq!(g.get(0, 0), Some(k.center_value()));
        assert_eq!(g.get(4, 4), k.get(0, 0));
        assert_eq!(g.get(4, 0), k.get(0, 1));
        assert_eq!(g.get(0, 4), k.get(1, 0));
        assert_eq!(g.get(2, 2), Some(0.0));
    }

    #[test]
    fn kernel_wider_than_grid_accumulates_every_wrap() {
        let mut field = EnergyField::new(Grid::zeros(1, 1));
        let k = unit_kernel_3();
        field.accumulate_kernel(0, 0, &k);
        assert!((field.get(0, 0).unwrap() - k.sum()).abs() < 1e-6);
    }

    #[test]
    fn perturbed_argmin_does_not_mutate_energy() {
        let g = Grid::from_vec(1, 3, vec![0.0, 0.1, 0.2]).unwrap();
        let field = EnergyField::new(g.clone());
        let noise = [1.0, -1.0, 0.0];
        assert_eq!(field.argmin_perturbed(&noise, 1.0), Some((0, 1)));
        assert_eq!(field.argmin_perturbed(&noise, 0.0), Some((0, 0)));
        assert_eq!(field.grid(), &g);
    }

    #[test]
    fn perturbed_argmin_skips_chosen_cells() {
        let mut field = EnergyField::new(Grid::zeros(1, 2));
        field.sentinel(0, 1);
        assert_eq!(field.argmin_perturbed(&[0.0, -100.0], 1.0), Some((0, 0)));
    }

    #[test]
    fn from_importance_negates_and_scales() {
        let imp = Grid::from_vec(1, 2, vec![1.0, 0.5]).unwrap();
        let field = EnergyField::from_importance(&imp, 0.9);
        assert_eq!(field.get(0, 0), Some(-0.9));
        assert_eq!(field.get(0, 1), Some(-0.45));
    }
}
