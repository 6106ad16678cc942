//! Gaussian kernels used for repulsion and blurring.
//!
//! Every kernel is square with an odd side so it has a single center cell.
//! [`Kernel::repulsion`] is the variant the void-and-cluster sampler stamps onto
//! the energy field: an unnormalized Gaussian scaled by `sigma²`, so wider kernels
//! also carry proportionally more total repulsion.
use glam::Vec2;

use crate::error::{Error, Result};

/// A square, odd-sided kernel centered on its middle cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    side: usize,
    values: Vec<f32>,
}

/// Smallest odd side length `>= 6 * sigma + 1`.
pub fn kernel_side_for_sigma(sigma: f32) -> Result<usize> {
    validate_sigma(sigma)?;
    let side = (6.0 * sigma + 1.0).ceil() as usize;
    let side = if side % 2 == 0 { side + 1 } else { side };
    kernel_cells(side)?;
    Ok(side)
}

/// Cell count of a `side x side` kernel, rejecting sizes that cannot be allocated.
fn kernel_cells(side: usize) -> Result<usize> {
    side.checked_mul(side)
        .filter(|&cells| cells <= isize::MAX as usize / std::mem::size_of::<f32>())
        .ok_or_else(|| {
            Error::InvalidConfig(format!("kernel side {side} is too large to allocate"))
        })
}

fn validate_sigma(sigma: f32) -> Result<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "kernel sigma must be finite and > 0, got {sigma}"
        )));
    }
    Ok(())
}

impl Kernel {
    /// Unnormalized Gaussian with the default side for `sigma`. The center cell is 1.
    pub fn gaussian(sigma: f32) -> Result<Self> {
        let side = kernel_side_for_sigma(sigma)?;
        Self::gaussian_with_side(side, sigma)
    }

    /// Unnormalized Gaussian with an explicit side. Even sides are bumped to the next odd value.
    pub fn gaussian_with_side(side: usize, sigma: f32) -> Result<Self> {
        validate_sigma(sigma)?;
        if side == 0 {
            return Err(Error::InvalidConfig("kernel side must be > 0".into()));
        }
        let side = if side % 2 == 0 { side + 1 } else { side };
        let center = (side / 2) as f32;

        let cells = kernel_cells(side)?;

        let mut values = Vec::new();
        values.try_reserve_exact(cells).map_err(|_| {
            Error::InvalidConfig(format!("kernel side {side} is too large to allocate"))
        })?;
        for ky in 0..side {
            for kx in 0..side {
                let d = Vec2::new(kx as f32 - center, ky as f32 - center).length() / sigma;
                values.push((-0.5 * d * d).exp());
            }
        }
        Ok(Self { side, values })
    }

    /// Gaussian rescaled to sum to 1, for use as a blur.
    pub fn normalized(sigma: f32) -> Result<Self> {
        let mut kernel = Self::gaussian(sigma)?;
        let sum = kernel.sum();
        for v in &mut kernel.values {
            *v /= sum;
        }
        Ok(kernel)
    }

    /// Repulsion kernel: the unnormalized Gaussian multiplied by `sigma²`.
    pub fn repulsion(sigma: f32) -> Result<Self> {
        let mut kernel = Self::gaussian(sigma)?;
        let scale = sigma * sigma;
        for v in &mut kernel.values {
            *v *= scale;
        }
        Ok(kernel)
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Distance from the center cell to the kernel edge.
    pub fn radius(&self) -> usize {
        self.side / 2
    }

    /// Value at kernel cell `(ky, kx)`.
    pub fn get(&self, ky: usize, kx: usize) -> Option<f32> {
        if ky >= self.side || kx >= self.side {
            return None;
        }
        Some(self.values[ky * self.side + kx])
    }

    pub fn center_value(&self) -> f32 {
        let r = self.radius();
        self.values[r * self.side + r]
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn sum(&self) -> f32 {
        self.values.iter().sum()
    }

    /// Iterate `(dy, dx, value)` with offsets relative to the center cell, row-major.
    pub fn offsets(&self) -> impl Iterator<Item = (isize, isize, f32)> + '_ {
        let r = self.radius() as isize;
        let side = self.side;
        self.values.iter().enumerate().map(move |(i, &v)| {
            let dy = (i / side) as isize - r;
            let dx = (i % side) as isize - r;
            (dy, dx, v)
        })
    }
}
