//! Raster primitives for stippling: scalar grids, Gaussian kernels, and the toroidal
//! energy field the sampler minimizes over.
pub mod energy;
pub mod grid;
pub mod kernel;

pub use energy::{EnergyField, Region};
pub use grid::{Grid, BACKGROUND, MARK};
pub use kernel::{kernel_side_for_sigma, Kernel};
