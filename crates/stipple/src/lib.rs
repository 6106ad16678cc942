#![forbid(unsafe_code)]
//! stipple: blue-noise stippling of grayscale rasters.
//!
//! Modules:
//! - field: scalar grids, Gaussian kernels, and the toroidal energy field
//! - importance: brightness to importance mapping with tail downweighting and mid-tone boost
//! - sampling: void-and-cluster placement, samples and sample sequences
//! - events: observable run events and sinks
//!
//! A typical pipeline maps a normalized brightness [`field::Grid`] through
//! [`importance::compute_importance`] and feeds the result to
//! [`sampling::void_and_cluster`].
pub mod error;
pub mod events;
pub mod field;
pub mod importance;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use stipple::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::events::{
        EventSink, FnSink, MultiSink, StippleEvent, StippleEventKind, VecSink,
    };
    pub use crate::field::{
        kernel_side_for_sigma, EnergyField, Grid, Kernel, Region, BACKGROUND, MARK,
    };
    pub use crate::importance::{compute_importance, ImportanceParams};
    pub use crate::sampling::{
        void_and_cluster, void_and_cluster_seeded, Sample, SampleSequence, StippleResult,
        VoidAndClusterConfig, VoidAndClusterSampler,
    };
}
