//! Void-and-cluster stipple placement over a toroidal energy field.
//!
//! The energy field starts at `-importance * content_bias`. Each iteration picks
//! the lowest-energy cell, records it, stamps the repulsion kernel around it with
//! wraparound, and pins the cell to `+inf`. The first pick is restricted to a box
//! around the image center; later picks search the whole grid on a perturbed view
//! of the field whose noise amplitude decays linearly to zero.
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::events::{EventSink, StippleEvent, StippleEventKind};
use crate::field::{EnergyField, Grid, Kernel, Region, BACKGROUND, MARK};
use crate::sampling::{fill_standard_normal, Sample, SampleSequence};

/// Parameters of a void-and-cluster run.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoidAndClusterConfig {
    /// Fraction of cells to stipple. Values `<= 0` place nothing; at most `1.0`.
    pub percentage: f64,
    /// Standard deviation of the repulsion kernel in cells.
    pub sigma: f32,
    /// Weight of importance in the initial energy, usually in `[0, 1]`.
    pub content_bias: f32,
    /// Initial amplitude of the annealed noise; `0.0` makes every pick a plain minimum.
    pub noise_scale_factor: f32,
}

impl Default for VoidAndClusterConfig {
    fn default() -> Self {
        Self {
            percentage: 0.08,
            sigma: 0.9,
            content_bias: 0.9,
            noise_scale_factor: 0.1,
        }
    }
}

impl VoidAndClusterConfig {
    /// Creates a new [`VoidAndClusterConfig`] with the given coverage fraction.
    pub fn new(percentage: f64) -> Self {
        Self {
            percentage,
            ..Default::default()
        }
    }

    /// Sets the coverage fraction.
    pub fn with_percentage(mut self, percentage: f64) -> Self {
        self.percentage = percentage;
        self
    }

    /// Sets the repulsion kernel sigma.
    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    /// Sets the content bias.
    pub fn with_content_bias(mut self, content_bias: f32) -> Self {
        self.content_bias = content_bias;
        self
    }

    /// Sets the annealed noise amplitude.
    pub fn with_noise_scale_factor(mut self, noise_scale_factor: f32) -> Self {
        self.noise_scale_factor = noise_scale_factor;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.percentage.is_nan() || self.percentage > 1.0 {
            return Err(Error::InvalidConfig(format!(
                "percentage must be <= 1, got {}",
                self.percentage
            )));
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "sigma must be finite and > 0, got {}",
                self.sigma
            )));
        }
        if !self.content_bias.is_finite() {
            return Err(Error::InvalidConfig("content_bias must be finite".into()));
        }
        if !self.noise_scale_factor.is_finite() || self.noise_scale_factor < 0.0 {
            return Err(Error::InvalidConfig(
                "noise_scale_factor must be finite and >= 0".into(),
            ));
        }
        Ok(())
    }

    /// Number of samples a run over a `height x width` grid places.
    pub fn target_count(&self, height: usize, width: usize) -> usize {
        if self.percentage.is_nan() || self.percentage <= 0.0 {
            return 0;
        }
        let cells = height * width;
        ((cells as f64 * self.percentage).floor() as usize).min(cells)
    }
}

/// Output of a run: the binary stipple grid and the samples in placement order.
#[derive(Debug, Clone, PartialEq)]
pub struct StippleResult {
    /// [`MARK`] at every sample cell, [`BACKGROUND`] elsewhere.
    pub stipple: Grid,
    pub samples: SampleSequence,
}

/// Void-and-cluster sampler with a prebuilt repulsion kernel.
#[derive(Debug, Clone)]
pub struct VoidAndClusterSampler {
    config: VoidAndClusterConfig,
    kernel: Kernel,
}

impl VoidAndClusterSampler {
    pub fn try_new(config: VoidAndClusterConfig) -> Result<Self> {
        config.validate()?;
        let kernel = Kernel::repulsion(config.sigma)?;
        Ok(Self { config, kernel })
    }

    pub fn config(&self) -> &VoidAndClusterConfig {
        &self.config
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Runs the sampler over `importance`, returning the result.
    pub fn run(&self, importance: &Grid, rng: &mut impl RngCore) -> Result<StippleResult> {
        self.place(importance, rng, &mut ())
    }

    /// Runs the sampler and reports progress to `sink`.
    pub fn run_with_events(
        &self,
        importance: &Grid,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<StippleResult> {
        self.place(importance, rng, sink)
    }

    fn place(
        &self,
        importance: &Grid,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<StippleResult> {
        if let Some(bad) = importance.data().iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidGrid(format!(
                "importance must be finite, found {} at ({}, {})",
                importance.data()[bad],
                bad / importance.width(),
                bad % importance.width()
            )));
        }
        let (h, w) = importance.shape();
        let n = self.config.target_count(h, w);

        info!(
            "Void-and-cluster: {}x{} grid | samples: {} | sigma: {} | kernel: {}x{}.",
            h,
            w,
            n,
            self.config.sigma,
            self.kernel.side(),
            self.kernel.side()
        );
        if sink.wants(StippleEventKind::RunStarted) {
            sink.send(StippleEvent::RunStarted {
                height: h,
                width: w,
                target_count: n,
                kernel_side: self.kernel.side(),
            });
        }
        if n == 0 {
            warn!(
                "Percentage {} yields no samples; returning blank stipple grid.",
                self.config.percentage
            );
            if sink.wants(StippleEventKind::Warning) {
                sink.send(StippleEvent::Warning {
                    context: "void_and_cluster".into(),
                    message: "Target sample count is zero".into(),
                });
            }
        }

        let mut energy = EnergyField::from_importance(importance, self.config.content_bias);
        let mut stipple = Grid::filled(h, w, BACKGROUND);
        let mut samples = SampleSequence::with_capacity(n);
        let mut noise = if self.config.noise_scale_factor > 0.0 {
            vec![0.0f32; h * w]
        } else {
            Vec::new()
        };

        for i in 0..n {
            let picked = if i == 0 {
                let mut window = Region::center_window(h, w);
                if window.is_empty() {
                    warn!(
                        "Center window is empty on a {}x{} grid; searching the whole grid.",
                        h, w
                    );
                    if sink.wants(StippleEventKind::Warning) {
                        sink.send(StippleEvent::Warning {
                            context: "first_sample".into(),
                            message: "Center window empty; using whole grid".into(),
                        });
                    }
                    window = Region::full(h, w);
                }
                debug!("First sample window: {:?}.", window);
                energy.argmin_in(window)
            } else {
                let amplitude = annealed_amplitude(self.config.noise_scale_factor, i, n);
                if amplitude > 0.0 {
                    fill_standard_normal(rng, &mut noise);
                    energy.argmin_perturbed(&noise, amplitude)
                } else {
                    energy.argmin()
                }
            };

            let Some((row, col)) = picked else {
                return Err(Error::Other(format!(
                    "no selectable cell left after {i} of {n} samples"
                )));
            };

            let value = importance.get(row, col).unwrap_or_default();
            let sample = Sample::new(row, col, value);
            samples.push(sample);
            stipple.set(row, col, MARK);
            energy.accumulate_kernel(row, col, &self.kernel);
            energy.sentinel(row, col);

            if sink.wants(StippleEventKind::SamplePlaced) {
                sink.send(StippleEvent::SamplePlaced { index: i, sample });
            }
        }

        info!("Void-and-cluster placed {} samples.", samples.len());
        if sink.wants(StippleEventKind::RunFinished) {
            sink.send(StippleEvent::RunFinished {
                placed: samples.len(),
            });
        }

        Ok(StippleResult { stipple, samples })
    }
}

/// Noise amplitude for iteration `i` of `n`: decays linearly from `factor` toward zero.
fn annealed_amplitude(factor: f32, i: usize, n: usize) -> f32 {
    factor * (1.0 - i as f32 / n as f32)
}

/// Place stipples over `importance` using `rng` for the annealed noise.
pub fn void_and_cluster<R: RngCore>(
    importance: &Grid,
    config: &VoidAndClusterConfig,
    rng: &mut R,
) -> Result<StippleResult> {
    VoidAndClusterSampler::try_new(*config)?.run(importance, rng)
}

/// [`void_and_cluster`] with a fresh [`StdRng`] seeded from `seed`.
pub fn void_and_cluster_seeded(
    importance: &Grid,
    config: &VoidAndClusterConfig,
    seed: u64,
) -> Result<StippleResult> {
    let mut rng = StdRng::seed_from_u64(seed);
    void_and_cluster(importance, config, &mut rng)
}
