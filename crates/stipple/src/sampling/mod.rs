//! Stipple placement.
//!
//! This module holds the void-and-cluster sampler, the [`Sample`] /
//! [`SampleSequence`] types it produces, and the small randomness helpers it
//! draws its annealing noise from.
use rand::RngCore;

pub mod sample;
pub mod void_cluster;

pub use sample::{Sample, SampleSequence};
pub use void_cluster::{
    void_and_cluster, void_and_cluster_seeded, StippleResult, VoidAndClusterConfig,
    VoidAndClusterSampler,
};

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Two independent standard-normal values via the Box–Muller transform.
pub(crate) fn box_muller_pair(rng: &mut dyn RngCore) -> (f32, f32) {
    let u1 = (1.0 - rand01(rng)).clamp(f32::MIN_POSITIVE, 1.0);
    let u2 = rand01(rng);

    let r = (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * core::f32::consts::PI * u2;

    (r * theta.cos(), r * theta.sin())
}

/// Overwrite `out` with standard-normal draws, front to back.
pub fn fill_standard_normal(rng: &mut dyn RngCore, out: &mut [f32]) {
    let mut chunks = out.chunks_exact_mut(2);
    for pair in &mut chunks {
        let (a, b) = box_muller_pair(rng);
        pair[0] = a;
        pair[1] = b;
    }
    if let [last] = chunks.into_remainder() {
        *last = box_muller_pair(rng).0;
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    struct FixedRng {
        value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }

    #[test]
    fn rand01_returns_zero_for_zero_input() {
        let mut rng = FixedRng { value: 0 };
        assert_eq!(rand01(&mut rng), 0.0);
    }

    #[test]
    fn rand01_values_in_range() {
        for value in [0, 1, 100, u32::MAX / 2, u32::MAX - 1, u32::MAX] {
            let mut rng = FixedRng { value };
            let result = rand01(&mut rng);
            assert!(
                (0.0..=1.0).contains(&result),
                "rand01({}) = {} is out of range [0,1]",
                value,
                result
            );
        }
    }

    #[test]
    fn box_muller_is_finite_for_extreme_uniforms() {
        for value in [0, u32::MAX] {
            let mut rng = FixedRng { value };
            let (a, b) = box_muller_pair(&mut rng);
            assert!(a.is_finite() && b.is_finite());
        }
    }

    #[test]
    fn standard_normal_moments_are_plausible() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut buf = vec![0.0f32; 20_001];
        fill_standard_normal(&mut rng, &mut buf);

        let n = buf.len() as f32;
        let mean = buf.iter().sum::<f32>() / n;
        let var = buf.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / n;
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.05, "variance {var}");
    }

    #[test]
    fn fill_is_deterministic_for_same_seed() {
        let mut a = vec![0.0f32; 9];
        let mut b = vec![0.0f32; 9];
        fill_standard_normal(&mut StdRng::seed_from_u64(3), &mut a);
        fill_standard_normal(&mut StdRng::seed_from_u64(3), &mut b);
        assert_eq!(a, b);
    }
}
