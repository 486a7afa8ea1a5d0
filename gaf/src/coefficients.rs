//! Random coefficients for the truncated series.

use num::complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::f64::consts::{FRAC_1_SQRT_2, TAU};

/// Draws a standard normal variate with the Box–Muller transform.
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// `order + 1` independent standard complex Gaussians, `E|c|^2 = 1`.
pub fn generate<R: Rng + ?Sized>(order: usize, rng: &mut R) -> Vec<Complex64> {
    (0..=order)
        .map(|_| {
            let re = standard_normal(rng);
            let im = standard_normal(rng);
            Complex64::new(re, im) * FRAC_1_SQRT_2
        })
        .collect()
}

/// Coefficient source with an optional fixed seed.
///
/// Without a seed every generator draws fresh entropy from the OS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CoefficientGenerator {
    pub seed: Option<u64>,
}

impl CoefficientGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Returns the coefficients together with the seed that produced them,
    /// so an unseeded run can be repeated.
    pub fn generate(&self, order: usize) -> (Vec<Complex64>, u64) {
        let seed = self.seed.unwrap_or_else(|| rand::rngs::OsRng.gen());
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        (generate(order, &mut rng), seed)
    }
}
