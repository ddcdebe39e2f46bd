//! Variate converters
//!
//! Map raw 64-bit outputs to uniform floats in [0, 1) and to approximately
//! normal values via the Central Limit Theorem. Each converter only reads
//! and advances the generator; none of them can fail.

use serde::{Deserialize, Serialize};

use super::xoroshiro::Xoroshiro128Plus;

/// Standard deviation of a discrete uniform variable on [0, 2^32 − 1]
///
/// sqrt((2^64 − 1) / 12), which agrees with 2^31 / sqrt(3) to f64 precision.
pub const STD_32: f64 = 1_239_850_262.253_119_7;

/// 2·mu32 = 2^32 − 1, kept integral so centering stays exact
const TWICE_MU_32: i128 = u32::MAX as i128;

/// Convert a u64 output to a uniform f32 in [0, 1) using its top 24 bits
#[inline]
pub fn u64_to_f32(x: u64) -> f32 {
    (x >> 40) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// Convert a u32 half-draw to a uniform f32 in [0, 1) using its top 24 bits
#[inline]
pub fn u32_to_f32(x: u32) -> f32 {
    (x >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// Convert a u64 output to a uniform f64 in [0, 1) using its top 53 bits
#[inline]
pub fn u64_to_f64(x: u64) -> f64 {
    (x >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Twice the centered value of one 32-bit half: 2·(x − mu32)
#[inline]
fn twice_centered(half: u64) -> i128 {
    2 * half as i128 - TWICE_MU_32
}

/// Parameters of the CLT normal approximation
///
/// `iterations` is the number of 32-bit halves summed per variate.
/// More halves track a Gaussian more closely at the cost of
/// `ceil(iterations / 2)` steps per draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalParams {
    pub iterations: u32,
    pub sigma: f32,
}

impl Default for NormalParams {
    fn default() -> Self {
        Self {
            iterations: 32,
            sigma: 1.0,
        }
    }
}

impl Xoroshiro128Plus {
    /// Generate random f32 in range [0.0, 1.0)
    ///
    /// # Example
    /// ```
    /// use xoroshiro_core_rs::Xoroshiro128Plus;
    ///
    /// let mut rng = Xoroshiro128Plus::new(12345);
    /// let u = rng.uniform_f32();
    /// assert!((0.0..1.0).contains(&u));
    /// ```
    pub fn uniform_f32(&mut self) -> f32 {
        u64_to_f32(self.next())
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn uniform_f64(&mut self) -> f64 {
        u64_to_f64(self.next())
    }

    /// Approximately normal variate with standard deviation `sigma`
    ///
    /// Sums `iterations` uniform 32-bit halves, centers them on the exact
    /// mean 2^31 − 1/2 and rescales by `STD_32 · sqrt(iterations) / sigma`.
    /// An odd leftover half (upper 32 bits of a fresh output) is drawn
    /// first, then both halves of each further output.
    ///
    /// Not a true Gaussian sampler: tails are truncated at roughly
    /// `sqrt(3 · iterations)` standard deviations.
    ///
    /// `iterations == 0` yields `0.0` without advancing the state.
    ///
    /// # Example
    /// ```
    /// use xoroshiro_core_rs::Xoroshiro128Plus;
    ///
    /// let mut rng = Xoroshiro128Plus::new(1);
    /// let z = rng.normal_f32(32, 2.5);
    /// assert!(z.is_finite());
    /// ```
    pub fn normal_f32(&mut self, iterations: u32, sigma: f32) -> f32 {
        if iterations == 0 {
            return 0.0;
        }

        // 2·Σ(x_i − mu32) stays an exact integer; i128 covers u32::MAX halves.
        let mut twice_sum: i128 = 0;
        if iterations % 2 == 1 {
            twice_sum += twice_centered(self.next() >> 32);
        }
        for _ in 0..iterations / 2 {
            let draw = self.next();
            twice_sum += twice_centered(draw >> 32);
            twice_sum += twice_centered(draw & 0xFFFF_FFFF);
        }

        let norm = 2.0 * STD_32 * f64::from(iterations).sqrt();
        (twice_sum as f64 / norm * f64::from(sigma)) as f32
    }

    /// Normal variate with the default 32 halves and unit sigma
    pub fn standard_normal_f32(&mut self) -> f32 {
        self.normal_with(&NormalParams::default())
    }

    /// Normal variate from a parameter set
    pub fn normal_with(&mut self, params: &NormalParams) -> f32 {
        self.normal_f32(params.iterations, params.sigma)
    }

    /// Fill `out` with raw outputs
    pub fn fill_u64(&mut self, out: &mut [u64]) {
        for slot in out {
            *slot = self.next();
        }
    }

    /// Fill `out` with uniform f32 draws
    pub fn fill_uniform_f32(&mut self, out: &mut [f32]) {
        for slot in out {
            *slot = self.uniform_f32();
        }
    }

    /// Fill `out` with uniform f64 draws
    pub fn fill_uniform_f64(&mut self, out: &mut [f64]) {
        for slot in out {
            *slot = self.uniform_f64();
        }
    }

    /// Fill `out` with normal draws
    pub fn fill_normal_f32(&mut self, out: &mut [f32], params: &NormalParams) {
        for slot in out {
            *slot = self.normal_with(params);
        }
    }
}
