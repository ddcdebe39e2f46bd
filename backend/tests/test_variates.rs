//! Variate converter tests
//!
//! Range checks, golden values, and fixed-seed statistical checks for the
//! uniform and CLT-normal converters.

use proptest::prelude::*;
use xoroshiro_core_rs::{NormalParams, Xoroshiro128Plus};

/// Pearson chi-square statistic of `values` against 100 equal bins on [0, 1)
fn chi_square_100(values: impl Iterator<Item = f64>) -> f64 {
    let mut bins = [0u64; 100];
    let mut total = 0u64;
    for v in values {
        bins[((v * 100.0) as usize).min(99)] += 1;
        total += 1;
    }
    let expected = total as f64 / 100.0;
    bins.iter()
        .map(|&observed| (observed as f64 - expected).powi(2) / expected)
        .sum()
}

/// (mean, sample std dev, excess kurtosis)
fn moments(xs: &[f64]) -> (f64, f64, f64) {
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let fourth = xs.iter().map(|x| (x - mean).powi(4)).sum::<f64>() / n;
    (mean, var.sqrt(), fourth / (var * var) - 3.0)
}

// ============================================================================
// Uniform
// ============================================================================

#[test]
fn test_uniform_golden_values() {
    let mut rng = Xoroshiro128Plus::new(0);
    assert_eq!(rng.uniform_f32(), 0.233_588_04);
    assert_eq!(rng.uniform_f32(), 0.974_812_4);

    let mut rng = Xoroshiro128Plus::new(0);
    assert_eq!(rng.uniform_f64(), 0.233_588_061_471_540_2);
    assert_eq!(rng.uniform_f64(), 0.974_812_439_049_620_6);
}

#[test]
fn test_uniform_f64_mean() {
    let mut rng = Xoroshiro128Plus::new(2025);
    let n = 1_000_000;
    let mean = (0..n).map(|_| rng.uniform_f64()).sum::<f64>() / n as f64;
    // Standard error is about 2.9e-4.
    assert!((mean - 0.5).abs() < 2e-3, "mean {} too far from 0.5", mean);
}

#[test]
fn test_uniform_f32_mean() {
    let mut rng = Xoroshiro128Plus::new(2024);
    let n = 1_000_000;
    let mean = (0..n).map(|_| f64::from(rng.uniform_f32())).sum::<f64>() / n as f64;
    assert!((mean - 0.5).abs() < 2e-3, "mean {} too far from 0.5", mean);
}

#[test]
fn test_uniform_f32_chi_square() {
    let mut rng = Xoroshiro128Plus::new(2024);
    let chi2 = chi_square_100((0..1_000_000).map(|_| f64::from(rng.uniform_f32())));
    // 99 degrees of freedom, p = 0.001 critical value ≈ 148.2
    assert!(chi2 < 148.2, "chi-square {} rejects uniformity", chi2);
}

#[test]
fn test_uniform_f64_chi_square() {
    let mut rng = Xoroshiro128Plus::new(2025);
    let chi2 = chi_square_100((0..1_000_000).map(|_| rng.uniform_f64()));
    assert!(chi2 < 148.2, "chi-square {} rejects uniformity", chi2);
}

proptest! {
    #[test]
    fn prop_uniform_in_unit_interval(s0 in any::<u64>(), s1 in any::<u64>()) {
        prop_assume!(s0 != 0 || s1 != 0);
        let mut rng = Xoroshiro128Plus::from_state([s0, s1]).unwrap();
        for _ in 0..8 {
            let f = rng.uniform_f32();
            let d = rng.uniform_f64();
            prop_assert!((0.0..1.0).contains(&f));
            prop_assert!((0.0..1.0).contains(&d));
        }
    }

    #[test]
    fn prop_normal_is_total(
        seed in any::<u64>(),
        iterations in 0u32..512,
        sigma in -10.0f32..10.0,
    ) {
        let mut rng = Xoroshiro128Plus::new(seed);
        let z = rng.normal_f32(iterations, sigma);
        prop_assert!(z.is_finite());
        // CLT sum is bounded by sqrt(3n) standard deviations.
        let bound = (3.0 * iterations as f32).sqrt() * sigma.abs() + 1e-3;
        prop_assert!(z.abs() <= bound, "{} exceeds {}", z, bound);
    }
}

// ============================================================================
// Normal (CLT)
// ============================================================================

#[test]
fn test_normal_golden_values() {
    let mut rng = Xoroshiro128Plus::new(42);
    let draws: Vec<u32> = (0..3).map(|_| rng.normal_f32(32, 1.0).to_bits()).collect();
    assert_eq!(draws, vec![0xbf5c_f2c0, 0x3f1b_0266, 0x3f43_47f3]);

    // Odd iteration count: leftover half first.
    let mut rng = Xoroshiro128Plus::new(42);
    let draws: Vec<u32> = (0..2).map(|_| rng.normal_f32(5, 2.0).to_bits()).collect();
    assert_eq!(draws, vec![0xbf27_1f04, 0x3f9e_6c80]);
}

#[test]
fn test_standard_normal_uses_defaults() {
    let mut a = Xoroshiro128Plus::new(42);
    let mut b = Xoroshiro128Plus::new(42);
    assert_eq!(a.standard_normal_f32(), b.normal_f32(32, 1.0));
    assert_eq!(
        a.normal_with(&NormalParams::default()),
        b.normal_f32(32, 1.0)
    );
}

#[test]
fn test_normal_moments_converge() {
    const SAMPLES: usize = 100_000;

    let mut kurtosis = Vec::new();
    for iterations in [4u32, 32, 256] {
        let mut rng = Xoroshiro128Plus::new(7);
        let xs: Vec<f64> = (0..SAMPLES)
            .map(|_| f64::from(rng.normal_f32(iterations, 1.0)))
            .collect();
        let (mean, std_dev, excess) = moments(&xs);

        assert!(mean.abs() < 0.02, "iterations {}: mean {}", iterations, mean);
        assert!(
            (std_dev - 1.0).abs() < 0.02,
            "iterations {}: std dev {}",
            iterations,
            std_dev
        );
        kurtosis.push(excess);
    }

    // A sum of n uniforms has excess kurtosis -1.2 / n.
    assert!(kurtosis[0] < -0.2, "n=4 kurtosis {}", kurtosis[0]);
    assert!(kurtosis[0].abs() > kurtosis[1].abs());
    assert!(kurtosis[1].abs() > kurtosis[2].abs());
    assert!(kurtosis[2].abs() < 0.05, "n=256 kurtosis {}", kurtosis[2]);
}

#[test]
fn test_fill_normal_matches_single_draws() {
    let params = NormalParams {
        iterations: 7,
        sigma: 3.0,
    };
    let mut a = Xoroshiro128Plus::new(13);
    let mut b = a.clone();

    let mut buf = [0f32; 16];
    a.fill_normal_f32(&mut buf, &params);
    for value in buf {
        assert_eq!(value, b.normal_with(&params));
    }
    assert_eq!(a, b);
}

#[test]
fn test_fill_u64_and_f32_match_single_draws() {
    let mut a = Xoroshiro128Plus::new(17);
    let mut b = a.clone();

    let mut raw = [0u64; 4];
    a.fill_u64(&mut raw);
    let mut unit = [0f32; 4];
    a.fill_uniform_f32(&mut unit);

    for value in raw {
        assert_eq!(value, b.next());
    }
    for value in unit {
        assert_eq!(value, b.uniform_f32());
    }
}
