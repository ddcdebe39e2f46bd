//! SplitMix64 mixer
//!
//! Only used to expand a 64-bit seed into the 128-bit xoroshiro state. It is
//! weaker than xoroshiro128+ and is not exposed as a general-purpose source.

/// Additive increment (golden ratio, odd)
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64 generator: 64-bit counter plus an avalanche finalizer
///
/// # Example
/// ```
/// use xoroshiro_core_rs::SplitMix64;
///
/// let mut mixer = SplitMix64::new(0);
/// assert_eq!(mixer.next(), 0xe220_a839_7b1d_cdaf);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Create a mixer starting at `seed`
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advance the counter and return one mixed output
    pub fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Current counter value
    pub fn state(&self) -> u64 {
        self.state
    }
}
