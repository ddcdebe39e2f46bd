//! Deterministic random number generation
//!
//! xoroshiro128+ engine with SplitMix64 seed expansion, a 2^64-step jump for
//! carving out parallel streams, and uniform/normal variate converters.
//! CRITICAL: Same seed → same sequence on every platform.

mod splitmix;
mod variates;
mod xoroshiro;

pub use splitmix::SplitMix64;
pub use variates::{u32_to_f32, u64_to_f32, u64_to_f64, NormalParams, STD_32};
pub use xoroshiro::{rotl, RngError, Xoroshiro128Plus, JUMP};
