//! Xoroshiro Core - Rust Engine
//!
//! Deterministic xoroshiro128+ pseudorandom engine for simulation, sampling
//! and Monte Carlo work.
//!
//! # Architecture
//!
//! - **rng**: Seed expansion, step, jump and variate converters
//! - **streams**: Jump-derived parallel streams and checkpointing
//!
//! # Critical Invariants
//!
//! 1. Same seed → same outputs, bit for bit, on every platform
//! 2. The all-zero state is never constructed
//! 3. A generator has exactly one mutator at a time; parallel work gets
//!    one jumped stream per worker
//!
//! Not cryptographically secure.

// Module declarations
pub mod rng;
pub mod streams;

// Re-exports for convenience
pub use rng::{
    rotl, u32_to_f32, u64_to_f32, u64_to_f64, NormalParams, RngError, SplitMix64,
    Xoroshiro128Plus, JUMP, STD_32,
};
pub use streams::{
    compute_config_hash, split_streams, GeneratorSnapshot, PoolSnapshot, StreamError, StreamPool,
    StreamPoolConfig,
};
