//! Streams - non-overlapping generators for parallel work
//!
//! A pool seeds one master generator and derives stream k as
//! `Jump^k(seed_state)`. Each worker owns exactly one stream; nothing is
//! shared between them.
//!
//! See `pool.rs` for construction and `checkpoint.rs` for save/restore.

pub mod checkpoint;
pub mod pool;

// Re-export main types for convenience
pub use pool::{split_streams, StreamError, StreamPool, StreamPoolConfig, MAX_STREAMS};

// Re-export checkpoint types
pub use checkpoint::{compute_config_hash, GeneratorSnapshot, PoolSnapshot};
