//! Stream pool
//!
//! # Example
//!
//! ```
//! use xoroshiro_core_rs::streams::{StreamPool, StreamPoolConfig};
//!
//! let config = StreamPoolConfig {
//!     seed: 12345,
//!     num_streams: 4,
//!     ..Default::default()
//! };
//! let mut pool = StreamPool::new(config).unwrap();
//!
//! let first = pool.stream(0).unwrap().next();
//! let second = pool.stream(1).unwrap().next();
//! assert_ne!(first, second);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::{NormalParams, RngError, Xoroshiro128Plus};

/// Upper bound on streams per pool (each costs one jump to build)
pub const MAX_STREAMS: usize = 1 << 20;

// ============================================================================
// Errors
// ============================================================================

/// Errors from building, addressing or restoring a stream pool
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Stream {index} out of range (pool has {len} streams)")]
    StreamOutOfRange { index: usize, len: usize },

    #[error("Config mismatch: snapshot hash {snapshot}, current config hash {current}")]
    ConfigMismatch { snapshot: String, current: String },

    #[error("State validation failed: {0}")]
    StateValidation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("RNG error: {0}")]
    Rng(#[from] RngError),
}

// ============================================================================
// Configuration
// ============================================================================

/// Stream pool configuration
///
/// Loadable from JSON; missing fields fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamPoolConfig {
    /// Master seed
    pub seed: u64,

    /// Number of streams to derive
    pub num_streams: usize,

    /// Normal approximation used by [`StreamPool::normal`]
    pub normal: NormalParams,
}

impl Default for StreamPoolConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_streams: 1,
            normal: NormalParams::default(),
        }
    }
}

impl StreamPoolConfig {
    /// Parse a JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, StreamError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| StreamError::Serialization(format!("Config parse failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), StreamError> {
        if self.num_streams == 0 {
            return Err(StreamError::InvalidConfig(
                "num_streams must be > 0".to_string(),
            ));
        }

        if self.num_streams > MAX_STREAMS {
            return Err(StreamError::InvalidConfig(format!(
                "num_streams must be <= {}, got {}",
                MAX_STREAMS, self.num_streams
            )));
        }

        if !self.normal.sigma.is_finite() {
            return Err(StreamError::InvalidConfig(format!(
                "normal.sigma must be finite, got {}",
                self.normal.sigma
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Pool
// ============================================================================

/// Derive `n` streams from `master`: stream k is `Jump^k(master)`
///
/// Stream 0 is a clone of `master` itself, so `master` must not be used
/// alongside the returned streams.
pub fn split_streams(master: &Xoroshiro128Plus, n: usize) -> Vec<Xoroshiro128Plus> {
    let mut streams = Vec::with_capacity(n);
    let mut cursor = master.clone();
    for k in 0..n {
        if k > 0 {
            cursor.jump();
        }
        streams.push(cursor.clone());
    }
    streams
}

/// A fixed set of decorrelated generators sharing one master seed
#[derive(Debug, Clone)]
pub struct StreamPool {
    config: StreamPoolConfig,
    streams: Vec<Xoroshiro128Plus>,
}

impl StreamPool {
    /// Seed the master and derive `config.num_streams` streams
    ///
    /// # Errors
    /// [`StreamError::InvalidConfig`] if the config fails validation.
    pub fn new(config: StreamPoolConfig) -> Result<Self, StreamError> {
        config.validate()?;

        let master = Xoroshiro128Plus::new(config.seed);
        let streams = split_streams(&master, config.num_streams);
        log::debug!(
            "stream pool: seed {} -> {} streams",
            config.seed,
            streams.len()
        );

        Ok(Self { config, streams })
    }

    pub(crate) fn from_parts(config: StreamPoolConfig, streams: Vec<Xoroshiro128Plus>) -> Self {
        Self { config, streams }
    }

    /// Configuration the pool was built from
    pub fn config(&self) -> &StreamPoolConfig {
        &self.config
    }

    /// Number of streams
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Whether the pool holds no streams (never true for a validated pool)
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Exclusive access to stream `index`
    pub fn stream(&mut self, index: usize) -> Result<&mut Xoroshiro128Plus, StreamError> {
        let len = self.streams.len();
        self.streams
            .get_mut(index)
            .ok_or(StreamError::StreamOutOfRange { index, len })
    }

    /// Read-only view of all streams
    pub fn streams(&self) -> &[Xoroshiro128Plus] {
        &self.streams
    }

    /// Mutable iterator, e.g. to hand one stream to each worker thread
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Xoroshiro128Plus> {
        self.streams.iter_mut()
    }

    /// Give up the pool and keep the streams
    pub fn into_streams(self) -> Vec<Xoroshiro128Plus> {
        self.streams
    }

    /// Normal draw from stream `index` with the pool's configured params
    pub fn normal(&mut self, index: usize) -> Result<f32, StreamError> {
        let params = self.config.normal;
        Ok(self.stream(index)?.normal_with(&params))
    }
}
