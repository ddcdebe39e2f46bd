//! Checkpoint - Save/Load Stream State
//!
//! Persists every stream's two state words verbatim so a restored pool
//! continues bit-for-bit where the saved one stopped.
//!
//! # Critical Invariants
//!
//! - **Determinism**: restored streams replay the exact same outputs
//! - **Verbatim state**: `s0`/`s1` are stored untransformed
//! - **Config Matching**: State can only be loaded with matching config
//! - **No zero state**: an all-zero stream is rejected on load

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::pool::{StreamError, StreamPool, StreamPoolConfig};
use crate::rng::Xoroshiro128Plus;

// ============================================================================
// Snapshot Structures
// ============================================================================

/// One generator's state words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSnapshot {
    pub s0: u64,
    pub s1: u64,
}

impl From<&Xoroshiro128Plus> for GeneratorSnapshot {
    fn from(rng: &Xoroshiro128Plus) -> Self {
        let [s0, s1] = rng.state();
        GeneratorSnapshot { s0, s1 }
    }
}

impl TryFrom<GeneratorSnapshot> for Xoroshiro128Plus {
    type Error = StreamError;

    fn try_from(snapshot: GeneratorSnapshot) -> Result<Self, Self::Error> {
        Ok(Xoroshiro128Plus::from_state([snapshot.s0, snapshot.s1])?)
    }
}

/// Complete pool snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// SHA256 hash of the pool config (for validation)
    pub config_hash: String,

    /// Stream states, in stream order
    pub streams: Vec<GeneratorSnapshot>,
}

impl PoolSnapshot {
    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, StreamError> {
        serde_json::to_string(self).map_err(|e| {
            StreamError::Serialization(format!("Snapshot serialization failed: {}", e))
        })
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, StreamError> {
        serde_json::from_str(json)
            .map_err(|e| StreamError::Serialization(format!("Snapshot parse failed: {}", e)))
    }
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of config
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on field order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, StreamError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config).map_err(|e| {
        StreamError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        StreamError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Save / Load
// ============================================================================

impl StreamPool {
    /// Capture every stream's current state
    pub fn save_state(&self) -> Result<PoolSnapshot, StreamError> {
        Ok(PoolSnapshot {
            config_hash: compute_config_hash(self.config())?,
            streams: self.streams().iter().map(GeneratorSnapshot::from).collect(),
        })
    }

    /// Rebuild a pool from `config` and a snapshot taken with the same config
    ///
    /// # Errors
    /// - [`StreamError::ConfigMismatch`] if the hashes differ
    /// - [`StreamError::StateValidation`] if the stream count is wrong
    /// - [`StreamError::Rng`] if any stream is the zero state
    pub fn load_state(
        config: StreamPoolConfig,
        snapshot: PoolSnapshot,
    ) -> Result<Self, StreamError> {
        config.validate()?;

        let current = compute_config_hash(&config)?;
        if current != snapshot.config_hash {
            return Err(StreamError::ConfigMismatch {
                snapshot: snapshot.config_hash,
                current,
            });
        }

        if snapshot.streams.len() != config.num_streams {
            return Err(StreamError::StateValidation(format!(
                "Stream count mismatch: config has {}, snapshot has {}",
                config.num_streams,
                snapshot.streams.len()
            )));
        }

        let streams = snapshot
            .streams
            .into_iter()
            .map(Xoroshiro128Plus::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("stream pool restored: {} streams", streams.len());
        Ok(StreamPool::from_parts(config, streams))
    }
}
