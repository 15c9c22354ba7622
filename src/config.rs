//! Engine configuration

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Tunables for [`crate::KvEngine`] construction
///
/// Every field has a default, so a config file only needs the values it
/// wants to override.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of independent shards the key space is split across
    pub num_shards: usize,

    /// Initial per-shard map capacity
    pub initial_capacity: usize,

    /// Interval between background expiry sweeps, in milliseconds
    pub sweep_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        // One shard per CPU core, clamped to a sane range
        let num_shards = num_cpus::get().clamp(1, 16);

        EngineConfig {
            num_shards,
            initial_capacity: 1024,
            sweep_interval_ms: 100,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shard_count_in_range() {
        let config = EngineConfig::default();
        assert!((1..=16).contains(&config.num_shards));
    }

    #[test]
    fn test_partial_config_parses() {
        let config: EngineConfig = serde_json::from_str(r#"{"num_shards": 2}"#).unwrap();
        assert_eq!(config.num_shards, 2);
        assert_eq!(config.sweep_interval_ms, EngineConfig::default().sweep_interval_ms);
    }
}
