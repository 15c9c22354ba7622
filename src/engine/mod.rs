//! The concurrent engine facade
//!
//! [`KvEngine`] splits the key space across N shards, each a
//! [`MemoryStore`] behind its own mutex, with SipHash routing deciding the
//! owning shard. Every single-key operation runs entirely under one shard
//! lock, which gives it command-level atomicity; operations on keys in
//! different shards proceed in parallel.
//!
//! The operation families live in sibling modules (`string`, `key`, `ttl`,
//! `hash`, `set`, `list`), each an `impl KvEngine` block.

mod hash;
mod key;
mod list;
mod router;
mod set;
mod string;
mod ttl;

pub use router::ShardRouter;
pub use ttl::Ttl;

use crate::config::EngineConfig;
use crate::store::MemoryStore;
use bytes::Bytes;
use std::sync::Mutex;
use tracing::info;

/// The in-process key-value engine
///
/// Construct one instance and share it; all operations take `&self`.
pub struct KvEngine {
    /// One store per shard, each behind its own lock
    shards: Vec<Mutex<MemoryStore>>,

    /// Key -> shard routing
    router: ShardRouter,
}

impl KvEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine from an explicit configuration
    pub fn with_config(config: EngineConfig) -> Self {
        let num_shards = config.num_shards.max(1);
        let shards = (0..num_shards)
            .map(|_| Mutex::new(MemoryStore::with_capacity(config.initial_capacity)))
            .collect();

        info!(shards = num_shards, "engine initialized");

        KvEngine {
            shards,
            router: ShardRouter::new(num_shards),
        }
    }

    /// Run `f` under the lock of the shard owning `key`
    pub(crate) fn with_shard<R>(&self, key: &Bytes, f: impl FnOnce(&mut MemoryStore) -> R) -> R {
        let idx = self.router.route(key);
        let mut store = self.shards[idx].lock().unwrap();
        f(&mut store)
    }

    /// Snapshot of every live key name, taken one shard at a time
    ///
    /// No ordering guarantee; a concurrent writer may appear in one shard's
    /// snapshot and not another's.
    pub fn keys(&self) -> Vec<Bytes> {
        let mut all = Vec::new();
        for shard in &self.shards {
            all.extend(shard.lock().unwrap().keys());
        }
        all
    }

    /// Unconditionally clear every key; always succeeds
    pub fn flush_all(&self) {
        for shard in &self.shards {
            shard.lock().unwrap().clear();
        }
        info!("all keys flushed");
    }

    /// Remove every expired entry across all shards
    pub fn purge_expired(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.lock().unwrap().purge_expired())
            .sum()
    }

    /// Number of live keys across all shards
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.lock().unwrap().len())
            .sum()
    }

    /// Check if the engine holds no live keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of shards the key space is split across
    pub fn num_shards(&self) -> usize {
        self.shards.len()
    }

    /// Aggregated statistics across all shards
    pub fn stats(&self) -> EngineStats {
        let mut stats = EngineStats::default();
        for shard in &self.shards {
            let s = shard.lock().unwrap().stats();
            stats.total_keys += s.total_keys;
            stats.live_keys += s.live_keys;
            stats.expired_removed += s.expired_removed;
            stats.used_memory_bytes += s.used_memory_bytes;
        }
        stats
    }
}

impl Default for KvEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregated statistics about the engine
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineStats {
    /// Entries across all shards, including expired-but-unpurged ones
    pub total_keys: usize,
    /// Entries that are not expired
    pub live_keys: usize,
    /// Cumulative entries removed because they expired
    pub expired_removed: u64,
    /// Approximate bytes held by live entries
    pub used_memory_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn small_engine() -> KvEngine {
        KvEngine::with_config(EngineConfig {
            num_shards: 4,
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_keys_span_shards() {
        let engine = small_engine();
        for i in 0..100 {
            engine.set(format!("key-{}", i), "value");
        }

        assert_eq!(engine.len(), 100);
        assert_eq!(engine.keys().len(), 100);
    }

    #[test]
    fn test_flush_all() {
        let engine = small_engine();
        engine.set("a", "1");
        engine.set("b", "2");

        engine.flush_all();

        assert!(engine.is_empty());
        assert!(engine.keys().is_empty());
    }

    #[test]
    fn test_concurrent_writes_do_not_interfere() {
        let engine = Arc::new(small_engine());
        let mut handles = vec![];

        for i in 0..8 {
            let engine = Arc::clone(&engine);
            handles.push(thread::spawn(move || {
                for j in 0..100 {
                    let key = Bytes::from(format!("key-{}-{}", i, j));
                    engine.set(key.clone(), "value");
                    assert!(engine.get(&key).unwrap().is_some());
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(engine.len(), 800);
    }

    #[test]
    fn test_concurrent_incr_loses_no_updates() {
        let engine = Arc::new(small_engine());
        let key = Bytes::from("counter");
        let mut handles = vec![];

        for _ in 0..8 {
            let engine = Arc::clone(&engine);
            let key = key.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..250 {
                    engine.incr(&key).unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(engine.get(&key).unwrap(), Some(Bytes::from("2000")));
    }

    #[test]
    fn test_stats_aggregate() {
        let engine = small_engine();
        engine.set("a", "1");
        engine.set("b", "2");

        let stats = engine.stats();
        assert_eq!(stats.live_keys, 2);
        assert!(stats.used_memory_bytes > 0);
    }
}
