//! Expiration operations (ttl, expire, persist)

use super::KvEngine;
use bytes::Bytes;
use std::time::Duration;

/// Three-way result of a TTL probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Remaining whole seconds before the key expires
    Remaining(u64),

    /// Key exists and has no expiration set
    Persistent,

    /// Key does not exist (or has expired)
    Absent,
}

impl KvEngine {
    /// Probe the expiration state of a key
    pub fn ttl(&self, key: &Bytes) -> Ttl {
        self.with_shard(key, |store| match store.ttl(key) {
            Some(Some(remaining)) => Ttl::Remaining(remaining.as_secs()),
            Some(None) => Ttl::Persistent,
            None => Ttl::Absent,
        })
    }

    /// Set or overwrite the expiration of an existing key, in seconds
    ///
    /// Returns false (no-op) if the key is absent. `seconds == 0` makes the
    /// key expire immediately.
    pub fn expire(&self, key: &Bytes, seconds: u64) -> bool {
        self.with_shard(key, |store| {
            store.expire(key, Duration::from_secs(seconds))
        })
    }

    /// Remove the expiration of a key
    ///
    /// Returns true iff a deadline was actually removed; false if the key
    /// is absent or already persistent.
    pub fn persist(&self, key: &Bytes) -> bool {
        self.with_shard(key, |store| store.persist(key))
    }
}
