//! In-memory storage for one shard
//!
//! A single-threaded key -> [`Entry`] map with lazy expiration: every
//! access first drops the entry if its deadline has passed, so an expired
//! key is indistinguishable from an absent one. The concurrent facade in
//! `engine` wraps one `MemoryStore` per shard behind a lock.

use super::entry::Entry;
use super::value::Value;
use bytes::Bytes;
use siphasher::sip::SipHasher13;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::time::Duration;

/// Type alias for the shard map with SipHasher
type StoreMap = HashMap<Bytes, Entry, BuildHasherDefault<SipHasher13>>;

/// In-memory key-value store for a single shard
pub struct MemoryStore {
    /// The main storage map
    store: StoreMap,

    /// Cumulative count of entries removed because they expired
    expired_removed: u64,
}

impl MemoryStore {
    /// Create a new memory store with default capacity
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a new memory store with specified initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        MemoryStore {
            store: HashMap::with_capacity_and_hasher(
                capacity,
                BuildHasherDefault::<SipHasher13>::default(),
            ),
            expired_removed: 0,
        }
    }

    /// Drop the entry at `key` if it has expired, returning whether it did
    fn drop_if_expired(&mut self, key: &Bytes) -> bool {
        let expired = self
            .store
            .get(key)
            .map(|entry| entry.is_expired())
            .unwrap_or(false);

        if expired {
            self.store.remove(key);
            self.expired_removed += 1;
        }

        expired
    }

    /// Create or overwrite the entry at `key`
    ///
    /// Replaces an entry of any kind; the fresh entry carries `ttl` as its
    /// only expiration (overwriting always discards a previous deadline).
    /// Returns true if the key was newly created.
    pub fn set(&mut self, key: impl Into<Bytes>, value: Value, ttl: Option<Duration>) -> bool {
        let key = key.into();
        self.drop_if_expired(&key);

        let entry = match ttl {
            Some(ttl) => Entry::with_expiration(value, ttl),
            None => Entry::new(value),
        };

        self.store.insert(key, entry).is_none()
    }

    /// Get a value by key, `None` if not found or expired
    pub fn get(&mut self, key: &Bytes) -> Option<&Value> {
        if self.drop_if_expired(key) {
            return None;
        }
        self.store.get(key).map(|entry| &entry.value)
    }

    /// Get a mutable reference to a value by key
    pub fn get_mut(&mut self, key: &Bytes) -> Option<&mut Value> {
        if self.drop_if_expired(key) {
            return None;
        }
        self.store.get_mut(key).map(|entry| &mut entry.value)
    }

    /// Get the live value at `key`, inserting `default` if the key is absent
    ///
    /// The returned value keeps its existing kind: callers type-check it and
    /// surface a mismatch without having mutated anything.
    pub fn entry_or_insert(&mut self, key: &Bytes, default: Value) -> &mut Value {
        self.drop_if_expired(key);
        let entry = self
            .store
            .entry(key.clone())
            .or_insert_with(|| Entry::new(default));
        &mut entry.value
    }

    /// Delete a key, returns true if a live key was removed
    pub fn delete(&mut self, key: &Bytes) -> bool {
        match self.store.remove(key) {
            Some(entry) if entry.is_expired() => {
                self.expired_removed += 1;
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Check if a key exists (and is not expired)
    pub fn exists(&mut self, key: &Bytes) -> bool {
        if self.drop_if_expired(key) {
            return false;
        }
        self.store.contains_key(key)
    }

    /// Set or overwrite the expiration of a key; false if the key is absent
    pub fn expire(&mut self, key: &Bytes, ttl: Duration) -> bool {
        if self.drop_if_expired(key) {
            return false;
        }
        match self.store.get_mut(key) {
            Some(entry) => {
                entry.set_expiration(ttl);
                true
            }
            None => false,
        }
    }

    /// Remove the expiration of a key; true iff a deadline was removed
    pub fn persist(&mut self, key: &Bytes) -> bool {
        if self.drop_if_expired(key) {
            return false;
        }
        match self.store.get_mut(key) {
            Some(entry) => entry.remove_expiration(),
            None => false,
        }
    }

    /// Probe the expiration state of a key
    ///
    /// Returns:
    /// - `None`: key absent or expired
    /// - `Some(None)`: key exists with no expiration
    /// - `Some(Some(d))`: key expires in `d`
    pub fn ttl(&mut self, key: &Bytes) -> Option<Option<Duration>> {
        if self.drop_if_expired(key) {
            return None;
        }
        self.store.get(key).map(|entry| entry.remaining())
    }

    /// Remove all keys
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Number of live keys (excluding expired-but-unpurged entries)
    pub fn len(&self) -> usize {
        self.store.values().filter(|e| !e.is_expired()).count()
    }

    /// Check if the store holds no live keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all live key names (no ordering guarantee)
    pub fn keys(&self) -> Vec<Bytes> {
        self.store
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Remove every expired entry, returning how many were purged
    pub fn purge_expired(&mut self) -> usize {
        let before = self.store.len();
        self.store.retain(|_, entry| !entry.is_expired());
        let removed = before - self.store.len();
        self.expired_removed += removed as u64;
        removed
    }

    /// Approximate memory used by live entries, in bytes
    pub fn memory_usage(&self) -> usize {
        self.store
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .map(|(key, entry)| key.len() + entry.memory_usage())
            .sum()
    }

    /// Statistics about this shard
    pub fn stats(&self) -> StoreStats {
        let live_keys = self.len();
        StoreStats {
            total_keys: self.store.len(),
            live_keys,
            expired_removed: self.expired_removed,
            used_memory_bytes: self.memory_usage(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about one shard's store
#[derive(Debug, Clone, Copy)]
pub struct StoreStats {
    /// Entries in the map, including expired-but-unpurged ones
    pub total_keys: usize,
    /// Entries that are not expired
    pub live_keys: usize,
    /// Cumulative entries removed because they expired
    pub expired_removed: u64,
    /// Approximate bytes held by live entries
    pub used_memory_bytes: usize,
}
