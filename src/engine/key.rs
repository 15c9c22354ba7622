//! Key registry operations (del, exists)

use super::KvEngine;
use bytes::Bytes;

impl KvEngine {
    /// Delete a key of any kind; true if a live key was removed
    pub fn del(&self, key: &Bytes) -> bool {
        self.with_shard(key, |store| store.delete(key))
    }

    /// Delete several keys, returning how many were actually removed
    pub fn del_many(&self, keys: &[Bytes]) -> usize {
        keys.iter().filter(|key| self.del(key)).count()
    }

    /// Check if a key exists (and is not expired)
    pub fn exists(&self, key: &Bytes) -> bool {
        self.with_shard(key, |store| store.exists(key))
    }
}
