//! Key routing logic for sharding
//!
//! Routes keys to shards by hashing with SipHash13.

use bytes::Bytes;
use siphasher::sip::SipHasher13;
use std::hash::{Hash, Hasher};

/// Routes keys to shards using consistent hashing
pub struct ShardRouter {
    num_shards: usize,
}

impl ShardRouter {
    /// Create a new shard router
    pub fn new(num_shards: usize) -> Self {
        assert!(num_shards > 0, "Number of shards must be > 0");
        ShardRouter { num_shards }
    }

    /// Route a key to a shard index
    ///
    /// Uses SipHash13 for fast hashing with good distribution, so keys
    /// spread evenly across shards.
    pub fn route(&self, key: &Bytes) -> usize {
        let mut hasher = SipHasher13::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.num_shards
    }

    /// Get the number of shards
    pub fn num_shards(&self) -> usize {
        self.num_shards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_deterministic() {
        let router = ShardRouter::new(4);
        let key = Bytes::from("test_key");

        assert_eq!(router.route(&key), router.route(&key));
    }

    #[test]
    fn test_routing_distribution() {
        let router = ShardRouter::new(4);
        let mut shard_counts = vec![0; 4];

        for i in 0..1000 {
            let key = Bytes::from(format!("key_{}", i));
            shard_counts[router.route(&key)] += 1;
        }

        // Each shard should get roughly 250 keys (±50 for variance)
        for count in shard_counts {
            assert!(count > 200 && count < 300, "Uneven distribution: {}", count);
        }
    }

    #[test]
    fn test_single_shard() {
        let router = ShardRouter::new(1);
        assert_eq!(router.route(&Bytes::from("any_key")), 0);
    }
}
