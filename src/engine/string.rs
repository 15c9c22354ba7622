//! Scalar operations (set, get, getset, counters)

use super::KvEngine;
use crate::error::{EngineError, Result};
use crate::store::Value;
use bytes::Bytes;
use std::time::Duration;

impl KvEngine {
    /// Create or overwrite `key` with a persistent scalar value
    ///
    /// This is the one operation allowed to change a key's kind: it always
    /// produces a scalar, replacing an entry of any kind.
    pub fn set(&self, key: impl Into<Bytes>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();
        self.with_shard(&key, |store| {
            store.set(key.clone(), Value::String(value), None);
        });
    }

    /// Create or overwrite `key` with a scalar value and optional expiration
    ///
    /// At most one of `ttl_secs` and `ttl_millis` may be given; both at once
    /// is an `InvalidArgument`. Neither means the entry persists until
    /// deleted.
    pub fn set_with_ttl(
        &self,
        key: impl Into<Bytes>,
        value: impl Into<Bytes>,
        ttl_secs: Option<u64>,
        ttl_millis: Option<u64>,
    ) -> Result<()> {
        let ttl = match (ttl_secs, ttl_millis) {
            (Some(_), Some(_)) => {
                return Err(EngineError::InvalidArgument(
                    "at most one of ttl_secs and ttl_millis may be given".to_string(),
                ))
            }
            (Some(secs), None) => Some(Duration::from_secs(secs)),
            (None, Some(millis)) => Some(Duration::from_millis(millis)),
            (None, None) => None,
        };

        let key = key.into();
        let value = value.into();
        self.with_shard(&key, |store| {
            store.set(key.clone(), Value::String(value), ttl);
        });
        Ok(())
    }

    /// Read the scalar at `key`; `None` when absent or expired
    pub fn get(&self, key: &Bytes) -> Result<Option<Bytes>> {
        self.with_shard(key, |store| match store.get(key) {
            Some(value) => match value.as_scalar() {
                Some(bytes) => Ok(Some(bytes)),
                None => Err(EngineError::wrong_type("string", value.kind())),
            },
            None => Ok(None),
        })
    }

    /// Atomically replace the scalar at `key`, returning the previous value
    ///
    /// The read and the write happen as one step under the shard lock; no
    /// other operation can observe the key in between. The replacement
    /// entry is persistent (a previously set TTL is discarded).
    pub fn get_set(&self, key: &Bytes, value: impl Into<Bytes>) -> Result<Option<Bytes>> {
        let value = value.into();
        self.with_shard(key, |store| {
            let previous = match store.get(key) {
                Some(current) => match current.as_scalar() {
                    Some(bytes) => Some(bytes),
                    None => return Err(EngineError::wrong_type("string", current.kind())),
                },
                None => None,
            };

            store.set(key.clone(), Value::String(value), None);
            Ok(previous)
        })
    }

    /// Increment the integer at `key` by 1
    pub fn incr(&self, key: &Bytes) -> Result<i64> {
        self.incr_by(key, 1)
    }

    /// Increment the integer at `key` by `delta`
    ///
    /// An absent key is initialized to 0 before incrementing. The key's
    /// expiration, if any, is preserved. Fails with `WrongType` on a
    /// non-scalar key and `NotANumber` on content that does not parse as an
    /// integer.
    pub fn incr_by(&self, key: &Bytes, delta: i64) -> Result<i64> {
        self.with_shard(key, |store| {
            let new_value = match store.get_mut(key) {
                Some(value) => match value {
                    Value::Integer(i) => {
                        *i = i.checked_add(delta).ok_or(EngineError::NotANumber)?;
                        *i
                    }
                    Value::String(bytes) => {
                        let s =
                            std::str::from_utf8(bytes).map_err(|_| EngineError::NotANumber)?;
                        let current = s.parse::<i64>().map_err(|_| EngineError::NotANumber)?;
                        let next = current.checked_add(delta).ok_or(EngineError::NotANumber)?;
                        *value = Value::Integer(next);
                        next
                    }
                    other => return Err(EngineError::wrong_type("string", other.kind())),
                },
                None => {
                    store.set(key.clone(), Value::Integer(delta), None);
                    delta
                }
            };

            Ok(new_value)
        })
    }

    /// Decrement the integer at `key` by 1
    pub fn decr(&self, key: &Bytes) -> Result<i64> {
        self.decr_by(key, 1)
    }

    /// Decrement the integer at `key` by `delta`
    pub fn decr_by(&self, key: &Bytes, delta: i64) -> Result<i64> {
        self.incr_by(key, delta.checked_neg().ok_or(EngineError::NotANumber)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Ttl;

    #[test]
    fn test_set_get() {
        let engine = KvEngine::new();
        engine.set("mykey", "myvalue");

        assert_eq!(
            engine.get(&Bytes::from("mykey")).unwrap(),
            Some(Bytes::from("myvalue"))
        );
    }

    #[test]
    fn test_get_nonexistent() {
        let engine = KvEngine::new();
        assert_eq!(engine.get(&Bytes::from("nonexistent")).unwrap(), None);
    }

    #[test]
    fn test_set_replaces_any_kind() {
        let engine = KvEngine::new();
        engine.sadd("key", &[Bytes::from("a")]).unwrap();

        engine.set("key", "scalar now");
        assert_eq!(
            engine.get(&Bytes::from("key")).unwrap(),
            Some(Bytes::from("scalar now"))
        );
    }

    #[test]
    fn test_set_with_ttl_rejects_both_forms() {
        let engine = KvEngine::new();
        let result = engine.set_with_ttl("key", "value", Some(10), Some(10_000));
        assert!(matches!(result, Err(EngineError::InvalidArgument(_))));
        assert_eq!(engine.get(&Bytes::from("key")).unwrap(), None);
    }

    #[test]
    fn test_incr_initializes_absent_key() {
        let engine = KvEngine::new();
        let key = Bytes::from("counter");

        assert_eq!(engine.incr(&key).unwrap(), 1);
        assert_eq!(engine.incr(&key).unwrap(), 2);
        assert_eq!(engine.get(&key).unwrap(), Some(Bytes::from("2")));
    }

    #[test]
    fn test_incr_by_parses_stored_text() {
        let engine = KvEngine::new();
        let key = Bytes::from("counter");
        engine.set(key.clone(), "10");

        assert_eq!(engine.incr_by(&key, 5).unwrap(), 15);
    }

    #[test]
    fn test_incr_non_numeric() {
        let engine = KvEngine::new();
        let key = Bytes::from("text");
        engine.set(key.clone(), "hello");

        assert_eq!(engine.incr(&key), Err(EngineError::NotANumber));
        // The failed increment must not have mutated the value
        assert_eq!(engine.get(&key).unwrap(), Some(Bytes::from("hello")));
    }

    #[test]
    fn test_incr_wrong_kind() {
        let engine = KvEngine::new();
        let key = Bytes::from("mylist");
        engine.lpush(key.clone(), &[Bytes::from("a")]).unwrap();

        assert!(matches!(
            engine.incr(&key),
            Err(EngineError::WrongType { .. })
        ));
    }

    #[test]
    fn test_incr_preserves_ttl() {
        let engine = KvEngine::new();
        let key = Bytes::from("counter");
        engine
            .set_with_ttl(key.clone(), "1", Some(100), None)
            .unwrap();

        engine.incr(&key).unwrap();
        assert!(matches!(engine.ttl(&key), Ttl::Remaining(_)));
    }

    #[test]
    fn test_decr() {
        let engine = KvEngine::new();
        let key = Bytes::from("counter");

        assert_eq!(engine.decr(&key).unwrap(), -1);
        assert_eq!(engine.decr_by(&key, 4).unwrap(), -5);
    }

    #[test]
    fn test_get_set() {
        let engine = KvEngine::new();
        let key = Bytes::from("mykey");

        // Absent key: no previous value, new one installed
        assert_eq!(engine.get_set(&key, "first").unwrap(), None);
        assert_eq!(
            engine.get_set(&key, "second").unwrap(),
            Some(Bytes::from("first"))
        );
        assert_eq!(engine.get(&key).unwrap(), Some(Bytes::from("second")));
    }

    #[test]
    fn test_get_set_discards_ttl() {
        let engine = KvEngine::new();
        let key = Bytes::from("mykey");
        engine
            .set_with_ttl(key.clone(), "old", Some(100), None)
            .unwrap();

        engine.get_set(&key, "new").unwrap();
        assert_eq!(engine.ttl(&key), Ttl::Persistent);
    }

    #[test]
    fn test_get_set_wrong_kind() {
        let engine = KvEngine::new();
        let key = Bytes::from("myhash");
        engine.hset(key.clone(), "f", "v").unwrap();

        assert!(matches!(
            engine.get_set(&key, "value"),
            Err(EngineError::WrongType { .. })
        ));
        // The hash must be untouched
        assert_eq!(
            engine.hget(&key, &Bytes::from("f")).unwrap(),
            Some(Bytes::from("v"))
        );
    }
}
