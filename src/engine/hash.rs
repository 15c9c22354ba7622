//! Hash operations (hset, hget, hgetall, hdel, hkeys)

use super::KvEngine;
use crate::error::{EngineError, Result};
use crate::store::Value;
use bytes::Bytes;
use std::collections::HashMap;

impl KvEngine {
    /// Set `field` in the hash at `name`, creating the hash if absent
    ///
    /// Returns true if the field was newly created, false if it overwrote
    /// an existing field.
    pub fn hset(
        &self,
        name: impl Into<Bytes>,
        field: impl Into<Bytes>,
        value: impl Into<Bytes>,
    ) -> Result<bool> {
        let name = name.into();
        let field = field.into();
        let value = value.into();
        self.with_shard(&name, |store| {
            let entry = store.entry_or_insert(&name, Value::empty_hash());
            let kind = entry.kind();
            let hash = entry
                .as_hash_mut()
                .ok_or(EngineError::wrong_type("hash", kind))?;

            Ok(hash.insert(field, value).is_none())
        })
    }

    /// Read one field of the hash at `name`; `None` if the hash or the
    /// field is absent
    pub fn hget(&self, name: &Bytes, field: &Bytes) -> Result<Option<Bytes>> {
        self.with_shard(name, |store| match store.get(name) {
            Some(value) => {
                let hash = value
                    .as_hash()
                    .ok_or(EngineError::wrong_type("hash", value.kind()))?;
                Ok(hash.get(field).cloned())
            }
            None => Ok(None),
        })
    }

    /// Read every field of the hash at `name`; empty map if absent
    pub fn hgetall(&self, name: &Bytes) -> Result<HashMap<Bytes, Bytes>> {
        self.with_shard(name, |store| match store.get(name) {
            Some(value) => {
                let hash = value
                    .as_hash()
                    .ok_or(EngineError::wrong_type("hash", value.kind()))?;
                Ok(hash.clone())
            }
            None => Ok(HashMap::new()),
        })
    }

    /// Delete fields from the hash at `name`, returning how many were
    /// actually removed
    ///
    /// Removing the last field does not delete the key: an empty hash entry
    /// stays behind until deleted or expired. Sets and lists behave
    /// differently (they auto-delete on emptying); the asymmetry matches
    /// the source store.
    pub fn hdel(&self, name: &Bytes, fields: &[Bytes]) -> Result<usize> {
        self.with_shard(name, |store| match store.get_mut(name) {
            Some(value) => {
                let kind = value.kind();
                let hash = value
                    .as_hash_mut()
                    .ok_or(EngineError::wrong_type("hash", kind))?;

                Ok(fields
                    .iter()
                    .filter(|field| hash.remove(*field).is_some())
                    .count())
            }
            None => Ok(0),
        })
    }

    /// Field names of the hash at `name`; empty if absent
    pub fn hkeys(&self, name: &Bytes) -> Result<Vec<Bytes>> {
        self.with_shard(name, |store| match store.get(name) {
            Some(value) => {
                let hash = value
                    .as_hash()
                    .ok_or(EngineError::wrong_type("hash", value.kind()))?;
                Ok(hash.keys().cloned().collect())
            }
            None => Ok(Vec::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hset_hget() {
        let engine = KvEngine::new();
        let name = Bytes::from("myhash");

        assert!(engine.hset(name.clone(), "field1", "value1").unwrap());
        assert_eq!(
            engine.hget(&name, &Bytes::from("field1")).unwrap(),
            Some(Bytes::from("value1"))
        );
        assert_eq!(engine.hget(&name, &Bytes::from("nonexistent")).unwrap(), None);
    }

    #[test]
    fn test_hset_overwrite_reports_false() {
        let engine = KvEngine::new();
        let name = Bytes::from("myhash");

        assert!(engine.hset(name.clone(), "field1", "v1").unwrap());
        assert!(!engine.hset(name.clone(), "field1", "v2").unwrap());
        assert_eq!(
            engine.hget(&name, &Bytes::from("field1")).unwrap(),
            Some(Bytes::from("v2"))
        );
    }

    #[test]
    fn test_hgetall() {
        let engine = KvEngine::new();
        let name = Bytes::from("myhash");
        engine.hset(name.clone(), "field1", "value1").unwrap();
        engine.hset(name.clone(), "field2", "value2").unwrap();

        let all = engine.hgetall(&name).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.get(&Bytes::from("field1")), Some(&Bytes::from("value1")));

        // Absent hash reads as an empty mapping, not an error
        assert!(engine.hgetall(&Bytes::from("nonexistent")).unwrap().is_empty());
    }

    #[test]
    fn test_hdel() {
        let engine = KvEngine::new();
        let name = Bytes::from("myhash");
        engine.hset(name.clone(), "field1", "value1").unwrap();
        engine.hset(name.clone(), "field2", "value2").unwrap();

        let fields = vec![Bytes::from("field1")];
        assert_eq!(engine.hdel(&name, &fields).unwrap(), 1);
        assert_eq!(engine.hdel(&name, &fields).unwrap(), 0);
        assert_eq!(engine.hdel(&Bytes::from("nonexistent"), &fields).unwrap(), 0);
    }

    #[test]
    fn test_hdel_last_field_keeps_the_key() {
        let engine = KvEngine::new();
        let name = Bytes::from("myhash");
        engine.hset(name.clone(), "field1", "value1").unwrap();

        assert_eq!(engine.hdel(&name, &[Bytes::from("field1")]).unwrap(), 1);

        // The key survives with an empty hash
        assert!(engine.exists(&name));
        assert!(engine.hgetall(&name).unwrap().is_empty());
    }

    #[test]
    fn test_hkeys() {
        let engine = KvEngine::new();
        let name = Bytes::from("myhash");
        engine.hset(name.clone(), "field1", "v").unwrap();
        engine.hset(name.clone(), "field2", "v").unwrap();

        let mut keys = engine.hkeys(&name).unwrap();
        keys.sort();
        assert_eq!(keys, vec![Bytes::from("field1"), Bytes::from("field2")]);
    }

    #[test]
    fn test_hash_ops_reject_scalar_key() {
        let engine = KvEngine::new();
        let name = Bytes::from("scalar");
        engine.set(name.clone(), "value");

        assert!(matches!(
            engine.hset(name.clone(), "f", "v"),
            Err(EngineError::WrongType { .. })
        ));
        assert!(matches!(
            engine.hget(&name, &Bytes::from("f")),
            Err(EngineError::WrongType { .. })
        ));
        assert!(matches!(
            engine.hgetall(&name),
            Err(EngineError::WrongType { .. })
        ));
        assert!(matches!(
            engine.hdel(&name, &[Bytes::from("f")]),
            Err(EngineError::WrongType { .. })
        ));

        // The failed writes must not have replaced the scalar
        assert_eq!(engine.get(&name).unwrap(), Some(Bytes::from("value")));
    }
}
