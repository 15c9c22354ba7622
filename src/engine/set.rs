//! Set operations (sadd, smembers, scard, spop, sunion, sdiff, sinter)

use super::KvEngine;
use crate::error::{EngineError, Result};
use crate::store::Value;
use bytes::Bytes;
use std::collections::HashSet;

impl KvEngine {
    /// Add members to the set at `name`, creating the set if absent
    ///
    /// Returns how many members were newly added; duplicates among the
    /// arguments or members already present do not count. Adding no members
    /// is a no-op that reports 0.
    pub fn sadd(&self, name: impl Into<Bytes>, members: &[Bytes]) -> Result<usize> {
        let name = name.into();
        if members.is_empty() {
            return Ok(0);
        }

        self.with_shard(&name, |store| {
            let entry = store.entry_or_insert(&name, Value::empty_set());
            let kind = entry.kind();
            let set = entry
                .as_set_mut()
                .ok_or(EngineError::wrong_type("set", kind))?;

            Ok(members
                .iter()
                .filter(|member| set.insert((*member).clone()))
                .count())
        })
    }

    /// Read every member of the set at `name`; empty set if absent
    pub fn smembers(&self, name: &Bytes) -> Result<HashSet<Bytes>> {
        self.with_shard(name, |store| match store.get(name) {
            Some(value) => {
                let set = value
                    .as_set()
                    .ok_or(EngineError::wrong_type("set", value.kind()))?;
                Ok(set.clone())
            }
            None => Ok(HashSet::new()),
        })
    }

    /// Number of members in the set at `name`; 0 if absent
    pub fn scard(&self, name: &Bytes) -> Result<usize> {
        self.with_shard(name, |store| match store.get(name) {
            Some(value) => {
                let set = value
                    .as_set()
                    .ok_or(EngineError::wrong_type("set", value.kind()))?;
                Ok(set.len())
            }
            None => Ok(0),
        })
    }

    /// Remove and return one arbitrarily-chosen member of the set at `name`
    ///
    /// `None` if the set is absent. Removing the last member deletes the
    /// key.
    pub fn spop(&self, name: &Bytes) -> Result<Option<Bytes>> {
        self.with_shard(name, |store| {
            let popped = match store.get_mut(name) {
                Some(value) => {
                    let kind = value.kind();
                    let set = value
                        .as_set_mut()
                        .ok_or(EngineError::wrong_type("set", kind))?;

                    match set.iter().next().cloned() {
                        Some(member) => {
                            set.remove(&member);
                            Some((member, set.is_empty()))
                        }
                        None => None,
                    }
                }
                None => None,
            };

            Ok(match popped {
                Some((member, emptied)) => {
                    if emptied {
                        store.delete(name);
                    }
                    Some(member)
                }
                None => None,
            })
        })
    }

    /// Union of the members of all named sets
    ///
    /// Absent names contribute nothing; a non-set name is a `WrongType`
    /// error.
    pub fn sunion(&self, names: &[Bytes]) -> Result<HashSet<Bytes>> {
        let mut result = HashSet::new();
        for name in names {
            result.extend(self.smembers(name)?);
        }
        Ok(result)
    }

    /// Members of the first named set absent from every subsequent one
    pub fn sdiff(&self, names: &[Bytes]) -> Result<HashSet<Bytes>> {
        let Some((first, rest)) = names.split_first() else {
            return Ok(HashSet::new());
        };

        let mut result = self.smembers(first)?;
        for name in rest {
            for member in self.smembers(name)? {
                result.remove(&member);
            }
        }
        Ok(result)
    }

    /// Members present in every named set; empty if any name is absent
    pub fn sinter(&self, names: &[Bytes]) -> Result<HashSet<Bytes>> {
        let Some((first, rest)) = names.split_first() else {
            return Ok(HashSet::new());
        };

        let mut result = self.smembers(first)?;
        for name in rest {
            let members = self.smembers(name)?;
            result.retain(|member| members.contains(member));
        }
        Ok(result)
    }
}
