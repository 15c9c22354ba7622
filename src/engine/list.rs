//! List operations (lpush, rpush, lrange, llen, lpop, rpop)

use super::KvEngine;
use crate::error::{EngineError, Result};
use crate::store::Value;
use bytes::Bytes;
use std::collections::VecDeque;

impl KvEngine {
    /// Insert values at the head of the list at `name`, creating it if
    /// absent; returns the new length
    ///
    /// Values are inserted sequentially, so the last argument ends up at
    /// the very head: pushing `[a, b]` yields head order `[b, a]`.
    pub fn lpush(&self, name: impl Into<Bytes>, values: &[Bytes]) -> Result<usize> {
        let name = name.into();
        if values.is_empty() {
            return self.llen(&name);
        }

        self.with_shard(&name, |store| {
            let list = Self::list_for_push(store, &name)?;
            for value in values {
                list.push_front(value.clone());
            }
            Ok(list.len())
        })
    }

    /// Append values at the tail of the list at `name`, creating it if
    /// absent; returns the new length
    pub fn rpush(&self, name: impl Into<Bytes>, values: &[Bytes]) -> Result<usize> {
        let name = name.into();
        if values.is_empty() {
            return self.llen(&name);
        }

        self.with_shard(&name, |store| {
            let list = Self::list_for_push(store, &name)?;
            for value in values {
                list.push_back(value.clone());
            }
            Ok(list.len())
        })
    }

    fn list_for_push<'a>(
        store: &'a mut crate::store::MemoryStore,
        name: &Bytes,
    ) -> Result<&'a mut VecDeque<Bytes>> {
        let entry = store.entry_or_insert(name, Value::empty_list());
        let kind = entry.kind();
        entry
            .as_list_mut()
            .ok_or(EngineError::wrong_type("list", kind))
    }

    /// Read an inclusive range of the list at `name`
    ///
    /// Negative indices count from the tail (-1 is the last element).
    /// Returns an empty sequence when the name is absent or the resolved
    /// range is empty or inverted.
    pub fn lrange(&self, name: &Bytes, start: i64, stop: i64) -> Result<Vec<Bytes>> {
        self.with_shard(name, |store| {
            let list = match store.get(name) {
                Some(value) => value
                    .as_list()
                    .ok_or(EngineError::wrong_type("list", value.kind()))?,
                None => return Ok(Vec::new()),
            };

            let len = list.len() as i64;
            let start = if start < 0 { (len + start).max(0) } else { start };
            let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

            if start >= len || stop < 0 || start > stop {
                return Ok(Vec::new());
            }

            Ok(list
                .iter()
                .skip(start as usize)
                .take((stop - start + 1) as usize)
                .cloned()
                .collect())
        })
    }

    /// Length of the list at `name`; 0 if absent
    pub fn llen(&self, name: &Bytes) -> Result<usize> {
        self.with_shard(name, |store| match store.get(name) {
            Some(value) => {
                let list = value
                    .as_list()
                    .ok_or(EngineError::wrong_type("list", value.kind()))?;
                Ok(list.len())
            }
            None => Ok(0),
        })
    }

    /// Remove and return the head of the list at `name`
    ///
    /// `None` if absent. Popping the last element deletes the key.
    pub fn lpop(&self, name: &Bytes) -> Result<Option<Bytes>> {
        self.pop(name, true)
    }

    /// Remove and return the tail of the list at `name`
    pub fn rpop(&self, name: &Bytes) -> Result<Option<Bytes>> {
        self.pop(name, false)
    }

    fn pop(&self, name: &Bytes, from_head: bool) -> Result<Option<Bytes>> {
        self.with_shard(name, |store| {
            let popped = match store.get_mut(name) {
                Some(value) => {
                    let kind = value.kind();
                    let list = value
                        .as_list_mut()
                        .ok_or(EngineError::wrong_type("list", kind))?;

                    let popped = if from_head {
                        list.pop_front()
                    } else {
                        list.pop_back()
                    };
                    popped.map(|value| (value, list.is_empty()))
                }
                None => None,
            };

            Ok(match popped {
                Some((value, emptied)) => {
                    if emptied {
                        store.delete(name);
                    }
                    Some(value)
                }
                None => None,
            })
        })
    }
}
