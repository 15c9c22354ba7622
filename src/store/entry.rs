//! Entry structure binding a value to its expiration

use super::value::Value;
use std::time::{Duration, Instant};

/// Represents a single entry in the store
#[derive(Debug, Clone)]
pub struct Entry {
    /// The value
    pub value: Value,

    /// Optional expiration time (absolute, monotonic clock)
    pub expire_at: Option<Instant>,
}

impl Entry {
    /// Create a new entry without expiration
    pub fn new(value: Value) -> Self {
        Entry {
            value,
            expire_at: None,
        }
    }

    /// Create a new entry with expiration
    pub fn with_expiration(value: Value, ttl: Duration) -> Self {
        Entry {
            value,
            expire_at: Some(Instant::now() + ttl),
        }
    }

    /// Check if the entry has expired
    pub fn is_expired(&self) -> bool {
        match self.expire_at {
            Some(expire_at) => Instant::now() >= expire_at,
            None => false,
        }
    }

    /// Set or overwrite the expiration time
    pub fn set_expiration(&mut self, ttl: Duration) {
        self.expire_at = Some(Instant::now() + ttl);
    }

    /// Remove the expiration, returning true iff one was set
    pub fn remove_expiration(&mut self) -> bool {
        self.expire_at.take().is_some()
    }

    /// Remaining time before expiry; `None` means the entry is persistent
    pub fn remaining(&self) -> Option<Duration> {
        self.expire_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Calculate approximate memory usage of this entry in bytes
    pub fn memory_usage(&self) -> usize {
        self.value.memory_usage() + std::mem::size_of::<Option<Instant>>()
    }
}
