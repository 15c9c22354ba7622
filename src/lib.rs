//! forgekv - an in-process, multi-type key-value engine
//!
//! forgekv stores four kinds of values (scalar, hash, set, list) under a
//! single key space with optional per-key expiration. It is a library
//! surface, not a server: callers construct a [`KvEngine`], share it
//! (typically behind an `Arc`), and call its operations synchronously.
//!
//! The crate is designed with strong cohesion and loose coupling:
//! - `store` owns one shard's data structures and knows nothing about
//!   concurrency
//! - `engine` owns routing, locking, and the per-family operation contract
//! - `sweeper` proactively purges expired entries in the background

pub mod config;
pub mod engine;
pub mod error;
pub mod store;
pub mod sweeper;

/// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::{EngineStats, KvEngine, Ttl};
pub use error::{EngineError, Result};
pub use store::{MemoryStore, Value};
pub use sweeper::Sweeper;
