//! Error types for engine operations

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced by engine operations
///
/// Absence is never an error: reads of missing keys return `None` or an
/// empty collection. These variants cover the cases a caller must handle
/// explicitly, and none of them leaves a half-applied mutation behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Operation against a key holding the wrong kind of value
    #[error("WRONGTYPE expected a {expected} value, key holds a {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    /// Arithmetic on scalar content that does not parse as an integer,
    /// or whose result does not fit in an i64
    #[error("value is not an integer or out of range")]
    NotANumber,

    /// Malformed caller input, e.g. both TTL forms supplied at once
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl EngineError {
    /// Shorthand used by the typed accessors in the operation modules
    pub(crate) fn wrong_type(expected: &'static str, found: &'static str) -> Self {
        EngineError::WrongType { expected, found }
    }
}
