//! Value types for the key-value engine

use bytes::Bytes;
use std::collections::{HashMap, HashSet, VecDeque};

/// Represents the different kinds of values that can be stored
///
/// `String` and `Integer` are both the scalar kind: `Integer` is a fast
/// path for counters and renders as its decimal text wherever a scalar is
/// read back. The kind of a key is fixed at creation and enforced on every
/// subsequent operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Scalar value (binary-safe)
    String(Bytes),

    /// Scalar counter fast path
    Integer(i64),

    /// List of values (ordered, push/pop at both ends)
    List(VecDeque<Bytes>),

    /// Set of unique values (unordered)
    Set(HashSet<Bytes>),

    /// Hash map (field -> value)
    Hash(HashMap<Bytes, Bytes>),
}

impl Value {
    /// Create a string value
    pub fn string(bytes: impl Into<Bytes>) -> Self {
        Value::String(bytes.into())
    }

    /// Create an integer value
    pub fn integer(i: i64) -> Self {
        Value::Integer(i)
    }

    /// Create an empty list
    pub fn empty_list() -> Self {
        Value::List(VecDeque::new())
    }

    /// Create an empty set
    pub fn empty_set() -> Self {
        Value::Set(HashSet::new())
    }

    /// Create an empty hash
    pub fn empty_hash() -> Self {
        Value::Hash(HashMap::new())
    }

    /// Logical kind used for type enforcement and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) | Value::Integer(_) => "string",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Hash(_) => "hash",
        }
    }

    /// Render the scalar content, if this is a scalar
    pub fn as_scalar(&self) -> Option<Bytes> {
        match self {
            Value::String(b) => Some(b.clone()),
            Value::Integer(i) => Some(Bytes::from(i.to_string())),
            _ => None,
        }
    }

    /// Try to get as mutable list
    pub fn as_list_mut(&mut self) -> Option<&mut VecDeque<Bytes>> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Try to get as mutable set
    pub fn as_set_mut(&mut self) -> Option<&mut HashSet<Bytes>> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Try to get as mutable hash
    pub fn as_hash_mut(&mut self) -> Option<&mut HashMap<Bytes, Bytes>> {
        match self {
            Value::Hash(hash) => Some(hash),
            _ => None,
        }
    }

    /// Try to get as list reference
    pub fn as_list(&self) -> Option<&VecDeque<Bytes>> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Try to get as set reference
    pub fn as_set(&self) -> Option<&HashSet<Bytes>> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Try to get as hash reference
    pub fn as_hash(&self) -> Option<&HashMap<Bytes, Bytes>> {
        match self {
            Value::Hash(hash) => Some(hash),
            _ => None,
        }
    }

    /// Calculate approximate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        match self {
            Value::String(bytes) => bytes.len(),
            Value::Integer(_) => std::mem::size_of::<i64>(),
            Value::List(list) => {
                let items_size: usize = list.iter().map(|b| b.len()).sum();
                items_size + std::mem::size_of::<VecDeque<Bytes>>()
            }
            Value::Set(set) => {
                let items_size: usize = set.iter().map(|b| b.len()).sum();
                items_size + std::mem::size_of::<HashSet<Bytes>>()
            }
            Value::Hash(hash) => {
                let items_size: usize = hash.iter().map(|(k, v)| k.len() + v.len()).sum();
                items_size + std::mem::size_of::<HashMap<Bytes, Bytes>>()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_kinds_share_a_name() {
        assert_eq!(Value::string("abc").kind(), "string");
        assert_eq!(Value::integer(42).kind(), "string");
        assert_eq!(Value::empty_list().kind(), "list");
        assert_eq!(Value::empty_set().kind(), "set");
        assert_eq!(Value::empty_hash().kind(), "hash");
    }

    #[test]
    fn integer_renders_as_text() {
        assert_eq!(Value::integer(17).as_scalar(), Some(Bytes::from("17")));
        assert_eq!(Value::string("x").as_scalar(), Some(Bytes::from("x")));
        assert_eq!(Value::empty_list().as_scalar(), None);
    }

    #[test]
    fn accessors_reject_other_kinds() {
        let mut v = Value::empty_set();
        assert!(v.as_set_mut().is_some());
        assert!(v.as_list_mut().is_none());
        assert!(v.as_hash().is_none());
    }
}
