//! Lookup keys
//!
//! A [`Key`] addresses one slot of a persistent collection: an index into a
//! list or a name in a map.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Key into a persistent collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    /// Position in a list. Negative positions count back from the end.
    Index(isize),

    /// Entry name in a map
    Name(Arc<str>),
}

impl Key {
    /// Resolve this key to a list slot for a list of length `len`.
    ///
    /// Names address a slot only when they are the canonical decimal form of
    /// a non-negative index ("1" does, "01" and "-1" do not).
    pub fn list_index(&self, len: usize) -> Option<usize> {
        match self {
            Key::Index(index) if *index < 0 => {
                let back = index.unsigned_abs();
                (back <= len).then(|| len - back)
            }
            Key::Index(index) => {
                let index = *index as usize;
                (index < len).then_some(index)
            }
            Key::Name(name) => {
                let index: usize = name.parse().ok()?;
                (index.to_string() == **name && index < len).then_some(index)
            }
        }
    }

    /// The map entry name, if this key is a name
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{}", index),
            Key::Name(name) => write!(f, "{:?}", name),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(Arc::from(name))
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(Arc::from(name))
    }
}

impl From<Arc<str>> for Key {
    fn from(name: Arc<str>) -> Self {
        Key::Name(name)
    }
}

impl From<isize> for Key {
    fn from(index: isize) -> Self {
        Key::Index(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Key::Index(index as isize)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index as isize)
    }
}
