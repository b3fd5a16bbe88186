//! Keyed access into persistent collections
//!
//! Lists and maps share one lookup surface. Asking a scalar or plain value
//! for a key is a caller error and is reported, not papered over.

use crate::key::Key;
use crate::value::Value;

/// Errors from keyed access
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    /// The value has no keyed slots
    #[error("cannot {operation} key {key} on a {kind} value")]
    NotAContainer {
        /// Operation that was attempted
        operation: &'static str,
        /// Key that was requested
        key: Key,
        /// Kind of the value that was asked
        kind: &'static str,
    },

    /// A list write landed past the end
    #[error("index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: Key,
        /// Length of the list
        len: usize,
    },
}

impl Value {
    /// Look up `key`, returning `None` when the slot is empty
    pub fn get(&self, key: &Key) -> Result<Option<&Value>, LookupError> {
        match self {
            Value::List(list) => Ok(key.list_index(list.len()).and_then(|i| list.get(i))),
            Value::Map(map) => Ok(key.as_name().and_then(|name| map.get(name))),
            _ => Err(self.not_a_container("get", key)),
        }
    }

    /// Look up `key`, falling back to `default` when the slot is empty
    pub fn get_or(&self, key: &Key, default: Value) -> Result<Value, LookupError> {
        Ok(self.get(key)?.cloned().unwrap_or(default))
    }

    /// Returns true if `key` addresses a slot
    pub fn has(&self, key: &Key) -> Result<bool, LookupError> {
        match self {
            Value::List(list) => Ok(key.list_index(list.len()).is_some()),
            Value::Map(map) => Ok(key.as_name().is_some_and(|name| map.contains_key(name))),
            _ => Err(self.not_a_container("has", key)),
        }
    }

    /// Follow a path of keys
    ///
    /// Missing slots and non-collection values along the way yield `Null`.
    pub fn get_in(&self, path: &[Key]) -> Value {
        let mut current = self;
        for key in path {
            match current.get(key) {
                Ok(Some(next)) => current = next,
                _ => return Value::Null,
            }
        }
        current.clone()
    }

    /// Return a new value with `key` set to `value`
    ///
    /// The receiver is untouched; the result shares every unchanged subtree
    /// with it. Setting a list slot at the current length appends.
    pub fn set(&self, key: Key, value: Value) -> Result<Value, LookupError> {
        match self {
            Value::List(list) => {
                let len = list.len();
                let mut list = list.clone();
                match key.list_index(len) {
                    Some(index) => {
                        list.set(index, value);
                    }
                    None if key.list_index(len + 1) == Some(len) => list.push_back(value),
                    None => return Err(LookupError::IndexOutOfBounds { index: key, len }),
                }
                Ok(Value::List(list))
            }
            Value::Map(map) => match key {
                Key::Name(name) => Ok(Value::Map(map.update(name, value))),
                Key::Index(_) => Err(self.not_a_container("set", &key)),
            },
            _ => Err(self.not_a_container("set", &key)),
        }
    }

    fn not_a_container(&self, operation: &'static str, key: &Key) -> LookupError {
        LookupError::NotAContainer {
            operation,
            key: key.clone(),
            kind: self.kind(),
        }
    }
}
