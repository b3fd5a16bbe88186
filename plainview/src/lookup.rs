//! Key lookup selectors
//!
//! `get` and `has` over a container selector, with the key either fixed at
//! construction or produced by its own selector on every call.

use crate::factory::create_selector;
use crate::selector::Selector;
use plainview_types::{Key, Value};
use std::fmt;

/// Where a lookup key comes from
pub enum KeySource<S> {
    /// A key fixed when the selector is built
    Literal(Key),

    /// A key computed from state on every call
    Derived(Selector<S, Key>),
}

impl<S> fmt::Debug for KeySource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Literal(key) => f.debug_tuple("Literal").field(key).finish(),
            KeySource::Derived(selector) => f.debug_tuple("Derived").field(selector).finish(),
        }
    }
}

impl<S> From<Key> for KeySource<S> {
    fn from(key: Key) -> Self {
        KeySource::Literal(key)
    }
}

impl<S> From<&str> for KeySource<S> {
    fn from(name: &str) -> Self {
        KeySource::Literal(Key::from(name))
    }
}

impl<S> From<String> for KeySource<S> {
    fn from(name: String) -> Self {
        KeySource::Literal(Key::from(name))
    }
}

impl<S> From<usize> for KeySource<S> {
    fn from(index: usize) -> Self {
        KeySource::Literal(Key::from(index))
    }
}

impl<S> From<isize> for KeySource<S> {
    fn from(index: isize) -> Self {
        KeySource::Literal(Key::from(index))
    }
}

impl<S> From<i32> for KeySource<S> {
    fn from(index: i32) -> Self {
        KeySource::Literal(Key::from(index))
    }
}

impl<S> From<Selector<S, Key>> for KeySource<S> {
    fn from(selector: Selector<S, Key>) -> Self {
        KeySource::Derived(selector)
    }
}

/// Selector looking up `key` in the container, `Null` when absent
pub fn create_get_selector<S: 'static>(
    container: Selector<S, Value>,
    key: impl Into<KeySource<S>>,
) -> Selector<S, Value> {
    create_get_selector_or(container, key, Value::Null)
}

/// Selector looking up `key` in the container, `default` when absent
///
/// Fails with a lookup error when the container is not a list or map.
pub fn create_get_selector_or<S: 'static>(
    container: Selector<S, Value>,
    key: impl Into<KeySource<S>>,
    default: Value,
) -> Selector<S, Value> {
    match key.into() {
        KeySource::Literal(key) => create_selector(container, move |container: &Value| {
            Ok(container.get_or(&key, default.clone())?)
        }),
        KeySource::Derived(key) => {
            create_selector((container, key), move |(container, key): &(Value, Key)| {
                Ok(container.get_or(key, default.clone())?)
            })
        }
    }
}

/// Selector testing whether the container has a slot for `key`
///
/// Fails with a lookup error when the container is not a list or map.
pub fn create_has_selector<S: 'static>(
    container: Selector<S, Value>,
    key: impl Into<KeySource<S>>,
) -> Selector<S, bool> {
    match key.into() {
        KeySource::Literal(key) => {
            create_selector(container, move |container: &Value| Ok(container.has(&key)?))
        }
        KeySource::Derived(key) => {
            create_selector((container, key), |(container, key): &(Value, Key)| {
                Ok(container.has(key)?)
            })
        }
    }
}
