//! Dynamic values backed by persistent collections
//!
//! [`Value`] is what state selectors hand around. Its collection variants are
//! `im` structures, so cloning is cheap and unchanged subtrees are shared
//! between versions of the state.

use im::{OrdMap, Vector};
use std::sync::Arc;

/// A value in application state
///
/// Equality (`==`) is deep and structural: two independently built lists with
/// equal contents compare equal. Use [`Value::is_same`] for identity and
/// [`Value::is_equal`] for the persistent-only comparison memoization uses.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Null,

    /// Boolean
    Bool(bool),

    /// Number
    Number(f64),

    /// String
    String(Arc<str>),

    /// Persistent, index-addressed sequence
    List(Vector<Value>),

    /// Persistent, name-addressed map
    Map(OrdMap<Arc<str>, Value>),

    /// Plain structure, shared by reference
    Plain(Arc<serde_json::Value>),
}

impl Value {
    /// Build a persistent list
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a persistent map
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Arc<str>>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Wrap an already-plain structure
    pub fn plain(value: serde_json::Value) -> Self {
        Value::Plain(Arc::new(value))
    }

    /// Short name of the variant, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Plain(_) => "plain",
        }
    }

    /// JavaScript-style truthiness
    ///
    /// `Null`, `false`, `0`, `NaN` and the empty string are falsy, as are
    /// their plain counterparts. Collections are always truthy, even empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) => true,
            Value::Plain(plain) => match &**plain {
                serde_json::Value::Null => false,
                serde_json::Value::Bool(b) => *b,
                serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
                serde_json::Value::String(s) => !s.is_empty(),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
            },
        }
    }

    /// Identity comparison
    ///
    /// Collections and plain structures are the same only if they share the
    /// same allocation; scalars compare by value. Empty collections of one
    /// kind are all the same.
    pub fn is_same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.ptr_eq(b) || (a.is_empty() && b.is_empty()),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b) || (a.is_empty() && b.is_empty()),
            (Value::Plain(a), Value::Plain(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Value equality over persistent collections only
    ///
    /// Lists and maps are compared element by element, short-circuiting on
    /// shared structure. Plain structures are opaque here and compare by
    /// identity, like [`Value::is_same`].
    pub fn is_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => {
                a.ptr_eq(b)
                    || (a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.is_equal(y)))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.ptr_eq(b)
                    || (a.len() == b.len()
                        && a.iter()
                            .zip(b.iter())
                            .all(|((ka, va), (kb, vb))| ka == kb && va.is_equal(vb)))
            }
            _ => self.is_same(other),
        }
    }

    /// Returns true for the absent value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the string contents
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric contents
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean contents
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the plain structure, if this is one
    pub fn as_plain(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Plain(plain) => Some(plain),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

/// Numbers are `f64`; integers beyond 2^53 lose precision.
impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

/// Numbers are `f64`; counts beyond 2^53 lose precision.
impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<Vector<Value>> for Value {
    fn from(list: Vector<Value>) -> Self {
        Value::List(list)
    }
}

impl From<OrdMap<Arc<str>, Value>> for Value {
    fn from(map: OrdMap<Arc<str>, Value>) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
