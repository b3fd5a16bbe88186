//! Conversion between persistent values and plain structures
//!
//! The plain form is `serde_json::Value`. Persistent collections advertise
//! that they can be deep-converted by implementing [`ToPlain`];
//! [`Value::convertible`] is the single place that capability is looked up.

use crate::value::Value;
use im::{OrdMap, Vector};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Deep conversion into a plain structure
pub trait ToPlain {
    /// Convert, recursively replacing every persistent collection with its
    /// plain counterpart
    fn to_plain(&self) -> serde_json::Value;
}

impl ToPlain for Vector<Value> {
    fn to_plain(&self) -> serde_json::Value {
        serde_json::Value::Array(self.iter().map(Value::to_plain).collect())
    }
}

impl ToPlain for OrdMap<Arc<str>, Value> {
    fn to_plain(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.to_plain()))
                .collect(),
        )
    }
}

impl Value {
    /// The conversion capability of this value, if it has one
    ///
    /// Only persistent collections are convertible. Plain structures are
    /// already in their final form and scalars have nothing to convert.
    pub fn convertible(&self) -> Option<&dyn ToPlain> {
        match self {
            Value::List(list) => Some(list as &dyn ToPlain),
            Value::Map(map) => Some(map as &dyn ToPlain),
            _ => None,
        }
    }

    /// Plain form of any value
    pub fn to_plain(&self) -> serde_json::Value {
        if let Some(convertible) = self.convertible() {
            return convertible.to_plain();
        }
        match self {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_plain(*n),
            Value::String(s) => serde_json::Value::String(s.to_string()),
            Value::Plain(plain) => (**plain).clone(),
            _ => serde_json::Value::Null,
        }
    }

    /// Deep conversion from plain data: arrays become lists, objects maps
    pub fn from_plain(plain: serde_json::Value) -> Self {
        match plain {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from_plain).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Arc::from(k), Value::from_plain(v)))
                    .collect(),
            ),
        }
    }
}

/// Integral numbers keep an integer representation so `1.0` reads back as `1`.
/// Non-finite numbers have no plain form and become null.
fn number_to_plain(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}

impl From<serde_json::Value> for Value {
    fn from(plain: serde_json::Value) -> Self {
        Value::from_plain(plain)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_plain().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from_plain)
    }
}
