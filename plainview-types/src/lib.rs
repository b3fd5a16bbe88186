//! Persistent value model for plainview
//!
//! This crate provides the state-side data model the selector layer works
//! over: a dynamic [`Value`] whose collections are `im` persistent
//! structures, lookup [`Key`]s, and the [`ToPlain`] capability that turns a
//! persistent value into a plain `serde_json::Value`.
//!
//! Equality on [`Value`] is structural. Identity, used for reference
//! stability checks, is [`Value::is_same`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod key;
pub mod lookup;
pub mod plain;
pub mod value;

pub use im;
pub use key::Key;
pub use lookup::LookupError;
pub use plain::ToPlain;
pub use value::Value;
