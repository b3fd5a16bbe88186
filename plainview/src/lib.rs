//! Plainview: memoized plain views of persistent state
//!
//! This crate derives view data from an application state built out of
//! persistent collections. Selectors are declared once, composed, and then
//! evaluated against successive versions of the state. The results are
//! *reference stable*: when nothing a selector depends on has changed, it
//! returns the very same result as before, so a rendering layer can decide
//! whether to redraw with an identity check.
//!
//! # Architecture
//!
//! ```text
//! state ─▶ container selector ─▶ to_plain_selector ─▶ create_props_selector ─▶ renderer
//!                                  (structural memo)     (identity memo)
//! ```
//!
//! - [`Selector`] is a shared handle to a pure function of state.
//! - [`create_selector`] memoizes on the identity of its input values;
//!   [`create_structural_selector`] on their deep equality. Both keep exactly
//!   one previous call.
//! - [`to_plain_selector`] converts persistent collections into plain
//!   structures, reusing the previous structure when the source is equal.
//! - [`create_props_selector`] does that for several named selectors and
//!   combines the results into one stable map.
//! - [`create_get_selector`], [`create_has_selector`] and
//!   [`invert_selector`] cover the common lookups.
//!
//! # Example
//!
//! ```rust
//! use plainview::prelude::*;
//!
//! let todos = Selector::new(|s: &Value| s.get_in(&[Key::from("todos")]));
//! let view = create_props_selector([("todos", todos)]);
//!
//! let state = Value::map([("todos", Value::list(["write", "test"]))]);
//! let first = view.select(&state).unwrap();
//!
//! // An equal state built from scratch yields the same props.
//! let rebuilt = Value::map([("todos", Value::list(["write", "test"]))]);
//! let second = view.select(&rebuilt).unwrap();
//!
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! ```
//!
//! Create selectors once, outside the code that runs per update. A selector
//! rebuilt on every use has an empty memo cell every time.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod equality;
pub mod error;
pub mod factory;
pub mod invert;
pub mod lookup;
pub mod memo;
pub mod normalize;
pub mod selector;
pub mod structured;

pub use equality::{Equality, Identity, ReferenceEquality, StructuralEquality};
pub use error::{Result, SelectorError};
pub use factory::{create_selector, create_structural_selector, SelectorFactory};
pub use invert::invert_selector;
pub use lookup::{create_get_selector, create_get_selector_or, create_has_selector, KeySource};
pub use memo::{MemoCell, MemoEntry, MemoSnapshot};
pub use normalize::{create_props_selector, to_plain_selector};
pub use plainview_types::{Key, LookupError, ToPlain, Value};
pub use selector::{Inputs, Select, Selector};
pub use structured::{create_structured_selector, Props};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::equality::{Identity, ReferenceEquality, StructuralEquality};
    pub use crate::error::{Result, SelectorError};
    pub use crate::factory::{create_selector, create_structural_selector, SelectorFactory};
    pub use crate::invert::invert_selector;
    pub use crate::lookup::{create_get_selector, create_get_selector_or, create_has_selector};
    pub use crate::normalize::{create_props_selector, to_plain_selector};
    pub use crate::selector::Selector;
    pub use crate::structured::{create_structured_selector, Props};
    pub use plainview_types::{Key, Value};
}
