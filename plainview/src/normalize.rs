//! Plain views of persistent values
//!
//! [`to_plain_selector`] turns a selector over persistent state into one
//! producing plain structures that stay the *same* structure for as long as
//! the source stays *equal*. A rendering layer can then compare results by
//! identity instead of walking them.

use crate::factory::create_structural_selector;
use crate::selector::Selector;
use crate::structured::{create_structured_selector, Props};
use plainview_types::Value;
use std::sync::Arc;

/// Normalize a selector's value into its plain view
///
/// - falsy values collapse to [`Value::Null`]
/// - persistent collections become [`Value::Plain`] holding their deep
///   conversion
/// - everything else is returned unchanged
///
/// The wrapper is memoized by structural equality on the source value, so a
/// state update that rebuilds an equal collection returns the previous
/// plain structure, not a copy of it. Plain sources are compared by
/// identity and always come back as the `Arc` that was passed in.
pub fn to_plain_selector<S: 'static>(selector: Selector<S, Value>) -> Selector<S, Value> {
    create_structural_selector(selector, |value: &Value| Ok(plain_view(value)))
}

fn plain_view(value: &Value) -> Value {
    if !value.is_truthy() {
        return Value::Null;
    }
    match value.convertible() {
        Some(convertible) => Value::Plain(Arc::new(convertible.to_plain())),
        None => value.clone(),
    }
}

/// Plain views of several named selectors, combined into one [`Props`] map
///
/// Each entry goes through [`to_plain_selector`]. The combined map is the
/// same `Arc` as on the previous call whenever every entry's plain view is.
/// Entries are keyed by name and iterate in sorted name order, not in the
/// order they were given.
pub fn create_props_selector<S, K, I>(entries: I) -> Selector<S, Props>
where
    S: 'static,
    K: Into<String>,
    I: IntoIterator<Item = (K, Selector<S, Value>)>,
{
    create_structured_selector(
        entries
            .into_iter()
            .map(|(name, selector)| (name, to_plain_selector(selector))),
    )
}
