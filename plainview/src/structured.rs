//! Structured selectors
//!
//! Combine named selectors into one selector producing a map of their
//! results.

use crate::equality::Identity;
use crate::factory::create_selector;
use crate::selector::Selector;
use plainview_types::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A map of named results, shared by reference
///
/// Names iterate in sorted order regardless of declaration order.
pub type Props<T = Value> = Arc<BTreeMap<String, T>>;

/// Combine named selectors into one producing [`Props`]
///
/// The map is rebuilt only when at least one entry's value is not the same
/// as on the previous call; otherwise the previous `Arc` is returned. If two
/// entries share a name the later one wins.
pub fn create_structured_selector<S, T, K, I>(entries: I) -> Selector<S, Props<T>>
where
    S: 'static,
    T: Identity + Clone + Send + Sync + 'static,
    K: Into<String>,
    I: IntoIterator<Item = (K, Selector<S, T>)>,
{
    let (names, selectors): (Vec<String>, Vec<Selector<S, T>>) = entries
        .into_iter()
        .map(|(name, selector)| (name.into(), selector))
        .unzip();

    create_selector(selectors, move |values: &Vec<T>| {
        Ok(Arc::new(
            names.iter().cloned().zip(values.iter().cloned()).collect(),
        ))
    })
}
