//! Boolean inversion

use crate::factory::create_selector;
use crate::selector::Selector;

/// Selector producing the negation of `selector`
pub fn invert_selector<S: 'static>(selector: Selector<S, bool>) -> Selector<S, bool> {
    create_selector(selector, |value: &bool| Ok(!value))
}
