//! Equality strategies for memoization
//!
//! A memoized selector compares the values its inputs produced on this call
//! with the ones from the previous call. [`ReferenceEquality`] asks whether
//! they are the *same* values (pointer identity for shared data), which is
//! cheap and is what a rendering layer's shallow check sees.
//! [`StructuralEquality`] asks whether they are *equal*, which costs a deep
//! comparison but survives a state update that rebuilt an unchanged subtree.

use plainview_types::{Key, Value};
use std::sync::Arc;

/// Identity comparison, the analogue of a reference check
///
/// Implementations must be conservative: returning `false` for two values
/// that are in fact the same only costs a recomputation, returning `true`
/// for different values breaks memoization.
pub trait Identity: PartialEq {
    /// Returns true if `self` and `other` are the same value
    fn is_same(&self, other: &Self) -> bool;

    /// Returns true if `self` and `other` are equal for memoization
    ///
    /// Defaults to `==`. [`Value`] narrows it so only persistent collections
    /// are walked; plain structures still compare by identity.
    fn is_equal(&self, other: &Self) -> bool {
        self == other
    }
}

impl Identity for Value {
    fn is_same(&self, other: &Self) -> bool {
        Value::is_same(self, other)
    }

    fn is_equal(&self, other: &Self) -> bool {
        Value::is_equal(self, other)
    }
}

impl<T: PartialEq + ?Sized> Identity for Arc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: Identity> Identity for Option<T> {
    fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.is_same(b),
            (None, None) => true,
            _ => false,
        }
    }

    fn is_equal(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.is_equal(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Identity> Identity for Vec<T> {
    fn is_same(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.is_same(b))
    }

    fn is_equal(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.is_equal(b))
    }
}

macro_rules! identity_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identity for $ty {
                fn is_same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

identity_by_value!(
    (),
    bool,
    char,
    i32,
    i64,
    isize,
    u32,
    u64,
    usize,
    f64,
    String,
    &'static str,
    Key,
);

macro_rules! identity_for_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Identity),+> Identity for ($($name,)+) {
            fn is_same(&self, other: &Self) -> bool {
                $(self.$idx.is_same(&other.$idx))&&+
            }

            fn is_equal(&self, other: &Self) -> bool {
                $(self.$idx.is_equal(&other.$idx))&&+
            }
        }
    };
}

identity_for_tuple!(A: 0);
identity_for_tuple!(A: 0, B: 1);
identity_for_tuple!(A: 0, B: 1, C: 2);
identity_for_tuple!(A: 0, B: 1, C: 2, D: 3);
identity_for_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
identity_for_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);

/// Strategy deciding whether memoized inputs are unchanged
pub trait Equality: Clone + Send + Sync + 'static {
    /// Short name for diagnostics
    fn name(&self) -> &'static str;

    /// Returns true if `previous` and `current` count as unchanged
    fn equals<T: Identity>(&self, previous: &T, current: &T) -> bool;
}

/// Unchanged means identical
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceEquality;

impl Equality for ReferenceEquality {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn equals<T: Identity>(&self, previous: &T, current: &T) -> bool {
        previous.is_same(current)
    }
}

/// Unchanged means deeply equal
///
/// Depth stops at plain structures: a [`Value::Plain`] is unchanged only if
/// it is the same allocation, so a freshly built but equal plain value is
/// treated as new.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructuralEquality;

impl Equality for StructuralEquality {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn equals<T: Identity>(&self, previous: &T, current: &T) -> bool {
        previous.is_equal(current)
    }
}
