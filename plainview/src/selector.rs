//! Selector handles and input lists
//!
//! A [`Selector`] is a cheaply clonable handle to a pure function of state.
//! Clones share the same evaluation, so a memoized selector keeps one memo
//! cell no matter how many places hold it.

use crate::equality::Identity;
use crate::error::Result;
use crate::memo::MemoSnapshot;
use std::fmt;
use std::sync::Arc;

/// Evaluation behind a [`Selector`]
pub trait Select<S, T>: Send + Sync {
    /// Evaluate against `state`
    fn select(&self, state: &S) -> Result<T>;

    /// Memo counters, for memoized selectors
    fn memo_snapshot(&self) -> Option<MemoSnapshot> {
        None
    }

    /// Reset memo counters, for memoized selectors
    fn reset_recomputations(&self) {}
}

/// A function from state `S` to a derived value `T`
///
/// Create selectors once and reuse them. A selector rebuilt on every use
/// starts with an empty memo cell each time and so never returns a cached
/// result.
pub struct Selector<S, T> {
    inner: Arc<dyn Select<S, T>>,
}

struct FnSelect<F>(F);

impl<S, T, F> Select<S, T> for FnSelect<F>
where
    F: Fn(&S) -> Result<T> + Send + Sync,
{
    fn select(&self, state: &S) -> Result<T> {
        (self.0)(state)
    }
}

impl<S: 'static, T: 'static> Selector<S, T> {
    /// Wrap an infallible function of state
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        Self::try_new(move |state| Ok(f(state)))
    }

    /// Wrap a fallible function of state
    pub fn try_new<F>(f: F) -> Self
    where
        F: Fn(&S) -> Result<T> + Send + Sync + 'static,
    {
        Self::from_select(FnSelect(f))
    }

    /// Wrap a custom evaluation
    pub fn from_select(select: impl Select<S, T> + 'static) -> Self {
        Selector {
            inner: Arc::new(select),
        }
    }

    /// Evaluate against `state`
    pub fn select(&self, state: &S) -> Result<T> {
        self.inner.select(state)
    }

    /// How many times the combiner ran; zero for unmemoized selectors
    pub fn recomputations(&self) -> u64 {
        self.memo_snapshot().map_or(0, |s| s.recomputations)
    }

    /// Reset the recomputation count
    pub fn reset_recomputations(&self) {
        self.inner.reset_recomputations();
    }

    /// Memo counters, if this selector is memoized
    pub fn memo_snapshot(&self) -> Option<MemoSnapshot> {
        self.inner.memo_snapshot()
    }

    /// Returns true if both handles share one evaluation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S, T> Clone for Selector<S, T> {
    fn clone(&self) -> Self {
        Selector {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, T> fmt::Debug for Selector<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("output", &std::any::type_name::<T>())
            .field("memo", &self.inner.memo_snapshot())
            .finish()
    }
}

/// The input selectors of a combined selector
///
/// Implemented for a single selector, for tuples of up to six selectors and
/// for a `Vec` of selectors with a common output type.
pub trait Inputs<S>: Send + Sync + 'static {
    /// Values the inputs produce, handed to the combiner
    type Values: Identity + Clone + Send + Sync + 'static;

    /// Evaluate every input against `state`, in order
    fn select_all(&self, state: &S) -> Result<Self::Values>;
}

impl<S, A> Inputs<S> for Selector<S, A>
where
    S: 'static,
    A: Identity + Clone + Send + Sync + 'static,
{
    type Values = A;

    fn select_all(&self, state: &S) -> Result<A> {
        self.select(state)
    }
}

impl<S, A> Inputs<S> for Vec<Selector<S, A>>
where
    S: 'static,
    A: Identity + Clone + Send + Sync + 'static,
{
    type Values = Vec<A>;

    fn select_all(&self, state: &S) -> Result<Vec<A>> {
        self.iter().map(|selector| selector.select(state)).collect()
    }
}

macro_rules! inputs_for_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<S, $($name),+> Inputs<S> for ($(Selector<S, $name>,)+)
        where
            S: 'static,
            $($name: Identity + Clone + Send + Sync + 'static,)+
        {
            type Values = ($($name,)+);

            fn select_all(&self, state: &S) -> Result<Self::Values> {
                Ok(($(self.$idx.select(state)?,)+))
            }
        }
    };
}

inputs_for_tuple!(A: 0);
inputs_for_tuple!(A: 0, B: 1);
inputs_for_tuple!(A: 0, B: 1, C: 2);
inputs_for_tuple!(A: 0, B: 1, C: 2, D: 3);
inputs_for_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
inputs_for_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
