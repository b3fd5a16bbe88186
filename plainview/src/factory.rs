//! Memoized selector construction
//!
//! A [`SelectorFactory`] binds an [`Equality`] strategy to the one-entry memo
//! cell. [`create_selector`] is the reference-equality factory every
//! composition helper builds on; [`create_structural_selector`] uses deep
//! equality and is what the plain-conversion wrapper needs.

use crate::equality::{Equality, ReferenceEquality, StructuralEquality};
use crate::error::Result;
use crate::memo::{MemoCell, MemoSnapshot};
use crate::selector::{Inputs, Select, Selector};
use std::any::type_name;
use std::marker::PhantomData;

/// Builds memoized selectors with a fixed equality strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorFactory<E> {
    equality: E,
}

impl<E: Equality> SelectorFactory<E> {
    /// Create a factory comparing inputs with `equality`
    pub fn new(equality: E) -> Self {
        SelectorFactory { equality }
    }

    /// The equality strategy selectors from this factory use
    pub fn equality(&self) -> &E {
        &self.equality
    }

    /// Combine `inputs` with `combiner`
    ///
    /// The returned selector evaluates every input on each call and runs
    /// `combiner` only when the input values differ from the previous call
    /// under this factory's equality. Otherwise it returns the previous
    /// result itself.
    pub fn create<S, I, T, F>(&self, inputs: I, combiner: F) -> Selector<S, T>
    where
        S: 'static,
        I: Inputs<S>,
        T: Clone + Send + Sync + 'static,
        F: Fn(&I::Values) -> Result<T> + Send + Sync + 'static,
    {
        Selector::from_select(MemoizedSelector {
            inputs,
            combiner,
            memo: MemoCell::new(self.equality.clone()),
            _state: PhantomData,
        })
    }
}

struct MemoizedSelector<S, I: Inputs<S>, T, F, E> {
    inputs: I,
    combiner: F,
    memo: MemoCell<I::Values, T, E>,
    _state: PhantomData<fn(&S)>,
}

impl<S, I, T, F, E> Select<S, T> for MemoizedSelector<S, I, T, F, E>
where
    S: 'static,
    I: Inputs<S>,
    T: Clone + Send + Sync + 'static,
    F: Fn(&I::Values) -> Result<T> + Send + Sync + 'static,
    E: Equality,
{
    fn select(&self, state: &S) -> Result<T> {
        let values = self.inputs.select_all(state)?;
        let before = self.memo.recomputations();

        let result = self.memo.get_or_compute(values, &self.combiner);
        match &result {
            Ok(_) if self.memo.recomputations() == before => {
                tracing::trace!(output = type_name::<T>(), "selector memo hit");
            }
            Ok(_) => {
                tracing::trace!(
                    output = type_name::<T>(),
                    equality = self.memo.equality().name(),
                    recomputations = before + 1,
                    "selector recomputed"
                );
            }
            Err(err) => {
                tracing::debug!(output = type_name::<T>(), error = %err, "selector combiner failed");
            }
        }
        result
    }

    fn memo_snapshot(&self) -> Option<MemoSnapshot> {
        Some(self.memo.snapshot())
    }

    fn reset_recomputations(&self) {
        self.memo.reset_counters();
    }
}

/// Memoized selector comparing input values by identity
pub fn create_selector<S, I, T, F>(inputs: I, combiner: F) -> Selector<S, T>
where
    S: 'static,
    I: Inputs<S>,
    T: Clone + Send + Sync + 'static,
    F: Fn(&I::Values) -> Result<T> + Send + Sync + 'static,
{
    SelectorFactory::new(ReferenceEquality).create(inputs, combiner)
}

/// Memoized selector comparing input values by deep structural equality
///
/// Use this when the inputs may be rebuilt with identical contents between
/// calls and the result should still be reused.
pub fn create_structural_selector<S, I, T, F>(inputs: I, combiner: F) -> Selector<S, T>
where
    S: 'static,
    I: Inputs<S>,
    T: Clone + Send + Sync + 'static,
    F: Fn(&I::Values) -> Result<T> + Send + Sync + 'static,
{
    SelectorFactory::new(StructuralEquality).create(inputs, combiner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectorError;
    use plainview_types::{Key, Value};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn todos() -> Selector<Value, Value> {
        Selector::new(|s: &Value| s.get_in(&[Key::from("todos")]))
    }

    fn state(items: &[&str]) -> Value {
        Value::map([("todos", Value::list(items.iter().copied()))])
    }

    #[test]
    fn test_memoization() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let user = Selector::new(|s: &Value| s.get_in(&[Key::from("user")]));
        let greeting = create_selector(user, move |user: &Value| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(format!("hello {}", user.get_in(&[Key::from("name")]).as_str().unwrap_or("?")))
        });

        let s = Value::map([("user", Value::map([("name", "ada")]))]);
        assert_eq!(greeting.select(&s).unwrap(), "hello ada");
        assert_eq!(greeting.select(&s).unwrap(), "hello ada");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(greeting.recomputations(), 1);

        let renamed = s.set("user".into(), Value::map([("name", "grace")])).unwrap();
        assert_eq!(greeting.select(&renamed).unwrap(), "hello grace");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_reference_factory_recomputes_on_rebuilt_input() {
        let plain = create_selector(todos(), |list: &Value| Ok(Arc::new(list.to_plain())));

        let first = plain.select(&state(&["a", "b", "c"])).unwrap();
        let second = plain.select(&state(&["a", "b", "c"])).unwrap();

        assert_eq!(first, second);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(plain.recomputations(), 2);
    }

    #[test]
    fn test_structural_factory_reuses_result_on_rebuilt_input() {
        let plain = create_structural_selector(todos(), |list: &Value| Ok(Arc::new(list.to_plain())));

        let first = plain.select(&state(&["a", "b", "c"])).unwrap();
        let second = plain.select(&state(&["a", "b", "c"])).unwrap();
        let third = plain.select(&state(&["a", "b"])).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&second, &third));
        assert_eq!(plain.recomputations(), 2);
    }

    #[test]
    fn test_multiple_inputs() {
        let first = Selector::new(|s: &Value| s.get_in(&[Key::from("first")]));
        let last = Selector::new(|s: &Value| s.get_in(&[Key::from("last")]));
        let full = create_selector((first, last), |(first, last): &(Value, Value)| {
            Ok(format!(
                "{} {}",
                first.as_str().unwrap_or_default(),
                last.as_str().unwrap_or_default()
            ))
        });

        let s = Value::map([("first", "Ada"), ("last", "Lovelace")]);
        assert_eq!(full.select(&s).unwrap(), "Ada Lovelace");
        assert_eq!(full.select(&s).unwrap(), "Ada Lovelace");
        assert_eq!(full.recomputations(), 1);
    }

    #[test]
    fn test_combiner_error_propagates() {
        let failing = create_selector(todos(), |_: &Value| -> Result<Value> {
            Err(anyhow::anyhow!("cannot derive").into())
        });

        let err = failing.select(&state(&["a"])).unwrap_err();
        assert!(matches!(err, SelectorError::Combiner(_)));
        assert_eq!(failing.recomputations(), 0);
    }

    #[test]
    fn test_input_error_propagates() {
        let broken = Selector::try_new(|s: &Value| Ok(s.get_or(&Key::from("x"), Value::Null)?));
        let derived = create_selector(broken, |v: &Value| Ok(v.is_truthy()));

        let err = derived.select(&Value::from("scalar")).unwrap_err();
        assert!(matches!(err, SelectorError::Lookup(_)));
    }

    #[test]
    fn test_reset_recomputations() {
        let count = create_selector(todos(), |list: &Value| Ok(list.is_truthy()));
        count.select(&state(&["a"])).unwrap();
        count.select(&state(&["b"])).unwrap();
        assert_eq!(count.recomputations(), 2);

        count.reset_recomputations();
        assert_eq!(count.recomputations(), 0);
    }

    #[test]
    fn test_recreating_selector_defeats_memoization() {
        let s = state(&["a"]);
        let make = || create_structural_selector(todos(), |list: &Value| Ok(Arc::new(list.to_plain())));

        let first = make().select(&s).unwrap();
        let second = make().select(&s).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_factory_exposes_equality() {
        let factory = SelectorFactory::new(StructuralEquality);
        assert_eq!(factory.equality().name(), "structural");
    }
}
