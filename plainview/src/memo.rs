//! Single-entry memoization
//!
//! Every memoized selector owns one [`MemoCell`]. The cell remembers the
//! inputs and result of the most recent successful evaluation and nothing
//! else: the cache depth is exactly one call.

use crate::equality::{Equality, Identity};
use crate::error::Result;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// The inputs and result of the last evaluation
#[derive(Debug, Clone)]
pub struct MemoEntry<I, T> {
    /// Input values the result was computed from
    pub inputs: I,

    /// The cached result
    pub result: T,
}

/// One-entry memo cell
pub struct MemoCell<I, T, E> {
    last: Mutex<Option<MemoEntry<I, T>>>,
    equality: E,
    hits: AtomicU64,
    recomputations: AtomicU64,
}

impl<I, T, E> MemoCell<I, T, E>
where
    I: Identity + Clone,
    T: Clone,
    E: Equality,
{
    /// Create an empty cell comparing inputs with `equality`
    pub fn new(equality: E) -> Self {
        MemoCell {
            last: Mutex::new(None),
            equality,
            hits: AtomicU64::new(0),
            recomputations: AtomicU64::new(0),
        }
    }

    /// Return the cached result if `inputs` count as unchanged, otherwise
    /// run `compute` and remember its result
    ///
    /// The lock is released while `compute` runs. A failed computation
    /// leaves the previous entry in place.
    pub fn get_or_compute<F>(&self, inputs: I, compute: F) -> Result<T>
    where
        F: FnOnce(&I) -> Result<T>,
    {
        if let Some(entry) = self.last.lock().as_ref() {
            if self.equality.equals(&entry.inputs, &inputs) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(entry.result.clone());
            }
        }

        let result = compute(&inputs)?;
        self.recomputations.fetch_add(1, Ordering::Relaxed);

        *self.last.lock() = Some(MemoEntry {
            inputs,
            result: result.clone(),
        });

        Ok(result)
    }

    /// The remembered entry, if any
    pub fn entry(&self) -> Option<MemoEntry<I, T>> {
        self.last.lock().clone()
    }

    /// Forget the remembered entry
    pub fn clear(&self) {
        *self.last.lock() = None;
    }
}

impl<I, T, E> MemoCell<I, T, E> {
    /// The equality strategy inputs are compared with
    pub fn equality(&self) -> &E {
        &self.equality
    }

    /// Number of times the result was computed
    pub fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }

    /// Number of times the cached result was returned
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Reset both counters
    pub fn reset_counters(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.recomputations.store(0, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters
    pub fn snapshot(&self) -> MemoSnapshot {
        MemoSnapshot {
            hits: self.hits(),
            recomputations: self.recomputations(),
        }
    }
}

impl<I, T, E: Equality> fmt::Debug for MemoCell<I, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCell")
            .field("equality", &self.equality.name())
            .field("filled", &self.last.lock().is_some())
            .field("hits", &self.hits())
            .field("recomputations", &self.recomputations())
            .finish()
    }
}

/// Counters of a memo cell at one point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoSnapshot {
    /// Cached results returned
    pub hits: u64,

    /// Results computed
    pub recomputations: u64,
}

impl MemoSnapshot {
    /// Share of evaluations answered from the cell (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.recomputations;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl fmt::Display for MemoSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hits: {} | Recomputations: {} | Hit Rate: {:.1}%",
            self.hits,
            self.recomputations,
            self.hit_rate() * 100.0
        )
    }
}
