//! # Memoized Selectors
//!
//! Caches a derived value and recomputes it only when the projected input
//! differs from the one it was computed from.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::state::AppState;

type InputFn<I> = Box<dyn Fn(&AppState) -> I + Send + Sync>;
type ComputeFn<I, O> = Box<dyn Fn(&I) -> O + Send + Sync>;

/// A selector whose result is cached per input.
pub struct Memoized<I, O> {
    input: InputFn<I>,
    compute: ComputeFn<I, O>,
    cache: Mutex<Option<(I, O)>>,
    recomputations: AtomicU64,
}

impl<I, O> Memoized<I, O>
where
    I: PartialEq,
    O: Clone,
{
    /// `input` projects the part of the state the result depends on;
    /// `compute` derives the result from it.
    pub fn new<F, G>(input: F, compute: G) -> Self
    where
        F: Fn(&AppState) -> I + Send + Sync + 'static,
        G: Fn(&I) -> O + Send + Sync + 'static,
    {
        Self {
            input: Box::new(input),
            compute: Box::new(compute),
            cache: Mutex::new(None),
            recomputations: AtomicU64::new(0),
        }
    }

    /// Current result for `state`.
    pub fn get(&self, state: &AppState) -> O {
        let input = (self.input)(state);
        let mut cache = self.cache.lock();
        if let Some((cached_input, output)) = cache.as_ref() {
            if *cached_input == input {
                return output.clone();
            }
        }
        let output = (self.compute)(&input);
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        *cache = Some((input, output.clone()));
        output
    }

    /// How many times the result was computed.
    #[must_use]
    pub fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }
}
