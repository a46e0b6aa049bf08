//! The seed/step generator behind [`iterate`](crate::iterate).
//!
//! Every other stage reuses a `std::iter` adapter (`Filter`, `Map`,
//! `FlatMap`, `Take`, `Skip`, `Inspect`) or `itertools::Unique`.

use std::fmt;

//==============================================================================
// Iterate: infinite generator seeded by a value and a step function
//==============================================================================

enum IterateState<T> {
    Seed(T),
    Last(T),
    Done,
}

/// Infinite generator where element `i + 1` is `step(&element_i)`.
///
/// The step function runs only when the next element is pulled, so a
/// downstream `limit(n)` never causes an extra call.
pub struct Iterate<T, F> {
    state: IterateState<T>,
    step: F,
}

impl<T, F> Iterate<T, F>
where
    T: Clone,
    F: FnMut(&T) -> T,
{
    pub(crate) fn new(seed: T, step: F) -> Self {
        Iterate {
            state: IterateState::Seed(seed),
            step,
        }
    }
}

impl<T, F> Iterator for Iterate<T, F>
where
    T: Clone,
    F: FnMut(&T) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = match std::mem::replace(&mut self.state, IterateState::Done) {
            IterateState::Seed(seed) => seed,
            IterateState::Last(previous) => (self.step)(&previous),
            IterateState::Done => return None,
        };
        self.state = IterateState::Last(value.clone());
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<T, F> fmt::Debug for Iterate<T, F>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = match &self.state {
            IterateState::Seed(value) | IterateState::Last(value) => Some(value),
            IterateState::Done => None,
        };
        f.debug_struct("Iterate").field("current", &current).finish()
    }
}
