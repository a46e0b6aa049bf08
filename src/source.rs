//! Sequence construction.
//!
//! Finite sources produce [`Bounded`] sequences. [`iterate`] and [`generate`]
//! produce [`Unbounded`] ones, which only gain terminal operations after a
//! `limit` stage.

use std::iter::RepeatWith;
use std::ops::{Range, RangeInclusive};

use crate::sequence::{Bounded, Sequence, Unbounded};
use crate::stage::Iterate;

/// Builds a sequence over a finite container, preserving its order.
///
/// Passing a reference (`&vec`) yields references; passing the container by
/// value yields owned elements. The container's iterator must know its exact
/// length, which open-ended iterators never do:
///
/// ```compile_fail
/// use sequence_pipeline::from_collection;
///
/// let n = from_collection(0u8..).count();
/// ```
///
/// ```compile_fail
/// use sequence_pipeline::from_collection;
///
/// let n = from_collection(std::iter::repeat(7u8)).count();
/// ```
///
/// Use [`iterate`] or [`generate`] with `limit` for infinite sources.
pub fn from_collection<C>(items: C) -> Sequence<C::IntoIter, Bounded>
where
    C: IntoIterator,
    C::IntoIter: ExactSizeIterator,
{
    Sequence::new(items.into_iter())
}

/// Builds a sequence over an explicit list of values.
pub fn of<T, const N: usize>(values: [T; N]) -> Sequence<std::array::IntoIter<T, N>, Bounded> {
    Sequence::new(values.into_iter())
}

pub fn empty<T>() -> Sequence<std::iter::Empty<T>, Bounded> {
    Sequence::new(std::iter::empty())
}

/// Consecutive values from `start` up to, but excluding, `end`.
///
/// Empty when `start >= end`.
pub fn range<T>(start: T, end: T) -> Sequence<Range<T>, Bounded>
where
    Range<T>: Iterator<Item = T>,
{
    Sequence::new(start..end)
}

/// Consecutive values from `start` through `end` inclusive.
///
/// Empty when `start > end`.
pub fn range_closed<T>(start: T, end: T) -> Sequence<RangeInclusive<T>, Bounded>
where
    RangeInclusive<T>: Iterator<Item = T>,
{
    Sequence::new(start..=end)
}

/// Infinite sequence `seed, step(&seed), step(&step(&seed)), ...`.
///
/// ```
/// use sequence_pipeline::iterate;
///
/// let powers = iterate(1u32, |x| x * 2).limit(5).collect_to_list();
/// assert_eq!(powers, vec![1, 2, 4, 8, 16]);
/// ```
pub fn iterate<T, F>(seed: T, step: F) -> Sequence<Iterate<T, F>, Unbounded>
where
    T: Clone,
    F: FnMut(&T) -> T,
{
    Sequence::new(Iterate::new(seed, step))
}

/// Infinite sequence where every element comes from a fresh call to
/// `supplier`.
pub fn generate<T, F>(supplier: F) -> Sequence<RepeatWith<F>, Unbounded>
where
    F: FnMut() -> T,
{
    Sequence::new(std::iter::repeat_with(supplier))
}

/// Builds a bounded sequence from a literal list of values.
///
/// ```
/// use sequence_pipeline::seq;
///
/// let words = seq!["One", "Two", "Three"].map(str::len).collect_to_list();
/// assert_eq!(words, vec![3, 3, 5]);
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::empty()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::of([$($value),+])
    };
}
