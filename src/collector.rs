//! Mutable reductions for [`Sequence::collect`](crate::Sequence::collect)
//! and [`ParSequence::collect`](crate::ParSequence::collect).
//!
//! A collector is a four-step recipe: `supply` a fresh accumulator,
//! `accumulate` one element into it, `combine` two partial accumulators, and
//! `finish` into the output. Sequential evaluation never calls `combine`;
//! the parallel strategy folds each partition separately and merges the
//! partials with it, so `combine` must be associative.

use std::collections::HashSet;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::Add;

pub trait Collector<T> {
    type Acc;
    type Output;

    fn supply(&self) -> Self::Acc;

    fn accumulate(&self, acc: Self::Acc, item: T) -> Self::Acc;

    fn combine(&self, left: Self::Acc, right: Self::Acc) -> Self::Acc;

    fn finish(&self, acc: Self::Acc) -> Self::Output;
}

//==============================================================================
// Containers
//==============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ToList;

impl<T> Collector<T> for ToList {
    type Acc = Vec<T>;
    type Output = Vec<T>;

    fn supply(&self) -> Vec<T> {
        Vec::new()
    }

    fn accumulate(&self, mut acc: Vec<T>, item: T) -> Vec<T> {
        acc.push(item);
        acc
    }

    fn combine(&self, mut left: Vec<T>, right: Vec<T>) -> Vec<T> {
        left.extend(right);
        left
    }

    fn finish(&self, acc: Vec<T>) -> Vec<T> {
        acc
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ToSet;

impl<T: Eq + Hash> Collector<T> for ToSet {
    type Acc = HashSet<T>;
    type Output = HashSet<T>;

    fn supply(&self) -> HashSet<T> {
        HashSet::new()
    }

    fn accumulate(&self, mut acc: HashSet<T>, item: T) -> HashSet<T> {
        acc.insert(item);
        acc
    }

    fn combine(&self, mut left: HashSet<T>, right: HashSet<T>) -> HashSet<T> {
        if left.len() < right.len() {
            return self.combine(right, left);
        }
        left.extend(right);
        left
    }

    fn finish(&self, acc: HashSet<T>) -> HashSet<T> {
        acc
    }
}

//==============================================================================
// Aggregates
//==============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct Counting;

impl<T> Collector<T> for Counting {
    type Acc = usize;
    type Output = usize;

    fn supply(&self) -> usize {
        0
    }

    fn accumulate(&self, acc: usize, _item: T) -> usize {
        acc + 1
    }

    fn combine(&self, left: usize, right: usize) -> usize {
        left + right
    }

    fn finish(&self, acc: usize) -> usize {
        acc
    }
}

/// Sums `extract(&element)` over the sequence.
pub struct Summing<F, S> {
    extract: F,
    sum: PhantomData<fn() -> S>,
}

impl<T, F, S> Collector<T> for Summing<F, S>
where
    F: Fn(&T) -> S,
    S: Default + Add<Output = S>,
{
    type Acc = S;
    type Output = S;

    fn supply(&self) -> S {
        S::default()
    }

    fn accumulate(&self, acc: S, item: T) -> S {
        acc + (self.extract)(&item)
    }

    fn combine(&self, left: S, right: S) -> S {
        left + right
    }

    fn finish(&self, acc: S) -> S {
        acc
    }
}

/// Folds with `op` starting from `identity`.
///
/// `identity` is supplied once per partition under parallel evaluation, so
/// it must be a true identity for `op`.
pub struct Reducing<T, F> {
    identity: T,
    op: F,
}

impl<T, F> Collector<T> for Reducing<T, F>
where
    T: Clone,
    F: Fn(T, T) -> T,
{
    type Acc = T;
    type Output = T;

    fn supply(&self) -> T {
        self.identity.clone()
    }

    fn accumulate(&self, acc: T, item: T) -> T {
        (self.op)(acc, item)
    }

    fn combine(&self, left: T, right: T) -> T {
        (self.op)(left, right)
    }

    fn finish(&self, acc: T) -> T {
        acc
    }
}

//==============================================================================
// Strings
//==============================================================================

/// Concatenates string-like elements, separated by `delimiter`.
#[derive(Debug, Clone, Default)]
pub struct Joining {
    delimiter: String,
}

impl<T: AsRef<str>> Collector<T> for Joining {
    // `None` until the first element, so empty elements still get delimiters.
    type Acc = Option<String>;
    type Output = String;

    fn supply(&self) -> Option<String> {
        None
    }

    fn accumulate(&self, acc: Option<String>, item: T) -> Option<String> {
        match acc {
            None => Some(item.as_ref().to_owned()),
            Some(mut joined) => {
                joined.push_str(&self.delimiter);
                joined.push_str(item.as_ref());
                Some(joined)
            }
        }
    }

    fn combine(&self, left: Option<String>, right: Option<String>) -> Option<String> {
        match (left, right) {
            (None, right) => right,
            (left, None) => left,
            (Some(mut joined), Some(right)) => {
                joined.push_str(&self.delimiter);
                joined.push_str(&right);
                Some(joined)
            }
        }
    }

    fn finish(&self, acc: Option<String>) -> String {
        acc.unwrap_or_default()
    }
}

//==============================================================================
// Constructors
//==============================================================================

pub fn to_list() -> ToList {
    ToList
}

pub fn to_set() -> ToSet {
    ToSet
}

pub fn counting() -> Counting {
    Counting
}

pub fn summing<T, S, F>(extract: F) -> Summing<F, S>
where
    F: Fn(&T) -> S,
{
    Summing {
        extract,
        sum: PhantomData,
    }
}

pub fn reducing<T, F>(identity: T, op: F) -> Reducing<T, F>
where
    F: Fn(T, T) -> T,
{
    Reducing { identity, op }
}

pub fn joining() -> Joining {
    Joining::default()
}

pub fn joining_with(delimiter: impl Into<String>) -> Joining {
    Joining {
        delimiter: delimiter.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<T, C: Collector<T>>(collector: &C, items: Vec<T>) -> C::Output {
        let acc = items
            .into_iter()
            .fold(collector.supply(), |acc, item| collector.accumulate(acc, item));
        collector.finish(acc)
    }

    fn run_split<T, C: Collector<T>>(collector: &C, mut items: Vec<T>, at: usize) -> C::Output {
        let right = items.split_off(at);
        let fold = |part: Vec<T>| {
            part.into_iter()
                .fold(collector.supply(), |acc, item| collector.accumulate(acc, item))
        };
        let left = fold(items);
        let right = fold(right);
        collector.finish(collector.combine(left, right))
    }

    #[test]
    fn test_to_list_keeps_order_across_partitions() {
        assert_eq!(run(&to_list(), vec![1, 2, 3]), vec![1, 2, 3]);
        assert_eq!(run_split(&to_list(), vec![1, 2, 3, 4], 1), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_to_set() {
        let set = run_split(&to_set(), vec!["a", "b", "a", "c", "b"], 2);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_counting() {
        assert_eq!(run(&counting(), vec!["x"; 7]), 7);
        assert_eq!(run_split(&counting(), vec![0u8; 10], 4), 10);
    }

    #[test]
    fn test_summing() {
        let lengths = summing(|s: &&str| s.len());
        assert_eq!(run(&lengths, vec!["One", "Two", "Three"]), 11);
        assert_eq!(run(&summing(|n: &i32| *n), Vec::<i32>::new()), 0);
    }

    #[test]
    fn test_reducing_uses_identity() {
        let product = reducing(1, |a: i32, b: i32| a * b);
        assert_eq!(run(&product, vec![1, 2, 3, 4, 5]), 120);
        assert_eq!(run(&product, Vec::<i32>::new()), 1);
        assert_eq!(run_split(&product, vec![1, 2, 3, 4, 5], 2), 120);
    }

    #[test]
    fn test_joining() {
        let words = vec!["One", "Two", "Three", "Four", "Two"];
        assert_eq!(run(&joining(), words.clone()), "OneTwoThreeFourTwo");
        assert_eq!(run(&joining_with(", "), words.clone()), "One, Two, Three, Four, Two");
        assert_eq!(run_split(&joining_with("-"), words, 3), "One-Two-Three-Four-Two");
    }

    #[test]
    fn test_joining_empty_partitions() {
        let joined = run_split(&joining_with("/"), vec!["a", "b"], 0);
        assert_eq!(joined, "a/b");
        assert_eq!(run(&joining_with("/"), Vec::<String>::new()), "");
        assert_eq!(run(&joining_with("/"), vec!["", ""]), "/");
    }
}
