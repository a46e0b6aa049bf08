//! The lazy pipeline type and its stages.
//!
//! A [`Sequence`] wraps an upstream pull-based producer. Every intermediate
//! stage wraps the current producer in another adapter and returns a new
//! `Sequence`; nothing is evaluated until a terminal operation pulls.
//!
//! The second type parameter records whether the sequence is known to end.
//! Terminal operations exist only on [`Bounded`] sequences, so an infinite
//! generator cannot reach one without a `limit` stage:
//!
//! ```compile_fail
//! use sequence_pipeline::iterate;
//!
//! // No `limit`: an unbounded sequence has no `count`.
//! let n = iterate(1u64, |i| i + 1).count();
//! ```

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::iter::{Filter, FlatMap, Inspect, Map, Skip, Sum, Take};
use std::marker::PhantomData;

use itertools::{Itertools, Unique};

use crate::collector::Collector;
use crate::optional::Optional;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Bounded {}
    impl Sealed for super::Unbounded {}
}

/// Marker for whether a sequence is known to terminate.
pub trait Boundedness: sealed::Sealed {}

/// The sequence is finite: built from a finite source or cut by `limit`.
#[derive(Debug, Clone, Copy)]
pub enum Bounded {}

/// The sequence may never end (`iterate`, `generate`).
#[derive(Debug, Clone, Copy)]
pub enum Unbounded {}

impl Boundedness for Bounded {}
impl Boundedness for Unbounded {}

/// A lazy, single-pass pipeline over the elements produced by `I`.
///
/// Terminal operations take `self` by value, so a drained sequence cannot be
/// touched again.
#[must_use = "sequences are lazy and do nothing until a terminal operation runs"]
pub struct Sequence<I, B = Bounded> {
    iter: I,
    bound: PhantomData<B>,
}

impl<I, B> Sequence<I, B> {
    pub(crate) fn new(iter: I) -> Self {
        Sequence {
            iter,
            bound: PhantomData,
        }
    }
}

impl<I: fmt::Debug, B> fmt::Debug for Sequence<I, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence").field("iter", &self.iter).finish()
    }
}

//==============================================================================
// Intermediate stages: lazy, available regardless of boundedness
//==============================================================================

impl<I, B> Sequence<I, B>
where
    I: Iterator,
    B: Boundedness,
{
    /// Keeps the elements for which `predicate` holds.
    pub fn filter<P>(self, predicate: P) -> Sequence<Filter<I, P>, B>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Sequence::new(self.iter.filter(predicate))
    }

    pub fn map<U, F>(self, transform: F) -> Sequence<Map<I, F>, B>
    where
        F: FnMut(I::Item) -> U,
    {
        Sequence::new(self.iter.map(transform))
    }

    /// Replaces each element with the sub-sequence `to_sequence` returns and
    /// concatenates the results in source order, one level deep.
    ///
    /// Sub-sequences must be [`Bounded`]; an open-ended one is rejected:
    ///
    /// ```compile_fail
    /// use sequence_pipeline::{iterate, of};
    ///
    /// let n = of([1u8]).flat_map(|x| iterate(x, |i| i + 1)).count();
    /// ```
    ///
    /// ```compile_fail
    /// use sequence_pipeline::of;
    ///
    /// let n = of([1u8]).flat_map(|x| x..).count();
    /// ```
    pub fn flat_map<J, F>(self, to_sequence: F) -> Sequence<FlatMap<I, Sequence<J, Bounded>, F>, B>
    where
        J: Iterator,
        F: FnMut(I::Item) -> Sequence<J, Bounded>,
    {
        Sequence::new(self.iter.flat_map(to_sequence))
    }

    /// Drops elements equal to one already emitted. First occurrence wins.
    ///
    /// The seen-set grows for the lifetime of the stage.
    pub fn distinct(self) -> Sequence<Unique<I>, B>
    where
        I::Item: Eq + Hash + Clone,
    {
        Sequence::new(self.iter.unique())
    }

    /// Emits at most `n` elements, then stops pulling from upstream.
    ///
    /// This is the only way to bound an infinite sequence.
    pub fn limit(self, n: usize) -> Sequence<Take<I>, Bounded> {
        Sequence::new(self.iter.take(n))
    }

    pub fn skip(self, n: usize) -> Sequence<Skip<I>, B> {
        Sequence::new(self.iter.skip(n))
    }

    /// Calls `observer` on each element as it passes. Diagnostic only: an
    /// element that is never pulled is never observed.
    pub fn peek<F>(self, observer: F) -> Sequence<Inspect<I, F>, B>
    where
        F: FnMut(&I::Item),
    {
        Sequence::new(self.iter.inspect(observer))
    }
}

//==============================================================================
// Buffering stages and terminal operations: bounded sequences only
//==============================================================================

impl<I> Sequence<I, Bounded>
where
    I: Iterator,
{
    pub(crate) fn into_inner(self) -> I {
        self.iter
    }

    /// Buffers every element and re-emits them in ascending order.
    pub fn sorted(self) -> Sequence<std::vec::IntoIter<I::Item>, Bounded>
    where
        I::Item: Ord,
    {
        Sequence::new(self.iter.sorted())
    }

    /// Like [`Sequence::sorted`], ordered by `compare`. Stable.
    pub fn sorted_by<F>(self, compare: F) -> Sequence<std::vec::IntoIter<I::Item>, Bounded>
    where
        F: FnMut(&I::Item, &I::Item) -> Ordering,
    {
        Sequence::new(self.iter.sorted_by(compare))
    }

    pub fn count(self) -> usize {
        self.iter.count()
    }

    /// Left fold starting at `seed`.
    pub fn reduce<F>(self, seed: I::Item, combine: F) -> I::Item
    where
        F: FnMut(I::Item, I::Item) -> I::Item,
    {
        self.iter.fold(seed, combine)
    }

    /// Left fold seeded with the first element; absent on an empty sequence.
    pub fn reduce_with<F>(self, combine: F) -> Optional<I::Item>
    where
        F: FnMut(I::Item, I::Item) -> I::Item,
    {
        Optional::new(self.iter.reduce(combine), "reduce_with")
    }

    pub fn find_first(mut self) -> Optional<I::Item> {
        Optional::new(self.iter.next(), "find_first")
    }

    /// Any surviving element. Sequential evaluation always picks the first.
    pub fn find_any(mut self) -> Optional<I::Item> {
        Optional::new(self.iter.next(), "find_any")
    }

    /// True when every element satisfies `predicate`; true when empty.
    pub fn all_match<P>(mut self, predicate: P) -> bool
    where
        P: FnMut(I::Item) -> bool,
    {
        self.iter.all(predicate)
    }

    /// True when some element satisfies `predicate`; false when empty.
    pub fn any_match<P>(mut self, predicate: P) -> bool
    where
        P: FnMut(I::Item) -> bool,
    {
        self.iter.any(predicate)
    }

    /// True when no element satisfies `predicate`; true when empty.
    pub fn none_match<P>(mut self, predicate: P) -> bool
    where
        P: FnMut(I::Item) -> bool,
    {
        !self.iter.any(predicate)
    }

    pub fn collect_to_list(self) -> Vec<I::Item> {
        self.iter.collect()
    }

    pub fn collect_to_set(self) -> HashSet<I::Item>
    where
        I::Item: Eq + Hash,
    {
        self.iter.collect()
    }

    pub fn distinct_count(self) -> usize
    where
        I::Item: Eq + Hash,
    {
        self.collect_to_set().len()
    }

    /// Runs a [`Collector`] over the sequence.
    pub fn collect<C>(self, collector: C) -> C::Output
    where
        C: Collector<I::Item>,
    {
        let acc = self
            .iter
            .fold(collector.supply(), |acc, item| collector.accumulate(acc, item));
        collector.finish(acc)
    }

    /// Sum of all elements; zero for an empty sequence.
    pub fn sum(self) -> I::Item
    where
        I::Item: Sum<I::Item>,
    {
        self.iter.sum()
    }

    pub fn max(self) -> Optional<I::Item>
    where
        I::Item: Ord,
    {
        Optional::new(self.iter.max(), "max")
    }

    pub fn min(self) -> Optional<I::Item>
    where
        I::Item: Ord,
    {
        Optional::new(self.iter.min(), "min")
    }

    pub fn max_by<F>(self, compare: F) -> Optional<I::Item>
    where
        F: FnMut(&I::Item, &I::Item) -> Ordering,
    {
        Optional::new(self.iter.max_by(compare), "max_by")
    }

    pub fn min_by<F>(self, compare: F) -> Optional<I::Item>
    where
        F: FnMut(&I::Item, &I::Item) -> Ordering,
    {
        Optional::new(self.iter.min_by(compare), "min_by")
    }

    /// Concatenates the elements in encounter order, separated by
    /// `delimiter`.
    pub fn join_strings(mut self, delimiter: &str) -> String
    where
        I::Item: fmt::Display,
    {
        self.iter.join(delimiter)
    }

    pub fn concat_strings(self) -> String
    where
        I::Item: fmt::Display,
    {
        self.join_strings("")
    }

    /// Calls `action` once per element, in encounter order.
    pub fn for_each<F>(self, action: F)
    where
        F: FnMut(I::Item),
    {
        self.iter.for_each(action)
    }
}

impl<I> IntoIterator for Sequence<I, Bounded>
where
    I: Iterator,
{
    type Item = I::Item;
    type IntoIter = I;

    fn into_iter(self) -> Self::IntoIter {
        self.iter
    }
}

#[cfg(test)]
mod tests {
    use crate::collector;
    use crate::source::{empty, from_collection, iterate, of, range, range_closed};

    fn numbers() -> Vec<i32> {
        vec![1, 2, 3, 4, 5]
    }

    fn words() -> Vec<&'static str> {
        vec!["One", "Two", "Three", "Four", "Two"]
    }

    #[test]
    fn test_filter_then_limit() {
        let result = from_collection(numbers())
            .filter(|n| *n > 3)
            .limit(1)
            .collect_to_list();
        assert_eq!(result, vec![4]);
    }

    #[test]
    fn test_filter_then_skip() {
        let result = from_collection(numbers())
            .filter(|n| *n > 2)
            .skip(2)
            .collect_to_list();
        assert_eq!(result, vec![5]);
    }

    #[test]
    fn test_even_counts_over_ranges() {
        assert_eq!(range_closed(1, 100).filter(|n| n % 2 == 0).count(), 50);
        assert_eq!(range(1, 100).filter(|n| n % 2 == 0).count(), 49);
    }

    #[test]
    fn test_map_squares() {
        let squares = from_collection(numbers()).map(|n| n * n).collect_to_list();
        assert_eq!(squares, vec![1, 4, 9, 16, 25]);
    }

    #[test]
    fn test_reduce_forms() {
        assert_eq!(from_collection(numbers()).reduce(1, |a, b| a * b), 120);
        assert_eq!(from_collection(numbers()).reduce(0, |a, b| a + b), 15);
        assert_eq!(
            from_collection(numbers()).reduce_with(|a, b| a + b).get().unwrap(),
            15
        );
        assert!(empty::<i32>().reduce_with(|a, b| a + b).is_empty());
        assert_eq!(of([9]).reduce_with(|a, b| a + b).get().unwrap(), 9);
    }

    #[test]
    fn test_reduce_is_left_fold() {
        let folded = of(["a", "b", "c"])
            .map(String::from)
            .reduce(String::new(), |acc, s| acc + &s);
        assert_eq!(folded, "abc");

        let subtracted = of([10, 3, 2]).reduce_with(|a, b| a - b);
        assert_eq!(subtracted.get().unwrap(), 5);
    }

    #[test]
    fn test_max_min_via_reduce_and_direct() {
        assert_eq!(from_collection(numbers()).reduce_with(i32::max).get().unwrap(), 5);
        assert_eq!(from_collection(numbers()).reduce_with(i32::min).get().unwrap(), 1);
        assert_eq!(from_collection(numbers()).max().or_else(1), 5);
        assert_eq!(from_collection(numbers()).min().get().unwrap(), 1);
        assert!(empty::<i32>().max().is_empty());
        assert!(empty::<i32>().min().get().unwrap_err().is_empty_result());
    }

    #[test]
    fn test_max_by_comparator() {
        let longest = from_collection(words()).max_by(|a, b| a.len().cmp(&b.len()));
        assert_eq!(longest.get().unwrap(), "Three");

        let shortest = from_collection(words()).min_by(|a, b| a.len().cmp(&b.len()));
        assert_eq!(shortest.get().unwrap(), "One");
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        assert_eq!(from_collection(numbers()).sum(), 15);
        assert_eq!(empty::<i64>().sum(), 0);
    }

    #[test]
    fn test_find_first_and_any() {
        assert_eq!(from_collection(numbers()).find_first().get().unwrap(), 1);
        assert_eq!(
            from_collection(numbers()).filter(|n| *n > 2).find_any().get().unwrap(),
            3
        );

        let missing = empty::<i32>().find_first();
        match missing.get() {
            Err(err) => assert_eq!(
                err.to_string(),
                "no value present: `find_first` produced an empty result"
            ),
            Ok(value) => panic!("expected empty result, got {}", value),
        }
    }

    #[test]
    fn test_matchers() {
        let upper: Vec<String> = from_collection(words())
            .map(|w| w.to_uppercase())
            .collect_to_list();

        assert!(!from_collection(&upper).all_match(|w| w.contains('T')));
        assert!(from_collection(&upper).any_match(|w| w.contains('T')));
        assert!(!from_collection(&upper).none_match(|w| w.contains('T')));
    }

    #[test]
    fn test_matchers_on_empty_sequence() {
        assert!(empty::<i32>().all_match(|_| false));
        assert!(empty::<i32>().none_match(|_| true));
        assert!(!empty::<i32>().any_match(|_| true));
    }

    #[test]
    fn test_distinct_keeps_first_occurrence() {
        let distinct = from_collection(words()).distinct().collect_to_list();
        assert_eq!(distinct, vec!["One", "Two", "Three", "Four"]);
        assert_eq!(from_collection(words()).distinct().count(), 4);
        assert_eq!(from_collection(words()).distinct_count(), 4);
    }

    #[test]
    fn test_flat_map_unique_characters() {
        let unique: String = from_collection(words())
            .map(|w| w.to_uppercase())
            .flat_map(|w| from_collection(w.chars().collect::<Vec<_>>()))
            .distinct()
            .concat_strings();
        assert_eq!(unique, "ONETWHRFU");
    }

    #[test]
    fn test_flat_map_accepts_sequences() {
        let flattened = of([1, 2, 3])
            .flat_map(|n| range(0, n))
            .collect_to_list();
        assert_eq!(flattened, vec![0, 0, 1, 0, 1, 2]);
    }

    #[test]
    fn test_flat_map_over_bounded_sub_sequences() {
        let nested = of([3, 5])
            .flat_map(|n| iterate(n, |i| i + 1).limit(2))
            .collect_to_list();
        assert_eq!(nested, vec![3, 4, 5, 6]);

        let odds = of([4, 6])
            .flat_map(|n| range(0, n).filter(|i| i % 2 == 1))
            .collect_to_list();
        assert_eq!(odds, vec![1, 3, 1, 3, 5]);
    }

    #[test]
    fn test_peek_observes_each_stage() {
        let mut log = Vec::new();
        let result = of(["EURO/INR", "USD/AUD", "USD/GBP", "USD/EURO"])
            .filter(|e| e.len() > 7)
            .peek(|e| log.push(format!("Filtered value: {}", e)))
            .map(|e| e.to_lowercase())
            .collect_to_list();

        assert_eq!(result, vec!["euro/inr", "usd/euro"]);
        assert_eq!(log, vec!["Filtered value: EURO/INR", "Filtered value: USD/EURO"]);
    }

    #[test]
    fn test_stages_are_lazy() {
        let mut pulled = 0;
        let first = range_closed(1, 1_000_000)
            .peek(|_| pulled += 1)
            .filter(|n| n % 7 == 0)
            .find_first();

        assert_eq!(first.get().unwrap(), 7);
        assert_eq!(pulled, 7);
    }

    #[test]
    fn test_limit_bounds_iterate() {
        let mut steps = 0u64;
        let taken = iterate(1u64, |i| {
            steps += 1;
            i + 1
        })
        .limit(1000)
        .collect_to_list();

        assert_eq!(taken.len(), 1000);
        assert_eq!(taken.last(), Some(&1000));
        assert_eq!(steps, 999);
    }

    #[test]
    fn test_unbounded_stages_stay_lazy() {
        let odds = iterate(0u32, |i| i + 1)
            .filter(|i| i % 2 == 1)
            .map(|i| i * 10)
            .skip(1)
            .limit(3)
            .collect_to_list();
        assert_eq!(odds, vec![30, 50, 70]);
    }

    #[test]
    fn test_sorted() {
        assert_eq!(of([3, 1, 2]).sorted().collect_to_list(), vec![1, 2, 3]);
        let by_len = from_collection(words())
            .sorted_by(|a, b| a.len().cmp(&b.len()))
            .collect_to_list();
        assert_eq!(by_len, vec!["One", "Two", "Two", "Four", "Three"]);
    }

    #[test]
    fn test_join_and_concat() {
        assert_eq!(from_collection(words()).concat_strings(), "OneTwoThreeFourTwo");
        assert_eq!(from_collection(words()).join_strings(", "), "One, Two, Three, Four, Two");
        assert_eq!(empty::<&str>().join_strings(", "), "");
        let folded = from_collection(words())
            .map(String::from)
            .reduce(String::new(), |a, b| a + &b);
        assert_eq!(folded, "OneTwoThreeFourTwo");
    }

    #[test]
    fn test_collect_with_collectors() {
        assert_eq!(from_collection(numbers()).collect(collector::reducing(0, |a, b| a + b)), 15);
        assert_eq!(from_collection(numbers()).collect(collector::summing(|n: &i32| *n)), 15);
        assert_eq!(from_collection(words()).distinct().collect(collector::counting()), 4);
        assert_eq!(from_collection(words()).collect(collector::joining()), "OneTwoThreeFourTwo");
    }

    #[test]
    fn test_collect_to_set() {
        let set = from_collection(words()).collect_to_set();
        assert_eq!(set.len(), 4);
        assert!(set.contains("Three"));
    }

    #[test]
    fn test_for_each_in_order() {
        let mut seen = Vec::new();
        from_collection(numbers()).map(|n| n * 2).for_each(|n| seen.push(n));
        assert_eq!(seen, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_into_iter() {
        let mut total = 0;
        for n in range_closed(1, 4) {
            total += n;
        }
        assert_eq!(total, 10);
    }
}
