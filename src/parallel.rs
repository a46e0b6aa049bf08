//! Parallel evaluation strategy.
//!
//! A bounded [`Sequence`] switches to this strategy through
//! [`Sequence::parallel`] (rayon's global pool) or
//! [`Sequence::parallel_with`] (a dedicated pool built from
//! [`ParallelConfig`]). The upstream is drained into an indexed buffer, which
//! rayon splits into balanced partitions; each partition is evaluated by a
//! worker and the partial results are merged.
//!
//! Because the merge order depends on how the work was split:
//! - the seed passed to [`ParSequence::reduce`] must be the identity of an
//!   associative `combine`;
//! - [`ParSequence::find_any`] and [`ParSequence::for_each`] make no ordering
//!   promise;
//! - [`ParSequence::collect_to_list`] and [`ParSequence::find_first`] still
//!   follow encounter order.
//!
//! ```
//! use sequence_pipeline::iterate;
//!
//! let total = iterate(1i64, |i| i + 1).limit(1000).parallel().reduce(0, |a, b| a + b);
//! assert_eq!(total, 500_500);
//! ```

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::iter::Sum;
use std::sync::Arc;

use dashmap::DashSet;
use rayon::iter::MinLen;
use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::debug;

use crate::collector::Collector;
use crate::config::ParallelConfig;
use crate::error::Result;
use crate::optional::Optional;
use crate::sequence::{Bounded, Sequence};
use crate::source::from_collection;

/// The splittable buffer a parallel pipeline starts from.
pub type Partitioned<T> = MinLen<rayon::vec::IntoIter<T>>;

impl<I> Sequence<I, Bounded>
where
    I: Iterator,
    I::Item: Send,
{
    /// Continues the pipeline on rayon's global worker pool.
    pub fn parallel(self) -> ParSequence<Partitioned<I::Item>> {
        self.partition(None, 1)
    }

    /// Continues the pipeline on a dedicated pool built from `config`.
    pub fn parallel_with(self, config: &ParallelConfig) -> Result<ParSequence<Partitioned<I::Item>>> {
        let pool = config.build_pool()?;
        Ok(self.parallel_in(&pool))
    }

    /// Continues the pipeline on an already running pool.
    pub fn parallel_in(self, pool: &WorkerPool) -> ParSequence<Partitioned<I::Item>> {
        self.partition(Some(Arc::clone(&pool.pool)), pool.min_len)
    }

    fn partition(self, pool: Option<Arc<ThreadPool>>, min_len: usize) -> ParSequence<Partitioned<I::Item>> {
        let items: Vec<I::Item> = self.into_inner().collect();
        debug!(elements = items.len(), min_len, "buffered sequence for parallel evaluation");
        ParSequence {
            iter: items.into_par_iter().with_min_len(min_len),
            pool,
        }
    }
}

/// A running worker pool plus the smallest partition it hands out.
///
/// Cloning shares the same threads.
#[derive(Clone)]
pub struct WorkerPool {
    pool: Arc<ThreadPool>,
    min_len: usize,
}

impl WorkerPool {
    pub(crate) fn new(pool: ThreadPool, min_len: usize) -> Self {
        WorkerPool {
            pool: Arc::new(pool),
            min_len,
        }
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers())
            .field("min_len", &self.min_len)
            .finish()
    }
}

/// A pipeline evaluated by a pool of workers.
#[must_use = "sequences are lazy and do nothing until a terminal operation runs"]
pub struct ParSequence<P> {
    iter: P,
    pool: Option<Arc<ThreadPool>>,
}

impl<P> fmt::Debug for ParSequence<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParSequence")
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

//==============================================================================
// Intermediate stages
//==============================================================================

impl<P> ParSequence<P>
where
    P: ParallelIterator,
{
    pub fn filter<F>(self, predicate: F) -> ParSequence<rayon::iter::Filter<P, F>>
    where
        F: Fn(&P::Item) -> bool + Sync + Send,
    {
        let iter = self.iter.filter(predicate);
        ParSequence { iter, pool: self.pool }
    }

    pub fn map<R, F>(self, transform: F) -> ParSequence<rayon::iter::Map<P, F>>
    where
        F: Fn(P::Item) -> R + Sync + Send,
        R: Send,
    {
        let iter = self.iter.map(transform);
        ParSequence { iter, pool: self.pool }
    }

    /// Each element's sub-sequence is drained sequentially by the worker that
    /// owns the element.
    pub fn flat_map<J, F>(self, to_sequence: F) -> ParSequence<rayon::iter::FlatMapIter<P, F>>
    where
        F: Fn(P::Item) -> Sequence<J, Bounded> + Sync + Send,
        J: Iterator,
        J::Item: Send,
    {
        let iter = self.iter.flat_map_iter(to_sequence);
        ParSequence { iter, pool: self.pool }
    }

    pub fn peek<F>(self, observer: F) -> ParSequence<rayon::iter::Inspect<P, F>>
    where
        F: Fn(&P::Item) + Sync + Send,
    {
        let iter = self.iter.inspect(observer);
        ParSequence { iter, pool: self.pool }
    }

    /// Drops duplicates using a seen-set shared by all workers.
    ///
    /// Exactly one of each group of equal elements survives, but which one
    /// depends on scheduling.
    pub fn distinct(self) -> ParSequence<impl ParallelIterator<Item = P::Item>>
    where
        P::Item: Eq + Hash + Clone + Sync,
    {
        let seen = DashSet::new();
        let iter = self.iter.filter(move |item| seen.insert(item.clone()));
        ParSequence { iter, pool: self.pool }
    }

    /// Returns to sequential evaluation, keeping encounter order.
    pub fn sequential(self) -> Sequence<std::vec::IntoIter<P::Item>, Bounded> {
        from_collection(self.collect_to_list())
    }
}

//==============================================================================
// Terminal operations
//==============================================================================

impl<P> ParSequence<P>
where
    P: ParallelIterator,
{
    fn evaluate<R, F>(self, operation: &'static str, terminal: F) -> R
    where
        F: FnOnce(P) -> R + Send,
        R: Send,
    {
        let ParSequence { iter, pool } = self;
        match pool {
            Some(pool) => {
                debug!(operation, workers = pool.current_num_threads(), "parallel evaluation on dedicated pool");
                pool.install(move || terminal(iter))
            }
            None => {
                debug!(operation, workers = rayon::current_num_threads(), "parallel evaluation on global pool");
                terminal(iter)
            }
        }
    }

    pub fn count(self) -> usize {
        self.evaluate("count", |iter| iter.count())
    }

    /// Reduces every partition from `identity` and merges the partials with
    /// `combine`. `combine` must be associative and `identity` neutral for it.
    pub fn reduce<F>(self, identity: P::Item, combine: F) -> P::Item
    where
        P::Item: Clone + Sync,
        F: Fn(P::Item, P::Item) -> P::Item + Sync + Send,
    {
        self.evaluate("reduce", move |iter| iter.reduce(|| identity.clone(), combine))
    }

    pub fn reduce_with<F>(self, combine: F) -> Optional<P::Item>
    where
        F: Fn(P::Item, P::Item) -> P::Item + Sync + Send,
    {
        let reduced = self.evaluate("reduce_with", move |iter| iter.reduce_with(combine));
        Optional::new(reduced, "reduce_with")
    }

    pub fn sum(self) -> P::Item
    where
        P::Item: Sum<P::Item>,
    {
        self.evaluate("sum", |iter| iter.sum::<P::Item>())
    }

    pub fn max(self) -> Optional<P::Item>
    where
        P::Item: Ord,
    {
        Optional::new(self.evaluate("max", |iter| iter.max()), "max")
    }

    pub fn min(self) -> Optional<P::Item>
    where
        P::Item: Ord,
    {
        Optional::new(self.evaluate("min", |iter| iter.min()), "min")
    }

    pub fn max_by<F>(self, compare: F) -> Optional<P::Item>
    where
        F: Fn(&P::Item, &P::Item) -> Ordering + Sync + Send,
    {
        Optional::new(self.evaluate("max_by", move |iter| iter.max_by(compare)), "max_by")
    }

    pub fn min_by<F>(self, compare: F) -> Optional<P::Item>
    where
        F: Fn(&P::Item, &P::Item) -> Ordering + Sync + Send,
    {
        Optional::new(self.evaluate("min_by", move |iter| iter.min_by(compare)), "min_by")
    }

    /// First element in encounter order, regardless of scheduling.
    pub fn find_first(self) -> Optional<P::Item> {
        Optional::new(self.evaluate("find_first", |iter| iter.find_first(|_| true)), "find_first")
    }

    /// Whichever element a worker reaches first.
    pub fn find_any(self) -> Optional<P::Item> {
        Optional::new(self.evaluate("find_any", |iter| iter.find_any(|_| true)), "find_any")
    }

    pub fn all_match<F>(self, predicate: F) -> bool
    where
        F: Fn(P::Item) -> bool + Sync + Send,
    {
        self.evaluate("all_match", move |iter| iter.all(predicate))
    }

    pub fn any_match<F>(self, predicate: F) -> bool
    where
        F: Fn(P::Item) -> bool + Sync + Send,
    {
        self.evaluate("any_match", move |iter| iter.any(predicate))
    }

    pub fn none_match<F>(self, predicate: F) -> bool
    where
        F: Fn(P::Item) -> bool + Sync + Send,
    {
        !self.evaluate("none_match", move |iter| iter.any(predicate))
    }

    /// Calls `action` once per element, in no particular order.
    pub fn for_each<F>(self, action: F)
    where
        F: Fn(P::Item) + Sync + Send,
    {
        self.evaluate("for_each", move |iter| iter.for_each(action))
    }

    pub fn collect_to_list(self) -> Vec<P::Item> {
        self.evaluate("collect_to_list", |iter| iter.collect())
    }

    pub fn collect_to_set(self) -> HashSet<P::Item>
    where
        P::Item: Eq + Hash,
    {
        self.evaluate("collect_to_set", |iter| iter.collect())
    }

    pub fn distinct_count(self) -> usize
    where
        P::Item: Eq + Hash,
    {
        self.collect_to_set().len()
    }

    /// Folds each partition with `collector` and merges the partials with
    /// [`Collector::combine`].
    pub fn collect<C>(self, collector: C) -> C::Output
    where
        C: Collector<P::Item> + Sync + Send,
        C::Acc: Send,
        C::Output: Send,
    {
        self.evaluate("collect", move |iter| {
            let acc = iter
                .fold(|| collector.supply(), |acc, item| collector.accumulate(acc, item))
                .reduce(|| collector.supply(), |left, right| collector.combine(left, right));
            collector.finish(acc)
        })
    }
}
