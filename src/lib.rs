//! # Sequence Pipeline
//!
//! Lazy, pull-based sequence pipelines over in-memory collections.
//!
//! A pipeline starts from a source, threads through any number of lazy
//! intermediate stages, and ends with exactly one terminal operation that
//! pulls the elements through and produces a result.
//!
//! ```
//! use sequence_pipeline::{from_collection, range_closed};
//!
//! let numbers = vec![1, 2, 3, 4, 5];
//! let squares = from_collection(&numbers).map(|n| n * n).collect_to_list();
//! assert_eq!(squares, vec![1, 4, 9, 16, 25]);
//!
//! let evens = range_closed(1, 100).filter(|n| n % 2 == 0).count();
//! assert_eq!(evens, 50);
//! ```
//!
//! ## Building Blocks
//!
//! 1. **Sources** - [`from_collection`], [`of`], [`seq!`], [`empty`],
//!    [`range`], [`range_closed`], [`iterate`], [`generate`]
//! 2. **Intermediate stages** - `filter`, `map`, `flat_map`, `distinct`,
//!    `limit`, `skip`, `peek`, `sorted`
//! 3. **Terminal operations** - `count`, `reduce`, `reduce_with`, `sum`,
//!    `max`, `min`, `find_first`, `find_any`, `all_match`, `any_match`,
//!    `none_match`, `collect_to_list`, `collect_to_set`, `collect`,
//!    `join_strings`, `for_each`
//! 4. **Parallel strategy** - [`Sequence::parallel`],
//!    [`Sequence::parallel_with`] and [`Sequence::parallel_in`] hand a
//!    bounded pipeline to a rayon worker pool behind the same terminal
//!    contract
//! 5. **Single use** - terminal operations consume the sequence;
//!    [`SequenceSlot`] reports reuse at runtime when a pipeline is stored
//!
//! ## Results That May Be Empty
//!
//! Operations with no answer on an empty sequence return [`Optional`].
//! Reading an absent value through [`Optional::get`] yields
//! [`SequenceError::EmptyResult`]:
//!
//! ```
//! use sequence_pipeline::{empty, SequenceError};
//!
//! let first = empty::<i32>().find_first();
//! assert!(matches!(first.get(), Err(SequenceError::EmptyResult { .. })));
//! ```
//!
//! ## Key Dependencies
//!
//! - `itertools` - `unique`, `sorted` and `join` behind `distinct`,
//!   `sorted` and `join_strings`
//! - `rayon` - worker pool for the parallel strategy
//! - `dashmap` - shared seen-set for parallel `distinct`
//! - `thiserror` - [`SequenceError`]
//! - `serde` / `toml` - [`ParallelConfig`] loading
//! - `tracing` - debug events around parallel evaluation

pub mod collector;
pub mod config;
pub mod error;
pub mod optional;
pub mod parallel;
pub mod sequence;
pub mod slot;
pub mod source;
pub mod stage;

pub use collector::Collector;
pub use config::ParallelConfig;
pub use error::{Result, SequenceError};
pub use optional::Optional;
pub use parallel::{ParSequence, WorkerPool};
pub use sequence::{Bounded, Boundedness, Sequence, Unbounded};
pub use slot::SequenceSlot;
pub use source::{empty, from_collection, generate, iterate, of, range, range_closed};
