//! Worker-pool settings for the parallel evaluation strategy.

use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SequenceError};
use crate::parallel::WorkerPool;

/// How [`Sequence::parallel_with`](crate::Sequence::parallel_with) splits and
/// schedules work.
///
/// Missing fields fall back to [`ParallelConfig::default`]:
///
/// ```
/// use sequence_pipeline::ParallelConfig;
///
/// let config = ParallelConfig::from_toml_str("workers = 2\nmin_len = 64").unwrap();
/// assert_eq!(config.workers, 2);
/// assert_eq!(config.min_len, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallelConfig {
    /// Threads in the dedicated pool.
    pub workers: usize,
    /// Smallest partition a worker is handed.
    pub min_len: usize,
    /// Worker threads are named `{thread_name}-{index}`.
    pub thread_name: String,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        ParallelConfig {
            workers: num_cpus::get(),
            min_len: 1,
            thread_name: "sequence-worker".to_string(),
        }
    }
}

impl ParallelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ParallelConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(SequenceError::invalid_config("workers", "must be at least 1"));
        }
        if self.min_len == 0 {
            return Err(SequenceError::invalid_config("min_len", "must be at least 1"));
        }
        if self.thread_name.trim().is_empty() {
            return Err(SequenceError::invalid_config("thread_name", "must not be empty"));
        }
        Ok(())
    }

    /// Starts a worker pool that can evaluate any number of pipelines.
    pub fn build_pool(&self) -> Result<WorkerPool> {
        self.validate()?;
        let prefix = self.thread_name.clone();
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(move |index| format!("{}-{}", prefix, index))
            .build()?;
        debug!(workers = self.workers, min_len = self.min_len, "started dedicated worker pool");
        Ok(WorkerPool::new(pool, self.min_len))
    }
}
