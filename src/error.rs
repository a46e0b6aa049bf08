//! Error taxonomy for sequence pipelines.

use thiserror::Error;

/// Errors reported by the pipeline API.
///
/// All variants are caller-facing contract violations. None of them are
/// transient, so nothing here is worth retrying.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SequenceError {
    /// An [`Optional`](crate::Optional) was read without checking presence
    /// and the operation that produced it had no answer.
    #[error("no value present: `{operation}` produced an empty result")]
    EmptyResult { operation: &'static str },

    /// A [`SequenceSlot`](crate::SequenceSlot) was asked for a pipeline that
    /// a terminal operation already drained.
    #[error("sequence has already been consumed")]
    Consumed,

    #[error("invalid parallel configuration for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to parse parallel configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl SequenceError {
    pub fn empty_result(operation: &'static str) -> Self {
        Self::EmptyResult { operation }
    }

    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    /// True for the "empty result" condition, the one error a caller may
    /// reasonably match on and fall back from.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult { .. })
    }
}

pub type Result<T> = std::result::Result<T, SequenceError>;
