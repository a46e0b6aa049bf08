//! A holder that hands out a pipeline exactly once.
//!
//! Terminal operations consume a [`Sequence`](crate::Sequence) by value, so
//! direct reuse does not compile. `SequenceSlot` covers the case where a
//! pipeline is stored behind `&mut` (a struct field, a registry) and must be
//! taken at runtime: the second request reports
//! [`SequenceError::Consumed`] instead of running again.

use tracing::warn;

use crate::error::{Result, SequenceError};

#[derive(Debug)]
pub struct SequenceSlot<S> {
    sequence: Option<S>,
}

impl<S> SequenceSlot<S> {
    pub fn new(sequence: S) -> Self {
        SequenceSlot {
            sequence: Some(sequence),
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.sequence.is_none()
    }

    /// Takes the pipeline out, leaving the slot consumed.
    pub fn take(&mut self) -> Result<S> {
        match self.sequence.take() {
            Some(sequence) => Ok(sequence),
            None => {
                warn!("sequence requested after it was consumed");
                Err(SequenceError::Consumed)
            }
        }
    }

    /// Takes the pipeline and runs `terminal` on it.
    pub fn consume<R, F>(&mut self, terminal: F) -> Result<R>
    where
        F: FnOnce(S) -> R,
    {
        self.take().map(terminal)
    }
}

impl<S> From<S> for SequenceSlot<S> {
    fn from(sequence: S) -> Self {
        SequenceSlot::new(sequence)
    }
}
