//! `Optional<T>`: the result of terminal operations that may have no answer.

use crate::error::{Result, SequenceError};

/// Zero or one value, remembering which operation produced it.
///
/// Reading the value through [`Optional::get`] on an absent result is an
/// error, never a silent default. Use [`Optional::or_else`] or a presence
/// check when an empty sequence is an expected outcome.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Optional<T> {
    value: Option<T>,
    operation: &'static str,
}

impl<T> Optional<T> {
    pub(crate) fn new(value: Option<T>, operation: &'static str) -> Self {
        Optional { value, operation }
    }

    pub fn of(value: T) -> Self {
        Optional::new(Some(value), "of")
    }

    pub fn empty() -> Self {
        Optional::new(None, "empty")
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Name of the terminal operation this result came from.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Returns the value, or `EmptyResult` naming the producing operation.
    pub fn get(self) -> Result<T> {
        let operation = self.operation;
        self.value
            .ok_or_else(|| SequenceError::empty_result(operation))
    }

    pub fn or_else(self, fallback: T) -> T {
        self.value.unwrap_or(fallback)
    }

    pub fn or_else_get<F>(self, fallback: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.value.unwrap_or_else(fallback)
    }

    /// Runs `action` with the value only if one is present.
    pub fn if_present<F>(self, action: F)
    where
        F: FnOnce(T),
    {
        if let Some(value) = self.value {
            action(value);
        }
    }

    pub fn map<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        Optional::new(self.value.map(f), self.operation)
    }

    pub fn filter<P>(self, predicate: P) -> Optional<T>
    where
        P: FnOnce(&T) -> bool,
    {
        Optional::new(self.value.filter(predicate), self.operation)
    }

    pub fn as_ref(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_option(self) -> Option<T> {
        self.value
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(optional: Optional<T>) -> Self {
        optional.value
    }
}
