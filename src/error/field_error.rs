//! Field validation error types.
//!
//! This module provides [`FieldError`] for single validation failures and
//! [`FieldErrors`] for accumulating multiple errors.

use std::fmt::{self, Display};

use serde::Serialize;
use serde_json::Value;
use stillwater::prelude::*;

use crate::location::Location;

/// A single recorded validation failure.
///
/// `FieldError` captures everything a caller needs to report the failure:
/// - **location**: which part of the request held the field (absent for
///   grouped errors such as [`one_of`](crate::one_of))
/// - **path**: the concrete path, e.g. `users[1].email`
/// - **value**: the value that was checked; `None` when the field was missing
/// - **message**: human-readable description of the failure
/// - **nested_errors**: the underlying failures of a grouped validation
///
/// # Example
///
/// ```rust
/// use fieldguard::{FieldError, Location};
/// use serde_json::json;
///
/// let error = FieldError::new(Some(Location::Body), "email", "invalid email")
///     .with_value(json!("not-an-email"));
///
/// assert_eq!(error.to_string(), "body.email: invalid email");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// The location of the field, if the error belongs to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// The concrete path to the field.
    pub path: String,
    /// The value that failed validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Human-readable error message.
    pub message: String,
    /// Failures aggregated into this error.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested_errors: Vec<FieldError>,
}

impl FieldError {
    /// Creates a new error without a value or nested errors.
    pub fn new(
        location: Option<Location>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            location,
            path: path.into(),
            value: None,
            message: message.into(),
            nested_errors: Vec::new(),
        }
    }

    /// Sets the checked value and returns self for chaining.
    pub fn with_value(mut self, value: impl Into<Option<Value>>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the nested errors and returns self for chaining.
    pub fn with_nested(mut self, nested: Vec<FieldError>) -> Self {
        self.nested_errors = nested;
        self
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(location) if self.path.is_empty() => write!(f, "{}", location)?,
            Some(location) => write!(f, "{}.{}", location, self.path)?,
            None if self.path.is_empty() => write!(f, "(root)")?,
            None => write!(f, "{}", self.path)?,
        }
        write!(f, ": {}", self.message)?;

        if !self.nested_errors.is_empty() {
            write!(f, " ({} nested)", self.nested_errors.len())?;
        }

        Ok(())
    }
}

impl std::error::Error for FieldError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldError>();
    assert_sync::<FieldError>();
};

/// A non-empty collection of field errors.
///
/// `FieldErrors` wraps a `NonEmptyVec<FieldError>` so a failed
/// `Validation<T, FieldErrors>` always carries at least one error.
///
/// # Combining Errors
///
/// ```rust
/// use fieldguard::{FieldError, FieldErrors, Location};
/// use stillwater::prelude::*;
///
/// let errors1 = FieldErrors::single(FieldError::new(Some(Location::Body), "name", "required"));
/// let errors2 = FieldErrors::single(FieldError::new(Some(Location::Query), "page", "not an int"));
///
/// let combined = errors1.combine(errors2);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldErrors(NonEmptyVec<FieldError>);

impl FieldErrors {
    /// Creates a `FieldErrors` containing a single error.
    pub fn single(error: FieldError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `FieldErrors` from a vec, or `None` if the vec is empty.
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let first = errors.next()?;
        Some(errors.fold(Self::single(first), |acc, error| {
            acc.combine(Self::single(error))
        }))
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns all errors recorded for the given path.
    pub fn at_path(&self, path: &str) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.path == path).collect()
    }

    /// Returns all errors recorded in the given location.
    pub fn in_location(&self, location: Location) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.location == Some(location)).collect()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &FieldError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<FieldError>`.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0.into_vec()
    }
}

impl Semigroup for FieldErrors {
    fn combine(self, other: Self) -> Self {
        FieldErrors(self.0.combine(other.0))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}
