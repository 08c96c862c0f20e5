//! Unexpected failures that abort a chain run.

use crate::location::Location;
use crate::resolver::PathConflict;

/// Error type user-supplied functions fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failure that is not a validation result.
///
/// Declared validation failures are recorded as
/// [`FieldError`](crate::FieldError)s and never surface here. A `RunError`
/// means the run itself could not complete and its partial results were
/// discarded.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// A custom sanitizer returned an error.
    #[error("sanitizer '{name}' failed on {location} '{path}': {source}")]
    Sanitizer {
        name: String,
        location: Location,
        path: String,
        #[source]
        source: BoxError,
    },

    /// A sanitized value could not be written back into the request.
    #[error("cannot write sanitized value into {location}: {source}")]
    WriteBack {
        location: Location,
        #[source]
        source: PathConflict,
    },
}
