//! Error types.
//!
//! [`FieldError`] and [`FieldErrors`] describe validation failures, which are
//! data. [`RunError`] describes failures of the run itself.

mod field_error;
mod run_error;

pub use field_error::{FieldError, FieldErrors};
pub use run_error::{BoxError, RunError};
