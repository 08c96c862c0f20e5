//! Aggregated validation results.
//!
//! [`validation_result`] gathers the errors of every chain already run
//! against a request into a [`ValidationReport`], which offers several views
//! of the same ordered error list.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use stillwater::Validation;

use crate::context::Context;
use crate::error::{FieldError, FieldErrors};
use crate::request::Request;

/// Options for [`ValidationReport::array_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArrayOptions {
    /// Keep only the first error recorded for each path.
    pub only_first_error: bool,
}

/// The errors of every chain run against a request, in run order.
///
/// # Example
///
/// ```rust
/// use fieldguard::{body, validation_result, ContextRunner, Request};
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut req = Request::new().with_body(json!({"email": "nope"}));
/// body("email").is_email().with_message("invalid email").run(&mut req).await.unwrap();
/// let length = fieldguard::LengthOptions {
///     min: Some(8),
///     max: None,
/// };
/// body("email").is_length(length).run(&mut req).await.unwrap();
///
/// let report = validation_result(&req);
/// assert_eq!(report.len(), 2);
/// assert_eq!(report.mapped()["email"].message, "invalid email");
/// assert_eq!(report.grouped()["email"].len(), 2);
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

/// Collects the errors of every context attached to `req`.
pub fn validation_result(req: &Request) -> ValidationReport {
    ValidationReport::from_contexts(req.contexts().iter().map(|context| context.as_ref()))
}

impl ValidationReport {
    /// Builds a report from contexts, keeping context order and recording
    /// order within each context.
    pub fn from_contexts<'a>(contexts: impl IntoIterator<Item = &'a Context>) -> Self {
        Self {
            errors: contexts
                .into_iter()
                .flat_map(|context| context.errors().iter().cloned())
                .collect(),
        }
    }

    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Returns true if no error was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Every error, in order.
    pub fn array(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn array_with(&self, options: ArrayOptions) -> Vec<FieldError> {
        if !options.only_first_error {
            return self.errors.clone();
        }
        self.mapped().into_values().collect()
    }

    /// The first error for each path, keyed by path in first-seen order.
    pub fn mapped(&self) -> IndexMap<String, FieldError> {
        let mut mapped = IndexMap::new();
        for error in &self.errors {
            mapped
                .entry(error.path.clone())
                .or_insert_with(|| error.clone());
        }
        mapped
    }

    /// Every error for each path, keyed by path in first-seen order.
    pub fn grouped(&self) -> IndexMap<String, Vec<FieldError>> {
        let mut grouped: IndexMap<String, Vec<FieldError>> = IndexMap::new();
        for error in &self.errors {
            grouped
                .entry(error.path.clone())
                .or_default()
                .push(error.clone());
        }
        grouped
    }

    /// Maps every error through `formatter`, keeping order.
    pub fn format_with<T, F>(&self, formatter: F) -> Vec<T>
    where
        F: Fn(&FieldError) -> T,
    {
        self.errors.iter().map(formatter).collect()
    }

    /// Converts into a `Validation`, failing with every error.
    pub fn into_validation(self) -> Validation<(), FieldErrors> {
        match FieldErrors::from_vec(self.errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        }
    }

    /// Converts into a `Result`, failing with every error.
    ///
    /// # Errors
    ///
    /// Returns the recorded errors if there are any.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        self.into_validation().into_result()
    }
}

impl IntoIterator for ValidationReport {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
