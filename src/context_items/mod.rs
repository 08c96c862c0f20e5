//! The steps a chain is made of.
//!
//! Every declared step is one [`ContextItem`]. Items run against a single
//! field value and report an [`Outcome`]; the runner decides what the outcome
//! means for the instance (record an error, replace the value, stop).

mod condition;
mod custom_validation;
mod sanitization;
mod standard_validation;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::Message;
use crate::error::{BoxError, RunError};
use crate::location::Location;
use crate::path::JsonPath;
use crate::request::Request;

pub use condition::{ChainCondition, CustomCondition};
pub use custom_validation::CustomValidation;
pub use sanitization::{CustomSanitization, StandardSanitization};
pub use standard_validation::StandardValidation;

/// Where the value being checked came from.
#[derive(Debug, Clone, Copy)]
pub struct Meta<'a> {
    /// The request the chain runs against.
    pub req: &'a Request,
    /// The location holding the field.
    pub location: Location,
    /// The concrete path of the field.
    pub path: &'a JsonPath,
}

/// A string check from the catalog: `(value, options) -> valid`.
pub type StandardValidator = Arc<dyn Fn(&str, &[Value]) -> bool + Send + Sync>;

/// A string transform from the catalog: `(value, options) -> new value`.
pub type StandardSanitizer = Arc<dyn Fn(&str, &[Value]) -> Value + Send + Sync>;

/// A user check over the raw value.
///
/// `Ok(false)` and `Err(_)` both count as a failure. The error's text is
/// used as the failure message unless the item carries its own.
#[async_trait]
pub trait CustomValidator: Send + Sync {
    async fn validate(&self, value: Option<&Value>, meta: &Meta<'_>) -> Result<bool, BoxError>;
}

/// A user transform over the raw value.
///
/// An error aborts the whole run with [`RunError::Sanitizer`].
#[async_trait]
pub trait CustomSanitizer: Send + Sync {
    async fn sanitize(&self, value: Option<&Value>, meta: &Meta<'_>) -> Result<Value, BoxError>;
}

#[async_trait]
impl CustomValidator for Arc<dyn CustomValidator> {
    async fn validate(&self, value: Option<&Value>, meta: &Meta<'_>) -> Result<bool, BoxError> {
        (**self).validate(value, meta).await
    }
}

#[async_trait]
impl CustomSanitizer for Arc<dyn CustomSanitizer> {
    async fn sanitize(&self, value: Option<&Value>, meta: &Meta<'_>) -> Result<Value, BoxError> {
        (**self).sanitize(value, meta).await
    }
}

/// Adapts a synchronous closure into a [`CustomValidator`].
pub(crate) struct ValidatorFn<F>(pub(crate) F);

#[async_trait]
impl<F> CustomValidator for ValidatorFn<F>
where
    F: Fn(Option<&Value>, &Meta<'_>) -> Result<bool, BoxError> + Send + Sync,
{
    async fn validate(&self, value: Option<&Value>, meta: &Meta<'_>) -> Result<bool, BoxError> {
        (self.0)(value, meta)
    }
}

/// Adapts a synchronous closure into a [`CustomSanitizer`].
pub(crate) struct SanitizerFn<F>(pub(crate) F);

#[async_trait]
impl<F> CustomSanitizer for SanitizerFn<F>
where
    F: Fn(Option<&Value>, &Meta<'_>) -> Result<Value, BoxError> + Send + Sync,
{
    async fn sanitize(&self, value: Option<&Value>, meta: &Meta<'_>) -> Result<Value, BoxError> {
        (self.0)(value, meta)
    }
}

/// What running one item against one value produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Validation passed, or the item has nothing to report.
    Pass,
    /// Validation failed. `message` is the item-level message, if any.
    Failed {
        check: String,
        message: Option<String>,
    },
    /// The value was transformed.
    Sanitized(Value),
    /// A condition failed; the remaining items must not run.
    Halt,
    /// Stop here if an error was recorded earlier for this instance.
    Bail,
}

/// One step of a chain.
#[derive(Clone)]
pub enum ContextItem {
    StandardValidation(StandardValidation),
    CustomValidation(CustomValidation),
    StandardSanitization(StandardSanitization),
    CustomSanitization(CustomSanitization),
    ChainCondition(ChainCondition),
    CustomCondition(CustomCondition),
    Bail,
}

impl ContextItem {
    /// The display name of the item.
    pub fn name(&self) -> &str {
        match self {
            ContextItem::StandardValidation(item) => item.name(),
            ContextItem::CustomValidation(item) => item.name(),
            ContextItem::StandardSanitization(item) => item.name(),
            ContextItem::CustomSanitization(item) => item.name(),
            ContextItem::ChainCondition(_) => "if",
            ContextItem::CustomCondition(_) => "if",
            ContextItem::Bail => "bail",
        }
    }

    /// True for items that can record an error.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ContextItem::StandardValidation(_) | ContextItem::CustomValidation(_)
        )
    }

    pub(crate) fn negate(&mut self) {
        match self {
            ContextItem::StandardValidation(item) => item.negate(),
            ContextItem::CustomValidation(item) => item.negate(),
            _ => {}
        }
    }

    pub(crate) fn set_message(&mut self, message: Message) {
        match self {
            ContextItem::StandardValidation(item) => item.set_message(message),
            ContextItem::CustomValidation(item) => item.set_message(message),
            _ => {}
        }
    }

    /// Runs the item against `value`.
    pub async fn run(&self, value: Option<&Value>, meta: &Meta<'_>) -> Result<Outcome, RunError> {
        match self {
            ContextItem::StandardValidation(item) => Ok(item.run(value, meta)),
            ContextItem::CustomValidation(item) => Ok(item.run(value, meta).await),
            ContextItem::StandardSanitization(item) => Ok(item.run(value)),
            ContextItem::CustomSanitization(item) => item.run(value, meta).await,
            ContextItem::ChainCondition(item) => item.run(meta).await,
            ContextItem::CustomCondition(item) => Ok(item.run(value, meta).await),
            ContextItem::Bail => Ok(Outcome::Bail),
        }
    }
}

impl fmt::Debug for ContextItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextItem::StandardValidation(item) => item.fmt(f),
            ContextItem::CustomValidation(item) => item.fmt(f),
            ContextItem::StandardSanitization(item) => item.fmt(f),
            ContextItem::CustomSanitization(item) => item.fmt(f),
            ContextItem::ChainCondition(_) => f.write_str("ChainCondition(..)"),
            ContextItem::CustomCondition(_) => f.write_str("CustomCondition(..)"),
            ContextItem::Bail => f.write_str("Bail"),
        }
    }
}
