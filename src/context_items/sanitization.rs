use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::RunError;
use crate::value::to_validator_string;

use super::{CustomSanitizer, Meta, Outcome, StandardSanitizer};

/// A catalog string transform.
///
/// Arrays are transformed element by element; any other value is rendered
/// as a string first.
#[derive(Clone)]
pub struct StandardSanitization {
    name: String,
    sanitizer: StandardSanitizer,
    options: Vec<Value>,
}

impl StandardSanitization {
    pub fn new(name: impl Into<String>, sanitizer: StandardSanitizer, options: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            sanitizer,
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[Value] {
        &self.options
    }

    pub(crate) fn run(&self, value: Option<&Value>) -> Outcome {
        let sanitized = match value {
            Some(Value::Array(items)) => Value::Array(
                items
                    .iter()
                    .map(|item| self.apply(Some(item)))
                    .collect(),
            ),
            other => self.apply(other),
        };
        Outcome::Sanitized(sanitized)
    }

    fn apply(&self, value: Option<&Value>) -> Value {
        (self.sanitizer)(&to_validator_string(value), &self.options)
    }
}

impl fmt::Debug for StandardSanitization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardSanitization")
            .field("name", &self.name)
            .field("options", &self.options)
            .finish()
    }
}

/// A user transform over the raw value.
#[derive(Clone)]
pub struct CustomSanitization {
    name: String,
    sanitizer: Arc<dyn CustomSanitizer>,
    skip_missing: bool,
}

impl CustomSanitization {
    pub fn new(name: impl Into<String>, sanitizer: Arc<dyn CustomSanitizer>) -> Self {
        Self {
            name: name.into(),
            sanitizer,
            skip_missing: false,
        }
    }

    /// A sanitizer that leaves missing fields missing instead of being
    /// called with `None`.
    pub(crate) fn skipping_missing(
        name: impl Into<String>,
        sanitizer: Arc<dyn CustomSanitizer>,
    ) -> Self {
        Self {
            skip_missing: true,
            ..Self::new(name, sanitizer)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) async fn run(
        &self,
        value: Option<&Value>,
        meta: &Meta<'_>,
    ) -> Result<Outcome, RunError> {
        if value.is_none() && self.skip_missing {
            return Ok(Outcome::Pass);
        }
        self.sanitizer
            .sanitize(value, meta)
            .await
            .map(Outcome::Sanitized)
            .map_err(|source| RunError::Sanitizer {
                name: self.name.clone(),
                location: meta.location,
                path: meta.path.to_string(),
                source,
            })
    }
}

impl fmt::Debug for CustomSanitization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomSanitization")
            .field("name", &self.name)
            .finish()
    }
}
