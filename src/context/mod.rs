//! Runtime record of a declared chain.
//!
//! A [`Context`] is produced by [`ContextBuilder::build`] every time a chain
//! runs. Its shape (fields, locations, stack, optional rules, default
//! message) is fixed at build time; the runner then fills in the resolved
//! [`FieldInstance`]s and the recorded [`FieldError`]s.

mod builder;
mod instance;
mod message;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context_items::ContextItem;
use crate::error::FieldError;
use crate::location::Location;
use crate::path::PathPattern;
use crate::value::is_falsy;

pub use builder::ContextBuilder;
pub use instance::FieldInstance;
pub use message::Message;

/// Rules deciding which values make a field count as absent.
///
/// The default skips only missing fields. `nullable` also skips `null`;
/// `check_falsy` skips every falsy value (`null`, `false`, `0`, `""`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionalOptions {
    /// Skip any falsy value.
    pub check_falsy: bool,
    /// Skip `null` as well as missing values.
    pub nullable: bool,
}

impl OptionalOptions {
    /// Skips missing and `null` values.
    pub fn allow_null() -> Self {
        Self {
            nullable: true,
            ..Self::default()
        }
    }

    /// Skips every falsy value.
    pub fn allow_falsy() -> Self {
        Self {
            check_falsy: true,
            ..Self::default()
        }
    }

    /// Returns true if a field holding `value` should be skipped.
    pub fn skips(&self, value: Option<&Value>) -> bool {
        match value {
            None => true,
            Some(Value::Null) if self.nullable => true,
            value => self.check_falsy && is_falsy(value),
        }
    }
}

/// The state of one chain run.
#[derive(Clone)]
pub struct Context {
    fields: Vec<PathPattern>,
    locations: Vec<Location>,
    stack: Vec<ContextItem>,
    optional: Option<OptionalOptions>,
    message: Option<Message>,
    instances: Vec<FieldInstance>,
    errors: Vec<FieldError>,
}

impl Context {
    pub(crate) fn new(
        fields: Vec<PathPattern>,
        locations: Vec<Location>,
        stack: Vec<ContextItem>,
        optional: Option<OptionalOptions>,
        message: Option<Message>,
    ) -> Self {
        Self {
            fields,
            locations,
            stack,
            optional,
            message,
            instances: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// A context with no declared shape, used to carry the results of
    /// grouped runs.
    pub(crate) fn surrogate() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), None, None)
    }

    /// The declared field patterns.
    pub fn fields(&self) -> &[PathPattern] {
        &self.fields
    }

    /// The locations searched.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// The declared items, in execution order.
    pub fn stack(&self) -> &[ContextItem] {
        &self.stack
    }

    /// The optional rules, if the chain is optional.
    pub fn optional(&self) -> Option<OptionalOptions> {
        self.optional
    }

    /// The chain-level default error message.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// The instances resolved by the run.
    pub fn instances(&self) -> &[FieldInstance] {
        &self.instances
    }

    /// The errors recorded by the run, in recording order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns true if the run recorded any error.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn set_instances(&mut self, instances: Vec<FieldInstance>) {
        self.instances = instances;
    }

    pub(crate) fn extend_instances(&mut self, instances: impl IntoIterator<Item = FieldInstance>) {
        self.instances.extend(instances);
    }

    pub(crate) fn into_instances(self) -> Vec<FieldInstance> {
        self.instances
    }

    pub(crate) fn set_errors(&mut self, errors: Vec<FieldError>) {
        self.errors = errors;
    }

    pub(crate) fn push_error(&mut self, error: FieldError) {
        self.errors.push(error);
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("fields", &self.fields)
            .field("locations", &self.locations)
            .field("stack", &self.stack)
            .field("optional", &self.optional)
            .field("message", &self.message)
            .field("instances", &self.instances)
            .field("errors", &self.errors)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_optional_skips_only_missing() {
        let options = OptionalOptions::default();
        assert!(options.skips(None));
        assert!(!options.skips(Some(&json!(null))));
        assert!(!options.skips(Some(&json!(""))));
    }

    #[test]
    fn test_nullable_skips_null() {
        let options = OptionalOptions::allow_null();
        assert!(options.skips(Some(&json!(null))));
        assert!(!options.skips(Some(&json!(0))));
    }

    #[test]
    fn test_check_falsy_skips_falsy() {
        let options = OptionalOptions::allow_falsy();
        assert!(options.skips(Some(&json!(""))));
        assert!(options.skips(Some(&json!(false))));
        assert!(options.skips(Some(&json!(0))));
        assert!(options.skips(Some(&json!(null))));
        assert!(!options.skips(Some(&json!("x"))));
    }

    #[test]
    fn test_optional_options_deserialize() {
        let options: OptionalOptions = serde_json::from_value(json!({"checkFalsy": true})).unwrap();
        assert_eq!(options, OptionalOptions::allow_falsy());
    }
}
