use serde_json::Value;

use crate::location::Location;
use crate::path::{JsonPath, PathPattern};

/// One concrete occurrence of a declared field in one location.
///
/// The identity fields (location, paths, original value) never change. The
/// current value only changes when a sanitizer runs.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInstance {
    location: Location,
    path: JsonPath,
    original_path: PathPattern,
    value: Option<Value>,
    original_value: Option<Value>,
    resolved: bool,
    skipped: bool,
}

impl FieldInstance {
    /// Creates an instance for a value found in `location`.
    pub fn new(
        location: Location,
        path: JsonPath,
        original_path: PathPattern,
        value: Option<Value>,
    ) -> Self {
        Self {
            location,
            path,
            original_path,
            original_value: value.clone(),
            value,
            resolved: true,
            skipped: false,
        }
    }

    /// Creates the stand-in for a declared field that resolved nowhere.
    pub(crate) fn missing(location: Location, original_path: PathPattern) -> Self {
        Self {
            location,
            path: original_path.to_literal_path(),
            original_path,
            value: None,
            original_value: None,
            resolved: false,
            skipped: false,
        }
    }

    /// The location the field was found in.
    pub fn location(&self) -> Location {
        self.location
    }

    /// The concrete path of the field.
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// The declared pattern this instance was expanded from.
    pub fn original_path(&self) -> &PathPattern {
        &self.original_path
    }

    /// The current value; `None` if the field is missing.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The value as it was found, before any sanitizer ran.
    pub fn original_value(&self) -> Option<&Value> {
        self.original_value.as_ref()
    }

    /// True when the optional rules skipped every item for this instance.
    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    /// True when a sanitizer changed the value.
    pub fn is_modified(&self) -> bool {
        self.value != self.original_value
    }

    /// True unless this instance stands in for a field found nowhere.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = Some(value);
    }

    pub(crate) fn set_skipped(&mut self, skipped: bool) {
        self.skipped = skipped;
    }

    /// Whether a changed value may be written back into the request.
    ///
    /// A stand-in for an unmatched wildcard pattern has no real address.
    pub(crate) fn is_writable(&self) -> bool {
        self.resolved || !self.original_path.has_wildcard()
    }
}
