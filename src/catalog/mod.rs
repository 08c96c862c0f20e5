//! Named validators and sanitizers.
//!
//! [`validators`] and [`sanitizers`] hold the standard string checks and
//! transforms. [`Catalog`] stores them, together with any user entries, under
//! the names schema declarations refer to.

pub mod sanitizers;
pub mod validators;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::context_items::{CustomSanitizer, CustomValidator, StandardSanitizer, StandardValidator};

/// Type alias for the entry storage map.
type EntryMap = Arc<RwLock<HashMap<String, CatalogEntry>>>;

/// Reads option `index` as `T`, falling back to `T::default()` when absent
/// or malformed.
pub(crate) fn option_at<T: DeserializeOwned + Default>(options: &[Value], index: usize) -> T {
    options
        .get(index)
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

/// A registered catalog entry.
#[derive(Clone)]
pub enum CatalogEntry {
    Validator(StandardValidator),
    Sanitizer(StandardSanitizer),
    CustomValidator(Arc<dyn CustomValidator>),
    CustomSanitizer(Arc<dyn CustomSanitizer>),
}

impl CatalogEntry {
    /// Returns true for entries that check rather than transform.
    pub fn is_validator(&self) -> bool {
        matches!(self, CatalogEntry::Validator(_) | CatalogEntry::CustomValidator(_))
    }
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            CatalogEntry::Validator(_) => "Validator",
            CatalogEntry::Sanitizer(_) => "Sanitizer",
            CatalogEntry::CustomValidator(_) => "CustomValidator",
            CatalogEntry::CustomSanitizer(_) => "CustomSanitizer",
        };
        f.write_str(kind)
    }
}

/// A thread-safe registry of named validators and sanitizers.
///
/// Clones share the same storage, so entries registered through one clone
/// are visible through all of them.
///
/// # Example
///
/// ```rust
/// use fieldguard::Catalog;
/// use serde_json::Value;
/// use std::sync::Arc;
///
/// let catalog = Catalog::standard();
/// assert!(catalog.contains("isInt"));
///
/// catalog
///     .register_validator("isEven", Arc::new(|s: &str, _: &[Value]| {
///         s.parse::<i64>().map(|n| n % 2 == 0).unwrap_or(false)
///     }))
///     .unwrap();
///
/// // Duplicate registration fails
/// assert!(catalog.register_validator("isEven", Arc::new(|_: &str, _: &[Value]| true)).is_err());
/// ```
#[derive(Clone)]
pub struct Catalog {
    entries: EntryMap,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a catalog holding every standard validator and sanitizer.
    pub fn standard() -> Self {
        let standard_validators: [(&str, StandardValidator); 17] = [
            ("contains", Arc::new(validators::contains)),
            ("equals", Arc::new(validators::equals)),
            ("isEmpty", Arc::new(validators::is_empty)),
            ("isLength", Arc::new(validators::is_length)),
            ("isInt", Arc::new(validators::is_int)),
            ("isFloat", Arc::new(validators::is_float)),
            ("isNumeric", Arc::new(validators::is_numeric)),
            ("isBoolean", Arc::new(validators::is_boolean)),
            ("isEmail", Arc::new(validators::is_email)),
            ("isAlpha", Arc::new(validators::is_alpha)),
            ("isAlphanumeric", Arc::new(validators::is_alphanumeric)),
            ("isLowercase", Arc::new(validators::is_lowercase)),
            ("isUppercase", Arc::new(validators::is_uppercase)),
            ("isIn", Arc::new(validators::is_in)),
            ("isUUID", Arc::new(validators::is_uuid)),
            ("isJSON", Arc::new(validators::is_json)),
            ("matches", Arc::new(validators::matches)),
        ];
        let standard_sanitizers: [(&str, StandardSanitizer); 11] = [
            ("trim", Arc::new(sanitizers::trim)),
            ("ltrim", Arc::new(sanitizers::ltrim)),
            ("rtrim", Arc::new(sanitizers::rtrim)),
            ("escape", Arc::new(sanitizers::escape)),
            ("unescape", Arc::new(sanitizers::unescape)),
            ("blacklist", Arc::new(sanitizers::blacklist)),
            ("whitelist", Arc::new(sanitizers::whitelist)),
            ("stripLow", Arc::new(sanitizers::strip_low)),
            ("toInt", Arc::new(sanitizers::to_int)),
            ("toFloat", Arc::new(sanitizers::to_float)),
            ("toBoolean", Arc::new(sanitizers::to_boolean)),
        ];

        let mut entries = HashMap::new();
        for (name, validator) in standard_validators {
            entries.insert(name.to_string(), CatalogEntry::Validator(validator));
        }
        for (name, sanitizer) in standard_sanitizers {
            entries.insert(name.to_string(), CatalogEntry::Sanitizer(sanitizer));
        }

        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    fn insert(&self, name: impl Into<String>, entry: CatalogEntry) -> Result<(), CatalogError> {
        let name = name.into();
        let mut entries = self.entries.write();

        if entries.contains_key(&name) {
            return Err(CatalogError::DuplicateName(name));
        }

        entries.insert(name, entry);
        Ok(())
    }

    /// Registers a standard validator.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateName` if the name is already registered.
    pub fn register_validator(
        &self,
        name: impl Into<String>,
        validator: StandardValidator,
    ) -> Result<(), CatalogError> {
        self.insert(name, CatalogEntry::Validator(validator))
    }

    /// Registers a standard sanitizer.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateName` if the name is already registered.
    pub fn register_sanitizer(
        &self,
        name: impl Into<String>,
        sanitizer: StandardSanitizer,
    ) -> Result<(), CatalogError> {
        self.insert(name, CatalogEntry::Sanitizer(sanitizer))
    }

    /// Registers a custom validator, usable from schemas as `custom`.
    pub fn register_custom_validator<V>(
        &self,
        name: impl Into<String>,
        validator: V,
    ) -> Result<(), CatalogError>
    where
        V: CustomValidator + 'static,
    {
        self.insert(name, CatalogEntry::CustomValidator(Arc::new(validator)))
    }

    /// Registers a custom sanitizer, usable from schemas as `customSanitizer`.
    pub fn register_custom_sanitizer<S>(
        &self,
        name: impl Into<String>,
        sanitizer: S,
    ) -> Result<(), CatalogError>
    where
        S: CustomSanitizer + 'static,
    {
        self.insert(name, CatalogEntry::CustomSanitizer(Arc::new(sanitizer)))
    }

    /// Retrieves an entry by name.
    pub fn get(&self, name: &str) -> Option<CatalogEntry> {
        self.entries.read().get(name).cloned()
    }

    /// Retrieves an entry by name, failing if it is missing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if nothing is registered as `name`.
    pub fn require(&self, name: &str) -> Result<CatalogEntry, CatalogError> {
        self.get(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Returns every registered name, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog").field("names", &self.names()).finish()
    }
}

/// Errors that can occur during catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Attempted to register a name that already exists.
    #[error("'{0}' already registered")]
    DuplicateName(String),

    /// Looked up a name that doesn't exist.
    #[error("'{0}' not found")]
    NotFound(String),
}
