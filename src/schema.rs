//! Declaring chains from a configuration object.
//!
//! A schema maps field patterns to method configurations:
//!
//! ```json
//! {
//!   "age": {
//!     "in": ["body", "query"],
//!     "errorMessage": "age is invalid",
//!     "isInt": { "options": { "min": 0 }, "errorMessage": "age must be positive" },
//!     "toInt": true
//!   },
//!   "nickname": { "optional": { "options": { "checkFalsy": true } }, "isAlpha": true }
//! }
//! ```
//!
//! Every method entry is either `true` or an object with optional `options`
//! (a single value or an array of arguments), `errorMessage` and `negated`.
//! Falsy entries are ignored. Method names are the catalog names plus the
//! chain built-ins (`exists`, `notEmpty`, `isArray`, `isString`, `bail`,
//! `custom`, `customSanitizer`, `default`, `replace`, `toArray`,
//! `toLowerCase`, `toUpperCase`). Unknown names are skipped with a warning.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::catalog::{option_at, Catalog, CatalogEntry, CatalogError};
use crate::chain::{ExistsOptions, Sanitizers, ValidationChain};
use crate::context::OptionalOptions;
use crate::location::{Location, UnknownLocation};
use crate::value::{is_falsy, to_validator_string};

/// Errors raised while reading a schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema, or a field's configuration, is not an object.
    #[error("schema for '{0}' must be an object")]
    NotAnObject(String),

    /// A field lists a location that doesn't exist.
    #[error("field '{field}': {source}")]
    UnknownLocation {
        field: String,
        #[source]
        source: UnknownLocation,
    },

    /// `custom` or `customSanitizer` names something unusable.
    #[error("field '{field}', method '{method}': {source}")]
    Catalog {
        field: String,
        method: String,
        #[source]
        source: CatalogError,
    },

    /// A method's configuration has the wrong shape.
    #[error("field '{field}', method '{method}': {reason}")]
    InvalidMethod {
        field: String,
        method: String,
        reason: String,
    },
}

/// Builds one chain per schema field using the standard catalog and every
/// location.
///
/// # Example
///
/// ```rust
/// use fieldguard::{check_schema, validation_result, ContextRunner, Request};
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let chains = check_schema(&json!({
///     "age": { "isInt": true, "toInt": true }
/// }))
/// .unwrap();
///
/// let mut req = Request::new().with_body(json!({"age": "42"}));
/// for chain in &chains {
///     chain.run(&mut req).await.unwrap();
/// }
///
/// assert!(validation_result(&req).is_empty());
/// assert_eq!(req.location(fieldguard::Location::Body)["age"], json!(42));
/// # }
/// ```
pub fn check_schema(schema: &Value) -> Result<Vec<ValidationChain>, SchemaError> {
    check_schema_with(schema, &Catalog::standard(), &Location::ALL)
}

/// Builds one chain per schema field.
///
/// `default_locations` applies to fields without an `in` key.
///
/// # Errors
///
/// Returns a [`SchemaError`] for malformed declarations. Unknown method
/// names are not errors.
pub fn check_schema_with(
    schema: &Value,
    catalog: &Catalog,
    default_locations: &[Location],
) -> Result<Vec<ValidationChain>, SchemaError> {
    let fields = schema
        .as_object()
        .ok_or_else(|| SchemaError::NotAnObject("(root)".to_string()))?;

    fields
        .iter()
        .map(|(field, config)| field_chain(field, config, catalog, default_locations))
        .collect()
}

fn field_chain(
    field: &str,
    config: &Value,
    catalog: &Catalog,
    default_locations: &[Location],
) -> Result<ValidationChain, SchemaError> {
    let config = config
        .as_object()
        .ok_or_else(|| SchemaError::NotAnObject(field.to_string()))?;

    let locations = match config.get("in") {
        Some(locations) => parse_locations(field, locations)?,
        None => default_locations.to_vec(),
    };

    let mut chain = ValidationChain::new(field, &locations);
    if let Some(message) = config.get("errorMessage").filter(|m| !is_falsy(Some(m))) {
        chain = chain.with_default_message(to_validator_string(Some(message)));
    }

    for (method, method_config) in config {
        if matches!(method.as_str(), "in" | "errorMessage") || is_falsy(Some(method_config)) {
            continue;
        }
        chain = apply_method(chain, field, method, method_config, catalog)?;
    }

    tracing::debug!(field, locations = ?locations, "built chain from schema");
    Ok(chain)
}

fn parse_locations(field: &str, value: &Value) -> Result<Vec<Location>, SchemaError> {
    let names: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    names
        .into_iter()
        .map(|name| {
            to_validator_string(Some(name))
                .parse::<Location>()
                .map_err(|source| SchemaError::UnknownLocation {
                    field: field.to_string(),
                    source,
                })
        })
        .collect()
}

/// The pieces of a method entry.
struct MethodConfig<'a> {
    options: Vec<Value>,
    message: Option<String>,
    negated: bool,
    raw: Option<&'a Map<String, Value>>,
}

impl<'a> MethodConfig<'a> {
    fn parse(value: &'a Value) -> Self {
        let Some(raw) = value.as_object() else {
            return Self {
                options: Vec::new(),
                message: None,
                negated: false,
                raw: None,
            };
        };

        let options = match raw.get("options") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(other) => vec![other.clone()],
        };
        let message = raw
            .get("errorMessage")
            .filter(|m| !is_falsy(Some(m)))
            .map(|m| to_validator_string(Some(m)));
        let negated = raw.get("negated").map_or(false, |n| !is_falsy(Some(n)));

        Self {
            options,
            message,
            negated,
            raw: Some(raw),
        }
    }
}

fn apply_method(
    chain: ValidationChain,
    field: &str,
    method: &str,
    value: &Value,
    catalog: &Catalog,
) -> Result<ValidationChain, SchemaError> {
    let config = MethodConfig::parse(value);

    let validator = |chain: ValidationChain, add: &dyn Fn(ValidationChain) -> ValidationChain| {
        let chain = if config.negated { chain.not() } else { chain };
        let chain = add(chain);
        match &config.message {
            Some(message) => chain.with_message(message.as_str()),
            None => chain,
        }
    };

    let chain = match method {
        "optional" => {
            let options = match config.raw {
                Some(raw) => raw
                    .get("options")
                    .cloned()
                    .and_then(|options| serde_json::from_value::<OptionalOptions>(options).ok())
                    .unwrap_or_default(),
                None => OptionalOptions::default(),
            };
            chain.optional_with(options)
        }
        "bail" => chain.bail(),
        "exists" => {
            let options: ExistsOptions = option_at(&config.options, 0);
            validator(chain, &|c| c.exists_with(options))
        }
        "notEmpty" => validator(chain, &|c| c.not_empty()),
        "isArray" => validator(chain, &|c| c.is_array()),
        "isString" => validator(chain, &|c| c.is_string()),
        "toArray" => chain.to_array(),
        "toLowerCase" => chain.to_lower_case(),
        "toUpperCase" => chain.to_upper_case(),
        "default" => chain.default_value(config.options.first().cloned().unwrap_or(Value::Null)),
        "replace" => {
            let targets = match config.options.first() {
                Some(Value::Array(targets)) => targets.clone(),
                Some(target) => vec![target.clone()],
                None => Vec::new(),
            };
            let replacement = config.options.get(1).cloned().unwrap_or(Value::Null);
            chain.replace(targets, replacement)
        }
        "custom" | "customSanitizer" => {
            let name = config
                .options
                .first()
                .and_then(Value::as_str)
                .ok_or_else(|| SchemaError::InvalidMethod {
                    field: field.to_string(),
                    method: method.to_string(),
                    reason: "options must name a catalog entry".to_string(),
                })?;
            let entry = catalog.require(name).map_err(|source| SchemaError::Catalog {
                field: field.to_string(),
                method: method.to_string(),
                source,
            })?;

            match (method, entry) {
                ("custom", CatalogEntry::CustomValidator(custom)) => {
                    validator(chain, &|c| c.push_custom(name, Arc::clone(&custom)))
                }
                ("custom", CatalogEntry::Validator(standard)) => {
                    let rest = config.options[1..].to_vec();
                    validator(chain, &|c| {
                        c.validate_with(name, Arc::clone(&standard), rest.clone())
                    })
                }
                ("customSanitizer", CatalogEntry::CustomSanitizer(custom)) => {
                    chain.custom_sanitizer_with(custom)
                }
                ("customSanitizer", CatalogEntry::Sanitizer(standard)) => {
                    chain.sanitize_with(name, standard, config.options[1..].to_vec())
                }
                (_, entry) => {
                    return Err(SchemaError::InvalidMethod {
                        field: field.to_string(),
                        method: method.to_string(),
                        reason: format!("'{}' is a {:?}", name, entry),
                    })
                }
            }
        }
        name => match catalog.get(name) {
            Some(CatalogEntry::Validator(standard)) => {
                let options = config.options.clone();
                validator(chain, &|c| c.validate_with(name, Arc::clone(&standard), options.clone()))
            }
            Some(CatalogEntry::CustomValidator(custom)) => {
                validator(chain, &|c| c.push_custom(name, Arc::clone(&custom)))
            }
            Some(CatalogEntry::Sanitizer(standard)) => {
                chain.sanitize_with(name, standard, config.options.clone())
            }
            Some(CatalogEntry::CustomSanitizer(custom)) => chain.custom_sanitizer_with(custom),
            None => {
                tracing::warn!(
                    field,
                    method = name,
                    "no validator or sanitizer with this name, ignoring"
                );
                chain
            }
        },
    };
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_one_chain_per_field_in_order() {
        let chains = check_schema(&json!({"b": {"isInt": true}, "a": {"trim": true}})).unwrap();
        let fields: Vec<&str> = chains
            .iter()
            .map(|c| c.builder().fields()[0].as_str())
            .collect();
        assert_eq!(fields, vec!["b", "a"]);
    }

    #[test]
    fn test_in_and_falsy_entries() {
        let chains = check_schema(&json!({
            "id": {"in": "params", "isInt": true, "isEmail": false, "trim": null}
        }))
        .unwrap();

        let builder = chains[0].builder();
        assert_eq!(builder.locations(), &[Location::Params]);
        assert_eq!(builder.stack().len(), 1);
        assert_eq!(builder.stack()[0].name(), "isInt");
    }

    #[test]
    fn test_unknown_method_is_skipped() {
        let chains = check_schema(&json!({"id": {"isUnicorn": true, "isInt": true}})).unwrap();
        assert_eq!(chains[0].builder().stack().len(), 1);
    }

    #[test]
    fn test_unknown_location_is_an_error() {
        let err = check_schema(&json!({"id": {"in": ["body", "session"]}})).unwrap_err();
        assert_eq!(err.to_string(), "field 'id': unknown location 'session'");
    }

    #[test]
    fn test_custom_requires_catalog_entry() {
        let err = check_schema(&json!({"id": {"custom": {"options": "isAdmin"}}})).unwrap_err();
        assert!(matches!(err, SchemaError::Catalog { .. }));
    }

    #[test]
    fn test_non_object_schema() {
        assert!(matches!(
            check_schema(&json!(["a"])),
            Err(SchemaError::NotAnObject(_))
        ));
    }
}
