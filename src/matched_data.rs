//! Rebuilding the validated part of a request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::location::Location;
use crate::request::Request;
use crate::resolver;
use crate::result::validation_result;

/// Options for [`matched_data_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchedDataOptions {
    /// Leave out fields that have an error. Defaults to true.
    pub only_valid_data: bool,
    /// Keep fields that an optional chain skipped. Defaults to false.
    pub include_optionals: bool,
    /// Only take fields from these locations; `None` means all.
    pub locations: Option<Vec<Location>>,
}

impl Default for MatchedDataOptions {
    fn default() -> Self {
        Self {
            only_valid_data: true,
            include_optionals: false,
            locations: None,
        }
    }
}

/// Returns the valid, non-skipped fields every chain matched, with their
/// sanitized values, as one object.
pub fn matched_data(req: &Request) -> Value {
    matched_data_with(req, &MatchedDataOptions::default())
}

/// Like [`matched_data`] with explicit options.
///
/// Fields from different locations are merged into the same object; a later
/// chain overwrites an earlier one at the same path.
///
/// # Example
///
/// ```rust
/// use fieldguard::{body, matched_data, query, ContextRunner, Request, Sanitizers};
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut req = Request::new()
///     .with_body(json!({"name": " Ann ", "age": "x", "extra": true}))
///     .with_query(json!({"page": "2"}));
///
/// body("name").trim().run(&mut req).await.unwrap();
/// body("age").is_int().run(&mut req).await.unwrap();
/// query("page").is_int().to_int().run(&mut req).await.unwrap();
///
/// assert_eq!(matched_data(&req), json!({"name": "Ann", "page": 2}));
/// # }
/// ```
pub fn matched_data_with(req: &Request, options: &MatchedDataOptions) -> Value {
    let errors = validation_result(req);
    let mut data = Value::Object(Map::new());

    for context in req.contexts() {
        for instance in context.instances() {
            let Some(value) = instance.value() else {
                continue;
            };
            if !instance.is_writable() {
                continue;
            }
            if let Some(locations) = &options.locations {
                if !locations.contains(&instance.location()) {
                    continue;
                }
            }
            if !options.include_optionals && instance.is_skipped() {
                continue;
            }
            if options.only_valid_data {
                let path = instance.path().to_string();
                let invalid = errors
                    .array()
                    .iter()
                    .any(|error| error.location == Some(instance.location()) && error.path == path);
                if invalid {
                    continue;
                }
            }

            if let Err(conflict) = resolver::set(&mut data, instance.path(), value.clone()) {
                tracing::debug!(%conflict, "skipping matched field");
            }
        }
    }
    data
}
