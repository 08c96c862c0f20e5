use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::context::FieldInstance;
use crate::location::Location;
use crate::path::{JsonPath, PathPattern};
use crate::request::Request;
use crate::resolver;

/// Expands `fields` across `locations` into concrete instances.
///
/// For each pattern:
/// - header patterns are lowercased before resolving
/// - when any match holds a value, matches without one are dropped
/// - when no match holds a value, only the first is kept
/// - when nothing matched at all, one missing instance is created at the
///   first location, addressed by the declared pattern
///
/// Instances sharing a location and path collapse to the first one.
///
/// # Example
///
/// ```rust
/// use fieldguard::runner::select_fields;
/// use fieldguard::{Location, PathPattern, Request};
/// use serde_json::json;
///
/// let req = Request::new().with_body(json!({"tags": ["a", "b"]}));
/// let instances = select_fields(&req, &[PathPattern::parse("tags.*")], &[Location::Body]);
///
/// let paths: Vec<String> = instances.iter().map(|i| i.path().to_string()).collect();
/// assert_eq!(paths, vec!["tags[0]", "tags[1]"]);
/// ```
pub fn select_fields(
    req: &Request,
    fields: &[PathPattern],
    locations: &[Location],
) -> Vec<FieldInstance> {
    let mut selected: IndexMap<(Location, JsonPath), FieldInstance> = IndexMap::new();

    for pattern in fields {
        for instance in select_pattern(req, pattern, locations) {
            let key = (instance.location(), instance.path().clone());
            if let Entry::Vacant(slot) = selected.entry(key) {
                slot.insert(instance);
            }
        }
    }

    selected.into_values().collect()
}

fn select_pattern(
    req: &Request,
    pattern: &PathPattern,
    locations: &[Location],
) -> Vec<FieldInstance> {
    let Some(&first_location) = locations.first() else {
        return Vec::new();
    };

    let mut instances = Vec::new();
    for &location in locations {
        let lookup = if location == Location::Headers {
            pattern.to_lowercase()
        } else {
            pattern.clone()
        };
        for hit in resolver::resolve(&lookup, req.location(location)) {
            instances.push(FieldInstance::new(
                location,
                hit.path,
                pattern.clone(),
                hit.value.cloned(),
            ));
        }
    }

    if instances.iter().any(|instance| instance.value().is_some()) {
        instances.retain(|instance| instance.value().is_some());
    } else {
        instances.truncate(1);
    }

    if instances.is_empty() {
        instances.push(FieldInstance::missing(first_location, pattern.clone()));
    }
    instances
}
