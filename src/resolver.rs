//! Resolution of path patterns against JSON values.
//!
//! [`resolve`] expands a [`PathPattern`] into every concrete [`JsonPath`] it
//! matches inside one location. [`get`] and [`set`] read and write a concrete
//! path.

use serde_json::{Map, Value};

use crate::path::{JsonPath, PathPattern, PathSegment, PatternSegment};

/// One concrete match of a pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    /// The concrete path that matched.
    pub path: JsonPath,
    /// The value found there; `None` when the leaf is missing from an
    /// existing container.
    pub value: Option<&'a Value>,
}

/// Arrays are never padded by more than this many `null`s in one write.
pub const MAX_ARRAY_GROWTH: usize = 1 << 16;

/// Returned by [`set`] when a path cannot be written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathConflict {
    /// The prefix `at` of `path` holds a scalar.
    #[error("cannot set '{path}': '{at}' is not an object or array")]
    Scalar {
        path: String,
        at: String,
    },

    /// Writing `index` would pad the array at `at` by more than
    /// [`MAX_ARRAY_GROWTH`] elements.
    #[error("cannot set '{path}': index {index} is too far past the end of '{at}'")]
    IndexTooFar {
        path: String,
        at: String,
        index: usize,
    },
}

impl PathConflict {
    /// The path being written.
    pub fn path(&self) -> &str {
        match self {
            PathConflict::Scalar { path, .. } | PathConflict::IndexTooFar { path, .. } => path,
        }
    }

    /// The prefix of the path where the write failed.
    pub fn at(&self) -> &str {
        match self {
            PathConflict::Scalar { at, .. } | PathConflict::IndexTooFar { at, .. } => at,
        }
    }
}

/// Resolves `pattern` against `root`.
///
/// - Literal segments index objects by key and arrays by position.
/// - Wildcards fan out over every key of an object (insertion order) or every
///   index of an array, and match nothing on other values.
/// - A missing leaf inside an existing object or array yields one match with
///   `value: None`; a missing or scalar intermediate value yields nothing.
/// - Object keys stay field segments even when numeric (`codes.007`). A named
///   segment never matches inside an array.
///
/// # Example
///
/// ```rust
/// use fieldguard::resolver::resolve;
/// use fieldguard::PathPattern;
/// use serde_json::json;
///
/// let root = json!({"users": [{"email": "a@x.io"}, {"email": "b@x.io"}]});
/// let hits = resolve(&PathPattern::parse("users.*.email"), &root);
///
/// let paths: Vec<String> = hits.iter().map(|hit| hit.path.to_string()).collect();
/// assert_eq!(paths, vec!["users[0].email", "users[1].email"]);
/// ```
pub fn resolve<'a>(pattern: &PathPattern, root: &'a Value) -> Vec<Resolved<'a>> {
    let mut hits = Vec::new();
    walk(root, pattern.segments(), JsonPath::root(), &mut hits);
    hits
}

fn walk<'a>(
    node: &'a Value,
    remaining: &[PatternSegment],
    path: JsonPath,
    hits: &mut Vec<Resolved<'a>>,
) {
    let Some((segment, rest)) = remaining.split_first() else {
        hits.push(Resolved {
            path,
            value: Some(node),
        });
        return;
    };

    match segment {
        PatternSegment::Wildcard => match node {
            Value::Object(map) => {
                for (key, child) in map {
                    walk(child, rest, path.push_field(key.clone()), hits);
                }
            }
            Value::Array(items) => {
                for (idx, child) in items.iter().enumerate() {
                    walk(child, rest, path.push_index(idx), hits);
                }
            }
            _ => {}
        },
        PatternSegment::Field(name) => step(node, name, None, rest, path, hits),
        PatternSegment::Index(idx) => {
            step(node, &idx.to_string(), Some(*idx), rest, path, hits);
        }
    }
}

// Object keys always produce field segments, even when they look numeric.
// Index segments only come from positions in an actual array.
fn step<'a>(
    node: &'a Value,
    key: &str,
    index: Option<usize>,
    rest: &[PatternSegment],
    path: JsonPath,
    hits: &mut Vec<Resolved<'a>>,
) {
    let (segment, child) = match (node, index) {
        (Value::Object(map), _) => (PathSegment::Field(key.to_string()), map.get(key)),
        (Value::Array(items), Some(idx)) => (PathSegment::Index(idx), items.get(idx)),
        _ => return,
    };
    let path = path.push(segment);
    match child {
        Some(child) => walk(child, rest, path, hits),
        None if rest.is_empty() => hits.push(Resolved { path, value: None }),
        None => {}
    }
}

fn child<'a>(node: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match (node, segment) {
        (Value::Object(map), segment) => map.get(&segment.key()),
        (Value::Array(items), PathSegment::Index(idx)) => items.get(*idx),
        _ => None,
    }
}

/// Reads the value at a concrete path.
pub fn get<'a>(root: &'a Value, path: &JsonPath) -> Option<&'a Value> {
    path.segments().try_fold(root, |node, segment| child(node, segment))
}

/// Writes `value` at a concrete path, creating missing containers.
///
/// Missing or `null` containers are created as arrays when the next segment
/// is an index and as objects otherwise. Arrays are padded with `null` when
/// writing past their end. An index segment on an existing object writes the
/// numeric key.
///
/// # Errors
///
/// Returns [`PathConflict::Scalar`] when an intermediate value is a scalar and
/// [`PathConflict::IndexTooFar`] when an array would grow by more than
/// [`MAX_ARRAY_GROWTH`] elements. `root` is left unchanged in both cases.
pub fn set(root: &mut Value, path: &JsonPath, value: Value) -> Result<(), PathConflict> {
    let segments: Vec<&PathSegment> = path.segments().collect();
    check_writable(root, path, &segments)?;

    let mut node = root;
    for segment in &segments {
        if node.is_null() {
            *node = match segment {
                PathSegment::Index(_) => Value::Array(Vec::new()),
                PathSegment::Field(_) => Value::Object(Map::new()),
            };
        }

        node = match (node, segment) {
            (Value::Object(map), segment) => map.entry(segment.key()).or_insert(Value::Null),
            (Value::Array(items), PathSegment::Index(idx)) => {
                if items.len() <= *idx {
                    items.resize(*idx + 1, Value::Null);
                }
                &mut items[*idx]
            }
            // Ruled out by check_writable.
            (node, _) => node,
        };
    }

    *node = value;
    Ok(())
}

fn check_writable(
    root: &Value,
    path: &JsonPath,
    segments: &[&PathSegment],
) -> Result<(), PathConflict> {
    let prefix = |depth: usize| {
        let head = segments[..depth].iter().map(|s| (*s).clone()).collect();
        JsonPath::from_segments(head).to_string()
    };

    let mut node = Some(root);
    for (depth, segment) in segments.iter().enumerate() {
        let Some(current) = node.filter(|n| !n.is_null()) else {
            // Everything below is created fresh.
            return match segments[depth..].iter().find_map(|s| match s {
                PathSegment::Index(idx) if *idx > MAX_ARRAY_GROWTH => Some(*idx),
                _ => None,
            }) {
                Some(index) => Err(PathConflict::IndexTooFar {
                    path: path.to_string(),
                    at: prefix(depth),
                    index,
                }),
                None => Ok(()),
            };
        };

        node = match (current, segment) {
            (Value::Object(map), segment) => map.get(&segment.key()),
            (Value::Array(items), PathSegment::Index(idx)) => {
                if *idx > items.len() + MAX_ARRAY_GROWTH {
                    return Err(PathConflict::IndexTooFar {
                        path: path.to_string(),
                        at: prefix(depth),
                        index: *idx,
                    });
                }
                items.get(*idx)
            }
            _ => {
                return Err(PathConflict::Scalar {
                    path: path.to_string(),
                    at: prefix(depth),
                })
            }
        };
    }
    Ok(())
}
