//! Path representation for locating fields in request locations.
//!
//! This module provides two path types:
//! - [`JsonPath`]: a concrete path such as `users[0].email`, made of
//!   [`PathSegment`]s. Every resolved field instance carries one.
//! - [`PathPattern`]: a declared path such as `users.*.email`, made of
//!   [`PatternSegment`]s that may include wildcards.

use std::fmt::{self, Display};

/// A segment of a concrete path.
///
/// Paths are built from segments that represent either field access or array indexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g., `user`, `email`)
    Field(String),
    /// An array index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Returns the key used to look this segment up in an object.
    pub fn key(&self) -> String {
        match self {
            PathSegment::Field(name) => name.clone(),
            PathSegment::Index(idx) => idx.to_string(),
        }
    }
}

/// A concrete path to a value in a nested JSON-like structure.
///
/// # Example
///
/// ```rust
/// use fieldguard::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a list of segments.
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    /// Returns a new path with `segment` appended.
    pub fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the parent path, or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// A segment of a declared path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternSegment {
    /// A literal object key.
    Field(String),
    /// A literal numeric segment; indexes arrays, or looks up the key in objects.
    Index(usize),
    /// `*`: every key of an object or every index of an array.
    Wildcard,
}

/// A declared field path, possibly containing wildcards.
///
/// Patterns accept dot notation (`user.address.city`), bracket notation
/// (`users[0]`, `meta["dotted.key"]`) and `*` wildcards in either form
/// (`users.*.email`, `users[*].email`). A quoted bracket segment is always a
/// literal key.
///
/// Two patterns are equal when their declared strings are equal.
///
/// # Example
///
/// ```rust
/// use fieldguard::{PathPattern, PatternSegment};
///
/// let pattern = PathPattern::parse("users[*].email");
/// assert!(pattern.has_wildcard());
/// assert_eq!(pattern.segments()[1], PatternSegment::Wildcard);
/// assert_eq!(pattern.as_str(), "users[*].email");
/// ```
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<PatternSegment>,
}

impl PathPattern {
    /// Parses a declared path.
    ///
    /// Parsing never fails: empty segments (`a..b`) are ignored and an empty
    /// pattern addresses the location root.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = parse_segments(&raw);
        Self { raw, segments }
    }

    /// Returns the pattern exactly as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed segments.
    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Returns true if any segment is a wildcard.
    pub fn has_wildcard(&self) -> bool {
        self.segments.contains(&PatternSegment::Wildcard)
    }

    /// Returns the same pattern with every character lowercased.
    ///
    /// Header names are case-insensitive and stored lowercased.
    pub fn to_lowercase(&self) -> Self {
        Self::parse(self.raw.to_lowercase())
    }

    /// Converts the pattern into a concrete path, keeping wildcards as
    /// literal `*` fields.
    ///
    /// Used for fields that resolved to nothing, so that errors still point
    /// at the declared path.
    pub fn to_literal_path(&self) -> JsonPath {
        JsonPath::from_segments(
            self.segments
                .iter()
                .map(|segment| match segment {
                    PatternSegment::Field(name) => PathSegment::Field(name.clone()),
                    PatternSegment::Index(idx) => PathSegment::Index(*idx),
                    PatternSegment::Wildcard => PathSegment::Field("*".to_string()),
                })
                .collect(),
        )
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PathPattern {}

impl std::hash::Hash for PathPattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for PathPattern {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for PathPattern {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

fn parse_index(s: &str) -> Option<usize> {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

fn classify(token: &str) -> PatternSegment {
    if token == "*" {
        return PatternSegment::Wildcard;
    }
    match parse_index(token) {
        Some(idx) => PatternSegment::Index(idx),
        None => PatternSegment::Field(token.to_string()),
    }
}

fn parse_segments(raw: &str) -> Vec<PatternSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !current.is_empty() {
                    segments.push(classify(&current));
                    current.clear();
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(classify(&current));
                    current.clear();
                }
                let mut inner = String::new();
                for c in chars.by_ref() {
                    if c == ']' {
                        break;
                    }
                    inner.push(c);
                }
                let inner = inner.trim();
                let quoted = inner.len() >= 2
                    && ((inner.starts_with('"') && inner.ends_with('"'))
                        || (inner.starts_with('\'') && inner.ends_with('\'')));
                if quoted {
                    segments.push(PatternSegment::Field(inner[1..inner.len() - 1].to_string()));
                } else if !inner.is_empty() {
                    segments.push(classify(inner));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        segments.push(classify(&current));
    }

    segments
}
