//! Request locations searched for declared fields.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named top-level part of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Cookies,
    Headers,
    Params,
    Query,
}

impl Location {
    /// Every location, in the order chains search them by default.
    pub const ALL: [Location; 5] = [
        Location::Body,
        Location::Cookies,
        Location::Headers,
        Location::Params,
        Location::Query,
    ];

    /// Returns the lowercase location name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Body => "body",
            Location::Cookies => "cookies",
            Location::Headers => "headers",
            Location::Params => "params",
            Location::Query => "query",
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown location name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown location '{0}'")]
pub struct UnknownLocation(pub String);

impl FromStr for Location {
    type Err = UnknownLocation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|location| location.as_str() == s)
            .ok_or_else(|| UnknownLocation(s.to_string()))
    }
}
