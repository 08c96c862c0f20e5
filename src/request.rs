//! The request-like structure chains run against.

use std::sync::Arc;

use serde_json::Value;

use crate::context::Context;
use crate::location::Location;

/// A request reduced to what validation needs: one JSON value per
/// [`Location`] and the contexts of every chain already run against it.
///
/// Locations that were never set hold `Value::Null`, which resolves no
/// fields. Header names are expected to be lowercased by the host adapter.
///
/// # Example
///
/// ```rust
/// use fieldguard::{Location, Request};
/// use serde_json::json;
///
/// let req = Request::new()
///     .with_body(json!({"name": "Alice"}))
///     .with_query(json!({"page": "2"}));
///
/// assert_eq!(req.location(Location::Query)["page"], json!("2"));
/// assert!(req.contexts().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Request {
    body: Value,
    cookies: Value,
    headers: Value,
    params: Value,
    query: Value,
    contexts: Vec<Arc<Context>>,
}

impl Request {
    /// Creates a request with every location empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the body and returns self for chaining.
    pub fn with_body(self, body: Value) -> Self {
        self.with_location(Location::Body, body)
    }

    /// Sets the cookies and returns self for chaining.
    pub fn with_cookies(self, cookies: Value) -> Self {
        self.with_location(Location::Cookies, cookies)
    }

    /// Sets the headers and returns self for chaining.
    pub fn with_headers(self, headers: Value) -> Self {
        self.with_location(Location::Headers, headers)
    }

    /// Sets the route params and returns self for chaining.
    pub fn with_params(self, params: Value) -> Self {
        self.with_location(Location::Params, params)
    }

    /// Sets the query and returns self for chaining.
    pub fn with_query(self, query: Value) -> Self {
        self.with_location(Location::Query, query)
    }

    /// Sets any location and returns self for chaining.
    pub fn with_location(mut self, location: Location, value: Value) -> Self {
        *self.location_mut(location) = value;
        self
    }

    /// Returns the value stored for a location.
    pub fn location(&self, location: Location) -> &Value {
        match location {
            Location::Body => &self.body,
            Location::Cookies => &self.cookies,
            Location::Headers => &self.headers,
            Location::Params => &self.params,
            Location::Query => &self.query,
        }
    }

    /// Returns a mutable reference to the value stored for a location.
    pub fn location_mut(&mut self, location: Location) -> &mut Value {
        match location {
            Location::Body => &mut self.body,
            Location::Cookies => &mut self.cookies,
            Location::Headers => &mut self.headers,
            Location::Params => &mut self.params,
            Location::Query => &mut self.query,
        }
    }

    /// Returns the contexts of all chains run against this request, in run order.
    pub fn contexts(&self) -> &[Arc<Context>] {
        &self.contexts
    }

    pub(crate) fn attach_context(&mut self, context: Arc<Context>) {
        self.contexts.push(context);
    }
}
