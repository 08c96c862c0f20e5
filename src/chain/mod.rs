//! Declaring chains.
//!
//! A chain names one or more fields, the locations to look for them in, and
//! an ordered list of steps:
//!
//! ```rust
//! use fieldguard::{body, ContextRunner, Request, Sanitizers};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let chain = body("age").trim().is_int().with_message("age must be an integer").to_int();
//!
//! let mut req = Request::new().with_body(json!({"age": " 42 "}));
//! let context = chain.run(&mut req).await.unwrap();
//!
//! assert!(context.errors().is_empty());
//! assert_eq!(req.location(fieldguard::Location::Body)["age"], json!(42));
//! # }
//! ```
//!
//! Validation methods live on [`ValidationChain`]; sanitizer methods come
//! from the [`Sanitizers`] trait, which both chain types implement.

mod sanitizers;
mod validators;

use async_trait::async_trait;

use crate::context::{Context, ContextBuilder};
use crate::error::RunError;
use crate::location::Location;
use crate::path::PathPattern;
use crate::request::Request;
use crate::runner::{evaluate_context, ContextRunner};

pub use sanitizers::Sanitizers;
pub use validators::ExistsOptions;

/// Conversion into the list of field patterns a chain targets.
pub trait IntoFields {
    fn into_fields(self) -> Vec<PathPattern>;
}

impl IntoFields for &str {
    fn into_fields(self) -> Vec<PathPattern> {
        vec![PathPattern::parse(self)]
    }
}

impl IntoFields for String {
    fn into_fields(self) -> Vec<PathPattern> {
        vec![PathPattern::parse(self)]
    }
}

impl IntoFields for Vec<&str> {
    fn into_fields(self) -> Vec<PathPattern> {
        self.into_iter().map(PathPattern::parse).collect()
    }
}

impl IntoFields for Vec<String> {
    fn into_fields(self) -> Vec<PathPattern> {
        self.into_iter().map(PathPattern::parse).collect()
    }
}

impl IntoFields for &[&str] {
    fn into_fields(self) -> Vec<PathPattern> {
        self.iter().map(|field| PathPattern::parse(*field)).collect()
    }
}

impl<const N: usize> IntoFields for [&str; N] {
    fn into_fields(self) -> Vec<PathPattern> {
        self.into_iter().map(PathPattern::parse).collect()
    }
}

fn new_builder(fields: impl IntoFields, locations: &[Location]) -> ContextBuilder {
    let mut builder = ContextBuilder::new();
    builder
        .set_fields(fields.into_fields())
        .set_locations(locations.to_vec());
    builder
}

/// A chain of validators and sanitizers.
#[derive(Debug, Clone)]
pub struct ValidationChain {
    builder: ContextBuilder,
}

impl ValidationChain {
    /// Creates an empty chain over `fields` in `locations`.
    pub fn new(fields: impl IntoFields, locations: &[Location]) -> Self {
        Self {
            builder: new_builder(fields, locations),
        }
    }

    /// The declaration accumulated so far.
    pub fn builder(&self) -> &ContextBuilder {
        &self.builder
    }
}

#[async_trait]
impl ContextRunner for ValidationChain {
    async fn evaluate(&self, req: &Request) -> Result<Context, RunError> {
        evaluate_context(&self.builder, req).await
    }
}

/// A chain of sanitizers only.
#[derive(Debug, Clone)]
pub struct SanitizationChain {
    builder: ContextBuilder,
}

impl SanitizationChain {
    /// Creates an empty chain over `fields` in `locations`.
    pub fn new(fields: impl IntoFields, locations: &[Location]) -> Self {
        Self {
            builder: new_builder(fields, locations),
        }
    }

    /// The declaration accumulated so far.
    pub fn builder(&self) -> &ContextBuilder {
        &self.builder
    }
}

#[async_trait]
impl ContextRunner for SanitizationChain {
    async fn evaluate(&self, req: &Request) -> Result<Context, RunError> {
        evaluate_context(&self.builder, req).await
    }
}

/// Creates a validation chain that looks in every location.
pub fn check(fields: impl IntoFields) -> ValidationChain {
    ValidationChain::new(fields, &Location::ALL)
}

pub fn body(fields: impl IntoFields) -> ValidationChain {
    ValidationChain::new(fields, &[Location::Body])
}

pub fn cookie(fields: impl IntoFields) -> ValidationChain {
    ValidationChain::new(fields, &[Location::Cookies])
}

pub fn header(fields: impl IntoFields) -> ValidationChain {
    ValidationChain::new(fields, &[Location::Headers])
}

pub fn param(fields: impl IntoFields) -> ValidationChain {
    ValidationChain::new(fields, &[Location::Params])
}

pub fn query(fields: impl IntoFields) -> ValidationChain {
    ValidationChain::new(fields, &[Location::Query])
}

/// Creates a sanitization chain that looks in every location.
pub fn sanitize(fields: impl IntoFields) -> SanitizationChain {
    SanitizationChain::new(fields, &Location::ALL)
}

/// Creates chains bound to a fixed set of locations.
///
/// # Example
///
/// ```rust
/// use fieldguard::{build_check_function, Location};
///
/// let from_query_or_body = build_check_function(&[Location::Query, Location::Body]);
/// let chain = from_query_or_body.check("page").is_int();
///
/// assert_eq!(chain.builder().locations(), &[Location::Query, Location::Body]);
/// ```
#[derive(Debug, Clone)]
pub struct ChainFactory {
    locations: Vec<Location>,
}

impl ChainFactory {
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn check(&self, fields: impl IntoFields) -> ValidationChain {
        ValidationChain::new(fields, &self.locations)
    }

    pub fn sanitize(&self, fields: impl IntoFields) -> SanitizationChain {
        SanitizationChain::new(fields, &self.locations)
    }
}

pub fn build_check_function(locations: &[Location]) -> ChainFactory {
    ChainFactory {
        locations: locations.to_vec(),
    }
}

/// Same as [`build_check_function`]; reads better next to
/// [`ChainFactory::sanitize`].
pub fn build_sanitize_function(locations: &[Location]) -> ChainFactory {
    build_check_function(locations)
}
