//! # Fieldguard
//!
//! Declarative validation and sanitization chains for request-like data.
//!
//! ## Overview
//!
//! A chain names one or more fields (plain paths such as `user.email` or
//! wildcard patterns such as `items.*.price`), the request locations to look
//! in, and an ordered list of validators, sanitizers and conditions. Running
//! the chain resolves every concrete field instance, runs the list against
//! each one, writes sanitized values back into the request and records every
//! failure. Failures are data: they are collected in a [`ValidationReport`]
//! rather than returned as errors.
//!
//! ## Core Types
//!
//! - [`Request`]: one JSON value per [`Location`] plus the contexts of chains already run
//! - [`ValidationChain`] / [`SanitizationChain`]: chain declarations, built
//!   with [`check`], [`body`], [`query`] and the other location functions
//! - [`ContextRunner`]: runs a chain, [`OneOf`] group or any other runner against a request
//! - [`Context`]: the record of one run, holding [`FieldInstance`]s and [`FieldError`]s
//! - [`ValidationReport`]: every error of a request, as an array, by path or grouped by path
//!
//! ## Example
//!
//! ```rust
//! use fieldguard::{body, query, validation_result, ContextRunner, Request, Sanitizers};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut req = Request::new()
//!     .with_body(json!({"email": "  ALICE@EXAMPLE.COM ", "tags": ["a", ""]}))
//!     .with_query(json!({"page": "2"}));
//!
//! body("email").trim().is_email().to_lower_case().run(&mut req).await.unwrap();
//! body("tags.*").not_empty().with_message("empty tag").run(&mut req).await.unwrap();
//! query("page").optional().is_int().to_int().run(&mut req).await.unwrap();
//!
//! let report = validation_result(&req);
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.array()[0].path, "tags[1]");
//! assert_eq!(req.location(fieldguard::Location::Body)["email"], json!("alice@example.com"));
//! # }
//! ```

pub mod catalog;
pub mod chain;
pub mod context;
pub mod context_items;
pub mod error;
pub mod location;
pub mod matched_data;
pub mod one_of;
pub mod path;
pub mod request;
pub mod resolver;
pub mod result;
pub mod runner;
pub mod value;

#[cfg(feature = "schema")]
pub mod schema;

pub use catalog::validators::{
    BooleanOptions, ContainsOptions, EmptyOptions, FloatOptions, IntOptions, LengthOptions,
    NumericOptions,
};
pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use chain::{
    body, build_check_function, build_sanitize_function, check, cookie, header, param, query,
    sanitize, ChainFactory, ExistsOptions, IntoFields, SanitizationChain, Sanitizers,
    ValidationChain,
};
pub use context::{Context, ContextBuilder, FieldInstance, Message, OptionalOptions};
pub use context_items::{
    ContextItem, CustomSanitizer, CustomValidator, Meta, Outcome, StandardSanitizer,
    StandardValidator,
};
pub use error::{BoxError, FieldError, FieldErrors, RunError};
pub use location::{Location, UnknownLocation};
pub use matched_data::{matched_data, matched_data_with, MatchedDataOptions};
pub use one_of::{one_of, OneOf, ONE_OF_ERROR_PATH};
pub use path::{JsonPath, PathPattern, PathSegment, PatternSegment};
pub use request::Request;
pub use resolver::PathConflict;
pub use result::{validation_result, ArrayOptions, ValidationReport};
pub use runner::{ContextRunner, RunOptions};

#[cfg(feature = "schema")]
pub use schema::{check_schema, check_schema_with, SchemaError};

/// Type alias for the outcome of converting a report with
/// [`ValidationReport::into_validation`].
pub type ValidationResult<T> = stillwater::Validation<T, FieldErrors>;
