//! Grouped validation: pass if any one group of chains passes.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join_all;

use crate::context::Context;
use crate::error::{FieldError, RunError};
use crate::request::Request;
use crate::runner::ContextRunner;

/// Path of the error recorded when every group fails.
pub const ONE_OF_ERROR_PATH: &str = "_error";

const DEFAULT_MESSAGE: &str = "Invalid value(s)";

/// Passes when at least one group has no errors.
///
/// Every chain of every group is evaluated against the request. When all
/// groups fail, a single error is recorded at [`ONE_OF_ERROR_PATH`] with no
/// location, carrying every group's errors as nested errors. Only the
/// instances of fully valid groups are kept, so only their sanitized values
/// are written back and reported by [`matched_data`](crate::matched_data).
///
/// # Example
///
/// ```rust
/// use fieldguard::{body, one_of, validation_result, ContextRunner, Request};
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let contact = one_of(vec![
///     vec![body("email").is_email()],
///     vec![body("phone").is_numeric()],
/// ])
/// .with_message("provide an email or a phone number");
///
/// let mut req = Request::new().with_body(json!({"phone": "12ab"}));
/// contact.run(&mut req).await.unwrap();
///
/// let report = validation_result(&req);
/// assert_eq!(report.len(), 1);
/// assert_eq!(report.array()[0].path, "_error");
/// assert_eq!(report.array()[0].nested_errors.len(), 2);
/// # }
/// ```
#[derive(Clone, Default)]
pub struct OneOf {
    groups: Vec<Vec<Arc<dyn ContextRunner>>>,
    message: Option<String>,
}

/// Creates a [`OneOf`] from groups of chains.
pub fn one_of<C>(groups: Vec<Vec<C>>) -> OneOf
where
    C: ContextRunner + 'static,
{
    groups.into_iter().fold(OneOf::new(), |one_of, group| one_of.group(group))
}

impl OneOf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a group; it passes when all of its chains pass.
    pub fn group<C>(mut self, chains: Vec<C>) -> Self
    where
        C: ContextRunner + 'static,
    {
        self.groups.push(
            chains
                .into_iter()
                .map(|chain| Arc::new(chain) as Arc<dyn ContextRunner>)
                .collect(),
        );
        self
    }

    /// Sets the message of the error recorded when every group fails.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[async_trait]
impl ContextRunner for OneOf {
    async fn evaluate(&self, req: &Request) -> Result<Context, RunError> {
        let results = try_join_all(
            self.groups
                .iter()
                .map(|group| try_join_all(group.iter().map(|chain| chain.evaluate(req)))),
        )
        .await?;

        let mut surrogate = Context::surrogate();
        let mut nested = Vec::new();
        let mut passed = false;

        for contexts in results {
            let group_errors: Vec<FieldError> = contexts
                .iter()
                .flat_map(|context| context.errors().iter().cloned())
                .collect();

            if group_errors.is_empty() {
                passed = true;
                for context in contexts {
                    surrogate.extend_instances(context.into_instances());
                }
            } else {
                nested.extend(group_errors);
            }
        }

        tracing::debug!(groups = self.groups.len(), passed, "one_of finished");

        if !passed {
            let message = self.message.as_deref().unwrap_or(DEFAULT_MESSAGE);
            surrogate
                .push_error(FieldError::new(None, ONE_OF_ERROR_PATH, message).with_nested(nested));
        }
        Ok(surrogate)
    }
}

impl fmt::Debug for OneOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneOf")
            .field("groups", &self.groups.len())
            .field("message", &self.message)
            .finish()
    }
}
