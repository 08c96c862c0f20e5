use std::sync::Arc;

use serde_json::Value;

use crate::error::RunError;
use crate::runner::ContextRunner;

use super::{CustomValidator, Meta, Outcome};

/// Gates the rest of a chain on another chain passing.
///
/// The nested chain is evaluated against the same request without writing
/// anything back. If it records any error the current instance halts.
#[derive(Clone)]
pub struct ChainCondition {
    chain: Arc<dyn ContextRunner>,
}

impl ChainCondition {
    pub fn new(chain: Arc<dyn ContextRunner>) -> Self {
        Self { chain }
    }

    pub(crate) async fn run(&self, meta: &Meta<'_>) -> Result<Outcome, RunError> {
        let context = self.chain.evaluate(meta.req).await?;
        if context.has_errors() {
            tracing::trace!(
                location = %meta.location,
                path = %meta.path,
                errors = context.errors().len(),
                "condition chain failed, halting"
            );
            return Ok(Outcome::Halt);
        }
        Ok(Outcome::Pass)
    }
}

/// Gates the rest of a chain on a predicate over the current value.
///
/// Anything other than `Ok(true)` halts the instance.
#[derive(Clone)]
pub struct CustomCondition {
    condition: Arc<dyn CustomValidator>,
}

impl CustomCondition {
    pub fn new(condition: Arc<dyn CustomValidator>) -> Self {
        Self { condition }
    }

    pub(crate) async fn run(&self, value: Option<&Value>, meta: &Meta<'_>) -> Outcome {
        match self.condition.validate(value, meta).await {
            Ok(true) => Outcome::Pass,
            _ => {
                tracing::trace!(
                    location = %meta.location,
                    path = %meta.path,
                    "condition failed, halting"
                );
                Outcome::Halt
            }
        }
    }
}
