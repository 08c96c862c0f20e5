//! Running chains against requests.
//!
//! A run has two passes. The select pass ([`select_fields`]) expands the
//! declared patterns into [`FieldInstance`](crate::FieldInstance)s. The
//! execute pass runs the item stack against every instance. Sanitized values
//! are then written back and the finished [`Context`] is attached to the
//! request.

mod execute;
mod select;

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::Context;
use crate::error::RunError;
use crate::request::Request;
use crate::resolver;

pub(crate) use execute::evaluate_context;
pub use select::select_fields;

/// Options for a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Evaluate without writing sanitized values back or attaching the
    /// context to the request.
    pub dry_run: bool,
}

impl RunOptions {
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }
}

/// Something that can be run against a request.
///
/// Implemented by [`ValidationChain`](crate::ValidationChain),
/// [`SanitizationChain`](crate::SanitizationChain) and
/// [`OneOf`](crate::OneOf).
#[async_trait]
pub trait ContextRunner: Send + Sync {
    /// Selects and executes without touching the request.
    async fn evaluate(&self, req: &Request) -> Result<Context, RunError>;

    /// Runs against `req` with explicit options.
    async fn run_with(
        &self,
        req: &mut Request,
        options: RunOptions,
    ) -> Result<Arc<Context>, RunError> {
        let context = self.evaluate(req).await?;
        if options.dry_run {
            return Ok(Arc::new(context));
        }

        write_back(req, &context)?;
        let context = Arc::new(context);
        req.attach_context(Arc::clone(&context));
        Ok(context)
    }

    /// Runs against `req`, writing sanitized values back and attaching the
    /// resulting context.
    async fn run(&self, req: &mut Request) -> Result<Arc<Context>, RunError> {
        self.run_with(req, RunOptions::default()).await
    }
}

/// Writes every modified instance value into its location, in instance
/// order.
///
/// A stand-in for a field found nowhere is dropped when its declared path
/// cannot be written, since the request holds something else there.
pub(crate) fn write_back(req: &mut Request, context: &Context) -> Result<(), RunError> {
    for instance in context.instances() {
        if !instance.is_modified() || !instance.is_writable() {
            continue;
        }
        let Some(value) = instance.value() else {
            continue;
        };
        let location = instance.location();
        match resolver::set(req.location_mut(location), instance.path(), value.clone()) {
            Ok(()) => {}
            Err(conflict) if !instance.is_resolved() => {
                tracing::debug!(%location, %conflict, "skipping write-back of unresolved field");
            }
            Err(source) => return Err(RunError::WriteBack { location, source }),
        }
    }
    Ok(())
}
