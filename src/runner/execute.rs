use futures_util::future::try_join_all;

use crate::context::{Context, ContextBuilder, FieldInstance, Message};
use crate::context_items::{ContextItem, Meta, Outcome};
use crate::error::{FieldError, RunError};
use crate::request::Request;

use super::select_fields;

/// Builds a fresh context from `builder` and runs it against `req`.
///
/// Instances are processed concurrently; each instance's stack runs in
/// declaration order. Errors are collected in instance order.
pub(crate) async fn evaluate_context(
    builder: &ContextBuilder,
    req: &Request,
) -> Result<Context, RunError> {
    let mut context = builder.build();
    let mut instances = select_fields(req, context.fields(), context.locations());

    if let Some(options) = context.optional() {
        for instance in &mut instances {
            instance.set_skipped(options.skips(instance.value()));
        }
    }

    tracing::debug!(
        fields = context.fields().len(),
        locations = context.locations().len(),
        instances = instances.len(),
        items = context.stack().len(),
        "running chain"
    );

    let errors: Vec<FieldError> = {
        let stack = context.stack();
        let message = context.message();
        try_join_all(
            instances
                .iter_mut()
                .map(|instance| execute_instance(stack, message, instance, req)),
        )
        .await?
        .into_iter()
        .flatten()
        .collect()
    };

    tracing::debug!(errors = errors.len(), "chain finished");

    context.set_instances(instances);
    context.set_errors(errors);
    Ok(context)
}

async fn execute_instance(
    stack: &[ContextItem],
    chain_message: Option<&Message>,
    instance: &mut FieldInstance,
    req: &Request,
) -> Result<Vec<FieldError>, RunError> {
    let location = instance.location();
    let path = instance.path().clone();

    if instance.is_skipped() {
        tracing::trace!(%location, %path, "optional field skipped");
        return Ok(Vec::new());
    }

    let mut errors = Vec::new();
    for item in stack {
        let meta = Meta {
            req,
            location,
            path: &path,
        };

        match item.run(instance.value(), &meta).await? {
            Outcome::Pass => {}
            Outcome::Sanitized(value) => instance.set_value(value),
            Outcome::Failed { check, message } => {
                let message = message
                    .or_else(|| chain_message.map(|m| m.render(instance.value(), &meta)))
                    .unwrap_or_else(|| format!("Invalid value ({})", check));
                errors.push(
                    FieldError::new(Some(location), path.to_string(), message)
                        .with_value(instance.value().cloned()),
                );
            }
            Outcome::Halt => break,
            Outcome::Bail if !errors.is_empty() => {
                tracing::trace!(%location, %path, "bailing after first failure");
                break;
            }
            Outcome::Bail => {}
        }
    }
    Ok(errors)
}
