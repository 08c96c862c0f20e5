use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::context::Message;

use super::{CustomValidator, Meta, Outcome};

/// A user check over the raw value.
#[derive(Clone)]
pub struct CustomValidation {
    name: String,
    validator: Arc<dyn CustomValidator>,
    negated: bool,
    message: Option<Message>,
}

impl CustomValidation {
    pub fn new(name: impl Into<String>, validator: Arc<dyn CustomValidator>) -> Self {
        Self {
            name: name.into(),
            validator,
            negated: false,
            message: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub(crate) fn negate(&mut self) {
        self.negated = true;
    }

    pub(crate) fn set_message(&mut self, message: Message) {
        self.message = Some(message);
    }

    pub(crate) async fn run(&self, value: Option<&Value>, meta: &Meta<'_>) -> Outcome {
        let item_message = || self.message.as_ref().map(|m| m.render(value, meta));

        match self.validator.validate(value, meta).await {
            Ok(valid) if valid != self.negated => Outcome::Pass,
            Ok(_) => Outcome::Failed {
                check: self.name.clone(),
                message: item_message(),
            },
            Err(_) if self.negated => Outcome::Pass,
            Err(err) => Outcome::Failed {
                check: self.name.clone(),
                message: item_message().or_else(|| Some(err.to_string())),
            },
        }
    }
}

impl fmt::Debug for CustomValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValidation")
            .field("name", &self.name)
            .field("negated", &self.negated)
            .field("message", &self.message)
            .finish()
    }
}
