use std::fmt;

use serde_json::Value;

use crate::context::Message;
use crate::value::to_validator_string;

use super::{Meta, Outcome, StandardValidator};

/// A catalog string check.
///
/// The value is rendered with [`to_validator_string`] before the check runs,
/// and the result is inverted when the item is negated.
#[derive(Clone)]
pub struct StandardValidation {
    name: String,
    validator: StandardValidator,
    options: Vec<Value>,
    negated: bool,
    message: Option<Message>,
}

impl StandardValidation {
    pub fn new(name: impl Into<String>, validator: StandardValidator, options: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            validator,
            options,
            negated: false,
            message: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[Value] {
        &self.options
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

    pub(crate) fn run(&self, value: Option<&Value>, meta: &Meta<'_>) -> Outcome {
        let valid = (self.validator)(&to_validator_string(value), &self.options);
        if valid != self.negated {
            return Outcome::Pass;
        }
        Outcome::Failed {
            check: self.name.clone(),
            message: self.message.as_ref().map(|m| m.render(value, meta)),
        }
    }
}

impl fmt::Debug for StandardValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardValidation")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("negated", &self.negated)
            .field("message", &self.message)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use crate::path::JsonPath;
    use crate::request::Request;
    use serde_json::json;
    use std::sync::Arc;

    fn is_digits() -> StandardValidation {
        StandardValidation::new(
            "isDigits",
            Arc::new(|s: &str, _: &[Value]| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())),
            Vec::new(),
        )
    }

    #[test]
    fn test_pass_and_fail() {
        let req = Request::new();
        let path = JsonPath::root().push_field("n");
        let meta = Meta {
            req: &req,
            location: Location::Body,
            path: &path,
        };

        let item = is_digits();
        assert_eq!(item.run(Some(&json!("42")), &meta), Outcome::Pass);
        assert_eq!(
            item.run(Some(&json!("4x")), &meta),
            Outcome::Failed {
                check: "isDigits".to_string(),
                message: None
            }
        );
    }

    #[test]
    fn test_negated_inverts_result() {
        let req = Request::new();
        let path = JsonPath::root().push_field("n");
        let meta = Meta {
            req: &req,
            location: Location::Body,
            path: &path,
        };

        let mut item = is_digits();
        item.negate();
        item.set_message("digits not allowed".into());

        assert_eq!(item.run(Some(&json!("abc")), &meta), Outcome::Pass);
        assert_eq!(
            item.run(Some(&json!(42)), &meta),
            Outcome::Failed {
                check: "isDigits".to_string(),
                message: Some("digits not allowed".to_string()),
            }
        );
    }
}
