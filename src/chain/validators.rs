use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ValidationChain;
use crate::catalog::validators::{
    self, ContainsOptions, FloatOptions, IntOptions, LengthOptions, NumericOptions,
};
use crate::context::{Message, OptionalOptions};
use crate::context_items::{
    ChainCondition, ContextItem, CustomCondition, CustomValidation, CustomValidator, Meta,
    StandardValidation, StandardValidator, ValidatorFn,
};
use crate::error::BoxError;
use crate::runner::ContextRunner;

/// Options for [`ValidationChain::exists_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExistsOptions {
    /// Treat `null` as missing.
    pub check_null: bool,
    /// Treat every falsy value as missing.
    pub check_falsy: bool,
}

fn to_options<T: Serialize>(options: &T) -> Vec<Value> {
    vec![serde_json::to_value(options).unwrap_or_default()]
}

impl ValidationChain {
    /// Negates the next validator.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldguard::body;
    ///
    /// // "username" must not be an email address
    /// let chain = body("username").not().is_email();
    /// # let _ = chain;
    /// ```
    pub fn not(mut self) -> Self {
        self.builder.negate();
        self
    }

    /// Sets the message of the validator added just before this call.
    ///
    /// Has no effect when the previous item is not a validator, such as a
    /// sanitizer or `bail`.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        if !self.builder.set_last_message(message.into()) {
            tracing::debug!("with_message does not follow a validator, ignoring");
        }
        self
    }

    /// Sets the message used by validators that have none of their own.
    pub fn with_default_message(mut self, message: impl Into<Message>) -> Self {
        self.builder.set_message(message.into());
        self
    }

    /// Skips the whole chain when the field is missing.
    pub fn optional(self) -> Self {
        self.optional_with(OptionalOptions::default())
    }

    /// Skips the whole chain when `options` say the field counts as absent.
    pub fn optional_with(mut self, options: OptionalOptions) -> Self {
        self.builder.set_optional(Some(options));
        self
    }

    /// Stops the chain for an instance once it has recorded an error.
    pub fn bail(mut self) -> Self {
        self.builder.add_item(ContextItem::Bail);
        self
    }

    /// Runs the rest of the chain only if `condition` records no error.
    ///
    /// The condition chain is evaluated against the same request; its
    /// sanitizers do not write anything back.
    pub fn if_chain<C>(mut self, condition: C) -> Self
    where
        C: ContextRunner + 'static,
    {
        self.builder
            .add_item(ContextItem::ChainCondition(ChainCondition::new(Arc::new(condition))));
        self
    }

    /// Runs the rest of the chain only if `condition` returns `Ok(true)`.
    pub fn if_custom<F>(mut self, condition: F) -> Self
    where
        F: Fn(Option<&Value>, &Meta<'_>) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        let condition = CustomCondition::new(Arc::new(ValidatorFn(condition)));
        self.builder.add_item(ContextItem::CustomCondition(condition));
        self
    }

    /// Adds a standard validator under `name`.
    pub fn validate_with(
        mut self,
        name: &str,
        validator: StandardValidator,
        options: Vec<Value>,
    ) -> Self {
        let item = StandardValidation::new(name, validator, options);
        self.builder.add_item(ContextItem::StandardValidation(item));
        self
    }

    /// Adds a custom validator.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldguard::body;
    /// use serde_json::json;
    ///
    /// let chain = body("password_confirmation").custom(|value, meta| {
    ///     let password = meta.req.location(meta.location).get("password");
    ///     if value != password {
    ///         return Err("passwords do not match".into());
    ///     }
    ///     Ok(true)
    /// });
    /// # let _ = (chain, json!(null));
    /// ```
    pub fn custom<F>(self, validator: F) -> Self
    where
        F: Fn(Option<&Value>, &Meta<'_>) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.push_custom("custom", Arc::new(ValidatorFn(validator)))
    }

    /// Adds an async custom validator.
    pub fn custom_with<V>(self, validator: V) -> Self
    where
        V: CustomValidator + 'static,
    {
        self.push_custom("custom", Arc::new(validator))
    }

    pub(crate) fn push_custom(mut self, name: &str, validator: Arc<dyn CustomValidator>) -> Self {
        self.builder
            .add_item(ContextItem::CustomValidation(CustomValidation::new(name, validator)));
        self
    }

    /// Fails when the field is missing.
    pub fn exists(self) -> Self {
        self.exists_with(ExistsOptions::default())
    }

    pub fn exists_with(self, options: ExistsOptions) -> Self {
        let check = move |value: Option<&Value>, _: &Meta<'_>| -> Result<bool, BoxError> {
            Ok(if options.check_falsy {
                !crate::value::is_falsy(value)
            } else if options.check_null {
                !matches!(value, None | Some(Value::Null))
            } else {
                value.is_some()
            })
        };
        self.push_custom("exists", Arc::new(ValidatorFn(check)))
    }

    /// Fails unless the value is an array.
    pub fn is_array(self) -> Self {
        let check = |value: Option<&Value>, _: &Meta<'_>| -> Result<bool, BoxError> {
            Ok(matches!(value, Some(Value::Array(_))))
        };
        self.push_custom("isArray", Arc::new(ValidatorFn(check)))
    }

    /// Fails unless the value is a string.
    pub fn is_string(self) -> Self {
        let check = |value: Option<&Value>, _: &Meta<'_>| -> Result<bool, BoxError> {
            Ok(matches!(value, Some(Value::String(_))))
        };
        self.push_custom("isString", Arc::new(ValidatorFn(check)))
    }

    /// Fails when the value renders as an empty string.
    pub fn not_empty(self) -> Self {
        self.validate_with("notEmpty", Arc::new(|s: &str, _: &[Value]| !s.is_empty()), Vec::new())
    }

    pub fn contains(self, seed: &str) -> Self {
        self.validate_with("contains", Arc::new(validators::contains), vec![Value::from(seed)])
    }

    pub fn contains_with(self, seed: &str, options: ContainsOptions) -> Self {
        let mut args = vec![Value::from(seed)];
        args.extend(to_options(&options));
        self.validate_with("contains", Arc::new(validators::contains), args)
    }

    pub fn equals(self, comparison: &str) -> Self {
        self.validate_with("equals", Arc::new(validators::equals), vec![Value::from(comparison)])
    }

    pub fn is_empty(self) -> Self {
        self.validate_with("isEmpty", Arc::new(validators::is_empty), Vec::new())
    }

    pub fn is_length(self, options: LengthOptions) -> Self {
        self.validate_with("isLength", Arc::new(validators::is_length), to_options(&options))
    }

    pub fn is_int(self) -> Self {
        self.validate_with("isInt", Arc::new(validators::is_int), Vec::new())
    }

    pub fn is_int_with(self, options: IntOptions) -> Self {
        self.validate_with("isInt", Arc::new(validators::is_int), to_options(&options))
    }

    pub fn is_float(self) -> Self {
        self.validate_with("isFloat", Arc::new(validators::is_float), Vec::new())
    }

    pub fn is_float_with(self, options: FloatOptions) -> Self {
        self.validate_with("isFloat", Arc::new(validators::is_float), to_options(&options))
    }

    pub fn is_numeric(self) -> Self {
        self.validate_with("isNumeric", Arc::new(validators::is_numeric), Vec::new())
    }

    pub fn is_numeric_with(self, options: NumericOptions) -> Self {
        self.validate_with("isNumeric", Arc::new(validators::is_numeric), to_options(&options))
    }

    /// Accepts `true`, `false`, `1` and `0`; `loose` also accepts `yes`/`no`.
    pub fn is_boolean(self, loose: bool) -> Self {
        self.validate_with(
            "isBoolean",
            Arc::new(validators::is_boolean),
            vec![serde_json::json!({ "loose": loose })],
        )
    }

    pub fn is_email(self) -> Self {
        self.validate_with("isEmail", Arc::new(validators::is_email), Vec::new())
    }

    pub fn is_alpha(self) -> Self {
        self.validate_with("isAlpha", Arc::new(validators::is_alpha), Vec::new())
    }

    pub fn is_alphanumeric(self) -> Self {
        self.validate_with("isAlphanumeric", Arc::new(validators::is_alphanumeric), Vec::new())
    }

    pub fn is_lowercase(self) -> Self {
        self.validate_with("isLowercase", Arc::new(validators::is_lowercase), Vec::new())
    }

    pub fn is_uppercase(self) -> Self {
        self.validate_with("isUppercase", Arc::new(validators::is_uppercase), Vec::new())
    }

    /// Fails unless the value equals one of `allowed` in string form.
    pub fn is_in(self, allowed: Vec<Value>) -> Self {
        self.validate_with("isIn", Arc::new(validators::is_in), vec![Value::Array(allowed)])
    }

    pub fn is_uuid(self) -> Self {
        self.validate_with("isUUID", Arc::new(validators::is_uuid), Vec::new())
    }

    pub fn is_json(self) -> Self {
        self.validate_with("isJSON", Arc::new(validators::is_json), Vec::new())
    }

    /// Fails unless the value matches `pattern`.
    pub fn matches(self, pattern: Regex) -> Self {
        let check = move |value: &str, _: &[Value]| pattern.is_match(value);
        self.validate_with("matches", Arc::new(check), Vec::new())
    }
}
