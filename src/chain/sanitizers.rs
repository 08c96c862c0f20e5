use std::sync::Arc;

use serde_json::Value;

use super::{SanitizationChain, ValidationChain};
use crate::catalog::sanitizers;
use crate::context::ContextBuilder;
use crate::context_items::{
    ContextItem, CustomSanitization, CustomSanitizer, Meta, SanitizerFn, StandardSanitization,
    StandardSanitizer,
};
use crate::error::BoxError;

fn sanitizer_fn<F>(f: F) -> Arc<dyn CustomSanitizer>
where
    F: Fn(Option<&Value>, &Meta<'_>) -> Result<Value, BoxError> + Send + Sync + 'static,
{
    Arc::new(SanitizerFn(f))
}

/// Sanitizer methods shared by [`ValidationChain`] and [`SanitizationChain`].
///
/// Sanitizers replace the field value for every later item in the chain;
/// once the run completes the final value is written back into the request.
pub trait Sanitizers: Sized {
    #[doc(hidden)]
    fn builder_mut(&mut self) -> &mut ContextBuilder;

    /// Adds a standard sanitizer under `name`.
    fn sanitize_with(
        mut self,
        name: &str,
        sanitizer: StandardSanitizer,
        options: Vec<Value>,
    ) -> Self {
        let item = StandardSanitization::new(name, sanitizer, options);
        self.builder_mut().add_item(ContextItem::StandardSanitization(item));
        self
    }

    /// Adds a custom sanitizer over the raw value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldguard::{body, Sanitizers};
    /// use serde_json::{json, Value};
    ///
    /// let chain = body("tags").custom_sanitizer(|value, _| {
    ///     Ok(match value {
    ///         Some(Value::String(s)) => json!(s.split(',').collect::<Vec<_>>()),
    ///         other => other.cloned().unwrap_or(Value::Null),
    ///     })
    /// });
    /// # let _ = chain;
    /// ```
    fn custom_sanitizer<F>(self, sanitizer: F) -> Self
    where
        F: Fn(Option<&Value>, &Meta<'_>) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.custom_sanitizer_with(SanitizerFn(sanitizer))
    }

    /// Adds an async custom sanitizer.
    fn custom_sanitizer_with<S>(mut self, sanitizer: S) -> Self
    where
        S: CustomSanitizer + 'static,
    {
        self.builder_mut()
            .add_item(ContextItem::CustomSanitization(CustomSanitization::new(
                "customSanitizer",
                Arc::new(sanitizer),
            )));
        self
    }

    fn trim(self) -> Self {
        self.sanitize_with("trim", Arc::new(sanitizers::trim), Vec::new())
    }

    /// Trims the characters in `chars` instead of whitespace.
    fn trim_chars(self, chars: &str) -> Self {
        self.sanitize_with("trim", Arc::new(sanitizers::trim), vec![Value::from(chars)])
    }

    fn ltrim(self) -> Self {
        self.sanitize_with("ltrim", Arc::new(sanitizers::ltrim), Vec::new())
    }

    fn rtrim(self) -> Self {
        self.sanitize_with("rtrim", Arc::new(sanitizers::rtrim), Vec::new())
    }

    fn escape(self) -> Self {
        self.sanitize_with("escape", Arc::new(sanitizers::escape), Vec::new())
    }

    fn unescape(self) -> Self {
        self.sanitize_with("unescape", Arc::new(sanitizers::unescape), Vec::new())
    }

    fn blacklist(self, chars: &str) -> Self {
        self.sanitize_with("blacklist", Arc::new(sanitizers::blacklist), vec![Value::from(chars)])
    }

    fn whitelist(self, chars: &str) -> Self {
        self.sanitize_with("whitelist", Arc::new(sanitizers::whitelist), vec![Value::from(chars)])
    }

    fn strip_low(self, keep_new_lines: bool) -> Self {
        self.sanitize_with(
            "stripLow",
            Arc::new(sanitizers::strip_low),
            vec![Value::Bool(keep_new_lines)],
        )
    }

    /// Converts to an integer; `null` when the value does not start with one.
    fn to_int(self) -> Self {
        self.sanitize_with("toInt", Arc::new(sanitizers::to_int), Vec::new())
    }

    fn to_int_radix(self, radix: u32) -> Self {
        self.sanitize_with("toInt", Arc::new(sanitizers::to_int), vec![Value::from(radix)])
    }

    fn to_float(self) -> Self {
        self.sanitize_with("toFloat", Arc::new(sanitizers::to_float), Vec::new())
    }

    fn to_boolean(self, strict: bool) -> Self {
        self.sanitize_with("toBoolean", Arc::new(sanitizers::to_boolean), vec![Value::Bool(strict)])
    }

    /// Lowercases string values; other values are left alone.
    fn to_lower_case(mut self) -> Self {
        let sanitizer = sanitizer_fn(|value, _| {
            Ok(match value {
                Some(Value::String(s)) => Value::String(s.to_lowercase()),
                other => other.cloned().unwrap_or(Value::Null),
            })
        });
        self.builder_mut()
            .add_item(ContextItem::CustomSanitization(CustomSanitization::skipping_missing(
                "toLowerCase",
                sanitizer,
            )));
        self
    }

    /// Uppercases string values; other values are left alone.
    fn to_upper_case(mut self) -> Self {
        let sanitizer = sanitizer_fn(|value, _| {
            Ok(match value {
                Some(Value::String(s)) => Value::String(s.to_uppercase()),
                other => other.cloned().unwrap_or(Value::Null),
            })
        });
        self.builder_mut()
            .add_item(ContextItem::CustomSanitization(CustomSanitization::skipping_missing(
                "toUpperCase",
                sanitizer,
            )));
        self
    }

    /// Wraps the value in an array. Missing values become `[]`, arrays are
    /// kept as they are.
    fn to_array(mut self) -> Self {
        let sanitizer = sanitizer_fn(|value, _| {
            Ok(match value {
                None => Value::Array(Vec::new()),
                Some(Value::Array(items)) => Value::Array(items.clone()),
                Some(other) => Value::Array(vec![other.clone()]),
            })
        });
        let item = CustomSanitization::new("toArray", sanitizer);
        self.builder_mut().add_item(ContextItem::CustomSanitization(item));
        self
    }

    /// Replaces missing, `null` and empty-string values with `default`.
    fn default_value(mut self, default: Value) -> Self {
        let sanitizer = sanitizer_fn(move |value, _| {
            Ok(match value {
                None | Some(Value::Null) => default.clone(),
                Some(Value::String(s)) if s.is_empty() => default.clone(),
                Some(other) => other.clone(),
            })
        });
        let item = CustomSanitization::new("default", sanitizer);
        self.builder_mut().add_item(ContextItem::CustomSanitization(item));
        self
    }

    /// Replaces any value equal to one of `targets` with `replacement`.
    fn replace(mut self, targets: Vec<Value>, replacement: Value) -> Self {
        let sanitizer = sanitizer_fn(move |value, _| {
            Ok(match value {
                Some(current) if targets.contains(current) => replacement.clone(),
                other => other.cloned().unwrap_or(Value::Null),
            })
        });
        self.builder_mut()
            .add_item(ContextItem::CustomSanitization(CustomSanitization::skipping_missing(
                "replace",
                sanitizer,
            )));
        self
    }
}

impl Sanitizers for ValidationChain {
    fn builder_mut(&mut self) -> &mut ContextBuilder {
        &mut self.builder
    }
}

impl Sanitizers for SanitizationChain {
    fn builder_mut(&mut self) -> &mut ContextBuilder {
        &mut self.builder
    }
}
