//! Standard string validators.
//!
//! Every validator has the [`StandardValidator`](crate::StandardValidator)
//! shape: it receives the field rendered as a string plus the declared
//! options, and answers whether the string is valid. Option objects are read
//! from the first option unless noted otherwise.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::option_at;
use crate::value::to_validator_string;

lazy_static! {
    static ref INT: Regex = Regex::new(r"^[-+]?(?:[1-9][0-9]*|0)$").unwrap();
    static ref INT_LEADING_ZEROES: Regex = Regex::new(r"^[-+]?[0-9]+$").unwrap();
    static ref FLOAT: Regex =
        Regex::new(r"^[-+]?(?:[0-9]+)?(?:\.[0-9]*)?(?:[eE][-+]?[0-9]+)?$").unwrap();
    static ref NUMERIC: Regex = Regex::new(r"^[-+]?(?:[0-9]*\.)?[0-9]+$").unwrap();
    static ref DIGITS: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref EMAIL: Regex = Regex::new(concat!(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@",
        r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
        r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    ))
    .unwrap();
    static ref ALPHA: Regex = Regex::new(r"^[A-Za-z]+$").unwrap();
    static ref ALPHANUMERIC: Regex = Regex::new(r"^[0-9A-Za-z]+$").unwrap();
    static ref UUID_ANY: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    )
    .unwrap();
    static ref UUID_V3: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-3[0-9a-fA-F]{3}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    )
    .unwrap();
    static ref UUID_V4: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-4[0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$"
    )
    .unwrap();
    static ref UUID_V5: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-5[0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$"
    )
    .unwrap();
}

/// Options for [`contains`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainsOptions {
    #[serde(rename = "ignoreCase")]
    pub ignore_case: bool,
    #[serde(rename = "minOccurrences", skip_serializing_if = "Option::is_none")]
    pub min_occurrences: Option<usize>,
}

/// Options for [`is_empty`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmptyOptions {
    pub ignore_whitespace: bool,
}

/// Options for [`is_length`]. Lengths count characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
}

/// Options for [`is_int`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<i64>,
    /// Accept `007`. Defaults to true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_leading_zeroes: Option<bool>,
}

/// Options for [`is_float`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<f64>,
}

/// Options for [`is_numeric`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericOptions {
    /// Reject signs and decimal points.
    pub no_symbols: bool,
}

/// Options for [`is_boolean`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BooleanOptions {
    /// Also accept `yes` and `no`, in any case.
    pub loose: bool,
}

/// `[seed, ContainsOptions?]`: the value contains the seed.
pub fn contains(value: &str, options: &[Value]) -> bool {
    let seed = to_validator_string(options.first());
    let opts: ContainsOptions = option_at(options, 1);
    let min = opts.min_occurrences.unwrap_or(1);
    if seed.is_empty() {
        return min <= 1;
    }

    let occurrences = if opts.ignore_case {
        value.to_lowercase().matches(&seed.to_lowercase()).count()
    } else {
        value.matches(&seed).count()
    };
    occurrences >= min
}

/// `[comparison]`: the value equals the comparison string.
pub fn equals(value: &str, options: &[Value]) -> bool {
    value == to_validator_string(options.first())
}

/// `[EmptyOptions?]`: the value has no characters.
pub fn is_empty(value: &str, options: &[Value]) -> bool {
    let opts: EmptyOptions = option_at(options, 0);
    if opts.ignore_whitespace {
        value.trim().is_empty()
    } else {
        value.is_empty()
    }
}

/// `[LengthOptions?]`: the character count is within bounds.
pub fn is_length(value: &str, options: &[Value]) -> bool {
    let opts: LengthOptions = option_at(options, 0);
    let len = value.chars().count();
    len >= opts.min.unwrap_or(0) && opts.max.map_or(true, |max| len <= max)
}

/// `[IntOptions?]`: the value is an integer within bounds.
pub fn is_int(value: &str, options: &[Value]) -> bool {
    let opts: IntOptions = option_at(options, 0);
    let pattern = if opts.allow_leading_zeroes.unwrap_or(true) {
        &*INT_LEADING_ZEROES
    } else {
        &*INT
    };
    if !pattern.is_match(value) {
        return false;
    }

    let Ok(n) = value.parse::<i64>() else {
        return opts.min.is_none() && opts.max.is_none() && opts.gt.is_none() && opts.lt.is_none();
    };
    opts.min.map_or(true, |min| n >= min)
        && opts.max.map_or(true, |max| n <= max)
        && opts.gt.map_or(true, |gt| n > gt)
        && opts.lt.map_or(true, |lt| n < lt)
}

/// `[FloatOptions?]`: the value is a decimal number within bounds.
pub fn is_float(value: &str, options: &[Value]) -> bool {
    let opts: FloatOptions = option_at(options, 0);
    if matches!(value, "" | "." | "+" | "-") || !FLOAT.is_match(value) {
        return false;
    }

    let Ok(n) = value.parse::<f64>() else {
        return false;
    };
    opts.min.map_or(true, |min| n >= min)
        && opts.max.map_or(true, |max| n <= max)
        && opts.gt.map_or(true, |gt| n > gt)
        && opts.lt.map_or(true, |lt| n < lt)
}

/// `[NumericOptions?]`: the value is made of digits, optionally signed and
/// with a decimal point.
pub fn is_numeric(value: &str, options: &[Value]) -> bool {
    let opts: NumericOptions = option_at(options, 0);
    if opts.no_symbols {
        DIGITS.is_match(value)
    } else {
        NUMERIC.is_match(value)
    }
}

/// `[BooleanOptions?]`: the value spells a boolean.
pub fn is_boolean(value: &str, options: &[Value]) -> bool {
    let opts: BooleanOptions = option_at(options, 0);
    if matches!(value, "true" | "false" | "1" | "0") {
        return true;
    }
    opts.loose && matches!(value.to_lowercase().as_str(), "true" | "false" | "yes" | "no")
}

pub fn is_email(value: &str, _options: &[Value]) -> bool {
    value.len() <= 254 && EMAIL.is_match(value)
}

pub fn is_alpha(value: &str, _options: &[Value]) -> bool {
    ALPHA.is_match(value)
}

pub fn is_alphanumeric(value: &str, _options: &[Value]) -> bool {
    ALPHANUMERIC.is_match(value)
}

pub fn is_lowercase(value: &str, _options: &[Value]) -> bool {
    value == value.to_lowercase()
}

pub fn is_uppercase(value: &str, _options: &[Value]) -> bool {
    value == value.to_uppercase()
}

/// `[allowed]`: the value equals one of the allowed values.
///
/// `allowed` is an array; each element is compared in its string form.
/// Any other option value is compared as a single allowed value.
pub fn is_in(value: &str, options: &[Value]) -> bool {
    match options.first() {
        Some(Value::Array(allowed)) => allowed
            .iter()
            .any(|candidate| to_validator_string(Some(candidate)) == value),
        Some(other) => to_validator_string(Some(other)) == value,
        None => false,
    }
}

/// `[version?]`: the value is a UUID. `version` is `3`, `4`, `5` or `all`.
pub fn is_uuid(value: &str, options: &[Value]) -> bool {
    let version = options
        .first()
        .map(|v| to_validator_string(Some(v)))
        .unwrap_or_else(|| "all".to_string());
    let pattern = match version.as_str() {
        "3" => &*UUID_V3,
        "4" => &*UUID_V4,
        "5" => &*UUID_V5,
        _ => &*UUID_ANY,
    };
    pattern.is_match(value)
}

/// The value parses as a JSON object or array.
pub fn is_json(value: &str, _options: &[Value]) -> bool {
    matches!(
        serde_json::from_str::<Value>(value),
        Ok(Value::Object(_)) | Ok(Value::Array(_))
    )
}

/// `[pattern, modifiers?]`: the value matches the regular expression.
///
/// Supported modifiers are `i` (case-insensitive), `m` (multi-line) and `s`
/// (dot matches newline). An invalid pattern never matches.
pub fn matches(value: &str, options: &[Value]) -> bool {
    let pattern = to_validator_string(options.first());
    let modifiers = to_validator_string(options.get(1));

    RegexBuilder::new(&pattern)
        .case_insensitive(modifiers.contains('i'))
        .multi_line(modifiers.contains('m'))
        .dot_matches_new_line(modifiers.contains('s'))
        .build()
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_int() {
        assert!(is_int("42", &[]));
        assert!(is_int("-7", &[]));
        assert!(is_int("007", &[]));
        assert!(!is_int("abc", &[]));
        assert!(!is_int("4.2", &[]));
        assert!(!is_int("", &[]));
    }

    #[test]
    fn test_is_int_with_bounds() {
        let opts = [json!({"min": 1, "max": 10})];
        assert!(is_int("5", &opts));
        assert!(!is_int("0", &opts));
        assert!(!is_int("11", &opts));
        assert!(!is_int("007", &[json!({"allow_leading_zeroes": false})]));
    }

    #[test]
    fn test_is_float() {
        assert!(is_float("3.14", &[]));
        assert!(is_float("-1e3", &[]));
        assert!(!is_float(".", &[]));
        assert!(!is_float("1.2.3", &[]));
        assert!(!is_float("2.5", &[json!({"max": 2.0})]));
    }

    #[test]
    fn test_is_length() {
        assert!(is_length("héllo", &[json!({"min": 5, "max": 5})]));
        assert!(!is_length("hi", &[json!({"min": 3})]));
        assert!(is_length("", &[]));
    }

    #[test]
    fn test_contains() {
        assert!(contains("hello world", &[json!("world")]));
        assert!(!contains("hello world", &[json!("WORLD")]));
        assert!(contains("hello world", &[json!("WORLD"), json!({"ignoreCase": true})]));
        assert!(!contains("abab", &[json!("ab"), json!({"minOccurrences": 3})]));
    }

    #[test]
    fn test_is_email() {
        assert!(is_email("alice@example.com", &[]));
        assert!(!is_email("alice@", &[]));
        assert!(!is_email("not an email", &[]));
    }

    #[test]
    fn test_is_in_compares_strings() {
        let opts = [json!(["red", 1, true])];
        assert!(is_in("red", &opts));
        assert!(is_in("1", &opts));
        assert!(is_in("true", &opts));
        assert!(!is_in("blue", &opts));
    }

    #[test]
    fn test_is_boolean() {
        assert!(is_boolean("0", &[]));
        assert!(!is_boolean("yes", &[]));
        assert!(is_boolean("YES", &[json!({"loose": true})]));
    }

    #[test]
    fn test_is_uuid_versions() {
        let v4 = "9b2c1f4e-8d3a-4c5b-9e6f-1a2b3c4d5e6f";
        assert!(is_uuid(v4, &[]));
        assert!(is_uuid(v4, &[json!(4)]));
        assert!(!is_uuid(v4, &[json!("3")]));
        assert!(!is_uuid("not-a-uuid", &[]));
    }

    #[test]
    fn test_matches_with_modifiers() {
        assert!(matches("ABC", &[json!("^abc$"), json!("i")]));
        assert!(!matches("ABC", &[json!("^abc$")]));
        assert!(!matches("x", &[json!("(")]));
    }

    #[test]
    fn test_is_json() {
        assert!(is_json(r#"{"a": 1}"#, &[]));
        assert!(!is_json("1", &[]));
        assert!(!is_json("{", &[]));
    }
}
