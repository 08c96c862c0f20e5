//! Standard string sanitizers.
//!
//! Every sanitizer has the [`StandardSanitizer`](crate::StandardSanitizer)
//! shape: it receives the field rendered as a string plus the declared
//! options, and returns the new value.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Number, Value};

use crate::value::to_validator_string;

lazy_static! {
    static ref INT_PREFIX: Regex = Regex::new(r"^[-+]?[0-9A-Za-z]+").unwrap();
    static ref FLOAT_PREFIX: Regex =
        Regex::new(r"^[-+]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][-+]?[0-9]+)?").unwrap();
}

fn chars_option(options: &[Value]) -> Option<String> {
    match options.first() {
        None | Some(Value::Null) => None,
        Some(chars) => Some(to_validator_string(Some(chars))),
    }
}

/// `[chars?]`: strips `chars` (default: whitespace) from both ends.
pub fn trim(value: &str, options: &[Value]) -> Value {
    match chars_option(options) {
        Some(chars) => Value::String(value.trim_matches(|c| chars.contains(c)).to_string()),
        None => Value::String(value.trim().to_string()),
    }
}

/// `[chars?]`: strips `chars` (default: whitespace) from the start.
pub fn ltrim(value: &str, options: &[Value]) -> Value {
    match chars_option(options) {
        Some(chars) => Value::String(value.trim_start_matches(|c| chars.contains(c)).to_string()),
        None => Value::String(value.trim_start().to_string()),
    }
}

/// `[chars?]`: strips `chars` (default: whitespace) from the end.
pub fn rtrim(value: &str, options: &[Value]) -> Value {
    match chars_option(options) {
        Some(chars) => Value::String(value.trim_end_matches(|c| chars.contains(c)).to_string()),
        None => Value::String(value.trim_end().to_string()),
    }
}

/// Replaces HTML-significant characters with entities.
pub fn escape(value: &str, _options: &[Value]) -> Value {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            c => escaped.push(c),
        }
    }
    Value::String(escaped)
}

/// Reverses [`escape`].
pub fn unescape(value: &str, _options: &[Value]) -> Value {
    let unescaped = value
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#x2F;", "/")
        .replace("&#x5C;", "\\")
        .replace("&#96;", "`")
        .replace("&amp;", "&");
    Value::String(unescaped)
}

/// `[chars]`: removes every character found in `chars`.
pub fn blacklist(value: &str, options: &[Value]) -> Value {
    let chars = to_validator_string(options.first());
    Value::String(value.chars().filter(|c| !chars.contains(*c)).collect())
}

/// `[chars]`: keeps only characters found in `chars`.
pub fn whitelist(value: &str, options: &[Value]) -> Value {
    let chars = to_validator_string(options.first());
    Value::String(value.chars().filter(|c| chars.contains(*c)).collect())
}

/// `[keep_new_lines?]`: removes ASCII control characters.
pub fn strip_low(value: &str, options: &[Value]) -> Value {
    let keep_new_lines = options.first().and_then(Value::as_bool).unwrap_or(false);
    Value::String(
        value
            .chars()
            .filter(|&c| {
                let low = c < '\u{20}' || c == '\u{7f}';
                !low || (keep_new_lines && (c == '\n' || c == '\r'))
            })
            .collect(),
    )
}

/// `[radix?]`: parses the leading integer; `null` when there is none.
///
/// Leading whitespace is ignored and parsing stops at the first character
/// that is not a digit of the radix (default 10).
pub fn to_int(value: &str, options: &[Value]) -> Value {
    let radix = options
        .first()
        .and_then(Value::as_u64)
        .filter(|radix| (2..=36).contains(radix))
        .unwrap_or(10) as u32;

    let Some(candidate) = INT_PREFIX.find(value.trim_start()) else {
        return Value::Null;
    };
    let candidate = candidate.as_str();
    let (negative, digits) = match candidate.as_bytes()[0] {
        b'-' => (true, &candidate[1..]),
        b'+' => (false, &candidate[1..]),
        _ => (false, candidate),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map_or(digits.len(), |(idx, _)| idx);
    match i64::from_str_radix(&digits[..end], radix) {
        Ok(n) if negative => Value::from(-n),
        Ok(n) => Value::from(n),
        Err(_) => Value::Null,
    }
}

/// Parses the leading decimal number; `null` when there is none.
pub fn to_float(value: &str, _options: &[Value]) -> Value {
    FLOAT_PREFIX
        .find(value.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// `[strict?]`: converts to a boolean.
///
/// Strict mode accepts only `1` and `true` as true. Otherwise everything
/// except `0`, `false` (any case) and the empty string is true.
pub fn to_boolean(value: &str, options: &[Value]) -> Value {
    let strict = options.first().and_then(Value::as_bool).unwrap_or(false);
    let result = if strict {
        value == "1" || value == "true"
    } else {
        value != "0" && !value.eq_ignore_ascii_case("false") && !value.is_empty()
    };
    Value::Bool(result)
}
