//! Conversions between field values and the strings standard items work on.

use serde_json::Value;

/// Renders a field value as the string handed to standard validators and
/// sanitizers.
///
/// - missing values and `null` become `""`
/// - strings are passed through, numbers and booleans are formatted
/// - a non-empty array renders its first element (one level deep)
/// - objects render as `[object Object]`
pub fn to_validator_string(value: Option<&Value>) -> String {
    render(value, true)
}

fn render(value: Option<&Value>, deep: bool) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(items)) if deep && !items.is_empty() => render(items.first(), false),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| render(Some(item), false))
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

/// Returns true for values treated as falsy: missing, `null`, `false`, `0`
/// and the empty string.
pub fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_scalars() {
        assert_eq!(to_validator_string(None), "");
        assert_eq!(to_validator_string(Some(&Value::Null)), "");
        assert_eq!(to_validator_string(Some(&json!("abc"))), "abc");
        assert_eq!(to_validator_string(Some(&json!(42))), "42");
        assert_eq!(to_validator_string(Some(&json!(true))), "true");
    }

    #[test]
    fn test_render_array_uses_first_element() {
        assert_eq!(to_validator_string(Some(&json!(["7", "8"]))), "7");
        assert_eq!(to_validator_string(Some(&json!([["a", "b"]]))), "a,b");
        assert_eq!(to_validator_string(Some(&json!([]))), "");
    }

    #[test]
    fn test_render_object() {
        assert_eq!(to_validator_string(Some(&json!({"a": 1}))), "[object Object]");
    }

    #[test]
    fn test_falsy_values() {
        assert!(is_falsy(None));
        assert!(is_falsy(Some(&json!(null))));
        assert!(is_falsy(Some(&json!(false))));
        assert!(is_falsy(Some(&json!(0))));
        assert!(is_falsy(Some(&json!(""))));
        assert!(!is_falsy(Some(&json!("0"))));
        assert!(!is_falsy(Some(&json!([]))));
        assert!(!is_falsy(Some(&json!({}))));
    }
}
