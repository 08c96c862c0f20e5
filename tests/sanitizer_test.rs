//! Integration tests for the built-in sanitizers.

use fieldguard::{
    body, sanitize, validation_result, ContextRunner, Location, Request, Sanitizers,
};
use serde_json::{json, Value};

async fn sanitized(chain: impl ContextRunner, body_value: Value) -> Value {
    let mut req = Request::new().with_body(body_value);
    chain.run(&mut req).await.unwrap();
    req.location(Location::Body).clone()
}

#[tokio::test]
async fn test_string_sanitizers() {
    assert_eq!(
        sanitized(sanitize("v").trim_chars("-"), json!({"v": "--a-b--"})).await,
        json!({"v": "a-b"})
    );
    assert_eq!(
        sanitized(sanitize("v").escape(), json!({"v": "<b>&</b>"})).await,
        json!({"v": "&lt;b&gt;&amp;&lt;&#x2F;b&gt;"})
    );
    assert_eq!(
        sanitized(sanitize("v").blacklist("aeiou"), json!({"v": "education"})).await,
        json!({"v": "dctn"})
    );
    assert_eq!(
        sanitized(sanitize("v").whitelist("0123456789"), json!({"v": "+1 (555) 010"})).await,
        json!({"v": "1555010"})
    );
    assert_eq!(
        sanitized(sanitize("v").strip_low(true), json!({"v": "a\u{0}b\nc"})).await,
        json!({"v": "ab\nc"})
    );
}

#[tokio::test]
async fn test_conversions() {
    assert_eq!(
        sanitized(sanitize("v").to_int(), json!({"v": "12px"})).await,
        json!({"v": 12})
    );
    assert_eq!(
        sanitized(sanitize("v").to_int_radix(16), json!({"v": "ff"})).await,
        json!({"v": 255})
    );
    assert_eq!(
        sanitized(sanitize("v").to_float(), json!({"v": "2.5kg"})).await,
        json!({"v": 2.5})
    );
    assert_eq!(
        sanitized(sanitize("v").to_boolean(false), json!({"v": "no"})).await,
        json!({"v": true})
    );
    assert_eq!(
        sanitized(sanitize("v").to_boolean(true), json!({"v": "yes"})).await,
        json!({"v": false})
    );
}

#[tokio::test]
async fn test_standard_sanitizer_turns_missing_into_empty_string() {
    assert_eq!(
        sanitized(sanitize("v").trim(), json!({})).await,
        json!({"v": ""})
    );
}

#[tokio::test]
async fn test_case_and_replace_keep_missing_fields_missing() {
    assert_eq!(
        sanitized(sanitize("v").to_lower_case().to_upper_case(), json!({})).await,
        json!({})
    );
    assert_eq!(
        sanitized(sanitize("v").replace(vec![json!("")], json!(null)), json!({})).await,
        json!({})
    );
    assert_eq!(
        sanitized(sanitize("v").to_upper_case(), json!({"v": 3})).await,
        json!({"v": 3})
    );
}

#[tokio::test]
async fn test_replace_and_default() {
    assert_eq!(
        sanitized(
            sanitize(vec!["a", "b"]).replace(vec![json!("N/A"), json!("-")], json!(null)),
            json!({"a": "-", "b": "ok"})
        )
        .await,
        json!({"a": null, "b": "ok"})
    );
    assert_eq!(
        sanitized(
            sanitize(vec!["a", "b", "c"]).default_value(json!(0)),
            json!({"a": "", "b": null, "c": 5})
        )
        .await,
        json!({"a": 0, "b": 0, "c": 5})
    );
}

#[tokio::test]
async fn test_to_array() {
    assert_eq!(
        sanitized(sanitize(vec!["a", "b", "c"]).to_array(), json!({"a": "x", "b": ["y"]})).await,
        json!({"a": ["x"], "b": ["y"], "c": []})
    );
}

#[tokio::test]
async fn test_standard_sanitizer_maps_over_arrays() {
    assert_eq!(
        sanitized(body("tags").trim(), json!({"tags": [" a ", " b "]})).await,
        json!({"tags": ["a", "b"]})
    );
}

#[tokio::test]
async fn test_wildcard_over_numeric_object_keys() {
    let mut req = Request::new().with_body(json!({"codes": {"007": " x ", "12": "  "}}));
    body("codes.*").trim().not_empty().run(&mut req).await.unwrap();

    assert_eq!(
        req.location(Location::Body),
        &json!({"codes": {"007": "x", "12": ""}})
    );
    let report = validation_result(&req);
    assert_eq!(report.len(), 1);
    assert_eq!(report.array()[0].path, "codes.12");
}
