//! Integration tests for schema-declared chains.
#![cfg(feature = "schema")]

use async_trait::async_trait;
use fieldguard::{
    check_schema, check_schema_with, matched_data, validation_result, BoxError, Catalog,
    ContextRunner, CustomSanitizer, Location, Meta, Request, SchemaError,
};
use serde_json::{json, Value};

async fn run_all(chains: &[fieldguard::ValidationChain], req: &mut Request) {
    for chain in chains {
        chain.run(req).await.unwrap();
    }
}

#[tokio::test]
async fn test_validate_and_convert_from_schema() {
    let chains = check_schema(&json!({"age": {"isInt": true, "toInt": true}})).unwrap();

    let mut req = Request::new().with_body(json!({"age": "42"}));
    run_all(&chains, &mut req).await;
    assert!(validation_result(&req).is_empty());
    assert_eq!(req.location(Location::Body)["age"], json!(42));

    let mut req = Request::new().with_query(json!({"age": "forty"}));
    run_all(&chains, &mut req).await;
    let report = validation_result(&req);
    assert_eq!(report.len(), 1);
    assert_eq!(report.array()[0].location, Some(Location::Query));
}

#[tokio::test]
async fn test_body_schema_reports_every_field() {
    let schema = json!({
        "email": {"isEmail": true, "errorMessage": "invalid email"},
        "password": {
            "isLength": {"options": {"min": 8}, "errorMessage": "password too short"}
        },
        "age": {"isInt": {"options": {"min": 18}}},
        "name": {"notEmpty": true},
        "role": {"isIn": {"options": [["admin", "user"]]}}
    });
    let chains = check_schema_with(&schema, &Catalog::standard(), &[Location::Body]).unwrap();
    assert_eq!(chains.len(), 5);

    let mut req = Request::new()
        .with_body(json!({
            "email": "nope",
            "password": "short",
            "age": "12",
            "name": "",
            "role": "root"
        }))
        .with_query(json!({"email": "a@b.co"}));
    run_all(&chains, &mut req).await;

    let report = validation_result(&req);
    let summary: Vec<(String, String)> = report
        .array()
        .iter()
        .map(|e| (e.path.clone(), e.message.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("email".to_string(), "invalid email".to_string()),
            ("password".to_string(), "password too short".to_string()),
            ("age".to_string(), "Invalid value (isInt)".to_string()),
            ("name".to_string(), "Invalid value (notEmpty)".to_string()),
            ("role".to_string(), "Invalid value (isIn)".to_string()),
        ]
    );
    assert!(report
        .array()
        .iter()
        .all(|e| e.location == Some(Location::Body)));
}

#[tokio::test]
async fn test_negated_and_optional_entries() {
    let chains = check_schema(&json!({
        "nickname": {
            "in": "body",
            "optional": {"options": {"checkFalsy": true}},
            "isEmail": {"negated": true, "errorMessage": "nickname must not be an email"}
        }
    }))
    .unwrap();

    let mut req = Request::new().with_body(json!({"nickname": ""}));
    run_all(&chains, &mut req).await;
    assert!(validation_result(&req).is_empty());

    let mut req = Request::new().with_body(json!({"nickname": "me@x.io"}));
    run_all(&chains, &mut req).await;
    assert_eq!(
        validation_result(&req).array()[0].message,
        "nickname must not be an email"
    );
}

#[tokio::test]
async fn test_wildcard_schema_with_sanitizers() {
    let chains = check_schema(&json!({
        "tags.*": {
            "in": ["body"],
            "trim": true,
            "toLowerCase": true,
            "isAlpha": {"errorMessage": "tags are letters only"}
        }
    }))
    .unwrap();

    let mut req = Request::new().with_body(json!({"tags": [" Rust ", "c++"]}));
    run_all(&chains, &mut req).await;

    let report = validation_result(&req);
    assert_eq!(report.len(), 1);
    assert_eq!(report.array()[0].path, "tags[1]");
    assert_eq!(matched_data(&req), json!({"tags": ["rust"]}));
}

struct Slug;

#[async_trait]
impl CustomSanitizer for Slug {
    async fn sanitize(&self, value: Option<&Value>, _meta: &Meta<'_>) -> Result<Value, BoxError> {
        let text = fieldguard::value::to_validator_string(value);
        Ok(Value::String(
            text.split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join("-"),
        ))
    }
}

#[tokio::test]
async fn test_custom_entries_from_catalog() {
    let catalog = Catalog::standard();
    catalog.register_custom_sanitizer("slug", Slug).unwrap();
    catalog
        .register_validator(
            "isSlug",
            std::sync::Arc::new(|s: &str, _: &[Value]| {
                !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase() || c == '-')
            }),
        )
        .unwrap();

    let schema = json!({
        "title": {
            "customSanitizer": {"options": "slug"},
            "custom": {"options": ["isSlug"], "errorMessage": "not a slug"}
        }
    });
    let chains = check_schema_with(&schema, &catalog, &[Location::Body]).unwrap();

    let mut req = Request::new().with_body(json!({"title": "Hello Big World"}));
    run_all(&chains, &mut req).await;
    assert!(validation_result(&req).is_empty());
    assert_eq!(req.location(Location::Body)["title"], json!("hello-big-world"));

    let mut req = Request::new().with_body(json!({"title": "   "}));
    run_all(&chains, &mut req).await;
    assert_eq!(validation_result(&req).array()[0].message, "not a slug");
}

#[test]
fn test_schema_errors() {
    assert!(matches!(
        check_schema(&json!({"age": "isInt"})),
        Err(SchemaError::NotAnObject(field)) if field == "age"
    ));

    let err =
        check_schema(&json!({"title": {"customSanitizer": {"options": "slug"}}})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "field 'title', method 'customSanitizer': 'slug' not found"
    );

    let err = check_schema(&json!({"title": {"custom": {"options": "trim"}}})).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidMethod { .. }));
}
