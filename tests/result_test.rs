//! Integration tests for the validation report views.

use fieldguard::{
    body, query, validation_result, ArrayOptions, ContextRunner, FieldError, Location, Request,
    ValidationReport,
};
use serde_json::json;
use stillwater::Validation;

async fn failing_request() -> Request {
    let mut req = Request::new()
        .with_body(json!({"email": "x", "tags": ["", "ok", ""]}))
        .with_query(json!({"page": "-"}));

    body("email")
        .is_email()
        .with_message("invalid email")
        .is_length(fieldguard::LengthOptions {
            min: Some(3),
            max: None,
        })
        .with_message("email too short")
        .run(&mut req)
        .await
        .unwrap();
    body("tags.*").not_empty().run(&mut req).await.unwrap();
    query("page").is_int().run(&mut req).await.unwrap();
    req
}

#[tokio::test]
async fn test_array_keeps_run_order() {
    let req = failing_request().await;
    let report = validation_result(&req);

    let paths: Vec<&str> = report.array().iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["email", "email", "tags[0]", "tags[2]", "page"]);

    let first_only = report.array_with(ArrayOptions {
        only_first_error: true,
    });
    let messages: Vec<&str> = first_only.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "invalid email",
            "Invalid value (notEmpty)",
            "Invalid value (notEmpty)",
            "Invalid value (isInt)"
        ]
    );
}

#[tokio::test]
async fn test_mapped_and_grouped() {
    let req = failing_request().await;
    let report = validation_result(&req);

    let mapped = report.mapped();
    let keys: Vec<&String> = mapped.keys().collect();
    assert_eq!(keys, vec!["email", "tags[0]", "tags[2]", "page"]);
    assert_eq!(mapped["page"].location, Some(Location::Query));

    let grouped = report.grouped();
    assert_eq!(grouped["email"].len(), 2);
    assert_eq!(grouped["email"][1].message, "email too short");
}

#[tokio::test]
async fn test_format_with() {
    let req = failing_request().await;
    let lines = validation_result(&req).format_with(|e| e.to_string());

    assert_eq!(lines[0], "body.email: invalid email");
    assert_eq!(lines[4], "query.page: Invalid value (isInt)");
}

#[tokio::test]
async fn test_into_result_and_validation() {
    let req = failing_request().await;

    let errors = validation_result(&req).into_result().unwrap_err();
    assert_eq!(errors.len(), 5);
    assert_eq!(errors.first().path, "email");
    assert_eq!(errors.at_path("tags[2]").len(), 1);
    assert_eq!(errors.in_location(Location::Query).len(), 1);

    let mut clean = Request::new().with_body(json!({"email": "a@b.co"}));
    body("email").is_email().run(&mut clean).await.unwrap();
    assert!(matches!(
        validation_result(&clean).into_validation(),
        Validation::Success(())
    ));
}

#[tokio::test]
async fn test_report_serializes_errors() {
    let req = failing_request().await;
    let value = serde_json::to_value(validation_result(&req)).unwrap();

    assert_eq!(
        value["errors"][4],
        json!({
            "location": "query",
            "path": "page",
            "value": "-",
            "message": "Invalid value (isInt)"
        })
    );
}

#[test]
fn test_report_from_errors() {
    let report = ValidationReport::from_errors(vec![
        FieldError::new(Some(Location::Body), "a", "first"),
        FieldError::new(Some(Location::Body), "a", "second"),
    ]);
    assert_eq!(report.len(), 2);
    assert_eq!(report.mapped()["a"].message, "first");
    assert!(ValidationReport::default().is_empty());
}
