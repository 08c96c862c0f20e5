//! Integration tests for declaring and running validation chains.

use fieldguard::{
    body, build_check_function, check, header, query, validation_result, ContextRunner,
    ExistsOptions, Location, Message, OptionalOptions, Request, Sanitizers,
};
use serde_json::json;

#[tokio::test]
async fn test_negation_applies_to_next_validator_only() {
    let chain = || body("username").not().is_email().is_alpha();

    let mut req = Request::new().with_body(json!({"username": "alice"}));
    chain().run(&mut req).await.unwrap();
    assert!(validation_result(&req).is_empty());

    let mut req = Request::new().with_body(json!({"username": "alice1"}));
    chain().run(&mut req).await.unwrap();
    let report = validation_result(&req);
    assert_eq!(report.len(), 1);
    assert_eq!(report.array()[0].message, "Invalid value (isAlpha)");

    let mut req = Request::new().with_body(json!({"username": "a@b.co"}));
    chain().run(&mut req).await.unwrap();
    let messages: Vec<String> = validation_result(&req)
        .into_iter()
        .map(|e| e.message)
        .collect();
    assert_eq!(messages, vec!["Invalid value (isEmail)", "Invalid value (isAlpha)"]);
}

#[tokio::test]
async fn test_missing_field_is_reported() {
    let mut req = Request::new().with_body(json!({}));
    body("name").exists().run(&mut req).await.unwrap();

    let report = validation_result(&req);
    assert_eq!(report.len(), 1);
    let error = &report.array()[0];
    assert_eq!(error.location, Some(Location::Body));
    assert_eq!(error.path, "name");
    assert_eq!(error.value, None);
    assert_eq!(error.message, "Invalid value (exists)");
}

#[tokio::test]
async fn test_optional_rules() {
    let mut req = Request::new().with_body(json!({}));
    body("nick").optional().is_alpha().run(&mut req).await.unwrap();
    assert!(validation_result(&req).is_empty());

    let mut req = Request::new().with_body(json!({"nick": ""}));
    body("nick").optional().is_alpha().run(&mut req).await.unwrap();
    assert_eq!(validation_result(&req).len(), 1);

    let mut req = Request::new().with_body(json!({"nick": ""}));
    body("nick")
        .optional_with(OptionalOptions::allow_falsy())
        .is_alpha()
        .run(&mut req)
        .await
        .unwrap();
    assert!(validation_result(&req).is_empty());

    let mut req = Request::new().with_body(json!({"nick": null}));
    body("nick")
        .optional_with(OptionalOptions::allow_null())
        .is_alpha()
        .run(&mut req)
        .await
        .unwrap();
    assert!(validation_result(&req).is_empty());
}

#[tokio::test]
async fn test_exists_options() {
    let mut req = Request::new().with_body(json!({"a": null, "b": 0}));
    body("a").exists().run(&mut req).await.unwrap();
    body("a")
        .exists_with(ExistsOptions {
            check_null: true,
            check_falsy: false,
        })
        .run(&mut req)
        .await
        .unwrap();
    body("b")
        .exists_with(ExistsOptions {
            check_null: false,
            check_falsy: true,
        })
        .run(&mut req)
        .await
        .unwrap();

    let paths: Vec<String> = validation_result(&req).into_iter().map(|e| e.path).collect();
    assert_eq!(paths, vec!["a", "b"]);
}

#[tokio::test]
async fn test_optional_skip_ignores_later_sanitizers() {
    let mut req = Request::new().with_body(json!({"code": ""}));
    let context = body("code")
        .optional_with(OptionalOptions::allow_falsy())
        .default_value(json!("x"))
        .is_int()
        .run(&mut req)
        .await
        .unwrap();

    assert!(validation_result(&req).is_empty());
    assert!(context.instances()[0].is_skipped());
    assert_eq!(req.location(Location::Body)["code"], json!(""));
}

#[tokio::test]
async fn test_message_precedence() {
    let mut req = Request::new().with_body(json!({"age": "old", "pw": "x"}));

    body("age")
        .with_default_message("age is invalid")
        .is_int()
        .is_length(fieldguard::LengthOptions {
            min: Some(5),
            max: None,
        })
        .with_message("age is too short")
        .run(&mut req)
        .await
        .unwrap();
    body("pw")
        .custom(|_, _| Err("password rejected".into()))
        .run(&mut req)
        .await
        .unwrap();
    body("pw")
        .custom(|_, _| Err("password rejected".into()))
        .with_message("bad password")
        .run(&mut req)
        .await
        .unwrap();

    let messages: Vec<String> = validation_result(&req)
        .into_iter()
        .map(|e| e.message)
        .collect();
    assert_eq!(
        messages,
        vec!["age is invalid", "age is too short", "password rejected", "bad password"]
    );
}

#[tokio::test]
async fn test_dynamic_message() {
    let mut req = Request::new().with_query(json!({"page": "two"}));
    query("page")
        .is_int()
        .with_message(Message::dynamic(|value, meta| {
            format!(
                "{} '{}' is not a page number",
                meta.path,
                fieldguard::value::to_validator_string(value)
            )
        }))
        .run(&mut req)
        .await
        .unwrap();

    assert_eq!(
        validation_result(&req).array()[0].message,
        "page 'two' is not a page number"
    );
}

#[tokio::test]
async fn test_wildcard_instances() {
    let mut req = Request::new().with_body(json!({
        "items": [{"price": "1.5"}, {"price": "free"}, {"price": "3"}]
    }));
    let context = body("items.*.price").is_float().run(&mut req).await.unwrap();

    assert_eq!(context.instances().len(), 3);
    let report = validation_result(&req);
    assert_eq!(report.len(), 1);
    assert_eq!(report.array()[0].path, "items[1].price");
    assert_eq!(report.array()[0].value, Some(json!("free")));
}

#[tokio::test]
async fn test_two_chains_one_field_views() {
    let mut req = Request::new().with_body(json!({"email": "nope"}));
    body("email")
        .is_email()
        .with_message("invalid email")
        .run(&mut req)
        .await
        .unwrap();
    body("email")
        .contains("@")
        .with_message("missing @")
        .run(&mut req)
        .await
        .unwrap();

    let report = validation_result(&req);
    assert_eq!(report.array().len(), 2);
    assert_eq!(report.mapped().len(), 1);
    assert_eq!(report.mapped()["email"].message, "invalid email");
    assert_eq!(report.grouped()["email"].len(), 2);
}

#[tokio::test]
async fn test_bail_stops_instance() {
    let mut req = Request::new().with_body(json!({"age": "x"}));
    body("age")
        .is_int()
        .bail()
        .custom(|_, _| Err("unreachable".into()))
        .run(&mut req)
        .await
        .unwrap();

    assert_eq!(validation_result(&req).len(), 1);
}

#[tokio::test]
async fn test_custom_condition() {
    let mut req = Request::new().with_body(json!({"kind": "guest"}));
    body("email")
        .if_custom(|_, meta| Ok(meta.req.location(Location::Body)["kind"] == json!("member")))
        .is_email()
        .run(&mut req)
        .await
        .unwrap();
    assert!(validation_result(&req).is_empty());

    let mut req = Request::new().with_body(json!({"kind": "member"}));
    body("email")
        .if_custom(|_, meta| Ok(meta.req.location(Location::Body)["kind"] == json!("member")))
        .is_email()
        .run(&mut req)
        .await
        .unwrap();
    assert_eq!(validation_result(&req).len(), 1);
}

#[tokio::test]
async fn test_check_searches_every_location() {
    let mut req = Request::new()
        .with_body(json!({}))
        .with_query(json!({"id": "12"}));
    let context = check("id").is_int().run(&mut req).await.unwrap();

    assert_eq!(context.instances().len(), 1);
    assert_eq!(context.instances()[0].location(), Location::Query);
    assert!(validation_result(&req).is_empty());
}

#[tokio::test]
async fn test_headers_are_matched_lowercase() {
    let mut req = Request::new().with_headers(json!({"x-api-key": "abc"}));
    header("X-Api-Key").exists().run(&mut req).await.unwrap();
    assert!(validation_result(&req).is_empty());
}

#[tokio::test]
async fn test_chain_factory_locations() {
    let check_input = build_check_function(&[Location::Params, Location::Query]);
    assert_eq!(check_input.locations(), &[Location::Params, Location::Query]);

    let mut req = Request::new()
        .with_body(json!({"id": "1"}))
        .with_params(json!({"id": "x"}));
    check_input.check("id").is_int().run(&mut req).await.unwrap();

    let report = validation_result(&req);
    assert_eq!(report.len(), 1);
    assert_eq!(report.array()[0].location, Some(Location::Params));
}

#[tokio::test]
async fn test_multiple_fields_one_chain() {
    let mut req = Request::new().with_body(json!({"first": "Ann", "last": ""}));
    body(vec!["first", "last"]).not_empty().run(&mut req).await.unwrap();

    let report = validation_result(&req);
    assert_eq!(report.len(), 1);
    assert_eq!(report.array()[0].path, "last");
}
