//! Tests for sharing catalogs and chains across threads.

use fieldguard::{body, Catalog, ContextRunner, Request};
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_catalog_access() {
    let catalog = Catalog::standard();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let catalog = catalog.clone();
            thread::spawn(move || {
                assert!(catalog.get("isInt").is_some());
                let always = Arc::new(|_: &str, _: &[Value]| true);
                catalog
                    .register_validator(format!("custom{}", i), always)
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!((0..10).all(|i| catalog.contains(&format!("custom{}", i))));
}

#[test]
fn test_chain_shared_across_threads() {
    let chain = Arc::new(body("age").is_int().with_message("age must be an integer"));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let chain = Arc::clone(&chain);
            thread::spawn(move || {
                let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
                let age = if i % 2 == 0 { json!("30") } else { json!("thirty") };
                let mut req = Request::new().with_body(json!({ "age": age }));

                let context = runtime.block_on(chain.run(&mut req)).unwrap();
                assert_eq!(context.errors().is_empty(), i % 2 == 0);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[cfg(feature = "schema")]
#[test]
fn test_schema_chains_from_shared_catalog() {
    use fieldguard::{check_schema_with, Location};

    let catalog = Catalog::standard();
    catalog
        .register_validator(
            "isEven",
            Arc::new(|s: &str, _: &[Value]| s.parse::<i64>().map(|n| n % 2 == 0).unwrap_or(false)),
        )
        .unwrap();

    let chains = Arc::new(
        check_schema_with(&json!({"n": {"isEven": true}}), &catalog, &[Location::Query]).unwrap(),
    );

    let handles: Vec<_> = [("4", true), ("5", false)]
        .into_iter()
        .map(|(n, valid)| {
            let chains = Arc::clone(&chains);
            thread::spawn(move || {
                let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
                let mut req = Request::new().with_query(json!({ "n": n }));
                let context = runtime.block_on(chains[0].run(&mut req)).unwrap();
                assert_eq!(context.errors().is_empty(), valid);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
