//! Document validation through the engine.

use crate::assert_violation_paths;
use crate::common::{fixtures, init_logging};
use schema_graph::SchemaEngine;
use schema_graph::schema::{Definition, Entity, Field, ViolationKind};
use serde_json::json;

#[tokio::test]
async fn test_valid_user_document() {
    init_logging();
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::user_graph()));

    let violations = engine
        .validate(&json!({"User": {"email": "a@b.c"}}))
        .await
        .unwrap();
    assert!(violations.is_empty(), "unexpected: {:?}", violations);
}

#[tokio::test]
async fn test_pattern_mismatch_is_reported_at_field_path() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::user_graph()));

    let violations = engine
        .validate(&json!({"User": {"email": "not-an-email"}}))
        .await
        .unwrap();
    assert_violation_paths!(violations, ["User.email"]);
    assert!(matches!(
        violations[0].kind,
        Some(ViolationKind::PatternMismatch { .. })
    ));
    assert!(violations[0].message.contains("not-an-email"));
}

#[tokio::test]
async fn test_undefined_root_key() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::user_graph()));

    let violations = engine.validate(&json!({"Foo": 1})).await.unwrap();
    assert_violation_paths!(violations, ["Foo"]);
    assert_eq!(
        violations[0].message,
        "undefined key 'Foo': no definition or entity has this name"
    );
}

#[tokio::test]
async fn test_non_object_root() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::user_graph()));

    for document in [json!([1, 2]), json!("User"), json!(null)] {
        let violations = engine.validate(&document).await.unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, Some(ViolationKind::RootNotObject));
    }
}

#[tokio::test]
async fn test_empty_document_and_empty_graph() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::user_graph()));
    assert!(engine.validate(&json!({})).await.unwrap().is_empty());

    let empty = SchemaEngine::new(schema_graph::InMemoryGraphStore::new());
    let violations = empty.validate(&json!({"User": {}})).await.unwrap();
    assert_violation_paths!(violations, ["User"]);
}

#[tokio::test]
async fn test_absent_fields_are_allowed_and_extra_fields_are_not() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::mixed_case_graph()));

    let violations = engine
        .validate(&json!({"Account": {"nickname": "x"}}))
        .await
        .unwrap();
    assert_violation_paths!(violations, ["Account.nickname"]);
    assert!(matches!(
        violations[0].kind,
        Some(ViolationKind::UnexpectedField { .. })
    ));
}

#[tokio::test]
async fn test_nested_entities_are_validated_recursively() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::mixed_case_graph()));

    let document = json!({
        "Account": {
            "emailAddress": "owner@example.com",
            "UserName": {
                "emailAddress": "bad",
                "Age": "forty"
            }
        }
    });
    let violations = engine.validate(&document).await.unwrap();
    assert_violation_paths!(
        violations,
        ["Account.UserName.emailAddress", "Account.UserName.Age"]
    );
}

#[tokio::test]
async fn test_numbers_and_booleans_are_matched_as_text() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::mixed_case_graph()));

    let violations = engine.validate(&json!({"Age": 42})).await.unwrap();
    assert!(violations.is_empty());

    let violations = engine.validate(&json!({"Age": true})).await.unwrap();
    assert_violation_paths!(violations, ["Age"]);

    let violations = engine.validate(&json!({"Age": [1]})).await.unwrap();
    assert!(matches!(
        violations[0].kind,
        Some(ViolationKind::ExpectedPrimitive { .. })
    ));
}

#[tokio::test]
async fn test_recursive_entity_terminates_with_document_depth() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::cyclic_graph()));

    let document = json!({
        "Person": {"name": "a", "Person": {"name": "b", "Person": {"name": ""}}}
    });
    let violations = engine.validate(&document).await.unwrap();
    assert_violation_paths!(violations, ["Person.Person.Person.name"]);
}

#[tokio::test]
async fn test_unknown_format_is_a_violation() {
    let store = fixtures::store_with(fixtures::user_graph());
    store.put_definition(Definition::new("phone", "Phone")).await;
    store
        .put_entity(Entity::new(
            "User",
            vec![Field::definition("email"), Field::definition("phone")],
        ))
        .await;
    let engine = SchemaEngine::new(store);

    let violations = engine
        .validate(&json!({"User": {"phone": "123"}}))
        .await
        .unwrap();
    assert_violation_paths!(violations, ["User.phone"]);
    assert_eq!(
        violations[0].kind,
        Some(ViolationKind::UnknownFormat {
            definition: "phone".to_string(),
            format: "Phone".to_string(),
        })
    );
}
