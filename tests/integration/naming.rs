//! Naming-convention propagation through the engine.

use crate::assert_error_kind;
use crate::assert_violation_paths;
use crate::common::fixtures;
use crate::common::init_logging;
use crate::common::providers::FailingStore;
use schema_graph::schema::{Definition, Entity, Field, Format, GraphDocument};
use schema_graph::storage::GraphStore;
use schema_graph::{ErrorKind, NamingConvention, SchemaEngine, SchemaEngineBuilder};
use serde_json::json;

fn labels(document: &GraphDocument) -> (Vec<String>, Vec<String>) {
    (
        document.definitions.iter().map(|d| d.name.clone()).collect(),
        document.entities.iter().map(|e| e.label.clone()).collect(),
    )
}

#[tokio::test]
async fn test_snake_case_renames_nodes_and_entity_fields() {
    init_logging();
    let store = fixtures::store_with(fixtures::mixed_case_graph());
    let engine = SchemaEngine::new(store.clone());

    let settings = engine
        .apply_naming_convention(NamingConvention::SnakeCase)
        .await
        .unwrap();
    assert_eq!(settings.naming_convention, Some(NamingConvention::SnakeCase));

    let document = store.to_document().await;
    let (definitions, entities) = labels(&document);
    assert_eq!(definitions, vec!["age", "email_address"]);
    assert_eq!(entities, vec!["account", "user_name"]);

    let account = store.get_entity("account").await.unwrap();
    assert_eq!(
        account.fields,
        vec![Field::entity("user_name"), Field::definition("emailAddress")]
    );
}

#[tokio::test]
async fn test_definition_typed_fields_keep_old_labels_by_default() {
    let store = fixtures::store_with(fixtures::mixed_case_graph());
    let engine = SchemaEngine::new(store.clone());
    engine
        .apply_naming_convention(NamingConvention::SnakeCase)
        .await
        .unwrap();

    let user = store.get_entity("user_name").await.unwrap();
    assert_eq!(
        user.fields,
        vec![Field::definition("emailAddress"), Field::definition("Age")]
    );

    let dangling = engine.dangling_references().await.unwrap();
    let found: Vec<(&str, &str)> = dangling
        .iter()
        .map(|d| (d.source.as_str(), d.label.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("account", "emailAddress"),
            ("user_name", "emailAddress"),
            ("user_name", "Age"),
        ]
    );

    // Documents using the old field label no longer resolve
    let violations = engine
        .validate(&json!({"user_name": {"emailAddress": "a@b.c"}}))
        .await
        .unwrap();
    assert_violation_paths!(violations, ["user_name.emailAddress"]);
}

#[tokio::test]
async fn test_cascade_rewrites_definition_typed_fields() {
    let store = fixtures::store_with(fixtures::mixed_case_graph());
    let engine = SchemaEngineBuilder::new(store.clone())
        .with_cascade_definition_renames(true)
        .build()
        .unwrap();

    engine
        .apply_naming_convention(NamingConvention::SnakeCase)
        .await
        .unwrap();

    let user = store.get_entity("user_name").await.unwrap();
    assert_eq!(
        user.fields,
        vec![Field::definition("email_address"), Field::definition("age")]
    );
    assert!(engine.dangling_references().await.unwrap().is_empty());

    let violations = engine
        .validate(&json!({"account": {"user_name": {"email_address": "a@b.c", "age": 7}}}))
        .await
        .unwrap();
    assert!(violations.is_empty(), "unexpected: {:?}", violations);
}

fn shared_label_graph() -> GraphDocument {
    GraphDocument {
        formats: vec![Format::new("Text", ".+")],
        definitions: vec![Definition::new("UserName", "Text")],
        entities: vec![
            Entity::new("UserName", vec![Field::definition("UserName")]),
            Entity::new(
                "Holder",
                vec![Field::definition("UserName"), Field::entity("UserName")],
            ),
        ],
        ..GraphDocument::default()
    }
}

#[tokio::test]
async fn test_fields_are_rewritten_by_declared_kind() {
    let store = fixtures::store_with(shared_label_graph());
    let engine = SchemaEngine::new(store.clone());
    engine
        .apply_naming_convention(NamingConvention::SnakeCase)
        .await
        .unwrap();

    // Same label, but only the entity-typed field follows the entity rename
    let holder = store.get_entity("holder").await.unwrap();
    assert_eq!(
        holder.fields,
        vec![Field::definition("UserName"), Field::entity("user_name")]
    );
    assert!(store.get_definition("user_name").await.is_some());
    assert!(store.get_entity("user_name").await.is_some());

    let store = fixtures::store_with(shared_label_graph());
    let engine = SchemaEngineBuilder::new(store.clone())
        .with_cascade_definition_renames(true)
        .build()
        .unwrap();
    engine
        .apply_naming_convention(NamingConvention::SnakeCase)
        .await
        .unwrap();

    let holder = store.get_entity("holder").await.unwrap();
    assert_eq!(
        holder.fields,
        vec![Field::definition("user_name"), Field::entity("user_name")]
    );
    let user = store.get_entity("user_name").await.unwrap();
    assert_eq!(user.fields, vec![Field::definition("user_name")]);
}

#[tokio::test]
async fn test_second_application_is_a_no_op() {
    let store = fixtures::store_with(fixtures::mixed_case_graph());
    let engine = SchemaEngine::new(store.clone());

    let first = engine
        .apply_naming_convention(NamingConvention::CamelCase)
        .await
        .unwrap();
    let after_first = store.to_document().await;

    let second = engine
        .apply_naming_convention(NamingConvention::CamelCase)
        .await
        .unwrap();
    assert_eq!(store.to_document().await, after_first);
    assert_eq!(first.schema_version, second.schema_version);
    assert!(second.updated_at >= first.updated_at);
}

#[tokio::test]
async fn test_each_convention_shapes_labels() {
    let cases = [
        (NamingConvention::SnakeCase, ["age", "email_address"], ["account", "user_name"]),
        (NamingConvention::CamelCase, ["age", "emailAddress"], ["account", "userName"]),
        (NamingConvention::PascalCase, ["Age", "EmailAddress"], ["Account", "UserName"]),
        (NamingConvention::KebabCase, ["age", "email-address"], ["account", "user-name"]),
    ];

    for (convention, definitions, entities) in cases {
        let store = fixtures::store_with(fixtures::mixed_case_graph());
        SchemaEngine::new(store.clone())
            .apply_naming_convention(convention)
            .await
            .unwrap();

        let (mut actual_definitions, mut actual_entities) = labels(&store.to_document().await);
        actual_definitions.sort();
        actual_entities.sort();
        let mut expected_definitions: Vec<String> = definitions.iter().map(|s| s.to_string()).collect();
        let mut expected_entities: Vec<String> = entities.iter().map(|s| s.to_string()).collect();
        expected_definitions.sort();
        expected_entities.sort();

        assert_eq!(actual_definitions, expected_definitions, "{}", convention);
        assert_eq!(actual_entities, expected_entities, "{}", convention);
    }
}

#[tokio::test]
async fn test_analytics_keys_follow_definitions() {
    let store = fixtures::store_with(fixtures::mixed_case_graph());
    let engine = SchemaEngine::new(store.clone());
    engine
        .apply_naming_convention(NamingConvention::SnakeCase)
        .await
        .unwrap();

    assert_eq!(
        store.list_analytic_keys("definition").await.unwrap(),
        vec!["age", "email_address"]
    );
    assert_eq!(
        store.get_analytic("definition", "email_address").await,
        Some(json!({"hits": 12}))
    );
    // Other kinds are left alone
    assert_eq!(
        store.list_analytic_keys("entity").await.unwrap(),
        vec!["UserName"]
    );
}

#[tokio::test]
async fn test_configured_analytics_kind() {
    let store = fixtures::store_with(fixtures::mixed_case_graph());
    let engine = SchemaEngineBuilder::new(store.clone())
        .with_analytics_kind("entity")
        .build()
        .unwrap();
    engine
        .apply_naming_convention(NamingConvention::SnakeCase)
        .await
        .unwrap();

    assert_eq!(
        store.list_analytic_keys("entity").await.unwrap(),
        vec!["user_name"]
    );
    assert_eq!(
        store.list_analytic_keys("definition").await.unwrap(),
        vec!["Age", "emailAddress"]
    );
}

#[tokio::test]
async fn test_colliding_names_are_a_conflict() {
    let store = fixtures::store_with(GraphDocument {
        formats: vec![Format::new("Text", ".+")],
        definitions: vec![
            Definition::new("userName", "Text"),
            Definition::new("user_name", "Text"),
        ],
        entities: vec![Entity::new("User", vec![Field::definition("user_name")])],
        ..GraphDocument::default()
    });
    let engine = SchemaEngine::new(store.clone());

    assert_error_kind!(
        engine
            .apply_naming_convention(NamingConvention::SnakeCase)
            .await,
        ErrorKind::Conflict
    );
    // The failed run does not record a convention
    assert!(engine.settings().await.unwrap().is_none());
    assert!(store.get_definition("userName").await.is_some());
}

#[tokio::test]
async fn test_partial_failure_is_not_rolled_back() {
    init_logging();
    let store = fixtures::store_with(fixtures::mixed_case_graph());
    // Both definition renames and the Account field rewrite go through,
    // the first entity rename fails.
    let engine = SchemaEngine::new(FailingStore::new(store.clone(), 3));

    assert_error_kind!(
        engine
            .apply_naming_convention(NamingConvention::SnakeCase)
            .await,
        ErrorKind::UpstreamFailure
    );
    assert_eq!(engine.store().mutation_count(), 4);

    let (definitions, entities) = labels(&store.to_document().await);
    assert_eq!(definitions, vec!["age", "email_address"]);
    assert_eq!(entities, vec!["Account", "UserName"]);
    assert_eq!(
        store.get_entity("Account").await.unwrap().fields[0],
        Field::entity("user_name")
    );
    assert!(store.load_settings().await.unwrap().is_none());

    // Re-applying against a healthy store completes the run
    let recovered = SchemaEngine::new(store.clone());
    recovered
        .apply_naming_convention(NamingConvention::SnakeCase)
        .await
        .unwrap();

    let (_, entities) = labels(&store.to_document().await);
    assert_eq!(entities, vec!["account", "user_name"]);
    assert_eq!(
        store.get_entity("account").await.unwrap().fields[0],
        Field::entity("user_name")
    );
    assert!(!recovered.dangling_references().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_settings_record_the_applied_convention() {
    let store = fixtures::store_with(fixtures::user_graph());
    let engine = SchemaEngine::new(store);
    assert!(engine.settings().await.unwrap().is_none());

    let saved = engine
        .apply_naming_convention(NamingConvention::KebabCase)
        .await
        .unwrap();
    let loaded = engine.settings().await.unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(
        loaded.schema_version,
        Some(engine.snapshot().await.unwrap().version())
    );
}
