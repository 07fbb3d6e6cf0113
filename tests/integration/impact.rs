//! Impact queries through the engine.

use crate::assert_error_kind;
use crate::common::fixtures;
use schema_graph::{ErrorKind, SchemaEngine, Selector};

fn names(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|v| v.to_string()).collect())
}

#[tokio::test]
async fn test_format_reaches_definitions_and_their_entities() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::mixed_case_graph()));

    let usage = engine.affected(&Selector::format("Email")).await.unwrap();
    assert_eq!(usage.definitions, names(&["emailAddress"]));
    assert_eq!(usage.entities, names(&["Account", "UserName"]));
}

#[tokio::test]
async fn test_definition_reaches_entities_only() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::mixed_case_graph()));

    let usage = engine.affected(&Selector::definition("Age")).await.unwrap();
    assert_eq!(usage.definitions, None);
    assert_eq!(usage.entities, names(&["UserName"]));
}

#[tokio::test]
async fn test_entity_includes_itself() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::mixed_case_graph()));

    let usage = engine.affected(&Selector::entity("UserName")).await.unwrap();
    assert_eq!(usage.entities, names(&["Account", "UserName"]));

    // Nothing references Account, but it is still affected by its own change
    let usage = engine.affected(&Selector::entity("Account")).await.unwrap();
    assert_eq!(usage.entities, names(&["Account"]));
}

#[tokio::test]
async fn test_query_is_a_single_hop() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::cyclic_graph()));

    // Team references Member; nothing is followed past Team
    let usage = engine.affected(&Selector::entity("Member")).await.unwrap();
    assert_eq!(usage.entities, names(&["Member", "Team"]));
}

#[tokio::test]
async fn test_empty_result_is_not_found() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::user_graph()));

    assert_error_kind!(
        engine.affected(&Selector::format("Unused")).await,
        ErrorKind::NotFound
    );
    assert_error_kind!(
        engine.affected(&Selector::definition("missing")).await,
        ErrorKind::NotFound
    );
}

#[tokio::test]
async fn test_selector_must_name_exactly_one_node() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::user_graph()));

    assert_error_kind!(
        engine.affected(&Selector::default()).await,
        ErrorKind::BadInput
    );

    let selector = Selector {
        format: Some("Email".to_string()),
        entity: Some("User".to_string()),
        ..Selector::default()
    };
    assert_error_kind!(engine.affected(&selector).await, ErrorKind::BadInput);
}

#[tokio::test]
async fn test_usage_map_wire_format_omits_empty_members() {
    let engine = SchemaEngine::new(fixtures::store_with(fixtures::user_graph()));

    let usage = engine.affected(&Selector::entity("User")).await.unwrap();
    let value = serde_json::to_value(&usage).unwrap();
    assert_eq!(value, serde_json::json!({"entities": ["User"]}));
}
