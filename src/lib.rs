//! Schema graph engine for Rust.
//!
//! Maintains a graph of formats, definitions and entities kept in a pluggable
//! graph store, validates JSON documents against it, answers impact queries,
//! and renames the whole graph to a naming convention.
//!
//! # Core Components
//!
//! - [`SchemaEngine`] - Entry point coordinating the operations below
//! - [`GraphStore`] - Trait for implementing storage backends
//! - [`schema::Validator`] - Document validation against a graph snapshot
//! - [`schema::ImpactAnalyzer`] - Reverse-reference queries
//! - [`naming::RenamePropagator`] - Naming-convention propagation
//!
//! # Quick Start
//!
//! ```rust
//! use schema_graph::{NamingConvention, SchemaEngine, Selector};
//! use schema_graph::schema::{Definition, Entity, Field, Format};
//! use schema_graph::storage::InMemoryGraphStore;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryGraphStore::new();
//! store.put_format(Format::new("Email", "[^@]+@[^@]+")).await;
//! store.put_definition(Definition::new("email", "Email")).await;
//! store
//!     .put_entity(Entity::new("User", vec![Field::definition("email")]))
//!     .await;
//!
//! let engine = SchemaEngine::new(store);
//! let violations = engine
//!     .validate(&json!({"User": {"email": "a@b.c"}}))
//!     .await?;
//! assert!(violations.is_empty());
//!
//! let usage = engine.affected(&Selector::format("Email")).await?;
//! assert_eq!(usage.definitions, Some(vec!["email".to_string()]));
//!
//! engine.apply_naming_convention(NamingConvention::SnakeCase).await?;
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod naming;
pub mod schema;
pub mod storage;

// Re-export commonly used types for convenience
pub use engine::{EngineConfig, SchemaEngine, SchemaEngineBuilder};
pub use error::{ErrorKind, SchemaError, SchemaResult};
pub use naming::{NamingConvention, Settings};
pub use schema::{GraphSnapshot, Selector, UsageMap, Violation};
pub use storage::{GraphStore, InMemoryGraphStore};
