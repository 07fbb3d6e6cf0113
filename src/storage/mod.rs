//! Storage abstraction for the schema graph.
//!
//! The `GraphStore` trait is the only way the engine reaches persisted
//! formats, definitions, entities and analytics records. Implementations do
//! plain reads and single-record renames; they know nothing about naming
//! conventions, validation or impact analysis.
//!
//! # Example Usage
//!
//! ```rust
//! use schema_graph::schema::{Definition, Entity, Field, Format};
//! use schema_graph::storage::{GraphStore, InMemoryGraphStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryGraphStore::new();
//! store.put_format(Format::new("Email", "^[^@]+@[^@]+$")).await;
//! store.put_definition(Definition::new("email", "Email")).await;
//! store
//!     .put_entity(Entity::new("User", vec![Field::definition("email")]))
//!     .await;
//!
//! store.rename_entity("User", "user").await?;
//! let entities = store.list_entities().await?;
//! assert_eq!(entities[0].label, "user");
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;
pub mod timeout;

pub use errors::StorageError;
pub use in_memory::{InMemoryGraphStore, InMemoryGraphStoreStats};
pub use timeout::TimeoutStore;

use crate::naming::Settings;
use crate::schema::{Definition, Entity, Field, Format};
use std::future::Future;

/// Capability the engine consumes to read and mutate the schema graph.
///
/// Every rename method fails with [`StorageError::NotFound`] when `old` is
/// absent and with [`StorageError::AlreadyExists`] when `new` is already
/// taken. Renames touch exactly one record; cascading is the caller's job.
pub trait GraphStore: Send + Sync {
    /// List every format.
    fn list_formats(&self) -> impl Future<Output = Result<Vec<Format>, StorageError>> + Send;

    /// List every definition.
    fn list_definitions(
        &self,
    ) -> impl Future<Output = Result<Vec<Definition>, StorageError>> + Send;

    /// List every entity with its ordered fields.
    fn list_entities(&self) -> impl Future<Output = Result<Vec<Entity>, StorageError>> + Send;

    /// List the analytics keys recorded under `kind`.
    ///
    /// An unknown kind yields an empty list.
    fn list_analytic_keys(
        &self,
        kind: &str,
    ) -> impl Future<Output = Result<Vec<String>, StorageError>> + Send;

    /// Rename a definition record.
    fn rename_definition(
        &self,
        old: &str,
        new: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Relabel an entity record. Fields of other entities are left untouched.
    fn rename_entity(
        &self,
        old: &str,
        new: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Replace the field list of an entity.
    fn update_entity_fields(
        &self,
        label: &str,
        fields: Vec<Field>,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Move an analytics record of `kind` from key `old` to key `new`.
    fn rename_analytic_key(
        &self,
        kind: &str,
        old: &str,
        new: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Load the persisted settings aggregate, if one was ever saved.
    fn load_settings(&self) -> impl Future<Output = Result<Option<Settings>, StorageError>> + Send;

    /// Persist the settings aggregate and return what was stored.
    fn save_settings(
        &self,
        settings: Settings,
    ) -> impl Future<Output = Result<Settings, StorageError>> + Send;
}
