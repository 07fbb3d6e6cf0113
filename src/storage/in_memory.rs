//! In-memory graph store.
//!
//! Thread-safe implementation of [`GraphStore`] over name-keyed maps guarded
//! by an async `RwLock`. It is intended for tests, the command-line tool and
//! embedding scenarios where persistence is not required.
//!
//! Listing is ordered by name, so every snapshot taken from this store is
//! deterministic.
//!
//! # Example Usage
//!
//! ```rust
//! use schema_graph::schema::GraphDocument;
//! use schema_graph::storage::{GraphStore, InMemoryGraphStore};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let document: GraphDocument = serde_json::from_value(json!({
//!     "formats": [{"name": "Zip", "pattern": "^[0-9]{5}$"}],
//!     "definitions": [{"name": "zipCode", "format": "Zip"}],
//!     "entities": [{"label": "Address", "fields": [{"label": "zipCode", "type": "definition"}]}]
//! }))?;
//!
//! let store = InMemoryGraphStore::from_document(document);
//! assert_eq!(store.stats().await.entity_count, 1);
//! assert_eq!(store.list_definitions().await?[0].name, "zipCode");
//! # Ok(())
//! # }
//! ```

use crate::naming::Settings;
use crate::schema::{Definition, Entity, Field, Format, GraphDocument};
use crate::storage::{GraphStore, StorageError};
use log::{debug, trace};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct GraphData {
    formats: BTreeMap<String, Format>,
    definitions: BTreeMap<String, Definition>,
    entities: BTreeMap<String, Entity>,
    // kind -> key -> record
    analytics: BTreeMap<String, BTreeMap<String, Value>>,
    settings: Option<Settings>,
}

/// Thread-safe in-memory graph store.
///
/// Cloning shares the underlying data.
#[derive(Clone, Default)]
pub struct InMemoryGraphStore {
    data: Arc<RwLock<GraphData>>,
}

impl InMemoryGraphStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated from a graph document.
    pub fn from_document(document: GraphDocument) -> Self {
        Self {
            data: Arc::new(RwLock::new(GraphData::from(document))),
        }
    }

    /// Replace the whole content of the store with a graph document.
    pub async fn load_document(&self, document: GraphDocument) {
        let mut data_guard = self.data.write().await;
        *data_guard = GraphData::from(document);
    }

    /// Export the current content as a graph document.
    pub async fn to_document(&self) -> GraphDocument {
        let data_guard = self.data.read().await;
        GraphDocument {
            formats: data_guard.formats.values().cloned().collect(),
            definitions: data_guard.definitions.values().cloned().collect(),
            entities: data_guard.entities.values().cloned().collect(),
            analytics: data_guard.analytics.clone(),
        }
    }

    /// Insert or replace a format.
    pub async fn put_format(&self, format: Format) {
        let mut data_guard = self.data.write().await;
        data_guard.formats.insert(format.name.clone(), format);
    }

    /// Insert or replace a definition.
    pub async fn put_definition(&self, definition: Definition) {
        let mut data_guard = self.data.write().await;
        data_guard
            .definitions
            .insert(definition.name.clone(), definition);
    }

    /// Insert or replace an entity.
    pub async fn put_entity(&self, entity: Entity) {
        let mut data_guard = self.data.write().await;
        data_guard.entities.insert(entity.label.clone(), entity);
    }

    /// Store an analytics record under `kind`/`key`.
    pub async fn record_analytic(&self, kind: &str, key: &str, record: Value) {
        let mut data_guard = self.data.write().await;
        data_guard
            .analytics
            .entry(kind.to_string())
            .or_default()
            .insert(key.to_string(), record);
    }

    /// Get a single definition by name.
    pub async fn get_definition(&self, name: &str) -> Option<Definition> {
        self.data.read().await.definitions.get(name).cloned()
    }

    /// Get a single entity by label.
    pub async fn get_entity(&self, label: &str) -> Option<Entity> {
        self.data.read().await.entities.get(label).cloned()
    }

    /// Get an analytics record.
    pub async fn get_analytic(&self, kind: &str, key: &str) -> Option<Value> {
        let data_guard = self.data.read().await;
        data_guard
            .analytics
            .get(kind)
            .and_then(|records| records.get(key))
            .cloned()
    }

    /// Clear all data (useful for testing).
    pub async fn clear(&self) {
        let mut data_guard = self.data.write().await;
        *data_guard = GraphData::default();
    }

    /// Get storage statistics for debugging and monitoring.
    pub async fn stats(&self) -> InMemoryGraphStoreStats {
        let data_guard = self.data.read().await;
        InMemoryGraphStoreStats {
            format_count: data_guard.formats.len(),
            definition_count: data_guard.definitions.len(),
            entity_count: data_guard.entities.len(),
            analytic_key_count: data_guard.analytics.values().map(BTreeMap::len).sum(),
        }
    }
}

impl From<GraphDocument> for GraphData {
    fn from(document: GraphDocument) -> Self {
        Self {
            formats: document
                .formats
                .into_iter()
                .map(|format| (format.name.clone(), format))
                .collect(),
            definitions: document
                .definitions
                .into_iter()
                .map(|definition| (definition.name.clone(), definition))
                .collect(),
            entities: document
                .entities
                .into_iter()
                .map(|entity| (entity.label.clone(), entity))
                .collect(),
            analytics: document.analytics,
            settings: None,
        }
    }
}

/// Move the record stored under `old` to `new`, fixing its embedded name.
fn move_record<T>(
    records: &mut BTreeMap<String, T>,
    kind: &str,
    old: &str,
    new: &str,
    relabel: impl FnOnce(&mut T, &str),
) -> Result<(), StorageError> {
    if !records.contains_key(old) {
        return Err(StorageError::not_found(kind, old));
    }
    if old == new {
        return Ok(());
    }
    if records.contains_key(new) {
        return Err(StorageError::already_exists(kind, new));
    }

    if let Some(mut record) = records.remove(old) {
        relabel(&mut record, new);
        records.insert(new.to_string(), record);
    }
    Ok(())
}

impl GraphStore for InMemoryGraphStore {
    async fn list_formats(&self) -> Result<Vec<Format>, StorageError> {
        let data_guard = self.data.read().await;
        Ok(data_guard.formats.values().cloned().collect())
    }

    async fn list_definitions(&self) -> Result<Vec<Definition>, StorageError> {
        let data_guard = self.data.read().await;
        Ok(data_guard.definitions.values().cloned().collect())
    }

    async fn list_entities(&self) -> Result<Vec<Entity>, StorageError> {
        let data_guard = self.data.read().await;
        Ok(data_guard.entities.values().cloned().collect())
    }

    async fn list_analytic_keys(&self, kind: &str) -> Result<Vec<String>, StorageError> {
        let data_guard = self.data.read().await;
        Ok(data_guard
            .analytics
            .get(kind)
            .map(|records| records.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn rename_definition(&self, old: &str, new: &str) -> Result<(), StorageError> {
        let mut data_guard = self.data.write().await;
        move_record(
            &mut data_guard.definitions,
            "definition",
            old,
            new,
            |definition, name| definition.name = name.to_string(),
        )?;
        debug!("Renamed definition '{}' to '{}'", old, new);
        Ok(())
    }

    async fn rename_entity(&self, old: &str, new: &str) -> Result<(), StorageError> {
        let mut data_guard = self.data.write().await;
        move_record(&mut data_guard.entities, "entity", old, new, |entity, label| {
            entity.label = label.to_string()
        })?;
        debug!("Renamed entity '{}' to '{}'", old, new);
        Ok(())
    }

    async fn update_entity_fields(&self, label: &str, fields: Vec<Field>) -> Result<(), StorageError> {
        let mut data_guard = self.data.write().await;
        let entity = data_guard
            .entities
            .get_mut(label)
            .ok_or_else(|| StorageError::not_found("entity", label))?;
        trace!("Updating {} fields of entity '{}'", fields.len(), label);
        entity.fields = fields;
        Ok(())
    }

    async fn rename_analytic_key(&self, kind: &str, old: &str, new: &str) -> Result<(), StorageError> {
        let mut data_guard = self.data.write().await;
        let records = data_guard
            .analytics
            .get_mut(kind)
            .ok_or_else(|| StorageError::not_found(format!("{} analytics", kind), old))?;
        move_record(records, "analytics key", old, new, |_, _| {})
    }

    async fn load_settings(&self) -> Result<Option<Settings>, StorageError> {
        Ok(self.data.read().await.settings.clone())
    }

    async fn save_settings(&self, settings: Settings) -> Result<Settings, StorageError> {
        let mut data_guard = self.data.write().await;
        data_guard.settings = Some(settings.clone());
        Ok(settings)
    }
}

/// Statistics about the current state of the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryGraphStoreStats {
    pub format_count: usize,
    pub definition_count: usize,
    pub entity_count: usize,
    /// Total analytics keys across all kinds
    pub analytic_key_count: usize,
}
