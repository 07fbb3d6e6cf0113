//! Point-in-time snapshot of the schema graph and the shared name resolver.
//!
//! The graph is kept as three name-keyed maps. Edges exist only as labels on
//! entity fields and are resolved through [`GraphSnapshot::resolve`] or
//! [`GraphSnapshot::resolve_field`] whenever they are followed.

use super::types::{Definition, Entity, Field, FieldType, Format, NodeKind};
use crate::storage::{GraphStore, StorageError};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Serialized form of a whole graph, as loaded from or written to JSON files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub formats: Vec<Format>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// Analytics records: kind -> key -> record
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub analytics: BTreeMap<String, BTreeMap<String, Value>>,
}

/// Classification of a name against the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    Definition(&'a Definition),
    Entity(&'a Entity),
    Unknown,
}

impl Node<'_> {
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            Node::Definition(_) => Some(NodeKind::Definition),
            Node::Entity(_) => Some(NodeKind::Entity),
            Node::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Node::Unknown)
    }
}

/// A reference that does not resolve to a node of its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingReference {
    /// Entity label (for fields) or definition name (for formats)
    pub source: String,
    /// The unresolved label
    pub label: String,
    /// Kind the label was expected to name
    pub expected: String,
}

/// Immutable view of formats, definitions and entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphSnapshot {
    formats: BTreeMap<String, Format>,
    definitions: BTreeMap<String, Definition>,
    entities: BTreeMap<String, Entity>,
}

impl GraphSnapshot {
    /// Fetch a fresh snapshot from the store.
    pub async fn load<S: GraphStore>(store: &S) -> Result<Self, StorageError> {
        let (formats, definitions, entities) = tokio::try_join!(
            store.list_formats(),
            store.list_definitions(),
            store.list_entities()
        )?;
        trace!(
            "Loaded graph snapshot: {} formats, {} definitions, {} entities",
            formats.len(),
            definitions.len(),
            entities.len()
        );
        Ok(Self::from_parts(formats, definitions, entities))
    }

    /// Build a snapshot from record lists. Later duplicates replace earlier ones.
    pub fn from_parts(
        formats: Vec<Format>,
        definitions: Vec<Definition>,
        entities: Vec<Entity>,
    ) -> Self {
        Self {
            formats: formats.into_iter().map(|f| (f.name.clone(), f)).collect(),
            definitions: definitions
                .into_iter()
                .map(|d| (d.name.clone(), d))
                .collect(),
            entities: entities.into_iter().map(|e| (e.label.clone(), e)).collect(),
        }
    }

    pub fn from_document(document: &GraphDocument) -> Self {
        Self::from_parts(
            document.formats.clone(),
            document.definitions.clone(),
            document.entities.clone(),
        )
    }

    /// Classify `name`. A definition wins over an entity of the same name.
    pub fn resolve(&self, name: &str) -> Node<'_> {
        if let Some(definition) = self.definitions.get(name) {
            Node::Definition(definition)
        } else if let Some(entity) = self.entities.get(name) {
            Node::Entity(entity)
        } else {
            Node::Unknown
        }
    }

    /// Resolve a field label against its declared kind only.
    pub fn resolve_field(&self, field: &Field) -> Node<'_> {
        match field.field_type {
            FieldType::Definition => self
                .definitions
                .get(&field.label)
                .map_or(Node::Unknown, Node::Definition),
            FieldType::Entity => self
                .entities
                .get(&field.label)
                .map_or(Node::Unknown, Node::Entity),
        }
    }

    /// Whether a node of exactly `kind` is named `name`.
    pub fn contains(&self, kind: NodeKind, name: &str) -> bool {
        match kind {
            NodeKind::Format => self.formats.contains_key(name),
            NodeKind::Definition => self.definitions.contains_key(name),
            NodeKind::Entity => self.entities.contains_key(name),
        }
    }

    pub fn format(&self, name: &str) -> Option<&Format> {
        self.formats.get(name)
    }

    pub fn definition(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    pub fn entity(&self, label: &str) -> Option<&Entity> {
        self.entities.get(label)
    }

    pub fn formats(&self) -> impl Iterator<Item = &Format> {
        self.formats.values()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Content hash of the snapshot.
    ///
    /// Equal graphs produce equal versions regardless of the order the store
    /// listed them in.
    pub fn version(&self) -> String {
        let mut hasher = Sha256::new();
        // Serializing maps of plain records cannot fail
        hasher.update(serde_json::to_vec(self).unwrap_or_default());
        let hash = hasher.finalize();
        BASE64.encode(&hash[..8])
    }

    /// Every field or definition pointing at something that does not exist.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let missing_formats = self
            .definitions
            .values()
            .filter(|definition| !self.formats.contains_key(&definition.format))
            .map(|definition| DanglingReference {
                source: definition.name.clone(),
                label: definition.format.clone(),
                expected: NodeKind::Format.to_string(),
            });

        let missing_fields = self.entities.values().flat_map(|entity| {
            entity
                .fields
                .iter()
                .filter(|field| self.resolve_field(field).is_unknown())
                .map(|field| DanglingReference {
                    source: entity.label.clone(),
                    label: field.label.clone(),
                    expected: field.field_type.to_string(),
                })
        });

        missing_formats.chain(missing_fields).collect()
    }
}
