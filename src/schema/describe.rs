//! Nested description of an entity's structure.
//!
//! Unlike validation this walks the schema itself, so it tracks which entity
//! labels were already expanded and never expands one twice.

use super::graph::{GraphSnapshot, Node};
use super::types::{Entity, Field, FieldType};
use crate::error::{SchemaError, SchemaResult};
use serde::Serialize;
use std::collections::HashSet;

/// One field in an entity description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldDescription {
    /// A definition leaf with its format, if the format exists
    Definition {
        label: String,
        format: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    /// A nested entity, expanded
    Entity {
        label: String,
        fields: Vec<FieldDescription>,
    },
    /// An entity already being expanded higher up the path
    Cycle { label: String },
    /// An entity already expanded elsewhere in the same description
    Reference { label: String },
    /// A label that does not resolve to its declared kind
    Dangling { label: String, expected: FieldType },
}

/// Root of a description tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDescription {
    pub label: String,
    pub fields: Vec<FieldDescription>,
}

/// Describe the entity `label` as a tree.
///
/// Each entity is expanded at most once per description. Later occurrences
/// become [`FieldDescription::Reference`], so the output grows with the
/// number of fields in the graph, not with the number of paths through it.
pub fn describe(graph: &GraphSnapshot, label: &str) -> SchemaResult<EntityDescription> {
    let entity = graph
        .entity(label)
        .ok_or_else(|| SchemaError::not_found(format!("entity '{}'", label)))?;

    let mut walk = Walk {
        graph,
        path: HashSet::new(),
        expanded: HashSet::new(),
    };
    walk.expanded.insert(entity.label.as_str());
    Ok(EntityDescription {
        label: entity.label.clone(),
        fields: walk.fields(entity),
    })
}

struct Walk<'g> {
    graph: &'g GraphSnapshot,
    // Entities currently being expanded, root first
    path: HashSet<&'g str>,
    // Entities expanded anywhere in the tree so far
    expanded: HashSet<&'g str>,
}

impl<'g> Walk<'g> {
    fn fields(&mut self, entity: &'g Entity) -> Vec<FieldDescription> {
        self.path.insert(entity.label.as_str());
        let fields = entity
            .fields
            .iter()
            .map(|field| self.field(field))
            .collect();
        self.path.remove(entity.label.as_str());
        fields
    }

    fn field(&mut self, field: &'g Field) -> FieldDescription {
        let label = field.label.clone();
        match self.graph.resolve_field(field) {
            Node::Definition(definition) => FieldDescription::Definition {
                label,
                format: definition.format.clone(),
                pattern: self
                    .graph
                    .format(&definition.format)
                    .map(|format| format.pattern.clone()),
            },
            Node::Entity(nested) if self.path.contains(nested.label.as_str()) => {
                FieldDescription::Cycle { label }
            }
            Node::Entity(nested) if !self.expanded.insert(nested.label.as_str()) => {
                FieldDescription::Reference { label }
            }
            Node::Entity(nested) => FieldDescription::Entity {
                label,
                fields: self.fields(nested),
            },
            Node::Unknown => FieldDescription::Dangling {
                label,
                expected: field.field_type,
            },
        }
    }
}
