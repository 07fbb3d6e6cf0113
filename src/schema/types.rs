//! Core record types of the schema graph.
//!
//! Nodes reference each other by name only. A [`Field`] stores the label of
//! the node it points at, and the label is looked up when the graph is
//! traversed, so cycles between entities never appear as cyclic pointers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reusable string format backed by an anchored regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    /// Unique format name
    pub name: String,
    /// Anchored regex the value must match in full
    pub pattern: String,
    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Built-in formats are protected from mutation by the CRUD layer
    #[serde(rename = "static", default)]
    pub is_static: bool,
}

impl Format {
    /// Create a non-static format without a description.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            description: None,
            is_static: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A named leaf node bound to exactly one format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Unique definition name
    pub name: String,
    /// Name of the format this definition is checked against
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Definition {
    pub fn new(name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: format.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The kind of node a field points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Definition,
    Entity,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Definition => write!(f, "definition"),
            FieldType::Entity => write!(f, "entity"),
        }
    }
}

/// One `(label, type)` pair inside an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Name of the referenced definition or entity
    pub label: String,
    /// Declared kind of the referenced node
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    pub fn definition(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            field_type: FieldType::Definition,
        }
    }

    pub fn entity(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            field_type: FieldType::Entity,
        }
    }

    pub fn is_definition(&self) -> bool {
        self.field_type == FieldType::Definition
    }

    pub fn is_entity(&self) -> bool {
        self.field_type == FieldType::Entity
    }
}

/// A named composite node with an ordered list of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique entity label
    pub label: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Entity {
    pub fn new(label: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            label: label.into(),
            fields,
        }
    }

    /// Whether any field carries the given label.
    pub fn declares(&self, label: &str) -> bool {
        self.fields.iter().any(|field| field.label == label)
    }
}

/// The kinds of node held by a graph store.
///
/// Used in error payloads and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Format,
    Definition,
    Entity,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Format => "format",
            NodeKind::Definition => "definition",
            NodeKind::Entity => "entity",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
