//! Reverse-dependency queries: which nodes refer to a given node.
//!
//! A query is a single reverse hop. Formats are never referenced by entities
//! directly, so the format case takes two hops (format -> definitions ->
//! entities). Callers wanting the transitive closure repeat the query on each
//! result.

use super::graph::GraphSnapshot;
use super::types::NodeKind;
use crate::error::{SchemaError, SchemaResult};
use log::debug;
use serde::{Deserialize, Serialize};

/// Query selector. Exactly one member must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl Selector {
    pub fn format(name: impl Into<String>) -> Self {
        Self {
            format: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn definition(name: impl Into<String>) -> Self {
        Self {
            definition: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn entity(label: impl Into<String>) -> Self {
        Self {
            entity: Some(label.into()),
            ..Self::default()
        }
    }

    /// Reduce the selector to its single target.
    pub fn target(&self) -> SchemaResult<Target<'_>> {
        let targets: Vec<Target<'_>> = [
            self.format.as_deref().map(Target::Format),
            self.definition.as_deref().map(Target::Definition),
            self.entity.as_deref().map(Target::Entity),
        ]
        .into_iter()
        .flatten()
        .collect();

        match targets.as_slice() {
            [target] => Ok(*target),
            [] => Err(SchemaError::bad_input(
                "one of 'format', 'definition' or 'entity' must be given",
            )),
            _ => Err(SchemaError::bad_input(
                "only one of 'format', 'definition' or 'entity' may be given",
            )),
        }
    }
}

/// The node an impact query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Format(&'a str),
    Definition(&'a str),
    Entity(&'a str),
}

impl Target<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Target::Format(_) => NodeKind::Format,
            Target::Definition(_) => NodeKind::Definition,
            Target::Entity(_) => NodeKind::Entity,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Target::Format(name) | Target::Definition(name) | Target::Entity(name) => name,
        }
    }
}

/// Nodes depending on a target. Empty members are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<String>>,
}

impl UsageMap {
    fn new(definitions: Vec<String>, entities: Vec<String>) -> Self {
        Self {
            definitions: non_empty(definitions),
            entities: non_empty(entities),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_none() && self.entities.is_none()
    }
}

fn non_empty(names: Vec<String>) -> Option<Vec<String>> {
    if names.is_empty() { None } else { Some(names) }
}

/// Answers impact queries against one snapshot.
pub struct ImpactAnalyzer<'g> {
    graph: &'g GraphSnapshot,
}

impl<'g> ImpactAnalyzer<'g> {
    pub fn new(graph: &'g GraphSnapshot) -> Self {
        Self { graph }
    }

    /// Nodes affected by a change to the selected node.
    ///
    /// Fails with `BadInput` unless exactly one selector member is set, and
    /// with `NotFound` when nothing depends on the target.
    pub fn affected(&self, selector: &Selector) -> SchemaResult<UsageMap> {
        let target = selector.target()?;

        let usage = match target {
            Target::Format(name) => self.format_usage(name),
            Target::Definition(name) => UsageMap::new(Vec::new(), self.definition_users(&[name])),
            Target::Entity(label) => UsageMap::new(Vec::new(), self.entity_users(label)),
        };

        if !self.graph.contains(target.kind(), target.name()) {
            debug!(
                "Impact target {} '{}' does not exist in the graph",
                target.kind(),
                target.name()
            );
        }

        if usage.is_empty() {
            return Err(SchemaError::not_found(format!(
                "nothing depends on {} '{}'",
                target.kind(),
                target.name()
            )));
        }
        Ok(usage)
    }

    fn format_usage(&self, format: &str) -> UsageMap {
        let definitions: Vec<String> = self
            .graph
            .definitions()
            .filter(|definition| definition.format == format)
            .map(|definition| definition.name.clone())
            .collect();

        let names: Vec<&str> = definitions.iter().map(String::as_str).collect();
        let entities = self.definition_users(&names);
        UsageMap::new(definitions, entities)
    }

    /// Entities with a definition-typed field labelled with one of `names`.
    /// Each entity appears once.
    fn definition_users(&self, names: &[&str]) -> Vec<String> {
        self.graph
            .entities()
            .filter(|entity| {
                entity
                    .fields
                    .iter()
                    .any(|field| field.is_definition() && names.contains(&field.label.as_str()))
            })
            .map(|entity| entity.label.clone())
            .collect()
    }

    /// The entity itself plus every entity with an entity-typed field labelled `label`.
    fn entity_users(&self, label: &str) -> Vec<String> {
        self.graph
            .entities()
            .filter(|entity| {
                entity.label == label
                    || entity
                        .fields
                        .iter()
                        .any(|field| field.is_entity() && field.label == label)
            })
            .map(|entity| entity.label.clone())
            .collect()
    }
}
