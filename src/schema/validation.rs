//! Document validation against a graph snapshot.
//!
//! Recursion follows the document's value tree. Each step consumes one level
//! of a finite JSON value, so entity cycles in the schema cannot cause
//! unbounded descent. Violations are collected across all branches and
//! returned together.

use super::graph::{GraphSnapshot, Node};
use super::types::{Definition, Entity};
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// What went wrong at a given path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViolationKind {
    #[error("document root must be an object")]
    RootNotObject,

    #[error("undefined key '{key}': no definition or entity has this name")]
    UndefinedKey { key: String },

    #[error("definition '{definition}' expects a string, number or boolean value")]
    ExpectedPrimitive { definition: String },

    #[error("entity '{entity}' expects an object value")]
    ExpectedObject { entity: String },

    #[error("unknown format '{format}' for definition '{definition}'")]
    UnknownFormat { definition: String, format: String },

    #[error("format '{format}' has an invalid pattern '{pattern}'")]
    InvalidPattern { format: String, pattern: String },

    #[error("value '{value}' does not match pattern '{pattern}'")]
    PatternMismatch { value: String, pattern: String },

    #[error("unexpected field '{field}' in entity '{entity}'")]
    UnexpectedField { entity: String, field: String },
}

/// A single validation failure located by a dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Dotted path from the document root, empty for the root itself
    pub path: String,
    pub message: String,
    #[serde(skip)]
    pub kind: Option<ViolationKind>,
}

impl Violation {
    pub fn new(path: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            path: path.into(),
            message: kind.to_string(),
            kind: Some(kind),
        }
    }
}

/// Validates documents against one snapshot.
///
/// Format patterns are compiled once when the validator is built, so a single
/// validator can check many documents cheaply.
pub struct Validator<'g> {
    graph: &'g GraphSnapshot,
    patterns: HashMap<&'g str, Result<Regex, regex::Error>>,
}

impl<'g> Validator<'g> {
    pub fn new(graph: &'g GraphSnapshot) -> Self {
        let patterns = graph
            .formats()
            .map(|format| {
                let compiled = Regex::new(&format!("^(?:{})$", format.pattern));
                if let Err(e) = &compiled {
                    warn!("Format '{}' has an invalid pattern: {}", format.name, e);
                }
                (format.name.as_str(), compiled)
            })
            .collect();

        Self { graph, patterns }
    }

    /// Check a whole document and return every violation found.
    pub fn validate(&self, document: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();

        match document.as_object() {
            Some(root) => {
                for (key, value) in root {
                    self.check_node(self.graph.resolve(key), key, value, key, &mut violations);
                }
            }
            None => violations.push(Violation::new("", ViolationKind::RootNotObject)),
        }

        debug!("Validation finished with {} violations", violations.len());
        violations
    }

    fn check_node(
        &self,
        node: Node<'_>,
        key: &str,
        value: &Value,
        path: &str,
        violations: &mut Vec<Violation>,
    ) {
        match node {
            Node::Definition(definition) => {
                self.check_definition(definition, value, path, violations)
            }
            Node::Entity(entity) => self.check_entity(entity, value, path, violations),
            Node::Unknown => violations.push(Violation::new(
                path,
                ViolationKind::UndefinedKey {
                    key: key.to_string(),
                },
            )),
        }
    }

    fn check_definition(
        &self,
        definition: &Definition,
        value: &Value,
        path: &str,
        violations: &mut Vec<Violation>,
    ) {
        let Some(text) = primitive_to_string(value) else {
            violations.push(Violation::new(
                path,
                ViolationKind::ExpectedPrimitive {
                    definition: definition.name.clone(),
                },
            ));
            return;
        };

        let (Some(format), Some(compiled)) = (
            self.graph.format(&definition.format),
            self.patterns.get(definition.format.as_str()),
        ) else {
            violations.push(Violation::new(
                path,
                ViolationKind::UnknownFormat {
                    definition: definition.name.clone(),
                    format: definition.format.clone(),
                },
            ));
            return;
        };

        match compiled {
            Ok(regex) if regex.is_match(&text) => {}
            Ok(_) => violations.push(Violation::new(
                path,
                ViolationKind::PatternMismatch {
                    value: text,
                    pattern: format.pattern.clone(),
                },
            )),
            Err(_) => violations.push(Violation::new(
                path,
                ViolationKind::InvalidPattern {
                    format: format.name.clone(),
                    pattern: format.pattern.clone(),
                },
            )),
        }
    }

    fn check_entity(
        &self,
        entity: &Entity,
        value: &Value,
        path: &str,
        violations: &mut Vec<Violation>,
    ) {
        let Some(object) = value.as_object() else {
            violations.push(Violation::new(
                path,
                ViolationKind::ExpectedObject {
                    entity: entity.label.clone(),
                },
            ));
            return;
        };

        // Absent fields are allowed; only present ones are descended into.
        for field in &entity.fields {
            if let Some(child) = object.get(&field.label) {
                let child_path = format!("{}.{}", path, field.label);
                self.check_node(
                    self.graph.resolve_field(field),
                    &field.label,
                    child,
                    &child_path,
                    violations,
                );
            }
        }

        report_unexpected(entity, object, path, violations);
    }
}

fn report_unexpected(
    entity: &Entity,
    object: &Map<String, Value>,
    path: &str,
    violations: &mut Vec<Violation>,
) {
    for key in object.keys().filter(|key| !entity.declares(key)) {
        violations.push(Violation::new(
            format!("{}.{}", path, key),
            ViolationKind::UnexpectedField {
                entity: entity.label.clone(),
                field: key.clone(),
            },
        ));
    }
}

fn primitive_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Validate `document` against `graph` in one call.
pub fn validate(document: &Value, graph: &GraphSnapshot) -> Vec<Violation> {
    Validator::new(graph).validate(document)
}
