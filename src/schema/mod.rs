//! Schema graph model, validation and impact analysis.
//!
//! # Key Types
//!
//! - [`Format`], [`Definition`], [`Entity`], [`Field`] - graph records
//! - [`GraphSnapshot`] - point-in-time, name-keyed view with the shared resolver
//! - [`Validator`] - checks documents against a snapshot
//! - [`ImpactAnalyzer`] - one-hop reverse-dependency queries
//!
//! # Examples
//!
//! ```rust
//! use schema_graph::schema::{Definition, Entity, Field, Format, GraphSnapshot, validate};
//! use serde_json::json;
//!
//! let graph = GraphSnapshot::from_parts(
//!     vec![Format::new("Email", "^[^@]+@[^@]+$")],
//!     vec![Definition::new("email", "Email")],
//!     vec![Entity::new("User", vec![Field::definition("email")])],
//! );
//!
//! let violations = validate(&json!({"User": {"email": "bad"}}), &graph);
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].path, "User.email");
//! ```

pub mod describe;
pub mod graph;
pub mod impact;
pub mod types;
pub mod validation;


pub use describe::{EntityDescription, FieldDescription, describe};
pub use graph::{DanglingReference, GraphDocument, GraphSnapshot, Node};
pub use impact::{ImpactAnalyzer, Selector, Target, UsageMap};
pub use types::{Definition, Entity, Field, FieldType, Format, NodeKind};
pub use validation::{Validator, Violation, ViolationKind, validate};
