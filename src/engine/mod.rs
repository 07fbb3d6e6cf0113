//! Schema engine: the entry point tying the graph store to validation,
//! impact analysis and naming-convention propagation.
//!
//! # Module Organization
//!
//! * [`core`] - SchemaEngine struct, construction and the mutation lock
//! * [`builder`] - EngineConfig and the builder producing configured engines
//! * [`operations`] - validate, affected, apply_naming_convention and friends

pub mod builder;
pub mod core;
pub mod operations;

pub use builder::{EngineConfig, SchemaEngineBuilder};
pub use core::SchemaEngine;
