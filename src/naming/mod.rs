//! Naming conventions and their propagation across the schema graph.
//!
//! - [`case`] - pure identifier conversion functions
//! - [`RenamePropagator`] - applies a convention to every node in a store
//! - [`Settings`] - the aggregate recording the convention in force

pub mod case;
pub mod rename;
pub mod settings;

pub use case::{
    NamingConvention, to_camel_case, to_kebab_case, to_pascal_case, to_snake_case, to_words,
};
pub use rename::{RenameOptions, RenamePropagator, RenameReport};
pub use settings::Settings;
