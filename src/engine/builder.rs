//! Builder pattern for configuring schema engine instances.

use crate::engine::SchemaEngine;
use crate::error::{SchemaError, SchemaResult};
use crate::naming::RenameOptions;
use crate::storage::GraphStore;
use std::time::Duration;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deadline for every graph store call. `None` waits indefinitely.
    pub store_timeout: Option<Duration>,

    /// Rewrite definition-typed entity fields when definitions are renamed.
    ///
    /// Off by default: renaming a definition leaves fields that reference it
    /// under the old name.
    pub cascade_definition_renames: bool,

    /// Analytics kind whose keys are renamed along with definitions.
    pub analytics_kind: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store_timeout: None,
            cascade_definition_renames: false,
            analytics_kind: "definition".to_string(),
        }
    }
}

impl EngineConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> SchemaResult<()> {
        if self.analytics_kind.trim().is_empty() {
            return Err(SchemaError::bad_input("analytics kind cannot be empty"));
        }

        if self.store_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(SchemaError::bad_input("store timeout must be greater than zero"));
        }

        Ok(())
    }

    pub(crate) fn rename_options(&self) -> RenameOptions {
        RenameOptions {
            cascade_definition_renames: self.cascade_definition_renames,
            analytics_kind: self.analytics_kind.clone(),
        }
    }
}

/// Builder for configuring and creating [`SchemaEngine`] instances.
///
/// # Examples
///
/// ```rust
/// use schema_graph::SchemaEngineBuilder;
/// use schema_graph::storage::InMemoryGraphStore;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = SchemaEngineBuilder::new(InMemoryGraphStore::new())
///     .with_store_timeout(Duration::from_secs(5))
///     .with_cascade_definition_renames(true)
///     .build()?;
/// assert!(engine.config().cascade_definition_renames);
/// # Ok(())
/// # }
/// ```
pub struct SchemaEngineBuilder<S> {
    store: S,
    config: EngineConfig,
}

impl<S: GraphStore> SchemaEngineBuilder<S> {
    /// Start from the default configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: EngineConfig::default(),
        }
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.config.store_timeout = Some(timeout);
        self
    }

    pub fn with_cascade_definition_renames(mut self, cascade: bool) -> Self {
        self.config.cascade_definition_renames = cascade;
        self
    }

    pub fn with_analytics_kind(mut self, kind: impl Into<String>) -> Self {
        self.config.analytics_kind = kind.into();
        self
    }

    /// Build the configured engine.
    ///
    /// # Errors
    ///
    /// Returns `BadInput` if the configuration is invalid.
    pub fn build(self) -> SchemaResult<SchemaEngine<S>> {
        self.config.validate()?;
        Ok(SchemaEngine::with_config(self.store, self.config))
    }
}
