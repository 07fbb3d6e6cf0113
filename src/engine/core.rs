//! Core schema engine structure and initialization.

use crate::engine::builder::EngineConfig;
use crate::storage::{GraphStore, TimeoutStore};
use tokio::sync::{Mutex, MutexGuard};

/// Schema engine over a [`GraphStore`].
///
/// Read operations (validation, impact analysis, describe) each load a fresh
/// snapshot and may run concurrently. Mutations go through
/// [`apply_naming_convention`](SchemaEngine::apply_naming_convention), which
/// holds the schema-mutation lock for its whole run.
///
/// # Type Parameters
///
/// * `S` - The graph store type that implements [`GraphStore`]
///
/// # Examples
///
/// ```rust
/// use schema_graph::SchemaEngine;
/// use schema_graph::storage::InMemoryGraphStore;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = SchemaEngine::new(InMemoryGraphStore::new());
/// let violations = engine.validate(&json!({})).await?;
/// assert!(violations.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct SchemaEngine<S> {
    pub(super) store: TimeoutStore<S>,
    pub(super) config: EngineConfig,
    mutation_lock: Mutex<()>,
}

impl<S: GraphStore> SchemaEngine<S> {
    /// Create an engine with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    ///
    /// The configuration is used as given; [`SchemaEngineBuilder`](crate::SchemaEngineBuilder)
    /// validates it first.
    pub fn with_config(store: S, config: EngineConfig) -> Self {
        Self {
            store: TimeoutStore::new(store, config.store_timeout),
            config,
            mutation_lock: Mutex::new(()),
        }
    }

    /// The wrapped graph store.
    pub fn store(&self) -> &S {
        self.store.inner()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Acquire the schema-mutation lock.
    ///
    /// The lock is advisory: it serializes naming-convention runs started
    /// through this engine, and external writers that also take it. Writes
    /// made directly against the store bypass it.
    pub async fn lock_schema(&self) -> MutexGuard<'_, ()> {
        self.mutation_lock.lock().await
    }
}
