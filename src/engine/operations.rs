//! Engine operations.
//!
//! Every read operation loads a fresh [`GraphSnapshot`] from the store, so
//! concurrent calls never share mutable state.

use super::core::SchemaEngine;
use crate::error::SchemaResult;
use crate::naming::{NamingConvention, RenamePropagator, Settings};
use crate::schema::{
    DanglingReference, EntityDescription, GraphSnapshot, ImpactAnalyzer, Selector, UsageMap,
    Validator, Violation, describe,
};
use crate::storage::GraphStore;
use log::{debug, info, warn};
use serde_json::Value;

impl<S: GraphStore> SchemaEngine<S> {
    /// Load the current graph from the store.
    pub async fn snapshot(&self) -> SchemaResult<GraphSnapshot> {
        Ok(GraphSnapshot::load(&self.store).await?)
    }

    /// Validate `document` against the current graph.
    ///
    /// An empty result means the document is valid.
    pub async fn validate(&self, document: &Value) -> SchemaResult<Vec<Violation>> {
        let graph = self.snapshot().await?;
        let violations = Validator::new(&graph).validate(document);
        if !violations.is_empty() {
            debug!("Document failed validation with {} violations", violations.len());
        }
        Ok(violations)
    }

    /// Nodes that directly reference the selected node.
    ///
    /// # Errors
    ///
    /// * `BadInput` - the selector does not name exactly one node
    /// * `NotFound` - nothing references the node
    pub async fn affected(&self, selector: &Selector) -> SchemaResult<UsageMap> {
        selector.target()?;
        let graph = self.snapshot().await?;
        ImpactAnalyzer::new(&graph).affected(selector)
    }

    /// Rename every node to `convention` and record it in the settings.
    ///
    /// Runs under the schema-mutation lock. A store failure part way leaves
    /// the renames made so far in place; applying the same convention again
    /// finishes the job.
    pub async fn apply_naming_convention(
        &self,
        convention: NamingConvention,
    ) -> SchemaResult<Settings> {
        let _guard = self.lock_schema().await;

        let report = RenamePropagator::new(&self.store, self.config.rename_options())
            .apply(convention)
            .await
            .inspect_err(|e| warn!("Naming convention {} not fully applied: {}", convention, e))?;

        let version = self.snapshot().await?.version();
        let settings = self
            .store
            .save_settings(Settings::new(convention, version))
            .await?;

        if report.is_unchanged() {
            info!("Graph already follows naming convention {}", convention);
        } else {
            info!(
                "Naming convention {} recorded ({} nodes renamed)",
                convention,
                report.definitions_renamed + report.entities_renamed
            );
        }
        Ok(settings)
    }

    /// The persisted settings, if a convention was ever applied.
    pub async fn settings(&self) -> SchemaResult<Option<Settings>> {
        Ok(self.store.load_settings().await?)
    }

    /// Expand an entity into its field tree.
    pub async fn describe(&self, label: &str) -> SchemaResult<EntityDescription> {
        let graph = self.snapshot().await?;
        describe(&graph, label)
    }

    /// References in the current graph that resolve to nothing.
    pub async fn dangling_references(&self) -> SchemaResult<Vec<DanglingReference>> {
        Ok(self.snapshot().await?.dangling_references())
    }
}
