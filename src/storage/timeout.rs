//! Deadline wrapper around any [`GraphStore`].
//!
//! Every call to the inner store is bounded by the configured duration. An
//! expired call surfaces as [`StorageError::Timeout`] and is not retried.

use crate::naming::Settings;
use crate::schema::{Definition, Entity, Field, Format};
use crate::storage::{GraphStore, StorageError};
use log::warn;
use std::future::Future;
use std::time::Duration;

/// A graph store whose calls may time out.
#[derive(Debug, Clone)]
pub struct TimeoutStore<S> {
    inner: S,
    timeout: Option<Duration>,
}

impl<S: GraphStore> TimeoutStore<S> {
    /// Wrap `inner`. `None` disables the deadline.
    pub fn new(inner: S, timeout: Option<Duration>) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn guard<T>(
        &self,
        operation: &str,
        call: impl Future<Output = Result<T, StorageError>>,
    ) -> Result<T, StorageError> {
        let Some(limit) = self.timeout else {
            return call.await;
        };

        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Graph store call '{}' exceeded {:?}", operation, limit);
                Err(StorageError::timeout(operation, limit))
            }
        }
    }
}

impl<S: GraphStore> GraphStore for TimeoutStore<S> {
    async fn list_formats(&self) -> Result<Vec<Format>, StorageError> {
        self.guard("list_formats", self.inner.list_formats()).await
    }

    async fn list_definitions(&self) -> Result<Vec<Definition>, StorageError> {
        self.guard("list_definitions", self.inner.list_definitions())
            .await
    }

    async fn list_entities(&self) -> Result<Vec<Entity>, StorageError> {
        self.guard("list_entities", self.inner.list_entities()).await
    }

    async fn list_analytic_keys(&self, kind: &str) -> Result<Vec<String>, StorageError> {
        self.guard("list_analytic_keys", self.inner.list_analytic_keys(kind))
            .await
    }

    async fn rename_definition(&self, old: &str, new: &str) -> Result<(), StorageError> {
        self.guard("rename_definition", self.inner.rename_definition(old, new))
            .await
    }

    async fn rename_entity(&self, old: &str, new: &str) -> Result<(), StorageError> {
        self.guard("rename_entity", self.inner.rename_entity(old, new))
            .await
    }

    async fn update_entity_fields(&self, label: &str, fields: Vec<Field>) -> Result<(), StorageError> {
        self.guard(
            "update_entity_fields",
            self.inner.update_entity_fields(label, fields),
        )
        .await
    }

    async fn rename_analytic_key(&self, kind: &str, old: &str, new: &str) -> Result<(), StorageError> {
        self.guard(
            "rename_analytic_key",
            self.inner.rename_analytic_key(kind, old, new),
        )
        .await
    }

    async fn load_settings(&self) -> Result<Option<Settings>, StorageError> {
        self.guard("load_settings", self.inner.load_settings()).await
    }

    async fn save_settings(&self, settings: Settings) -> Result<Settings, StorageError> {
        self.guard("save_settings", self.inner.save_settings(settings))
            .await
    }
}
