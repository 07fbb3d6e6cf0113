//! Propagation of a naming convention across the whole graph.
//!
//! The steps run in a fixed order:
//!
//! 1. definitions are renamed;
//! 2. entity fields pointing at entities about to be relabelled are rewritten,
//!    using the labels as they are before step 3;
//! 3. entities are relabelled;
//! 4. analytics keys of the configured kind are renamed.
//!
//! Each store call is independent. The first failure aborts the remaining
//! steps and nothing already written is rolled back.

use super::case::NamingConvention;
use crate::error::SchemaResult;
use crate::schema::{Field, FieldType};
use crate::storage::GraphStore;
use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;

/// Options steering a propagation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOptions {
    /// Also rewrite definition-typed fields renamed in step 1
    pub cascade_definition_renames: bool,
    /// Analytics kind whose keys are definition names
    pub analytics_kind: String,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            cascade_definition_renames: false,
            analytics_kind: "definition".to_string(),
        }
    }
}

/// What a propagation run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameReport {
    pub definitions_renamed: usize,
    pub entities_rewritten: usize,
    pub entities_renamed: usize,
    pub analytic_keys_renamed: usize,
}

impl RenameReport {
    pub fn is_unchanged(&self) -> bool {
        *self == Self::default()
    }
}

/// Renames every node of a graph store to one convention.
pub struct RenamePropagator<'s, S: GraphStore> {
    store: &'s S,
    options: RenameOptions,
}

impl<'s, S: GraphStore> RenamePropagator<'s, S> {
    pub fn new(store: &'s S, options: RenameOptions) -> Self {
        Self { store, options }
    }

    /// Run all four steps. Callers must hold the schema-mutation lock.
    pub async fn apply(&self, convention: NamingConvention) -> SchemaResult<RenameReport> {
        info!("Applying naming convention {}", convention);
        let mut report = RenameReport::default();

        let definition_renames = self.rename_definitions(convention, &mut report).await?;

        let entities = self.store.list_entities().await?;
        let entity_renames = changed_names(
            entities.iter().map(|entity| entity.label.as_str()),
            convention,
        );

        // Definitions already carry their new names at this point, so none of
        // them is still about to change unless renames are cascaded.
        let definition_fields = if self.options.cascade_definition_renames {
            definition_renames
        } else {
            HashMap::new()
        };

        for entity in &entities {
            if let Some(fields) = rewrite_fields(&entity.fields, &entity_renames, &definition_fields)
            {
                debug!("Rewriting field labels of entity '{}'", entity.label);
                self.store.update_entity_fields(&entity.label, fields).await?;
                report.entities_rewritten += 1;
            }
        }

        for entity in &entities {
            if let Some(new_label) = entity_renames.get(&entity.label) {
                self.store.rename_entity(&entity.label, new_label).await?;
                report.entities_renamed += 1;
            }
        }

        self.rename_analytic_keys(convention, &mut report).await?;

        info!(
            "Naming convention {} applied: {} definitions, {} entities renamed, {} entities rewritten, {} analytics keys",
            convention,
            report.definitions_renamed,
            report.entities_renamed,
            report.entities_rewritten,
            report.analytic_keys_renamed
        );
        Ok(report)
    }

    async fn rename_definitions(
        &self,
        convention: NamingConvention,
        report: &mut RenameReport,
    ) -> SchemaResult<HashMap<String, String>> {
        let definitions = self.store.list_definitions().await?;
        let renames = changed_names(
            definitions.iter().map(|definition| definition.name.as_str()),
            convention,
        );

        for definition in &definitions {
            if let Some(new_name) = renames.get(&definition.name) {
                self.store.rename_definition(&definition.name, new_name).await?;
                report.definitions_renamed += 1;
            }
        }
        Ok(renames)
    }

    async fn rename_analytic_keys(
        &self,
        convention: NamingConvention,
        report: &mut RenameReport,
    ) -> SchemaResult<()> {
        let kind = self.options.analytics_kind.as_str();
        let keys = self.store.list_analytic_keys(kind).await?;

        for key in &keys {
            let converted = convention.convert(key);
            if converted != *key {
                self.store.rename_analytic_key(kind, key, &converted).await?;
                report.analytic_keys_renamed += 1;
            }
        }
        Ok(())
    }
}

/// Map of `old -> new` for every name the convention changes.
fn changed_names<'a>(
    names: impl Iterator<Item = &'a str>,
    convention: NamingConvention,
) -> HashMap<String, String> {
    names
        .filter_map(|name| {
            let converted = convention.convert(name);
            (converted != name).then(|| (name.to_string(), converted))
        })
        .collect()
}

/// New field list if any label is affected by a rename, `None` otherwise.
fn rewrite_fields(
    fields: &[Field],
    entity_renames: &HashMap<String, String>,
    definition_renames: &HashMap<String, String>,
) -> Option<Vec<Field>> {
    let mut changed = false;
    let rewritten = fields
        .iter()
        .map(|field| {
            let renames = match field.field_type {
                FieldType::Entity => entity_renames,
                FieldType::Definition => definition_renames,
            };
            match renames.get(&field.label) {
                Some(new_label) => {
                    changed = true;
                    Field {
                        label: new_label.clone(),
                        field_type: field.field_type,
                    }
                }
                None => field.clone(),
            }
        })
        .collect();

    changed.then_some(rewritten)
}
