//! Process-wide naming settings.

use super::case::NamingConvention;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single settings aggregate.
///
/// Only [`SchemaEngine::apply_naming_convention`](crate::SchemaEngine::apply_naming_convention)
/// produces new values of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Convention last applied to the whole graph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naming_convention: Option<NamingConvention>,
    /// Graph version right after the convention was applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Settings {
    pub fn new(convention: NamingConvention, schema_version: impl Into<String>) -> Self {
        Self {
            naming_convention: Some(convention),
            schema_version: Some(schema_version.into()),
            updated_at: Utc::now(),
        }
    }
}
