//! Entity schema file
//!
//! A JSON array of entity schemas. Each entry also names the column used to
//! display rows of that type when other entities reference them.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use audit_core::EntitySchema;
use audit_db::EntityTable;
use audit_service::SchemaRegistry;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SchemaEntry {
    #[serde(flatten)]
    pub schema: EntitySchema,
    pub display_column: String,
    #[serde(default)]
    pub id_column: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SchemaFile {
    pub entries: Vec<SchemaEntry>,
}

impl SchemaFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read schema file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid schema file {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let entries: Vec<SchemaEntry> = serde_json::from_str(raw)?;
        Ok(Self { entries })
    }

    /// Validated registry of the declared schemas
    pub fn registry(&self) -> anyhow::Result<SchemaRegistry> {
        let registry =
            SchemaRegistry::from_schemas(self.entries.iter().map(|entry| entry.schema.clone()))?;
        Ok(registry)
    }

    /// Lookup tables for reference resolution, keyed by entity type
    pub fn entity_tables(&self) -> anyhow::Result<HashMap<String, EntityTable>> {
        self.entries
            .iter()
            .map(|entry| -> anyhow::Result<(String, EntityTable)> {
                let table = EntityTable::new(&entry.schema.table_name, &entry.display_column)?;
                let table = match &entry.id_column {
                    Some(id_column) => table.with_id_column(id_column)?,
                    None => table,
                };
                Ok((entry.schema.entity_type.clone(), table))
            })
            .collect()
    }
}
