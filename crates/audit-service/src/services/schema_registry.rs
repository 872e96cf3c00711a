//! Schema registry - entity schemas by type name

use std::collections::HashMap;
use std::sync::Arc;

use audit_core::{DomainError, EntitySchema};
use tracing::debug;

/// Registry of entity schemas, filled once at startup and read-only after
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    by_type: HashMap<String, Arc<EntitySchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of schemas
    pub fn from_schemas(
        schemas: impl IntoIterator<Item = EntitySchema>,
    ) -> Result<Self, DomainError> {
        let mut registry = Self::new();
        for schema in schemas {
            registry.register(schema)?;
        }
        Ok(registry)
    }

    /// Validate and register a schema.
    ///
    /// Entity type names and table names must be unique.
    pub fn register(&mut self, schema: EntitySchema) -> Result<(), DomainError> {
        schema.validate()?;

        if self.by_type.contains_key(&schema.entity_type) {
            return Err(DomainError::ValidationError(format!(
                "entity type {} registered twice",
                schema.entity_type
            )));
        }
        if self
            .by_type
            .values()
            .any(|known| known.table_name == schema.table_name)
        {
            return Err(DomainError::ValidationError(format!(
                "table {} registered twice",
                schema.table_name
            )));
        }

        debug!(
            entity_type = %schema.entity_type,
            table = %schema.table_name,
            fields = schema.fields.len(),
            "Registered entity schema"
        );
        self.by_type
            .insert(schema.entity_type.clone(), Arc::new(schema));
        Ok(())
    }

    /// Schema of an entity type; unknown types are a caller error
    pub fn get(&self, entity_type: &str) -> Result<Arc<EntitySchema>, DomainError> {
        self.by_type
            .get(entity_type)
            .cloned()
            .ok_or_else(|| DomainError::UnknownEntityType(entity_type.to_string()))
    }

    /// Registered entity type names, sorted
    pub fn entity_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.by_type.keys().cloned().collect();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}
