//! Entity schema - the reportable shape of one audited entity type

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::field::{FieldDescriptor, FieldKind};
use crate::error::DomainError;

/// Declarative schema of one entity type and its backing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Display name of the entity type, e.g. `Person`
    pub entity_type: String,
    /// Table the audit trigger records rows for
    pub table_name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl EntitySchema {
    /// Create a new EntitySchema with no fields
    pub fn new(entity_type: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            table_name: table_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field descriptor
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Find a field by column name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields that may appear in history, in declaration order
    pub fn reportable_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_reportable())
    }

    /// Check the descriptors for programming errors
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entity_type.trim().is_empty() {
            return Err(DomainError::InvalidFieldDescriptor(
                "entity type must not be empty".to_string(),
            ));
        }
        if self.table_name.trim().is_empty() {
            return Err(DomainError::InvalidFieldDescriptor(format!(
                "{}: table name must not be empty",
                self.entity_type
            )));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(DomainError::InvalidFieldDescriptor(format!(
                    "{}: field name must not be empty",
                    self.entity_type
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(DomainError::InvalidFieldDescriptor(format!(
                    "{}: duplicate field '{}'",
                    self.entity_type, field.name
                )));
            }
            match &field.kind {
                FieldKind::Reference { target } | FieldKind::ManyReference { target }
                    if target.trim().is_empty() =>
                {
                    return Err(DomainError::InvalidFieldDescriptor(format!(
                        "{}.{}: reference target must not be empty",
                        self.entity_type, field.name
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }
}
