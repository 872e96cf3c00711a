//! Change entities - the reconstructed, human-readable view of audit records

use std::fmt;

use serde::Serialize;

use super::record::AuditRecord;
use crate::value_objects::AuditAction;

/// Placeholder for a null value
pub const NO_VALUE: &str = "(no value)";

/// Placeholder for a null choice value
pub const EMPTY_CHOICE: &str = "(empty)";

/// A formatted field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayValue {
    Text { text: String },
    /// Reference to a row that still exists
    Reference {
        entity_type: String,
        id: String,
        label: String,
    },
    /// Reference whose target row no longer exists
    DeletedReference { entity_type: String, id: String },
}

impl DisplayValue {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn no_value() -> Self {
        Self::text(NO_VALUE)
    }

    /// Entity type and id whose history a UI can link to
    pub fn history_target(&self) -> Option<(&str, &str)> {
        match self {
            Self::Text { .. } => None,
            Self::Reference { entity_type, id, .. } | Self::DeletedReference { entity_type, id } => {
                Some((entity_type, id))
            }
        }
    }

    /// Whether this renders a dangling reference
    #[inline]
    pub fn is_deleted_reference(&self) -> bool {
        matches!(self, Self::DeletedReference { .. })
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { text } => f.write_str(text),
            Self::Reference { label, .. } => f.write_str(label),
            Self::DeletedReference { entity_type, .. } => {
                write!(f, "Deleted {entity_type} instance")
            }
        }
    }
}

/// One field's contribution to a change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub field: String,
    pub label: String,
    pub value: DisplayValue,
    pub description: String,
}

impl FieldChange {
    /// Build a field change and its sentence for the given action
    pub fn new(
        action: AuditAction,
        field: impl Into<String>,
        label: impl Into<String>,
        value: DisplayValue,
    ) -> Self {
        let label = label.into();
        let description = format!(
            "{} of '{}' was '{}'.",
            action.description_prefix(),
            label,
            value
        );
        Self {
            field: field.into(),
            label,
            value,
            description,
        }
    }
}

/// All visible field changes of one audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub record: AuditRecord,
    /// Friendly name of the acting user, or the raw session marker
    pub pretty_user_name: String,
    pub fields: Vec<FieldChange>,
}

impl Change {
    /// Description sentences in field order
    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.description.as_str())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
