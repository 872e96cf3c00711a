//! Request DTOs for history queries
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

pub use audit_common::MAX_RECENT_LIMIT;

/// History of one record
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HistoryRequest {
    #[validate(length(min = 1, max = 100, message = "Entity type must be 1-100 characters"))]
    pub entity_type: String,

    #[validate(length(min = 1, max = 64, message = "Record id must be 1-64 characters"))]
    pub record_id: String,

    /// Fields the caller may see, in reporting order; all visible fields if absent
    #[serde(default)]
    pub fields: Option<Vec<String>>,

    /// Additional fields to hide for this request, e.g. of disabled features
    #[serde(default)]
    pub excluded_fields: Vec<String>,
}

impl HistoryRequest {
    pub fn new(entity_type: impl Into<String>, record_id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            record_id: record_id.into(),
            fields: None,
            excluded_fields: Vec::new(),
        }
    }

    /// Restrict the history to these fields
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Hide a field for this request
    pub fn excluding(mut self, field: impl Into<String>) -> Self {
        self.excluded_fields.push(field.into());
        self
    }
}

/// Newest changes of an entity type
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecentChangesRequest {
    #[validate(length(min = 1, max = 100, message = "Entity type must be 1-100 characters"))]
    pub entity_type: String,

    #[validate(range(min = 1, max = 1000, message = "Limit must be between 1 and 1000"))]
    pub limit: Option<i64>,
}

impl RecentChangesRequest {
    pub fn new(entity_type: impl Into<String>, limit: Option<i64>) -> Self {
        Self {
            entity_type: entity_type.into(),
            limit,
        }
    }
}
