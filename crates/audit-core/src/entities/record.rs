//! Audit record entity - one row of the append-only audit log

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{AuditAction, EventId};

/// Column name -> serialized value, as captured by the trigger.
///
/// Values stay strings here; they are re-parsed with the field's semantic
/// type at formatting time.
pub type RowValues = BTreeMap<String, Option<String>>;

/// One captured action against one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    pub event_id: EventId,
    pub table_name: String,
    pub action: AuditAction,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    /// Full row for INSERT, DELETE and TRUNCATE
    pub row_data: Option<RowValues>,
    /// Changed columns only, for UPDATE
    pub changed_fields: Option<RowValues>,
}

impl AuditRecord {
    /// Create a new AuditRecord without row payloads
    pub fn new(
        event_id: EventId,
        table_name: impl Into<String>,
        action: AuditAction,
        created_at: DateTime<Utc>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            event_id,
            table_name: table_name.into(),
            action,
            created_at,
            user_name: user_name.into(),
            row_data: None,
            changed_fields: None,
        }
    }

    /// Attach the full row snapshot
    pub fn with_row_data(mut self, row_data: RowValues) -> Self {
        self.row_data = Some(row_data);
        self
    }

    /// Attach the changed columns
    pub fn with_changed_fields(mut self, changed_fields: RowValues) -> Self {
        self.changed_fields = Some(changed_fields);
        self
    }

    /// The values relevant for this action: the diff for UPDATE,
    /// the row snapshot otherwise. A missing map reads as empty.
    pub fn values(&self) -> Option<&RowValues> {
        if self.action.has_full_row() {
            self.row_data.as_ref()
        } else {
            self.changed_fields.as_ref()
        }
    }

    /// Whether the action-relevant map has an entry for `column`
    pub fn touches(&self, column: &str) -> bool {
        self.values().is_some_and(|values| values.contains_key(column))
    }

    /// Raw value of `column` in the action-relevant map (`None` for null or absent)
    pub fn value(&self, column: &str) -> Option<&str> {
        self.values()
            .and_then(|values| values.get(column))
            .and_then(Option::as_deref)
    }

    /// Primary key of the audited row, if the snapshot carries one
    pub fn row_id(&self) -> Option<&str> {
        self.row_data
            .as_ref()
            .and_then(|row| row.get("id"))
            .and_then(Option::as_deref)
    }
}

/// Build a `RowValues` map from `(column, value)` pairs
pub fn row_values<K, V, I>(pairs: I) -> RowValues
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.map(Into::into)))
        .collect()
}
