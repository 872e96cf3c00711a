//! Logged action database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for the audit trigger's table.
///
/// `row_data` and `changed_fields` are hstore columns; queries select them
/// through `hstore_to_jsonb` so they arrive as flat JSON objects.
#[derive(Debug, Clone, FromRow)]
pub struct LoggedActionModel {
    pub event_id: i64,
    pub table_name: String,
    /// Single-letter action code: I, U, D or T
    pub action: String,
    pub created_at: DateTime<Utc>,
    pub user_name: Option<String>,
    pub row_data: Option<JsonValue>,
    pub changed_fields: Option<JsonValue>,
}
