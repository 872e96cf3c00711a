//! Response DTOs for history output
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Event IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Reconstructed history of one record
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entity_type: String,
    pub record_id: String,
    pub changes: Vec<ChangeResponse>,
}

/// Newest changes of an entity type
#[derive(Debug, Serialize)]
pub struct RecentChangesResponse {
    pub entity_type: String,
    pub limit: i64,
    pub changes: Vec<ChangeResponse>,
}

/// One audit record as shown to a user
#[derive(Debug, Serialize)]
pub struct ChangeResponse {
    pub event_id: String,
    pub action: String,
    pub table_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub pretty_user_name: String,
    pub fields: Vec<FieldChangeResponse>,
}

/// One field line of a change
#[derive(Debug, Serialize)]
pub struct FieldChangeResponse {
    pub field: String,
    pub label: String,
    pub value: String,
    pub description: String,
    /// Link target for reference values, present or deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<HistoryLinkResponse>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deleted_reference: bool,
}

/// Entity whose history a reference value points at
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HistoryLinkResponse {
    pub entity_type: String,
    pub id: String,
}
