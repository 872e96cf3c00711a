//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use audit_core::entities::{Change, FieldChange};

use super::responses::{ChangeResponse, FieldChangeResponse, HistoryLinkResponse};

impl From<&FieldChange> for FieldChangeResponse {
    fn from(change: &FieldChange) -> Self {
        Self {
            field: change.field.clone(),
            label: change.label.clone(),
            value: change.value.to_string(),
            description: change.description.clone(),
            history: change
                .value
                .history_target()
                .map(|(entity_type, id)| HistoryLinkResponse {
                    entity_type: entity_type.to_string(),
                    id: id.to_string(),
                }),
            deleted_reference: change.value.is_deleted_reference(),
        }
    }
}

impl From<&Change> for ChangeResponse {
    fn from(change: &Change) -> Self {
        let record = &change.record;
        Self {
            event_id: record.event_id.to_string(),
            action: record.action.as_str().to_string(),
            table_name: record.table_name.clone(),
            record_id: record.row_id().map(str::to_string),
            created_at: record.created_at,
            user_name: record.user_name.clone(),
            pretty_user_name: change.pretty_user_name.clone(),
            fields: change.fields.iter().map(FieldChangeResponse::from).collect(),
        }
    }
}

impl From<Change> for ChangeResponse {
    fn from(change: Change) -> Self {
        Self::from(&change)
    }
}
