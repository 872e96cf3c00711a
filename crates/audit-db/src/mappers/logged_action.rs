//! Logged action model -> AuditRecord mapper

use audit_core::entities::{AuditRecord, RowValues};
use audit_core::error::DomainError;
use audit_core::value_objects::{AuditAction, EventId};
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::models::LoggedActionModel;

/// User name recorded when the session did not set one
pub const UNKNOWN_USER: &str = "(unknown)";

/// Convert LoggedActionModel to AuditRecord entity
impl TryFrom<LoggedActionModel> for AuditRecord {
    type Error = DomainError;

    fn try_from(model: LoggedActionModel) -> Result<Self, Self::Error> {
        let action = model
            .action
            .parse::<AuditAction>()
            .map_err(|e| DomainError::InvalidAction(e.0))?;

        let event_id = EventId::new(model.event_id);
        Ok(AuditRecord {
            event_id,
            table_name: model.table_name,
            action,
            created_at: model.created_at,
            user_name: model.user_name.unwrap_or_else(|| UNKNOWN_USER.to_string()),
            row_data: model.row_data.map(|v| json_to_row_values(event_id, v)),
            changed_fields: model.changed_fields.map(|v| json_to_row_values(event_id, v)),
        })
    }
}

/// Flatten an hstore-as-JSON object into string values.
///
/// hstore only holds text or NULL; anything else is stringified rather
/// than rejected.
pub fn json_to_row_values(event_id: EventId, value: JsonValue) -> RowValues {
    match value {
        JsonValue::Object(map) => map
            .into_iter()
            .map(|(column, value)| {
                let value = match value {
                    JsonValue::Null => None,
                    JsonValue::String(s) => Some(s),
                    other => Some(other.to_string()),
                };
                (column, value)
            })
            .collect(),
        JsonValue::Null => RowValues::new(),
        other => {
            warn!(event_id = %event_id, kind = ?other, "Audit payload is not an object");
            RowValues::new()
        }
    }
}
