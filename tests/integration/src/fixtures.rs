//! Test fixtures and data generators
//!
//! Provides reusable schemas and audit records for integration tests.

use std::sync::atomic::{AtomicI64, Ordering};

use audit_core::{
    row_values, AuditAction, AuditRecord, ChoiceSet, EntitySchema, EventId, FieldDescriptor,
    RowValues,
};
use chrono::{Duration, TimeZone, Utc};

pub const PERSON_TABLE: &str = "contacts_person";
pub const ORGANIZATION_TABLE: &str = "contacts_organization";

/// Counter for event IDs, shared by all tests in a binary
static EVENT_COUNTER: AtomicI64 = AtomicI64::new(1);

/// Next event ID, strictly increasing
pub fn next_event_id() -> EventId {
    EventId::new(EVENT_COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// The `Person` schema used throughout the tests
pub fn person_schema() -> EntitySchema {
    EntitySchema::new("Person", PERSON_TABLE)
        .with_field(FieldDescriptor::new("id", "ID").as_primary_key())
        .with_field(FieldDescriptor::new("full_name", "Full name"))
        .with_field(FieldDescriptor::reference("organization", "Organization", "Organization"))
        .with_field(FieldDescriptor::boolean("is_archived", "Is archived"))
        .with_field(FieldDescriptor::choice(
            "salutation",
            "Salutation",
            ChoiceSet::new([("mrs", "Dear Mrs."), ("mr", "Dear Mr.")]),
        ))
        .with_field(FieldDescriptor::date("date_of_birth", "Date of birth"))
        .with_field(FieldDescriptor::new("_position", "Position"))
        .with_field(FieldDescriptor::many("groups", "Groups", "Group"))
}

pub fn organization_schema() -> EntitySchema {
    EntitySchema::new("Organization", ORGANIZATION_TABLE)
        .with_field(FieldDescriptor::new("id", "ID").as_primary_key())
        .with_field(FieldDescriptor::new("name", "Name"))
}

/// Builder for audit records against one table
pub struct RecordBuilder {
    table: String,
    user_name: String,
    minutes: i64,
}

impl RecordBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            user_name: "user-42-jo".to_string(),
            minutes: 0,
        }
    }

    pub fn by(mut self, user_name: &str) -> Self {
        self.user_name = user_name.to_string();
        self
    }

    fn base(&mut self, action: AuditAction) -> AuditRecord {
        self.minutes += 1;
        let created_at = Utc
            .with_ymd_and_hms(2019, 3, 1, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
            + Duration::minutes(self.minutes);
        AuditRecord::new(
            next_event_id(),
            self.table.clone(),
            action,
            created_at,
            self.user_name.clone(),
        )
    }

    pub fn insert(&mut self, row: &[(&str, Option<&str>)]) -> AuditRecord {
        self.base(AuditAction::Insert).with_row_data(values(row))
    }

    /// UPDATE of the row `id`, changing `changed`
    pub fn update(&mut self, id: &str, changed: &[(&str, Option<&str>)]) -> AuditRecord {
        self.base(AuditAction::Update)
            .with_row_data(values(&[("id", Some(id))]))
            .with_changed_fields(values(changed))
    }

    pub fn delete(&mut self, row: &[(&str, Option<&str>)]) -> AuditRecord {
        self.base(AuditAction::Delete).with_row_data(values(row))
    }
}

fn values(pairs: &[(&str, Option<&str>)]) -> RowValues {
    row_values(pairs.iter().copied())
}
