//! Row-to-change reconstruction
//!
//! Turns audit records into ordered, human-readable changes. Loading
//! (references, users) happens up front in batches; the conversion itself
//! is a pure function over those snapshots.

use std::collections::{BTreeMap, BTreeSet};

use audit_core::{AuditRecord, Change, EntityLookup, FieldChange, FieldDescriptor, RepoResult};
use tracing::{debug, instrument};

use super::formatter::{FormatterRegistry, ReferenceSnapshot};
use super::users::UserNames;

/// Whether a field contributes a line for this record.
///
/// INSERT, DELETE and TRUNCATE report every field. UPDATE reports only the
/// columns the trigger captured as changed.
fn reports(record: &AuditRecord, field: &FieldDescriptor) -> bool {
    record.action.has_full_row() || record.touches(&field.name)
}

/// Referenced ids per target entity type that the batch will display
pub fn referenced_ids(
    fields: &[FieldDescriptor],
    records: &[AuditRecord],
) -> BTreeMap<String, BTreeSet<String>> {
    let mut wanted: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for field in fields {
        let Some(target) = field.kind.reference_target() else {
            continue;
        };
        for record in records.iter().filter(|r| reports(r, field)) {
            if let Some(id) = record.value(&field.name) {
                wanted
                    .entry(target.to_string())
                    .or_default()
                    .insert(id.to_string());
            }
        }
    }

    wanted
}

/// Resolve every referenced id of the batch, one lookup call per target type
#[instrument(skip_all, fields(records = records.len()))]
pub async fn load_references(
    lookup: &dyn EntityLookup,
    fields: &[FieldDescriptor],
    records: &[AuditRecord],
) -> RepoResult<ReferenceSnapshot> {
    let mut snapshot = ReferenceSnapshot::new();

    for (target, ids) in referenced_ids(fields, records) {
        let ids: Vec<String> = ids.into_iter().collect();
        let found = lookup.find_display_names(&target, &ids).await?;
        debug!(
            entity_type = %target,
            requested = ids.len(),
            found = found.len(),
            "Resolved references"
        );
        snapshot.insert_all(&target, found);
    }

    Ok(snapshot)
}

/// Convert records into changes.
///
/// Record order and field order are preserved. Records yielding no visible
/// field change are dropped.
pub fn reconstruct_history(
    registry: &FormatterRegistry,
    fields: &[FieldDescriptor],
    records: Vec<AuditRecord>,
    users: &UserNames,
    refs: &ReferenceSnapshot,
) -> Vec<Change> {
    records
        .into_iter()
        .filter_map(|record| {
            let changes: Vec<FieldChange> = fields
                .iter()
                .filter(|field| reports(&record, field))
                .map(|field| {
                    let value = registry
                        .formatter(field)
                        .format(record.value(&field.name), refs);
                    FieldChange::new(record.action, &field.name, &field.label, value)
                })
                .collect();

            if changes.is_empty() {
                return None;
            }

            Some(Change {
                pretty_user_name: users.pretty(&record.user_name),
                record,
                fields: changes,
            })
        })
        .collect()
}
