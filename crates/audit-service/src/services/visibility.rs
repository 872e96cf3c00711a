//! Field visibility policy
//!
//! Decides which fields of an entity type may appear in history at all.
//! Per-request access control narrows this further through the requested
//! field list.

use std::collections::{BTreeMap, BTreeSet};

use audit_common::HistoryConfig;
use audit_core::{DomainError, EntitySchema, FieldDescriptor};

/// Exclusion sets per entity type
#[derive(Debug, Clone, Default)]
pub struct VisibilityPolicy {
    excluded: BTreeMap<String, BTreeSet<String>>,
}

impl VisibilityPolicy {
    /// Policy including every reportable field
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self {
            excluded: config.excluded_fields.clone(),
        }
    }

    /// Exclude a field of an entity type
    pub fn exclude(mut self, entity_type: impl Into<String>, field: impl Into<String>) -> Self {
        self.excluded
            .entry(entity_type.into())
            .or_default()
            .insert(field.into());
        self
    }

    pub fn is_excluded(&self, entity_type: &str, field: &str) -> bool {
        self.excluded
            .get(entity_type)
            .is_some_and(|fields| fields.contains(field))
    }

    /// Fields to reconstruct, in reporting order.
    ///
    /// With `requested`, the caller's order is kept and every name must exist
    /// on the schema. `extra_exclusions` carries per-request exclusions such as
    /// fields of disabled features.
    pub fn visible_fields(
        &self,
        schema: &EntitySchema,
        requested: Option<&[String]>,
        extra_exclusions: &[String],
    ) -> Result<Vec<FieldDescriptor>, DomainError> {
        let candidates: Vec<&FieldDescriptor> = match requested {
            Some(names) => names
                .iter()
                .map(|name| {
                    schema.field(name).ok_or_else(|| DomainError::UnknownField {
                        entity_type: schema.entity_type.clone(),
                        field: name.clone(),
                    })
                })
                .collect::<Result<_, _>>()?,
            None => schema.fields.iter().collect(),
        };

        Ok(candidates
            .into_iter()
            .filter(|field| field.is_reportable())
            .filter(|field| !self.is_excluded(&schema.entity_type, &field.name))
            .filter(|field| !extra_exclusions.contains(&field.name))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> EntitySchema {
        EntitySchema::new("Person", "people_person")
            .with_field(FieldDescriptor::new("id", "ID").as_primary_key())
            .with_field(FieldDescriptor::new("full_name", "Full name"))
            .with_field(FieldDescriptor::new("_position", "Position"))
            .with_field(FieldDescriptor::many("groups", "Groups", "Group"))
            .with_field(FieldDescriptor::reference("organization_id", "Organization", "Organization"))
    }

    fn names(fields: &[FieldDescriptor]) -> Vec<&str> {
        fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_default_includes_reportable_fields() {
        let fields = VisibilityPolicy::new().visible_fields(&schema(), None, &[]).unwrap();
        assert_eq!(names(&fields), vec!["full_name", "_position", "organization_id"]);
    }

    #[test]
    fn test_configured_exclusions() {
        let policy = VisibilityPolicy::new().exclude("Person", "_position");
        let fields = policy.visible_fields(&schema(), None, &[]).unwrap();
        assert_eq!(names(&fields), vec!["full_name", "organization_id"]);

        // Exclusions are per entity type
        assert!(!policy.is_excluded("Organization", "_position"));
    }

    #[test]
    fn test_from_config() {
        let mut config = HistoryConfig::default();
        config
            .excluded_fields
            .insert("Person".to_string(), BTreeSet::from(["organization_id".to_string()]));

        let fields = VisibilityPolicy::from_config(&config)
            .visible_fields(&schema(), None, &[])
            .unwrap();
        assert_eq!(names(&fields), vec!["full_name", "_position"]);
    }

    #[test]
    fn test_requested_fields_keep_caller_order() {
        let requested = vec!["organization_id".to_string(), "full_name".to_string(), "id".to_string()];
        let fields = VisibilityPolicy::new()
            .visible_fields(&schema(), Some(requested.as_slice()), &["full_name".to_string()])
            .unwrap();
        assert_eq!(names(&fields), vec!["organization_id"]);
    }

    #[test]
    fn test_unknown_requested_field_fails() {
        let requested = vec!["nickname".to_string()];
        let err = VisibilityPolicy::new()
            .visible_fields(&schema(), Some(requested.as_slice()), &[])
            .unwrap_err();
        assert!(matches!(err, DomainError::UnknownField { ref field, .. } if field == "nickname"));
    }
}
