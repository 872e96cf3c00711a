//! History reconstruction tests
//!
//! Run the full service pipeline (schema registry, visibility, reference
//! and user batching, formatting) over in-memory adapters.
//!
//! Run with: cargo test -p integration-tests --test history_tests

use std::collections::BTreeSet;

use audit_common::HistoryConfig;
use audit_core::{Change, DomainError};
use audit_service::dto::{HistoryRequest, RecentChangesRequest};
use audit_service::{HistoryService, ServiceError};
use integration_tests::{
    organization_schema, person_schema, InMemoryEntityLookup, InMemoryUserDirectory,
    RecordBuilder, TestHarness, PERSON_TABLE,
};

fn lookup() -> InMemoryEntityLookup {
    InMemoryEntityLookup::new()
        .with_row("Organization", "3", "Feinheit AG")
        .with_type("Group")
}

fn users() -> InMemoryUserDirectory {
    InMemoryUserDirectory::new([(42, "Jo Smith")])
}

fn descriptions(change: &Change) -> Vec<&str> {
    change.descriptions().collect()
}

async fn history(harness: &TestHarness, request: HistoryRequest) -> Vec<Change> {
    HistoryService::new(&harness.ctx)
        .changes(&request)
        .await
        .expect("history should reconstruct")
}

// ============================================================================
// Scenario
// ============================================================================

#[tokio::test]
async fn test_person_insert_with_deleted_organization() {
    let mut people = RecordBuilder::new(PERSON_TABLE);
    let records = vec![people.insert(&[
        ("id", Some("1")),
        ("full_name", Some("Jane Doe")),
        ("organization", Some("7")),
        ("is_archived", Some("f")),
    ])];
    let harness = TestHarness::new(vec![person_schema()], records, lookup(), users()).unwrap();

    let request = HistoryRequest::new("Person", "1").with_fields(["full_name", "organization", "is_archived"]);
    let changes = history(&harness, request).await;

    assert_eq!(changes.len(), 1);
    assert_eq!(
        descriptions(&changes[0]),
        vec![
            "Initial value of 'Full name' was 'Jane Doe'.",
            "Initial value of 'Organization' was 'Deleted Organization instance'.",
            "Initial value of 'Is archived' was 'no'.",
        ]
    );
    assert_eq!(changes[0].pretty_user_name, "Jo Smith");
}

// ============================================================================
// Reconstruction properties
// ============================================================================

#[tokio::test]
async fn test_insert_reports_every_visible_field() {
    let mut people = RecordBuilder::new(PERSON_TABLE);
    let records = vec![people.insert(&[("id", Some("2")), ("full_name", Some("Max"))])];
    let harness = TestHarness::new(vec![person_schema()], records, lookup(), users()).unwrap();

    let changes = history(&harness, HistoryRequest::new("Person", "2")).await;

    // Primary key and many-relation are never reported
    assert_eq!(changes.len(), 1);
    let fields: Vec<&str> = changes[0].fields.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(
        fields,
        vec!["full_name", "organization", "is_archived", "salutation", "date_of_birth", "_position"]
    );
    assert!(descriptions(&changes[0])
        .iter()
        .all(|d| d.starts_with("Initial value of ")));
}

#[tokio::test]
async fn test_update_reports_changed_subset() {
    let mut people = RecordBuilder::new(PERSON_TABLE);
    let records = vec![
        people.insert(&[("id", Some("3")), ("full_name", Some("Max"))]),
        people.update("3", &[("full_name", Some("Max Muster")), ("salutation", Some("mr"))]),
    ];
    let harness = TestHarness::new(vec![person_schema()], records, lookup(), users()).unwrap();

    let changes = history(&harness, HistoryRequest::new("Person", "3")).await;

    assert_eq!(changes.len(), 2);
    assert_eq!(
        descriptions(&changes[1]),
        vec![
            "New value of 'Full name' was 'Max Muster'.",
            "New value of 'Salutation' was 'Dear Mr.'.",
        ]
    );
}

#[tokio::test]
async fn test_update_touching_only_excluded_fields_is_omitted() {
    let mut people = RecordBuilder::new(PERSON_TABLE);
    let records = vec![
        people.insert(&[("id", Some("4")), ("full_name", Some("Max"))]),
        people.update("4", &[("_position", Some("12"))]),
        people.update("4", &[("full_name", Some("Maxi"))]),
    ];
    let mut config = HistoryConfig::default();
    config
        .excluded_fields
        .insert("Person".to_string(), BTreeSet::from(["_position".to_string()]));
    let harness =
        TestHarness::with_config(vec![person_schema()], records, lookup(), users(), &config).unwrap();

    let changes = history(&harness, HistoryRequest::new("Person", "4")).await;

    assert_eq!(changes.len(), 2);
    assert!(changes[0].record.event_id < changes[1].record.event_id);
    assert_eq!(descriptions(&changes[1]), vec!["New value of 'Full name' was 'Maxi'."]);
}

#[tokio::test]
async fn test_feature_gated_exclusions_per_request() {
    let mut people = RecordBuilder::new(PERSON_TABLE);
    let records = vec![
        people.insert(&[("id", Some("5")), ("full_name", Some("Max"))]),
        people.update("5", &[("date_of_birth", Some("1980-02-29"))]),
    ];
    let harness = TestHarness::new(vec![person_schema()], records, lookup(), users()).unwrap();

    let request = HistoryRequest::new("Person", "5").excluding("date_of_birth");
    let changes = history(&harness, request).await;
    assert_eq!(changes.len(), 1);

    let changes = history(&harness, HistoryRequest::new("Person", "5")).await;
    assert_eq!(
        descriptions(&changes[1]),
        vec!["New value of 'Date of birth' was '29.02.1980'."]
    );
}

#[tokio::test]
async fn test_delete_reports_final_values() {
    let mut people = RecordBuilder::new(PERSON_TABLE);
    let records = vec![people.delete(&[
        ("id", Some("6")),
        ("full_name", Some("Max")),
        ("organization", Some("3")),
        ("is_archived", Some("t")),
        ("salutation", None),
    ])];
    let harness = TestHarness::new(vec![person_schema()], records, lookup(), users()).unwrap();

    let request =
        HistoryRequest::new("Person", "6").with_fields(["organization", "is_archived", "salutation"]);
    let changes = history(&harness, request).await;

    assert_eq!(
        descriptions(&changes[0]),
        vec![
            "Final value of 'Organization' was 'Feinheit AG'.",
            "Final value of 'Is archived' was 'yes'.",
            "Final value of 'Salutation' was '(empty)'.",
        ]
    );
}

#[tokio::test]
async fn test_unmapped_choice_shows_raw_value() {
    let mut people = RecordBuilder::new(PERSON_TABLE);
    let records = vec![people.insert(&[("id", Some("7")), ("salutation", Some("dr"))])];
    let harness = TestHarness::new(vec![person_schema()], records, lookup(), users()).unwrap();

    let request = HistoryRequest::new("Person", "7").with_fields(["salutation"]);
    let changes = history(&harness, request).await;
    assert_eq!(descriptions(&changes[0]), vec!["Initial value of 'Salutation' was 'dr'."]);
}

// ============================================================================
// Batching
// ============================================================================

#[tokio::test]
async fn test_lookups_are_batched_per_history() {
    let mut people = RecordBuilder::new(PERSON_TABLE);
    let records = vec![
        people.insert(&[("id", Some("8")), ("organization", Some("3"))]),
        people.update("8", &[("organization", Some("7"))]),
        people.update("8", &[("organization", Some("3"))]),
        people.update("8", &[("organization", None)]),
    ];
    let harness = TestHarness::new(vec![person_schema()], records, lookup(), users()).unwrap();

    let request = HistoryRequest::new("Person", "8").with_fields(["organization"]);
    let changes = history(&harness, request).await;

    assert_eq!(changes.len(), 4);
    assert_eq!(harness.lookup.calls(), 1);
    assert_eq!(harness.users.calls(), 1);
    assert_eq!(
        descriptions(&changes[3]),
        vec!["New value of 'Organization' was '(no value)'."]
    );
}

#[tokio::test]
async fn test_user_names_resolved_or_kept() {
    let records = vec![
        RecordBuilder::new(PERSON_TABLE).insert(&[("id", Some("9")), ("full_name", Some("A"))]),
        RecordBuilder::new(PERSON_TABLE)
            .by("Solomon")
            .update("9", &[("full_name", Some("B"))]),
        RecordBuilder::new(PERSON_TABLE)
            .by("user-999-x")
            .update("9", &[("full_name", Some("C"))]),
    ];
    let harness = TestHarness::new(vec![person_schema()], records, lookup(), users()).unwrap();

    let changes = history(&harness, HistoryRequest::new("Person", "9")).await;
    let names: Vec<&str> = changes.iter().map(|c| c.pretty_user_name.as_str()).collect();
    assert_eq!(names, vec!["Jo Smith", "Solomon", "user-999-x"]);
    assert_eq!(harness.users.calls(), 1);
}

// ============================================================================
// Caller errors and edge cases
// ============================================================================

#[tokio::test]
async fn test_unknown_entity_type_is_not_found() {
    let harness = TestHarness::new(vec![person_schema()], Vec::new(), lookup(), users()).unwrap();

    let err = HistoryService::new(&harness.ctx)
        .history(HistoryRequest::new("Invoice", "1"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Domain(DomainError::UnknownEntityType(_))));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_unknown_requested_field_is_rejected() {
    let harness = TestHarness::new(vec![person_schema()], Vec::new(), lookup(), users()).unwrap();

    let request = HistoryRequest::new("Person", "1").with_fields(["nickname"]);
    let err = HistoryService::new(&harness.ctx)
        .changes(&request)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "UNKNOWN_FIELD");
}

#[tokio::test]
async fn test_empty_history() {
    let harness = TestHarness::new(vec![person_schema()], Vec::new(), lookup(), users()).unwrap();

    let response = HistoryService::new(&harness.ctx)
        .history(HistoryRequest::new("Person", "404"))
        .await
        .unwrap();

    assert!(response.changes.is_empty());
    assert_eq!(harness.lookup.calls(), 0);
    assert_eq!(harness.users.calls(), 0);
}

#[tokio::test]
async fn test_recent_changes_across_records() {
    let mut people = RecordBuilder::new(PERSON_TABLE);
    let records = vec![
        people.insert(&[("id", Some("10")), ("full_name", Some("A"))]),
        people.insert(&[("id", Some("11")), ("full_name", Some("B"))]),
        people.update("10", &[("full_name", Some("AA"))]),
    ];
    let harness = TestHarness::new(
        vec![person_schema(), organization_schema()],
        records,
        lookup(),
        users(),
    )
    .unwrap();

    let response = HistoryService::new(&harness.ctx)
        .recent_changes(RecentChangesRequest::new("Person", Some(2)))
        .await
        .unwrap();

    let record_ids: Vec<Option<&str>> = response
        .changes
        .iter()
        .map(|c| c.record_id.as_deref())
        .collect();
    assert_eq!(record_ids, vec![Some("11"), Some("10")]);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["changes"][1]["fields"][0]["value"], "AA");
}
