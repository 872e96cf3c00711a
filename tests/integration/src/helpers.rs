//! Test helpers for integration tests
//!
//! In-memory implementations of the store ports that count their calls, and
//! a harness wiring them into a `ServiceContext`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use audit_common::HistoryConfig;
use audit_core::traits::{AuditStore, EntityLookup, RepoResult, UserDirectory};
use audit_core::{AuditRecord, DomainError, EntitySchema};
use audit_service::{SchemaRegistry, ServiceContext, ServiceContextBuilder};
use parking_lot::RwLock;

/// Audit store backed by a vector, kept in event order
#[derive(Default)]
pub struct InMemoryAuditStore {
    records: RwLock<Vec<AuditRecord>>,
}

impl InMemoryAuditStore {
    pub fn new(records: Vec<AuditRecord>) -> Self {
        let store = Self::default();
        for record in records {
            store.append(record);
        }
        store
    }

    pub fn append(&self, record: AuditRecord) {
        let mut records = self.records.write();
        records.push(record);
        records.sort_by_key(|r| r.event_id);
    }
}

#[async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn records_for(&self, table_name: &str, record_id: &str) -> RepoResult<Vec<AuditRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.table_name == table_name && r.row_id() == Some(record_id))
            .cloned()
            .collect())
    }

    async fn recent_for_table(&self, table_name: &str, limit: i64) -> RepoResult<Vec<AuditRecord>> {
        let limit = usize::try_from(limit)
            .map_err(|_| DomainError::ValidationError(format!("invalid limit {limit}")))?;
        let rows: Vec<AuditRecord> = self
            .records
            .read()
            .iter()
            .filter(|r| r.table_name == table_name)
            .cloned()
            .collect();
        let skip = rows.len().saturating_sub(limit);
        Ok(rows.into_iter().skip(skip).collect())
    }
}

/// Current rows of referenced entity types
#[derive(Default)]
pub struct InMemoryEntityLookup {
    rows: HashMap<String, HashMap<String, String>>,
    calls: AtomicUsize,
}

impl InMemoryEntityLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity type, possibly without rows
    pub fn with_type(mut self, entity_type: &str) -> Self {
        self.rows.entry(entity_type.to_string()).or_default();
        self
    }

    pub fn with_row(mut self, entity_type: &str, id: &str, display: &str) -> Self {
        self.rows
            .entry(entity_type.to_string())
            .or_default()
            .insert(id.to_string(), display.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntityLookup for InMemoryEntityLookup {
    async fn find_display_names(
        &self,
        entity_type: &str,
        ids: &[String],
    ) -> RepoResult<HashMap<String, String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let rows = self
            .rows
            .get(entity_type)
            .ok_or_else(|| DomainError::UnknownEntityType(entity_type.to_string()))?;
        Ok(ids
            .iter()
            .filter_map(|id| rows.get(id).map(|display| (id.clone(), display.clone())))
            .collect())
    }
}

/// User directory with a fixed snapshot
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: HashMap<i64, String>,
    calls: AtomicUsize,
}

impl InMemoryUserDirectory {
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        Self {
            users: users.into_iter().map(|(id, name)| (id, name.into())).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn all_known_users(&self) -> RepoResult<HashMap<i64, String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.clone())
    }
}

/// Service context over in-memory adapters, keeping handles for assertions
pub struct TestHarness {
    pub store: Arc<InMemoryAuditStore>,
    pub lookup: Arc<InMemoryEntityLookup>,
    pub users: Arc<InMemoryUserDirectory>,
    pub ctx: ServiceContext,
}

impl TestHarness {
    pub fn new(
        schemas: Vec<EntitySchema>,
        records: Vec<AuditRecord>,
        lookup: InMemoryEntityLookup,
        users: InMemoryUserDirectory,
    ) -> anyhow::Result<Self> {
        Self::with_config(schemas, records, lookup, users, &HistoryConfig::default())
    }

    pub fn with_config(
        schemas: Vec<EntitySchema>,
        records: Vec<AuditRecord>,
        lookup: InMemoryEntityLookup,
        users: InMemoryUserDirectory,
        config: &HistoryConfig,
    ) -> anyhow::Result<Self> {
        let store = Arc::new(InMemoryAuditStore::new(records));
        let lookup = Arc::new(lookup);
        let users = Arc::new(users);

        let ctx = ServiceContextBuilder::new()
            .audit_store(store.clone())
            .entity_lookup(lookup.clone())
            .user_directory(users.clone())
            .schemas(Arc::new(SchemaRegistry::from_schemas(schemas)?))
            .history_config(config)
            .build()
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        Ok(Self {
            store,
            lookup,
            users,
            ctx,
        })
    }
}
