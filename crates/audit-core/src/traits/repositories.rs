//! Store traits (ports) - define the interface for data access
//!
//! The reconstructor only reads. The domain layer defines what it needs,
//! and the infrastructure layer provides the implementation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::entities::AuditRecord;
use crate::error::DomainError;

/// Result type for store operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Audit Store
// ============================================================================

#[async_trait]
pub trait AuditStore: Send + Sync {
    /// All records for one row of one table, ordered by event ID ascending
    async fn records_for(&self, table_name: &str, record_id: &str) -> RepoResult<Vec<AuditRecord>>;

    /// The newest `limit` records of a table, returned in ascending event order
    async fn recent_for_table(&self, table_name: &str, limit: i64) -> RepoResult<Vec<AuditRecord>>;
}

// ============================================================================
// Entity Lookup
// ============================================================================

#[async_trait]
pub trait EntityLookup: Send + Sync {
    /// Display strings for the given ids of an entity type.
    ///
    /// Ids with no current row are simply absent from the result.
    /// An entity type the lookup does not know is an error.
    async fn find_display_names(
        &self,
        entity_type: &str,
        ids: &[String],
    ) -> RepoResult<HashMap<String, String>>;
}

// ============================================================================
// User Directory
// ============================================================================

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Snapshot of all known users: id -> display name
    async fn all_known_users(&self) -> RepoResult<HashMap<i64, String>>;
}
