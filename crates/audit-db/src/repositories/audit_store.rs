//! PostgreSQL implementation of AuditStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use audit_core::entities::AuditRecord;
use audit_core::traits::{AuditStore, RepoResult};

use crate::models::LoggedActionModel;

use super::error::map_db_error;
use super::sql::Identifier;

/// Default table written by the audit trigger
pub const DEFAULT_AUDIT_TABLE: &str = "audit_logged_actions";

const SELECT_COLUMNS: &str = r"
    event_id, table_name, action, created_at, user_name,
    hstore_to_jsonb(row_data) AS row_data,
    hstore_to_jsonb(changed_fields) AS changed_fields
";

/// PostgreSQL implementation of AuditStore
#[derive(Clone)]
pub struct PgAuditStore {
    pool: PgPool,
    table: Identifier,
}

impl PgAuditStore {
    /// Create a new PgAuditStore reading the default audit table
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table: Identifier::builtin(DEFAULT_AUDIT_TABLE),
        }
    }

    /// Create a PgAuditStore reading a configured audit table
    pub fn with_table(pool: PgPool, table: &str) -> RepoResult<Self> {
        Ok(Self {
            pool,
            table: Identifier::parse(table)?,
        })
    }

    fn into_records(models: Vec<LoggedActionModel>) -> RepoResult<Vec<AuditRecord>> {
        models.into_iter().map(AuditRecord::try_from).collect()
    }
}

#[async_trait]
impl AuditStore for PgAuditStore {
    #[instrument(skip(self))]
    async fn records_for(&self, table_name: &str, record_id: &str) -> RepoResult<Vec<AuditRecord>> {
        let sql = format!(
            r"
            SELECT {SELECT_COLUMNS}
            FROM {table}
            WHERE table_name = $1 AND row_data -> 'id' = $2
            ORDER BY event_id
            ",
            table = self.table.as_sql(),
        );

        let models = sqlx::query_as::<_, LoggedActionModel>(&sql)
            .bind(table_name)
            .bind(record_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        debug!(count = models.len(), "Fetched audit records");
        Self::into_records(models)
    }

    #[instrument(skip(self))]
    async fn recent_for_table(&self, table_name: &str, limit: i64) -> RepoResult<Vec<AuditRecord>> {
        let sql = format!(
            r"
            SELECT * FROM (
                SELECT {SELECT_COLUMNS}
                FROM {table}
                WHERE table_name = $1
                ORDER BY event_id DESC
                LIMIT $2
            ) recent
            ORDER BY event_id
            ",
            table = self.table.as_sql(),
        );

        let models = sqlx::query_as::<_, LoggedActionModel>(&sql)
            .bind(table_name)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        debug!(count = models.len(), "Fetched recent audit records");
        Self::into_records(models)
    }
}
