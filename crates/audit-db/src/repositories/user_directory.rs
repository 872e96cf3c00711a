//! PostgreSQL implementation of UserDirectory

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use audit_core::traits::{RepoResult, UserDirectory};

use crate::models::UserNameModel;

use super::error::map_db_error;
use super::sql::Identifier;

/// PostgreSQL implementation of UserDirectory
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
    table: Identifier,
    name_column: Identifier,
}

impl PgUserDirectory {
    /// Create a new PgUserDirectory over `table`, displaying `name_column`
    pub fn new(pool: PgPool, table: &str, name_column: &str) -> RepoResult<Self> {
        Ok(Self {
            pool,
            table: Identifier::parse(table)?,
            name_column: Identifier::parse(name_column)?,
        })
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    #[instrument(skip(self))]
    async fn all_known_users(&self) -> RepoResult<HashMap<i64, String>> {
        let sql = format!(
            r#"
            SELECT "id"::bigint AS id, {name}::text AS name
            FROM {table}
            "#,
            name = self.name_column.as_sql(),
            table = self.table.as_sql(),
        );

        let rows = sqlx::query_as::<_, UserNameModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        debug!(count = rows.len(), "Loaded user snapshot");
        Ok(rows
            .into_iter()
            .filter_map(|row| row.name.map(|name| (row.id, name)))
            .collect())
    }
}
