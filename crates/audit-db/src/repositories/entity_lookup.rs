//! PostgreSQL implementation of EntityLookup

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use audit_core::traits::{EntityLookup, RepoResult};

use crate::models::DisplayNameModel;

use super::error::{map_db_error, unknown_entity_type};
use super::sql::Identifier;

/// Where the display string of an entity type lives
#[derive(Debug, Clone)]
pub struct EntityTable {
    table: Identifier,
    id_column: Identifier,
    display_column: Identifier,
}

impl EntityTable {
    /// Describe a table whose rows display as `display_column`
    pub fn new(table: &str, display_column: &str) -> RepoResult<Self> {
        Ok(Self {
            table: Identifier::parse(table)?,
            id_column: Identifier::builtin("id"),
            display_column: Identifier::parse(display_column)?,
        })
    }

    /// Override the primary key column
    pub fn with_id_column(mut self, id_column: &str) -> RepoResult<Self> {
        self.id_column = Identifier::parse(id_column)?;
        Ok(self)
    }
}

/// PostgreSQL implementation of EntityLookup
#[derive(Clone)]
pub struct PgEntityLookup {
    pool: PgPool,
    tables: Arc<HashMap<String, EntityTable>>,
}

impl PgEntityLookup {
    /// Create a new PgEntityLookup over registered entity tables
    pub fn new(pool: PgPool, tables: HashMap<String, EntityTable>) -> Self {
        Self {
            pool,
            tables: Arc::new(tables),
        }
    }
}

#[async_trait]
impl EntityLookup for PgEntityLookup {
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_display_names(
        &self,
        entity_type: &str,
        ids: &[String],
    ) -> RepoResult<HashMap<String, String>> {
        let table = self
            .tables
            .get(entity_type)
            .ok_or_else(|| unknown_entity_type(entity_type))?;

        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            r"
            SELECT {id}::text AS id, {display}::text AS display
            FROM {table}
            WHERE {id}::text = ANY($1)
            ",
            id = table.id_column.as_sql(),
            display = table.display_column.as_sql(),
            table = table.table.as_sql(),
        );

        let rows = sqlx::query_as::<_, DisplayNameModel>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        debug!(found = rows.len(), "Resolved referenced rows");
        Ok(rows
            .into_iter()
            .map(|row| (row.id, row.display.unwrap_or_default()))
            .collect())
    }
}
