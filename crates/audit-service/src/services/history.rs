//! History service
//!
//! Reconstructs the change history of one record, and the recent activity
//! of an entity type, from the audit log.

use audit_core::{AuditRecord, Change, FieldDescriptor};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::{
    ChangeResponse, HistoryRequest, HistoryResponse, RecentChangesRequest, RecentChangesResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::reconstruct::{load_references, reconstruct_history};
use super::users::UserNameResolver;

/// History service
pub struct HistoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HistoryService<'a> {
    /// Create a new HistoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Changes of one record, oldest first
    #[instrument(skip(self, request), fields(entity_type = %request.entity_type, record_id = %request.record_id))]
    pub async fn changes(&self, request: &HistoryRequest) -> ServiceResult<Vec<Change>> {
        request.validate()?;

        let schema = self.ctx.schemas().get(&request.entity_type)?;
        let fields = self.ctx.visibility().visible_fields(
            &schema,
            request.fields.as_deref(),
            &request.excluded_fields,
        )?;

        let records = self
            .ctx
            .audit_store()
            .records_for(&schema.table_name, &request.record_id)
            .await?;
        debug!(records = records.len(), fields = fields.len(), "Fetched audit records");

        self.reconstruct(&fields, records).await
    }

    /// History of one record as a response DTO
    pub async fn history(&self, request: HistoryRequest) -> ServiceResult<HistoryResponse> {
        let changes = self.changes(&request).await?;
        info!(
            entity_type = %request.entity_type,
            record_id = %request.record_id,
            changes = changes.len(),
            "History reconstructed"
        );

        Ok(HistoryResponse {
            entity_type: request.entity_type,
            record_id: request.record_id,
            changes: changes.iter().map(ChangeResponse::from).collect(),
        })
    }

    /// Newest changes across all records of an entity type, oldest first
    #[instrument(skip(self, request), fields(entity_type = %request.entity_type))]
    pub async fn recent_changes(
        &self,
        request: RecentChangesRequest,
    ) -> ServiceResult<RecentChangesResponse> {
        request.validate()?;

        let limit = request.limit.unwrap_or_else(|| self.ctx.recent_limit());
        let schema = self.ctx.schemas().get(&request.entity_type)?;
        let fields = self.ctx.visibility().visible_fields(&schema, None, &[])?;

        let records = self
            .ctx
            .audit_store()
            .recent_for_table(&schema.table_name, limit)
            .await?;
        let changes = self.reconstruct(&fields, records).await?;
        info!(limit, changes = changes.len(), "Recent changes reconstructed");

        Ok(RecentChangesResponse {
            entity_type: request.entity_type,
            limit,
            changes: changes.iter().map(ChangeResponse::from).collect(),
        })
    }

    /// Load the batch snapshots, then convert
    async fn reconstruct(
        &self,
        fields: &[FieldDescriptor],
        records: Vec<AuditRecord>,
    ) -> ServiceResult<Vec<Change>> {
        if records.is_empty() || fields.is_empty() {
            return Ok(Vec::new());
        }

        let refs = load_references(self.ctx.entity_lookup(), fields, &records).await?;
        let users = UserNameResolver::new(self.ctx.user_directory())
            .snapshot_for(&records)
            .await?;

        Ok(reconstruct_history(
            self.ctx.formatters(),
            fields,
            records,
            &users,
            &refs,
        ))
    }
}
