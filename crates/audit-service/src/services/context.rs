//! Service context - dependency container for services
//!
//! Holds the store ports, the schema registry, and the shared formatter cache.

use std::sync::Arc;

use audit_common::{HistoryConfig, MAX_RECENT_LIMIT};
use audit_core::traits::{AuditStore, EntityLookup, UserDirectory};

use super::error::{ServiceError, ServiceResult};
use super::formatter::{DateFormats, FormatterRegistry};
use super::schema_registry::SchemaRegistry;
use super::visibility::VisibilityPolicy;

/// Default window of the recent-activity feed
pub const DEFAULT_RECENT_LIMIT: i64 = 50;

/// Service context containing all dependencies
///
/// Cloning is cheap; the formatter cache and schema registry are shared
/// between clones.
#[derive(Clone)]
pub struct ServiceContext {
    // Ports
    audit_store: Arc<dyn AuditStore>,
    entity_lookup: Arc<dyn EntityLookup>,
    user_directory: Arc<dyn UserDirectory>,

    // Schema and policy
    schemas: Arc<SchemaRegistry>,
    visibility: VisibilityPolicy,

    // Formatting
    formatters: Arc<FormatterRegistry>,

    recent_limit: i64,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        audit_store: Arc<dyn AuditStore>,
        entity_lookup: Arc<dyn EntityLookup>,
        user_directory: Arc<dyn UserDirectory>,
        schemas: Arc<SchemaRegistry>,
        visibility: VisibilityPolicy,
        formats: DateFormats,
        recent_limit: i64,
    ) -> Self {
        Self {
            audit_store,
            entity_lookup,
            user_directory,
            schemas,
            visibility,
            formatters: Arc::new(FormatterRegistry::new(formats)),
            recent_limit,
        }
    }

    // === Ports ===

    /// Get the audit store
    pub fn audit_store(&self) -> &dyn AuditStore {
        self.audit_store.as_ref()
    }

    /// Get the entity lookup used for reference fields
    pub fn entity_lookup(&self) -> &dyn EntityLookup {
        self.entity_lookup.as_ref()
    }

    /// Get the user directory
    pub fn user_directory(&self) -> &dyn UserDirectory {
        self.user_directory.as_ref()
    }

    // === Schema and policy ===

    pub fn schemas(&self) -> &SchemaRegistry {
        self.schemas.as_ref()
    }

    pub fn visibility(&self) -> &VisibilityPolicy {
        &self.visibility
    }

    // === Formatting ===

    pub fn formatters(&self) -> &FormatterRegistry {
        self.formatters.as_ref()
    }

    /// Default number of rows in the recent-activity feed
    pub fn recent_limit(&self) -> i64 {
        self.recent_limit
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("ports", &"...")
            .field("entity_types", &self.schemas.entity_types())
            .field("visibility", &self.visibility)
            .field("formats", self.formatters.formats())
            .field("recent_limit", &self.recent_limit)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    audit_store: Option<Arc<dyn AuditStore>>,
    entity_lookup: Option<Arc<dyn EntityLookup>>,
    user_directory: Option<Arc<dyn UserDirectory>>,
    schemas: Option<Arc<SchemaRegistry>>,
    visibility: VisibilityPolicy,
    formats: DateFormats,
    recent_limit: i64,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            audit_store: None,
            entity_lookup: None,
            user_directory: None,
            schemas: None,
            visibility: VisibilityPolicy::new(),
            formats: DateFormats::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    pub fn audit_store(mut self, store: Arc<dyn AuditStore>) -> Self {
        self.audit_store = Some(store);
        self
    }

    pub fn entity_lookup(mut self, lookup: Arc<dyn EntityLookup>) -> Self {
        self.entity_lookup = Some(lookup);
        self
    }

    pub fn user_directory(mut self, directory: Arc<dyn UserDirectory>) -> Self {
        self.user_directory = Some(directory);
        self
    }

    pub fn schemas(mut self, schemas: Arc<SchemaRegistry>) -> Self {
        self.schemas = Some(schemas);
        self
    }

    pub fn visibility(mut self, visibility: VisibilityPolicy) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn formats(mut self, formats: DateFormats) -> Self {
        self.formats = formats;
        self
    }

    pub fn recent_limit(mut self, limit: i64) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Apply exclusions, date formats and the feed window from configuration
    pub fn history_config(self, config: &HistoryConfig) -> Self {
        self.visibility(VisibilityPolicy::from_config(config))
            .formats(DateFormats::from(config))
            .recent_limit(config.recent_limit)
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing,
    /// a date format cannot be rendered, or the feed window is out of range
    pub fn build(self) -> ServiceResult<ServiceContext> {
        if !(1..=MAX_RECENT_LIMIT).contains(&self.recent_limit) {
            return Err(ServiceError::validation(format!(
                "recent_limit must be between 1 and {MAX_RECENT_LIMIT}"
            )));
        }
        self.formats
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        Ok(ServiceContext::new(
            self.audit_store
                .ok_or_else(|| ServiceError::validation("audit_store is required"))?,
            self.entity_lookup
                .ok_or_else(|| ServiceError::validation("entity_lookup is required"))?,
            self.user_directory
                .ok_or_else(|| ServiceError::validation("user_directory is required"))?,
            self.schemas
                .ok_or_else(|| ServiceError::validation("schemas is required"))?,
            self.visibility,
            self.formats,
            self.recent_limit,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use audit_core::traits::RepoResult;
    use audit_core::AuditRecord;

    struct Empty;

    #[async_trait]
    impl AuditStore for Empty {
        async fn records_for(&self, _table: &str, _id: &str) -> RepoResult<Vec<AuditRecord>> {
            Ok(Vec::new())
        }

        async fn recent_for_table(&self, _table: &str, _limit: i64) -> RepoResult<Vec<AuditRecord>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl EntityLookup for Empty {
        async fn find_display_names(
            &self,
            _entity_type: &str,
            _ids: &[String],
        ) -> RepoResult<HashMap<String, String>> {
            Ok(HashMap::new())
        }
    }

    #[async_trait]
    impl UserDirectory for Empty {
        async fn all_known_users(&self) -> RepoResult<HashMap<i64, String>> {
            Ok(HashMap::new())
        }
    }

    fn builder() -> ServiceContextBuilder {
        let ports = Arc::new(Empty);
        ServiceContextBuilder::new()
            .audit_store(Arc::clone(&ports) as Arc<dyn AuditStore>)
            .entity_lookup(Arc::clone(&ports) as Arc<dyn EntityLookup>)
            .user_directory(ports)
            .schemas(Arc::new(SchemaRegistry::new()))
    }

    #[test]
    fn test_build_with_defaults() {
        let ctx = builder().build().unwrap();
        assert_eq!(ctx.recent_limit(), DEFAULT_RECENT_LIMIT);
        assert_eq!(ctx.formatters().formats(), &DateFormats::default());
    }

    #[test]
    fn test_missing_port_rejected() {
        let err = ServiceContextBuilder::new().build().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_unrenderable_date_format_rejected() {
        let err = builder()
            .formats(DateFormats {
                date: "%d.%m.%Y".to_string(),
                date_time: "%d.%m.%Y %Q".to_string(),
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref msg) if msg.contains("HISTORY_DATETIME_FORMAT")));
    }

    #[test]
    fn test_recent_limit_bounds() {
        assert!(builder().recent_limit(0).build().is_err());
        assert!(builder().recent_limit(MAX_RECENT_LIMIT + 1).build().is_err());
        assert_eq!(
            builder().recent_limit(MAX_RECENT_LIMIT).build().unwrap().recent_limit(),
            MAX_RECENT_LIMIT
        );
    }
}
