//! History reconstruction services
//!
//! Formatting, reconstruction, user resolution and visibility are split
//! into small modules; `HistoryService` wires them to the store ports.

pub mod context;
pub mod error;
pub mod formatter;
pub mod history;
pub mod reconstruct;
pub mod schema_registry;
pub mod users;
pub mod visibility;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder, DEFAULT_RECENT_LIMIT};
pub use error::{ServiceError, ServiceResult};
pub use formatter::{DateFormats, FieldFormatter, FormatterKey, FormatterRegistry, ReferenceSnapshot};
pub use history::HistoryService;
pub use reconstruct::{load_references, reconstruct_history, referenced_ids};
pub use schema_registry::SchemaRegistry;
pub use users::{parse_user_id, UserNameResolver, UserNames};
pub use visibility::VisibilityPolicy;
