//! Repository implementations
//!
//! PostgreSQL implementations of the store traits defined in audit-core.

mod audit_store;
mod entity_lookup;
mod error;
mod sql;
mod user_directory;

pub use audit_store::{PgAuditStore, DEFAULT_AUDIT_TABLE};
pub use entity_lookup::{EntityTable, PgEntityLookup};
pub use sql::Identifier;
pub use user_directory::PgUserDirectory;
