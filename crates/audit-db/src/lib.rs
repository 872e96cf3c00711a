//! # audit-db
//!
//! Database layer implementing the audit-core store traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate handles:
//!
//! - Connection pool management
//! - The audit trigger's table, read through `hstore_to_jsonb`
//! - Batched display-string lookups for referenced rows
//! - The user snapshot used to pretty-print acting users
//!
//! ## Usage
//!
//! ```rust,ignore
//! use audit_db::pool::{create_pool, DatabaseConfig};
//! use audit_db::repositories::PgAuditStore;
//! use audit_core::traits::AuditStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let store = PgAuditStore::new(pool);
//!
//!     let records = store.records_for("contacts_person", "42").await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{EntityTable, PgAuditStore, PgEntityLookup, PgUserDirectory};
