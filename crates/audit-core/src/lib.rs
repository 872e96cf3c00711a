//! # audit-core
//!
//! Domain layer containing audit records, field descriptors, reconstructed
//! changes, and the store traits the reconstructor reads through.
//! This crate has zero dependencies on infrastructure (database, CLI, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    row_values, AuditRecord, Change, ChoiceSet, DisplayValue, EntitySchema, FieldChange,
    FieldDescriptor, FieldKind, RowValues, EMPTY_CHOICE, NO_VALUE,
};
pub use error::DomainError;
pub use traits::{AuditStore, EntityLookup, RepoResult, UserDirectory};
pub use value_objects::{ActionParseError, AuditAction, EventId, EventIdParseError};
