//! Error handling utilities for repositories

use audit_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create an "unknown entity type" error
pub fn unknown_entity_type(entity_type: &str) -> DomainError {
    DomainError::UnknownEntityType(entity_type.to_string())
}
