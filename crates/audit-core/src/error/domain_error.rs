//! Domain errors - error types for the domain layer
//!
//! Data-quality problems in stored audit rows never surface here; they
//! degrade to display fallbacks. These variants cover caller contract
//! violations and infrastructure failures.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("Unknown field {field} on {entity_type}")]
    UnknownField { entity_type: String, field: String },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid field descriptor: {0}")]
    InvalidFieldDescriptor(String),

    #[error("Invalid audit action: {0}")]
    InvalidAction(String),

    // =========================================================================
    // Infrastructure Errors
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UnknownEntityType(_) => "UNKNOWN_ENTITY_TYPE",
            Self::UnknownField { .. } => "UNKNOWN_FIELD",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidFieldDescriptor(_) => "INVALID_FIELD_DESCRIPTOR",
            Self::InvalidAction(_) => "INVALID_ACTION",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownEntityType(_) | Self::UnknownField { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidFieldDescriptor(_) | Self::InvalidAction(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::UnknownEntityType("Widget".to_string());
        assert_eq!(err.code(), "UNKNOWN_ENTITY_TYPE");

        let err = DomainError::InvalidAction("X".to_string());
        assert_eq!(err.code(), "INVALID_ACTION");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::UnknownEntityType("Widget".to_string()).is_not_found());
        assert!(DomainError::UnknownField {
            entity_type: "Person".to_string(),
            field: "shoe_size".to_string(),
        }
        .is_not_found());
        assert!(!DomainError::DatabaseError("boom".to_string()).is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::UnknownField {
            entity_type: "Person".to_string(),
            field: "shoe_size".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown field shoe_size on Person");
    }
}
