//! # Data Error Types
//!
//! Error types for repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (eduverse-core)   io::Error   serde_json::Error        │
//! │       │                               │              │                  │
//! │       ▼                               ▼              ▼                  │
//! │  DataError (this module) ← Adds entity context and categorization      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DashboardError (eduverse-dashboard)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  View layer displays a readable message                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use eduverse_core::types::Role;
use eduverse_core::ValidationError;
use thiserror::Error;

/// Repository operation errors.
#[derive(Debug, Error)]
pub enum DataError {
    /// Entity not found.
    ///
    /// ## When This Occurs
    /// - Unknown id passed to a lookup
    /// - Marking a notification read that was never sent
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Second institution with the same domain
    /// - Course code reused inside one institution
    /// - Second attendance mark for a student, course and day
    /// - Reused entity id
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A record points at an entity that does not exist.
    ///
    /// ## When This Occurs
    /// - Payment for an unknown fee structure
    /// - Enrollment in an unknown course
    /// - Enrollment, attendance, grade or payment naming a non-student
    /// - Course instructor who is not faculty
    /// - Student and course (or fee) from different institutions
    #[error("Reference violation: {message}")]
    ReferenceViolation { message: String },

    /// The record failed entity validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Snapshot file could not be read or written.
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file is not valid JSON for the expected shape.
    #[error("Snapshot format error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DataError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DataError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DataError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a ReferenceViolation error.
    pub fn missing_reference(entity: &str, id: &str) -> Self {
        DataError::ReferenceViolation {
            message: format!("{} {} does not exist", entity, id),
        }
    }

    /// Creates a ReferenceViolation for a user holding the wrong role.
    pub fn wrong_role(user_id: &str, expected: Role, actual: Role) -> Self {
        DataError::ReferenceViolation {
            message: format!("User {} is {}, expected {}", user_id, actual, expected),
        }
    }

    /// Creates a ReferenceViolation for a record crossing tenants.
    pub fn cross_tenant(id: &str, entity: &str, institution_id: &str) -> Self {
        DataError::ReferenceViolation {
            message: format!(
                "{} is not part of {}, which belongs to {}",
                id, entity, institution_id
            ),
        }
    }
}

/// Unique-index violations surfaced by core validators keep their
/// field and value instead of being wrapped as generic validation errors.
pub(crate) fn from_validation(err: ValidationError) -> DataError {
    match err {
        ValidationError::Duplicate { field, value } => DataError::UniqueViolation { field, value },
        other => DataError::Validation(other),
    }
}

/// Result type for repository operations.
pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DataError::not_found("Course", "c-9").to_string(),
            "Course not found: c-9"
        );
        assert_eq!(
            DataError::duplicate("domain", "springfield.edu").to_string(),
            "Duplicate domain: 'springfield.edu' already exists"
        );
        assert_eq!(
            DataError::missing_reference("FeeStructure", "fee-1").to_string(),
            "Reference violation: FeeStructure fee-1 does not exist"
        );
        assert_eq!(
            DataError::wrong_role("fac-1", Role::Student, Role::Faculty).to_string(),
            "Reference violation: User fac-1 is FACULTY, expected STUDENT"
        );
    }

    #[test]
    fn test_duplicate_validation_maps_to_unique_violation() {
        let err = from_validation(ValidationError::Duplicate {
            field: "domain".to_string(),
            value: "a.edu".to_string(),
        });
        assert!(matches!(err, DataError::UniqueViolation { .. }));

        let err = from_validation(ValidationError::Required {
            field: "name".to_string(),
        });
        assert!(matches!(err, DataError::Validation(_)));
    }
}
