//! # Error Types
//!
//! Domain-specific error types for eduverse-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  eduverse-core errors (this file)                                      │
//! │  ├── CoreError        - Entity-level domain errors                     │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── ExportError      - CSV export of non-record rows                  │
//! │                                                                         │
//! │  eduverse-data errors (separate crate)                                 │
//! │  └── DataError        - Repository failures                            │
//! │                                                                         │
//! │  eduverse-dashboard errors (separate crate)                            │
//! │  └── DashboardError   - Config, export and data failures               │
//! │                                                                         │
//! │  Flow: ValidationError → DataError → DashboardError → View layer       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Calculators Never Fail
//! Percentage, grade, calendar and formatting functions are total: degenerate
//! input maps to a sentinel (0, "", false). The types below are only used
//! where a caller asks "is this entity acceptable?".

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Entity-level business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A user record does not carry the role an operation needs.
    ///
    /// ## When This Occurs
    /// - Building a student dashboard for a faculty account
    /// - Building a faculty dashboard for a student account
    #[error("User {user_id} has role {actual}, expected {expected}")]
    RoleMismatch {
        user_id: String,
        expected: String,
        actual: String,
    },

    /// A user that must belong to a tenant has no institution.
    #[error("User {0} is not attached to an institution")]
    NoInstitution(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used by the form layer before entity creation and by the repository
/// before it accepts a record.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email or phone).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate tenant domain).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Export Error
// =============================================================================

/// Errors raised while turning rows into CSV text.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A row did not serialize to a record with named fields.
    #[error("Row {index} is not a record")]
    NotARecord { index: usize },

    /// The row could not be serialized at all.
    #[error("Failed to serialize row: {0}")]
    Serialize(#[from] serde_json::Error),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::RoleMismatch {
            user_id: "u-1".to_string(),
            expected: "STUDENT".to_string(),
            actual: "FACULTY".to_string(),
        };
        assert_eq!(err.to_string(), "User u-1 has role FACULTY, expected STUDENT");

        let err = CoreError::NoInstitution("root".to_string());
        assert_eq!(err.to_string(), "User root is not attached to an institution");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "domain".to_string(),
        };
        assert_eq!(err.to_string(), "domain is required");

        let err = ValidationError::Duplicate {
            field: "course code".to_string(),
            value: "CS301".to_string(),
        };
        assert_eq!(err.to_string(), "course code 'CS301' already exists");
    }

    #[test]
    fn test_export_error_message() {
        let err = ExportError::NotARecord { index: 2 };
        assert_eq!(err.to_string(), "Row 2 is not a record");
    }
}
