//! # Dashboard Error Types
//!
//! Error types for building dashboards, loading configuration and saving
//! exports.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Dashboard Error Categories                          │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │      Data       │  │        Export           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Data (repo)    │  │  Export (CSV text)      │ │
//! │  │  ConfigLoad...  │  │  Core (roles)   │  │  Io (file write)        │ │
//! │  │  ConfigSave...  │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use eduverse_core::{CoreError, ExportError};
use eduverse_data::DataError;
use thiserror::Error;

/// Result type alias for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Dashboard error type.
#[derive(Debug, Error)]
pub enum DashboardError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A configuration value is out of range or malformed.
    #[error("Invalid dashboard configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Data Errors
    // =========================================================================
    /// Repository failure (not found, integrity, snapshot I/O).
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Domain rule violation, such as asking for a student view of a faculty account.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Export Errors
    // =========================================================================
    /// Rows could not be turned into CSV.
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// File system error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for DashboardError {
    fn from(err: toml::de::Error) -> Self {
        DashboardError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for DashboardError {
    fn from(err: toml::ser::Error) -> Self {
        DashboardError::ConfigSaveFailed(err.to_string())
    }
}

impl DashboardError {
    /// Returns true if the error comes from configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DashboardError::InvalidConfig(_)
                | DashboardError::ConfigLoadFailed(_)
                | DashboardError::ConfigSaveFailed(_)
        )
    }

    /// Returns true if a requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DashboardError::Data(DataError::NotFound { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert!(DashboardError::InvalidConfig("x".into()).is_config_error());
        assert!(!DashboardError::Io("disk full".into()).is_config_error());

        let missing: DashboardError = DataError::not_found("User", "u-1").into();
        assert!(missing.is_not_found());
        assert!(!missing.is_config_error());
    }

    #[test]
    fn test_error_display() {
        let err: DashboardError = CoreError::NoInstitution("root".into()).into();
        assert_eq!(err.to_string(), "User root is not attached to an institution");

        let err = DashboardError::InvalidConfig("currency must be a 3-letter code".into());
        assert_eq!(
            err.to_string(),
            "Invalid dashboard configuration: currency must be a 3-letter code"
        );
    }
}
