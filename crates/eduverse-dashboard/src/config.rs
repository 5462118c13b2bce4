//! # Dashboard Configuration
//!
//! Configuration management for the dashboards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     EDUVERSE_CURRENCY=USD                                              │
//! │     EDUVERSE_SEARCH_DEBOUNCE_MS=500                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/dashboard/dashboard.toml (Linux)                         │
//! │     ~/Library/Application Support/app.eduverse.dashboard/ (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     INR, LATE counts, EXCUSED excluded, 300 ms debounce                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # dashboard.toml
//! [tenant]
//! currency = "INR"
//! student_id_prefix = "ST"
//!
//! [attendance]
//! late_counts_as_present = true
//! exclude_excused = true
//!
//! [search]
//! debounce_ms = 300
//!
//! [export]
//! output_dir = "exports"
//!
//! [data]
//! snapshot_path = "campus.json"
//! ```

use eduverse_core::stats::AttendancePolicy;
use eduverse_core::DEFAULT_CURRENCY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{DashboardError, DashboardResult};

/// Longest accepted search debounce window.
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

// =============================================================================
// Sections
// =============================================================================

/// Per-tenant display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantSettings {
    /// ISO 4217 code used for every amount on the dashboards.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Prefix for generated student roll numbers.
    #[serde(default = "default_student_prefix")]
    pub student_id_prefix: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_student_prefix() -> String {
    "ST".to_string()
}

impl Default for TenantSettings {
    fn default() -> Self {
        TenantSettings {
            currency: default_currency(),
            student_id_prefix: default_student_prefix(),
        }
    }
}

/// How LATE and EXCUSED marks count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSettings {
    #[serde(default = "default_true")]
    pub late_counts_as_present: bool,

    #[serde(default = "default_true")]
    pub exclude_excused: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AttendanceSettings {
    fn default() -> Self {
        AttendanceSettings {
            late_counts_as_present: true,
            exclude_excused: true,
        }
    }
}

impl From<AttendanceSettings> for AttendancePolicy {
    fn from(settings: AttendanceSettings) -> Self {
        AttendancePolicy {
            late_counts_as_present: settings.late_counts_as_present,
            exclude_excused: settings.exclude_excused,
        }
    }
}

/// Search box behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Quiet period after the last keystroke before a search runs.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Where CSV exports are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("exports")
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            output_dir: default_output_dir(),
        }
    }
}

/// Where campus data comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    /// Snapshot JSON file. Unset means the demo campus.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

// =============================================================================
// Main Dashboard Configuration
// =============================================================================

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub tenant: TenantSettings,

    #[serde(default)]
    pub attendance: AttendanceSettings,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub data: DataSettings,
}

impl DashboardConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (dashboard.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> DashboardResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading dashboard config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load dashboard config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses TOML; missing sections and keys take their defaults.
    pub fn from_toml(contents: &str) -> DashboardResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> DashboardResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| DashboardError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Dashboard config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> DashboardResult<()> {
        let code = &self.tenant.currency;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DashboardError::InvalidConfig(format!(
                "currency must be a 3-letter code, got: '{}'",
                code
            )));
        }

        if self.tenant.student_id_prefix.trim().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "student_id_prefix must not be empty".into(),
            ));
        }

        if self.search.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(DashboardError::InvalidConfig(format!(
                "debounce_ms must be at most {}, got: {}",
                MAX_DEBOUNCE_MS, self.search.debounce_ms
            )));
        }

        if self.export.output_dir.as_os_str().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "export output_dir must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `EDUVERSE_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(currency) = lookup("EDUVERSE_CURRENCY") {
            debug!(currency = %currency, "Overriding currency from environment");
            self.tenant.currency = currency.to_uppercase();
        }

        if let Some(prefix) = lookup("EDUVERSE_STUDENT_ID_PREFIX") {
            self.tenant.student_id_prefix = prefix;
        }

        if let Some(value) = lookup("EDUVERSE_LATE_COUNTS_AS_PRESENT") {
            match parse_flag(&value) {
                Some(flag) => self.attendance.late_counts_as_present = flag,
                None => warn!(value = %value, "Unknown EDUVERSE_LATE_COUNTS_AS_PRESENT value"),
            }
        }

        if let Some(value) = lookup("EDUVERSE_EXCLUDE_EXCUSED") {
            match parse_flag(&value) {
                Some(flag) => self.attendance.exclude_excused = flag,
                None => warn!(value = %value, "Unknown EDUVERSE_EXCLUDE_EXCUSED value"),
            }
        }

        if let Some(value) = lookup("EDUVERSE_SEARCH_DEBOUNCE_MS") {
            match value.parse::<u64>() {
                Ok(ms) => {
                    debug!(debounce_ms = ms, "Overriding search debounce from environment");
                    self.search.debounce_ms = ms;
                }
                Err(_) => warn!(value = %value, "Ignoring non-numeric EDUVERSE_SEARCH_DEBOUNCE_MS"),
            }
        }

        if let Some(dir) = lookup("EDUVERSE_EXPORT_DIR") {
            self.export.output_dir = PathBuf::from(dir);
        }

        if let Some(path) = lookup("EDUVERSE_SNAPSHOT_PATH") {
            debug!(path = %path, "Overriding snapshot path from environment");
            self.data.snapshot_path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("app", "eduverse", "dashboard")
            .map(|dirs| dirs.config_dir().join("dashboard.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn currency(&self) -> &str {
        &self.tenant.currency
    }

    pub fn student_id_prefix(&self) -> &str {
        self.tenant.student_id_prefix.trim()
    }

    pub fn attendance_policy(&self) -> AttendancePolicy {
        self.attendance.into()
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.currency(), "INR");
        assert_eq!(config.student_id_prefix(), "ST");
        assert_eq!(config.attendance_policy(), AttendancePolicy::default());
        assert_eq!(config.debounce_window(), Duration::from_millis(300));
        assert_eq!(config.export.output_dir, PathBuf::from("exports"));
        assert!(config.data.snapshot_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DashboardConfig::from_toml(
            r#"
            [tenant]
            currency = "USD"

            [attendance]
            late_counts_as_present = false
            "#,
        )
        .unwrap();

        assert_eq!(config.currency(), "USD");
        assert_eq!(config.tenant.student_id_prefix, "ST");
        assert!(!config.attendance.late_counts_as_present);
        assert!(config.attendance.exclude_excused);
        assert_eq!(config.search.debounce_ms, 300);
    }

    #[test]
    fn test_malformed_toml_is_load_error() {
        let err = DashboardConfig::from_toml("[search]\ndebounce_ms = \"soon\"").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_config_validation() {
        let mut config = DashboardConfig::default();

        config.tenant.currency = "RUPEES".to_string();
        assert!(config.validate().is_err());

        config.tenant.currency = "EUR".to_string();
        assert!(config.validate().is_ok());

        config.search.debounce_ms = MAX_DEBOUNCE_MS + 1;
        assert!(config.validate().is_err());

        config.search.debounce_ms = 0;
        assert!(config.validate().is_ok());

        config.export.output_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("EDUVERSE_CURRENCY", "usd"),
            ("EDUVERSE_LATE_COUNTS_AS_PRESENT", "no"),
            ("EDUVERSE_EXCLUDE_EXCUSED", "maybe"),
            ("EDUVERSE_SEARCH_DEBOUNCE_MS", "450"),
            ("EDUVERSE_SNAPSHOT_PATH", "/srv/campus.json"),
        ]
        .into_iter()
        .collect();

        let mut config = DashboardConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.currency(), "USD");
        assert!(!config.attendance.late_counts_as_present);
        // unparseable flag leaves the default
        assert!(config.attendance.exclude_excused);
        assert_eq!(config.search.debounce_ms, 450);
        assert_eq!(config.data.snapshot_path, Some(PathBuf::from("/srv/campus.json")));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("eduverse-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("dashboard.toml");

        let mut config = DashboardConfig::default();
        config.tenant.currency = "GBP".to_string();
        config.search.debounce_ms = 150;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[tenant]"));
        assert_eq!(DashboardConfig::from_toml(&contents).unwrap(), config);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
