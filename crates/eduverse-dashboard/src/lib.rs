//! # eduverse-dashboard: Role Dashboards for EduVerse
//!
//! Turns campus records into what each role sees after signing in.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        EduVerse Dashboards                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              eduverse-dashboard (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────┐   ┌──────────────┐   ┌──────────────┐  │   │
//! │  │   │ DashboardService │   │  Debouncer   │   │  save_csv    │  │   │
//! │  │   │ 4 role views     │   │  search box  │   │  exports/    │  │   │
//! │  │   └────────┬─────────┘   └──────────────┘   └──────────────┘  │   │
//! │  │            │                                                    │   │
//! │  │   ┌────────┴─────────┐   ┌──────────────┐                      │   │
//! │  │   │ DashboardConfig  │   │ init_tracing │                      │   │
//! │  │   │ TOML + EDUVERSE_*│   │ EnvFilter    │                      │   │
//! │  │   └──────────────────┘   └──────────────┘                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │            │                                                            │
//! │            ▼                                                            │
//! │  eduverse-data (CampusRepository)  ──►  eduverse-core (calculators)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use eduverse_dashboard::{init_tracing, open_repository, DashboardConfig, DashboardService};
//!
//! init_tracing();
//! let config = DashboardConfig::load_or_default(None);
//! let service = DashboardService::from_config(open_repository(&config)?, &config);
//!
//! let home = service.student_dashboard("stu-1", today).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod debounce;
pub mod error;
pub mod export;
pub mod service;
pub mod telemetry;
pub mod views;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::DashboardConfig;
pub use debounce::Debouncer;
pub use error::{DashboardError, DashboardResult};
pub use export::save_csv;
pub use service::DashboardService;
pub use telemetry::init_tracing;
pub use views::{
    AdminDashboard, DepartmentSummary, FacultyDashboard, FeeAmounts, InstitutionQuery,
    InstitutionRow, PlanCount, StudentCourse, StudentDashboard, SuperAdminDashboard, TaughtCourse,
};

use eduverse_data::{demo, InMemoryRepository};
use tracing::info;

/// Opens the repository named by `[data] snapshot_path`, or the demo campus
/// when no path is configured. Demo roll numbers use the configured
/// `student_id_prefix`.
pub fn open_repository(config: &DashboardConfig) -> DashboardResult<InMemoryRepository> {
    match &config.data.snapshot_path {
        Some(path) => Ok(InMemoryRepository::load(path)?),
        None => {
            let prefix = config.student_id_prefix();
            info!(prefix = %prefix, "No snapshot configured, using the demo campus");
            Ok(InMemoryRepository::new(demo::demo_snapshot_with_prefix(prefix))?)
        }
    }
}
