//! # eduverse-data: Data Access Layer for EduVerse
//!
//! This crate owns the campus entities at rest. Dashboards never reach into
//! shared state; they receive a [`CampusRepository`] and ask it for records.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        EduVerse Data Flow                               │
//! │                                                                         │
//! │  DashboardService::student_dashboard("stu-1")                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   eduverse-data (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  Repository   │    │   Snapshot    │    │    Demo      │  │   │
//! │  │   │ (trait + mem) │───►│ checked       │◄───│  campus      │  │   │
//! │  │   │               │    │ inserts, JSON │    │  (seed bin)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Snapshot JSON file                          │   │
//! │  │              configured by [data] snapshot_path                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`repository`] - `CampusRepository` trait and the in-memory store
//! - [`snapshot`] - Entity collections, integrity checks, JSON files
//! - [`demo`] - Demo platform for development and tests
//! - [`error`] - Data error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use eduverse_data::{demo, CampusRepository, InMemoryRepository};
//!
//! let repo = InMemoryRepository::new(demo::demo_snapshot())?;
//! let courses = repo.list_courses("inst-1").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod demo;
pub mod error;
pub mod repository;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DataError, DataResult};
pub use repository::{CampusRepository, InMemoryRepository};
pub use snapshot::Snapshot;
