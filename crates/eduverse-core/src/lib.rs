//! # eduverse-core: Pure Domain Logic for EduVerse
//!
//! This crate holds the derived-value rules of the EduVerse school platform
//! as pure functions: grades, attendance, fees, identifiers, the academic
//! calendar, validation and formatting.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        EduVerse Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    View layer (dashboards)                      │   │
//! │  │   Super-admin ── Institution admin ── Faculty ── Student        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          eduverse-dashboard (view models, config)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ eduverse-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  grading  │  │ calendar  │  │   money   │  │ validation│  │   │
//! │  │   │  letters  │  │  terms    │  │   text    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   stats   │  │  export   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │          eduverse-data (repository, snapshot store)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Institution, User, Course, Grade, ...)
//! - [`grading`] - Percentages, letter grades and colour tiers
//! - [`identifiers`] - Student and employee ids
//! - [`calendar`] - Academic years, semesters, months, ages
//! - [`validation`] - Email/phone checks and entity rules
//! - [`money`] - Integer-paise `Money` and en-IN currency formatting
//! - [`text`] - Truncation, initials, capitalisation
//! - [`stats`] - Attendance, grade and fee aggregation
//! - [`export`] - CSV text export
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Total Functions**: calculators and formatters return a sentinel
//!    (0, "", false) for degenerate input
//! 2. **No I/O**: the only ambient read is today's date in `calculate_age`
//! 3. **Integer Money**: fee amounts are paise (i64)
//! 4. **Closed Enums**: plans, roles, letters and statuses are matched exhaustively
//!
//! ## Example Usage
//!
//! ```rust
//! use eduverse_core::grading::{calculate_percentage, generate_grade};
//! use eduverse_core::money::format_currency;
//!
//! let percentage = calculate_percentage(42.0, 50.0);
//! assert_eq!(percentage, 84);
//! assert_eq!(generate_grade(percentage as f64).to_string(), "A-");
//!
//! assert_eq!(format_currency(125_000.0, "INR"), "₹1,25,000.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calendar;
pub mod error;
pub mod export;
pub mod grading;
pub mod identifiers;
pub mod money;
pub mod stats;
pub mod text;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ExportError, ValidationError};
pub use grading::{calculate_percentage, generate_grade, LetterGrade};
pub use money::{format_currency, Currency, Money, DEFAULT_CURRENCY};
pub use stats::{AttendancePolicy, AttendanceStats, DashboardStats, FeeProgress, FeeStatus};
pub use types::*;
