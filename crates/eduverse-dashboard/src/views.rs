//! # Dashboard View Models
//!
//! What each role's dashboard shows, as plain serializable records.
//! TypeScript definitions are generated with `ts-rs` so the web views and
//! this crate agree on field names.
//!
//! ```text
//! ┌─────────────────────┬──────────────────────────────────────────────────┐
//! │ SuperAdminDashboard │ tenants, plan mix, monthly recurring revenue     │
//! │ AdminDashboard      │ DashboardStats + per-department counts           │
//! │ FacultyDashboard    │ taught courses, enrolment, attendance            │
//! │ StudentDashboard    │ courses, grades, attendance, fees, inbox         │
//! └─────────────────────┴──────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use eduverse_core::stats::{AttendanceStats, DashboardStats, FeeProgress, GradeSummary};
use eduverse_core::types::{Announcement, Institution, InstitutionStatus, SubscriptionPlan};
use eduverse_core::{LetterGrade, Money};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Super-admin
// =============================================================================

/// Filter for the tenant table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstitutionQuery {
    /// Case-insensitive substring of the name or domain.
    pub search: Option<String>,
    pub status: Option<InstitutionStatus>,
}

impl InstitutionQuery {
    pub fn search(term: impl Into<String>) -> Self {
        InstitutionQuery {
            search: Some(term.into()),
            status: None,
        }
    }

    pub fn with_status(mut self, status: InstitutionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, institution: &Institution) -> bool {
        self.matches_fields(&institution.name, &institution.domain, institution.status)
    }

    pub fn matches_row(&self, row: &InstitutionRow) -> bool {
        self.matches_fields(&row.name, &row.domain, row.status)
    }

    fn matches_fields(&self, name: &str, domain: &str, status: InstitutionStatus) -> bool {
        let status_ok = self.status.map_or(true, |s| s == status);

        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                name.to_lowercase().contains(&term) || domain.to_lowercase().contains(&term)
            }
        };

        status_ok && search_ok
    }
}

/// One row of the tenant table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstitutionRow {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub plan: SubscriptionPlan,
    pub status: InstitutionStatus,
    pub users: usize,
    pub students: usize,
    /// Plan list price; `None` for ENTERPRISE.
    pub monthly_price: Option<Money>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlanCount {
    pub plan: SubscriptionPlan,
    pub institutions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SuperAdminDashboard {
    pub total_institutions: usize,
    pub active_institutions: usize,
    pub total_users: usize,
    pub total_students: usize,
    /// Sum of list prices of ACTIVE tenants on priced plans.
    pub monthly_recurring_revenue: Money,
    /// `monthly_recurring_revenue` in the configured currency.
    pub monthly_recurring_revenue_display: String,
    /// One entry per plan, ENTERPRISE first.
    pub plans: Vec<PlanCount>,
    /// Tenants matching the query, by name.
    pub institutions: Vec<InstitutionRow>,
}

// =============================================================================
// Institution admin
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DepartmentSummary {
    pub department: String,
    pub students: usize,
    pub faculty: usize,
    pub courses: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdminDashboard {
    pub institution_id: String,
    pub institution_name: String,
    pub stats: DashboardStats,
    pub total_revenue_display: String,
    pub pending_fees_display: String,
    /// Departments by name.
    pub departments: Vec<DepartmentSummary>,
}

// =============================================================================
// Faculty
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaughtCourse {
    pub course_id: String,
    pub code: String,
    pub name: String,
    pub credits: u8,
    /// ACTIVE enrolments.
    pub enrolled: usize,
    pub attendance: AttendanceStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FacultyDashboard {
    pub faculty_id: String,
    pub name: String,
    pub department: String,
    pub courses: Vec<TaughtCourse>,
    /// Distinct students across all taught courses.
    pub total_students: usize,
    /// Mean of the course rates, counting only courses with attendance taken.
    pub average_attendance: i64,
}

// =============================================================================
// Student
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StudentCourse {
    pub course_id: String,
    pub code: String,
    pub name: String,
    pub credits: u8,
    pub instructor: Option<String>,
    pub attendance: AttendanceStats,
    pub grade: GradeSummary,
}

/// Fee balances formatted in the configured currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeeAmounts {
    pub total: String,
    pub paid: String,
    pub pending: String,
}

impl FeeAmounts {
    pub fn new(fees: &FeeProgress, currency: &str) -> Self {
        FeeAmounts {
            total: fees.total.format_code(currency),
            paid: fees.paid.format_code(currency),
            pending: fees.pending.format_code(currency),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StudentDashboard {
    pub student_id: String,
    pub name: String,
    pub roll_number: String,
    pub semester: u8,
    pub courses: Vec<StudentCourse>,
    pub total_credits: u32,
    /// Pooled over the attendance marks of the listed courses.
    pub overall_attendance: i64,
    /// Pooled over the assessments of the listed courses.
    pub overall_grade: LetterGrade,
    pub fees: FeeProgress,
    pub fee_amounts: FeeAmounts,
    /// Newest first.
    pub announcements: Vec<Announcement>,
    pub unread_notifications: usize,
    #[ts(as = "String")]
    pub as_of: NaiveDate,
}
