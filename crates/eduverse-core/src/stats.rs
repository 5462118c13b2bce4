//! # Aggregation
//!
//! Folds entity lists into the figures the dashboards display.
//!
//! ```text
//!   AttendanceRecord[] ──► attendance_stats ──► AttendanceStats { ..., percentage }
//!   Grade[]            ──► grade_summary    ──► GradeSummary    { average, letter }
//!   FeeStructure[] ┐
//!   Payment[]      ┴───► fee_progress     ──► FeeProgress     { paid, pending, status }
//! ```
//!
//! Callers pick the records (one student, one course, one tenant); these
//! functions only count. Every function accepts an empty slice.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::grading::{calculate_percentage, generate_grade, LetterGrade};
use crate::money::Money;
use crate::types::{AttendanceRecord, AttendanceStatus, FeeStructure, Grade, Payment};

// =============================================================================
// Attendance
// =============================================================================

/// How LATE and EXCUSED marks count towards the attendance rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AttendancePolicy {
    /// LATE counts as attended.
    pub late_counts_as_present: bool,
    /// EXCUSED is left out of the denominator instead of counting as absent.
    pub exclude_excused: bool,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            late_counts_as_present: true,
            exclude_excused: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AttendanceStats {
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub excused: u32,
    pub total: u32,
    /// Whole percentage attended, `0` when nothing counts.
    pub percentage: i64,
}

/// Counts attendance marks and derives the attendance rate under `policy`.
///
/// ## Example
/// ```rust
/// use eduverse_core::stats::{attendance_stats, AttendancePolicy};
///
/// let stats = attendance_stats(&[], &AttendancePolicy::default());
/// assert_eq!(stats.total, 0);
/// assert_eq!(stats.percentage, 0);
/// ```
pub fn attendance_stats(
    records: &[AttendanceRecord],
    policy: &AttendancePolicy,
) -> AttendanceStats {
    let mut stats = records
        .iter()
        .fold(AttendanceStats::default(), |mut stats, record| {
            match record.status {
                AttendanceStatus::Present => stats.present += 1,
                AttendanceStatus::Absent => stats.absent += 1,
                AttendanceStatus::Late => stats.late += 1,
                AttendanceStatus::Excused => stats.excused += 1,
            }
            stats.total += 1;
            stats
        });

    let attended = stats.present + if policy.late_counts_as_present { stats.late } else { 0 };
    let counted = stats.total - if policy.exclude_excused { stats.excused } else { 0 };

    stats.percentage = calculate_percentage(attended as f64, counted as f64);
    stats
}

// =============================================================================
// Grades
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GradeSummary {
    pub assessments: usize,
    /// Total marks obtained over total marks available.
    pub average_percentage: i64,
    pub letter: LetterGrade,
}

/// Aggregates a set of assessments into one percentage and letter.
///
/// Marks are pooled, so a 100-mark final weighs more than a 10-mark quiz.
/// No assessments gives `0` and `F`.
pub fn grade_summary(grades: &[Grade]) -> GradeSummary {
    let (obtained, available) = grades.iter().fold((0.0, 0.0), |(obtained, available), g| {
        (obtained + g.marks_obtained, available + g.total_marks)
    });

    let average_percentage = calculate_percentage(obtained, available);

    GradeSummary {
        assessments: grades.len(),
        average_percentage,
        letter: generate_grade(average_percentage as f64),
    }
}

// =============================================================================
// Fees
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeStatus {
    Paid,
    Partial,
    Unpaid,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeeProgress {
    pub total: Money,
    pub paid: Money,
    pub pending: Money,
    pub percentage: i64,
    pub status: FeeStatus,
    /// Earliest due date, on or after `as_of`, of a fee not yet settled.
    #[ts(as = "Option<String>")]
    pub next_due_date: Option<NaiveDate>,
}

/// Balances fees against payments as of a given day.
///
/// Only COMPLETED payments count, each towards the fee it references.
/// Overpaying one fee never covers another.
///
/// ## Status
/// ```text
///   pending == 0                          → PAID
///   an unsettled fee is past its due date → OVERDUE
///   something paid                        → PARTIAL
///   otherwise                             → UNPAID
/// ```
pub fn fee_progress(fees: &[FeeStructure], payments: &[Payment], as_of: NaiveDate) -> FeeProgress {
    let mut paid_per_fee: HashMap<&str, Money> = HashMap::new();
    for payment in payments.iter().filter(|p| p.is_settled()) {
        *paid_per_fee
            .entry(payment.fee_structure_id.as_str())
            .or_default() += payment.amount;
    }

    let mut total = Money::zero();
    let mut paid = Money::zero();
    let mut overdue = false;
    let mut next_due_date: Option<NaiveDate> = None;

    for fee in fees {
        let received = paid_per_fee
            .get(fee.id.as_str())
            .copied()
            .unwrap_or_default();
        let covered = received.min(fee.amount);

        total += fee.amount;
        paid += covered;

        if covered < fee.amount {
            if fee.due_date < as_of {
                overdue = true;
            } else if next_due_date.map_or(true, |next| fee.due_date < next) {
                next_due_date = Some(fee.due_date);
            }
        }
    }

    let pending = total.saturating_sub_to_zero(paid);
    let status = if pending.is_zero() {
        FeeStatus::Paid
    } else if overdue {
        FeeStatus::Overdue
    } else if paid.is_positive() {
        FeeStatus::Partial
    } else {
        FeeStatus::Unpaid
    };

    FeeProgress {
        total,
        paid,
        pending,
        percentage: paid.percentage_of(total),
        status,
        next_due_date,
    }
}

// =============================================================================
// Institution Overview
// =============================================================================

/// Headline figures of the institution-admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardStats {
    pub total_students: usize,
    pub total_faculty: usize,
    pub total_courses: usize,
    /// Sum of settled payments.
    pub total_revenue: Money,
    pub attendance_rate: i64,
    /// Outstanding balance across all students.
    pub pending_fees: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
