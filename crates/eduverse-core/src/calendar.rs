//! # Academic Calendar
//!
//! Maps dates onto the institution calendar.
//!
//! ```text
//!   Jul Aug Sep Oct Nov Dec │ Jan Feb Mar Apr May Jun
//!   ─────── semester 1 ──── │ ────── semester 2 ─────
//!   ───────────── academic year 2024-2025 ───────────
//! ```
//!
//! The two-semester split is a placeholder policy. Institutions with
//! trimesters or quarters need a real term table.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Month (1-12) on which a new academic year begins.
pub const ACADEMIC_YEAR_START_MONTH: u32 = 7;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// =============================================================================
// Academic Year
// =============================================================================

/// An academic year, identified by the calendar year it starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AcademicYear {
    pub start_year: i32,
}

impl AcademicYear {
    pub const fn end_year(&self) -> i32 {
        self.start_year + 1
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_year, self.end_year())
    }
}

/// Resolves the academic year a date falls in (July–June).
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use eduverse_core::calendar::academic_year;
///
/// let july = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// assert_eq!(academic_year(july).to_string(), "2024-2025");
///
/// let january = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// assert_eq!(academic_year(january).to_string(), "2023-2024");
/// ```
pub fn academic_year(date: NaiveDate) -> AcademicYear {
    let start_year = if date.month() >= ACADEMIC_YEAR_START_MONTH {
        date.year()
    } else {
        date.year() - 1
    };
    AcademicYear { start_year }
}

/// Semester number for a date: 1 from July, 2 from January.
pub fn semester_from_date(date: NaiveDate) -> u8 {
    if date.month() >= ACADEMIC_YEAR_START_MONTH {
        1
    } else {
        2
    }
}

// =============================================================================
// Month Utilities
// =============================================================================

/// Number of days in a month.
///
/// Months outside 1-12 roll over into neighbouring years the way a calendar
/// does: month 0 is December of the previous year, month 13 is January of
/// the next. Dates beyond what `chrono` can represent give `0`.
pub fn days_in_month(year: i32, month: i32) -> u32 {
    // i64 holds every i32 year and month shift without overflow
    let zero_based = i64::from(month) - 1;
    let year = i64::from(year) + zero_based.div_euclid(12);
    let month = (zero_based.rem_euclid(12) + 1) as u32;

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    let Ok(next_year) = i32::try_from(next_year) else {
        return 0;
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// English month name for 1-12, empty string otherwise.
pub fn month_name(month: i32) -> &'static str {
    usize::try_from(i64::from(month) - 1)
        .ok()
        .and_then(|index| MONTH_NAMES.get(index))
        .copied()
        .unwrap_or("")
}

// =============================================================================
// Age
// =============================================================================

/// Whole years between a birth date and `on`, counting a birthday only once
/// it has been reached.
pub fn age_on(date_of_birth: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - date_of_birth.year();
    if (on.month(), on.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Age today (UTC calendar date).
pub fn calculate_age(date_of_birth: NaiveDate) -> i32 {
    age_on(date_of_birth, Utc::now().date_naive())
}

// =============================================================================
// Display Formats
// =============================================================================

/// Short date as shown on the dashboards: "Jan 15, 2024".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Short date and time: "Jan 15, 2024, 10:00 AM".
pub fn format_date_time(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}
