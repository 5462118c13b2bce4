//! # Grading Module
//!
//! Percentage, letter grade and standing calculations.
//!
//! ## Grade Scale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Letter Grade Thresholds                            │
//! │                                                                         │
//! │   ≥90  A+   ┐                                                           │
//! │   ≥85  A    ┘ Distinction  ── Good                                      │
//! │   ≥80  A-   ┐                                                           │
//! │   ≥75  B+   ┘ Merit        ── Good                                      │
//! │   ≥70  B    ┐                                                           │
//! │   ≥65  B-   ┘ Credit       ── Fair                                      │
//! │   ≥60  C+   ┐                                                           │
//! │   ≥55  C    ┘ Pass         ── Fair                                      │
//! │   ≥50  C-   ┐                                                           │
//! │   ≥45  D    ┘ Borderline   ── Poor                                      │
//! │   <45  F      Fail         ── Critical                                  │
//! │                                                                         │
//! │  Lower bounds are inclusive and checked top-down (first match wins).   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use eduverse_core::grading::{calculate_percentage, generate_grade, LetterGrade};
//!
//! let pct = calculate_percentage(42.0, 50.0);
//! assert_eq!(pct, 84);
//! assert_eq!(generate_grade(pct as f64), LetterGrade::A);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Percentage
// =============================================================================

/// Returns `value / total` as a whole percentage, rounding halves up.
///
/// A zero total yields `0` rather than an error, and so does any ratio that
/// is not a finite number (NaN marks, infinite totals).
///
/// ## Example
/// ```rust
/// use eduverse_core::grading::calculate_percentage;
///
/// assert_eq!(calculate_percentage(50.0, 200.0), 25);
/// assert_eq!(calculate_percentage(1.0, 3.0), 33);
/// assert_eq!(calculate_percentage(7.0, 0.0), 0);
/// ```
pub fn calculate_percentage(value: f64, total: f64) -> i64 {
    if total == 0.0 {
        return 0;
    }

    let ratio = value / total * 100.0;
    if !ratio.is_finite() {
        return 0;
    }

    // floor(x + 0.5): halves round towards +∞, including negatives
    (ratio + 0.5).floor() as i64
}

/// Returns the rounded mean of a set of whole percentages, `0` when empty.
///
/// Used by the faculty and student views to average per-course rates.
pub fn average_rate<I>(rates: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    let (sum, count) = rates
        .into_iter()
        .fold((0i64, 0i64), |(sum, count), rate| (sum + rate, count + 1));

    calculate_percentage(sum as f64, (count * 100) as f64)
}

// =============================================================================
// Letter Grade
// =============================================================================

/// The eleven letter grades, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

/// Inclusive lower bound for every passing letter, checked top-down.
const THRESHOLDS: [(f64, LetterGrade); 10] = [
    (90.0, LetterGrade::APlus),
    (85.0, LetterGrade::A),
    (80.0, LetterGrade::AMinus),
    (75.0, LetterGrade::BPlus),
    (70.0, LetterGrade::B),
    (65.0, LetterGrade::BMinus),
    (60.0, LetterGrade::CPlus),
    (55.0, LetterGrade::C),
    (50.0, LetterGrade::CMinus),
    (45.0, LetterGrade::D),
];

impl LetterGrade {
    /// Every letter, best first.
    pub const ALL: [LetterGrade; 11] = [
        LetterGrade::APlus,
        LetterGrade::A,
        LetterGrade::AMinus,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::CMinus,
        LetterGrade::D,
        LetterGrade::F,
    ];

    /// The printed form ("A+", "B-", ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }

    /// Band used for colour-coding the letter.
    pub const fn standing(&self) -> GradeStanding {
        match self {
            LetterGrade::APlus | LetterGrade::A => GradeStanding::Distinction,
            LetterGrade::AMinus | LetterGrade::BPlus => GradeStanding::Merit,
            LetterGrade::B | LetterGrade::BMinus => GradeStanding::Credit,
            LetterGrade::CPlus | LetterGrade::C => GradeStanding::Pass,
            LetterGrade::CMinus | LetterGrade::D => GradeStanding::Borderline,
            LetterGrade::F => GradeStanding::Fail,
        }
    }

    pub const fn is_passing(&self) -> bool {
        !matches!(self, LetterGrade::F)
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterGrade {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LetterGrade::ALL
            .into_iter()
            .find(|grade| grade.as_str() == s.trim())
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "grade".to_string(),
                reason: format!("'{}' is not a letter grade", s),
            })
    }
}

/// Maps a percentage to its letter grade.
///
/// The input is clamped to `[0, 100]` (NaN counts as 0) before the threshold
/// walk, so scores above 100 earn A+ and negative scores earn F.
///
/// ## Example
/// ```rust
/// use eduverse_core::grading::{generate_grade, LetterGrade};
///
/// assert_eq!(generate_grade(90.0), LetterGrade::APlus);
/// assert_eq!(generate_grade(89.0), LetterGrade::A);
/// assert_eq!(generate_grade(44.0), LetterGrade::F);
/// ```
pub fn generate_grade(percentage: f64) -> LetterGrade {
    let percentage = clamp_percentage(percentage);

    THRESHOLDS
        .iter()
        .find(|(floor, _)| percentage >= *floor)
        .map(|(_, grade)| *grade)
        .unwrap_or(LetterGrade::F)
}

/// Clamps a percentage into `[0, 100]`, mapping NaN to 0.
pub fn clamp_percentage(percentage: f64) -> f64 {
    if percentage.is_nan() {
        return 0.0;
    }
    percentage.clamp(0.0, 100.0)
}

// =============================================================================
// Standings & Severity
// =============================================================================

/// Four-level severity shared by grade and attendance colour-coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Good,
    Fair,
    Poor,
    Critical,
}

/// Colour band of a letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum GradeStanding {
    /// A+ and A.
    Distinction,
    /// A- and B+.
    Merit,
    /// B and B-.
    Credit,
    /// C+ and C.
    Pass,
    /// C- and D.
    Borderline,
    /// F.
    Fail,
}

impl GradeStanding {
    pub const fn severity(&self) -> Severity {
        match self {
            GradeStanding::Distinction | GradeStanding::Merit => Severity::Good,
            GradeStanding::Credit | GradeStanding::Pass => Severity::Fair,
            GradeStanding::Borderline => Severity::Poor,
            GradeStanding::Fail => Severity::Critical,
        }
    }

    /// Text colour class the dashboards render the grade with.
    pub const fn text_class(&self) -> &'static str {
        match self {
            GradeStanding::Distinction => "text-green-600",
            GradeStanding::Merit => "text-green-500",
            GradeStanding::Credit => "text-yellow-500",
            GradeStanding::Pass => "text-orange-500",
            GradeStanding::Borderline => "text-red-500",
            GradeStanding::Fail => "text-red-600",
        }
    }
}

/// Class used for grade strings that are not one of the eleven letters.
pub const UNKNOWN_GRADE_CLASS: &str = "text-gray-500";

/// Text colour class for a grade as stored on a record.
///
/// Unrecognised strings (including the empty "not graded yet" value) fall
/// back to [`UNKNOWN_GRADE_CLASS`].
pub fn grade_text_class(grade: &str) -> &'static str {
    grade
        .parse::<LetterGrade>()
        .map(|letter| letter.standing().text_class())
        .unwrap_or(UNKNOWN_GRADE_CLASS)
}

/// Attendance band: ≥90 excellent, ≥75 acceptable, ≥60 marginal, else critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStanding {
    Excellent,
    Acceptable,
    Marginal,
    Critical,
}

impl AttendanceStanding {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            AttendanceStanding::Excellent
        } else if percentage >= 75.0 {
            AttendanceStanding::Acceptable
        } else if percentage >= 60.0 {
            AttendanceStanding::Marginal
        } else {
            AttendanceStanding::Critical
        }
    }

    pub const fn severity(&self) -> Severity {
        match self {
            AttendanceStanding::Excellent => Severity::Good,
            AttendanceStanding::Acceptable => Severity::Fair,
            AttendanceStanding::Marginal => Severity::Poor,
            AttendanceStanding::Critical => Severity::Critical,
        }
    }

    pub const fn text_class(&self) -> &'static str {
        match self {
            AttendanceStanding::Excellent => "text-green-600",
            AttendanceStanding::Acceptable => "text-yellow-600",
            AttendanceStanding::Marginal => "text-orange-600",
            AttendanceStanding::Critical => "text-red-600",
        }
    }
}

/// Text colour class for an attendance percentage.
pub fn attendance_text_class(percentage: f64) -> &'static str {
    AttendanceStanding::from_percentage(percentage).text_class()
}

// =============================================================================
// Unit Tests
// =============================================================================
