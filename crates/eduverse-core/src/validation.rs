//! # Validation Module
//!
//! Input validation utilities for EduVerse.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form fields                                                  │
//! │  ├── validate_email / validate_phone → bool                            │
//! │  └── Immediate feedback, never an error                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Entity checks (THIS MODULE)                                  │
//! │  ├── validate_course, validate_grade_marks, ...                        │
//! │  └── Typed ValidationError naming the field                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Repository                                                   │
//! │  ├── ensure_unique_domain / ensure_unique_course_code                  │
//! │  └── One attendance record per student, course and day                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use eduverse_core::validation::{validate_email, validate_phone};
//!
//! assert!(validate_email("principal@school.edu"));
//! assert!(validate_phone("+91 98765 43210"));
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{
    Announcement, Course, FeeStructure, Grade, Institution, Payment, RoleProfile, User,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted display name for people, institutions and courses.
pub const MAX_NAME_LENGTH: usize = 200;

/// Longest accepted course code.
pub const MAX_COURSE_CODE_LENGTH: usize = 20;

/// Most digits a phone number may carry (E.164 allows 15, plus one spare).
pub const MAX_PHONE_DIGITS: usize = 16;

// =============================================================================
// Field Predicates
// =============================================================================

/// Checks the `local@domain.tld` shape of an email address.
///
/// ## Rules
/// - No whitespace anywhere
/// - Exactly one `@`, with text on both sides
/// - The domain contains a dot with text before and after it
///
/// This is a syntax check only; it says nothing about deliverability.
///
/// ## Example
/// ```rust
/// use eduverse_core::validation::validate_email;
///
/// assert!(validate_email("a@b.com"));
/// assert!(!validate_email("not-an-email"));
/// assert!(!validate_email("a@b"));
/// ```
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Checks a phone number after removing all whitespace.
///
/// ## Rules
/// - Optional leading `+`
/// - First digit 1-9
/// - 1 to 16 ASCII digits in total, nothing else
///
/// ## Example
/// ```rust
/// use eduverse_core::validation::validate_phone;
///
/// assert!(validate_phone("+14155551234"));
/// assert!(validate_phone("123 456 7890"));
/// assert!(!validate_phone("0123"));
/// ```
pub fn validate_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);

    let mut chars = digits.chars();
    if !matches!(chars.next(), Some('1'..='9')) {
        return false;
    }

    digits.len() <= MAX_PHONE_DIGITS && chars.all(|c| c.is_ascii_digit())
}

// =============================================================================
// String Validators
// =============================================================================

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn max_length(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Validates a display name (required, at most 200 characters).
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    require(field, name)?;
    max_length(field, name.trim(), MAX_NAME_LENGTH)
}

/// Validates a tenant domain.
///
/// ## Rules
/// - Must not be empty
/// - Lower-case letters, digits, hyphens and dots only
/// - No leading, trailing or doubled dots
pub fn validate_domain(domain: &str) -> ValidationResult<()> {
    require("domain", domain)?;

    let valid_chars = domain
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.');
    let valid_dots =
        !domain.starts_with('.') && !domain.ends_with('.') && !domain.contains("..");

    if !valid_chars || !valid_dots {
        return Err(ValidationError::InvalidFormat {
            field: "domain".to_string(),
            reason: "must be a lower-case host name like springfield.edu".to_string(),
        });
    }

    Ok(())
}

fn email_field(field: &str, email: &str) -> ValidationResult<()> {
    if !validate_email(email) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must look like name@domain.tld".to_string(),
        });
    }
    Ok(())
}

fn phone_field(field: &str, phone: &str) -> ValidationResult<()> {
    if !validate_phone(phone) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be digits with an optional leading +".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn at_least_one(field: &str, value: u8) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: u8::MAX as i64,
        });
    }
    Ok(())
}

fn positive_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates marks: both non-negative and finite, obtained never above total.
pub fn validate_grade_marks(marks_obtained: f64, total_marks: f64) -> ValidationResult<()> {
    if !total_marks.is_finite() || total_marks < 0.0 {
        return Err(ValidationError::InvalidFormat {
            field: "total_marks".to_string(),
            reason: "must be a non-negative number".to_string(),
        });
    }

    if !marks_obtained.is_finite() || marks_obtained < 0.0 {
        return Err(ValidationError::InvalidFormat {
            field: "marks_obtained".to_string(),
            reason: "must be a non-negative number".to_string(),
        });
    }

    if marks_obtained > total_marks {
        return Err(ValidationError::InvalidFormat {
            field: "marks_obtained".to_string(),
            reason: format!("cannot exceed total marks ({})", total_marks),
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

pub fn validate_institution(institution: &Institution) -> ValidationResult<()> {
    validate_name("name", &institution.name)?;
    validate_domain(&institution.domain)?;
    if let Some(email) = &institution.email {
        email_field("email", email)?;
    }
    if let Some(phone) = &institution.phone {
        phone_field("phone", phone)?;
    }
    Ok(())
}

/// Validates a user and the fields of its role profile.
pub fn validate_user(user: &User) -> ValidationResult<()> {
    validate_name("name", &user.name)?;
    email_field("email", &user.email)?;
    if let Some(phone) = &user.phone {
        phone_field("phone", phone)?;
    }

    match &user.profile {
        RoleProfile::SuperAdmin => {}
        RoleProfile::InstitutionAdmin { institution_id } => {
            require("institution_id", institution_id)?;
        }
        RoleProfile::Faculty {
            institution_id,
            employee_id,
            department,
            ..
        } => {
            require("institution_id", institution_id)?;
            require("employee_id", employee_id)?;
            require("department", department)?;
        }
        RoleProfile::Student {
            institution_id,
            student_id,
            semester,
            ..
        } => {
            require("institution_id", institution_id)?;
            require("student_id", student_id)?;
            at_least_one("semester", *semester)?;
        }
    }

    Ok(())
}

pub fn validate_course(course: &Course) -> ValidationResult<()> {
    require("code", &course.code)?;
    max_length("code", &course.code, MAX_COURSE_CODE_LENGTH)?;
    validate_name("name", &course.name)?;
    at_least_one("credits", course.credits)?;
    at_least_one("semester", course.semester)?;
    require("institution_id", &course.institution_id)?;
    Ok(())
}

pub fn validate_grade(grade: &Grade) -> ValidationResult<()> {
    validate_grade_marks(grade.marks_obtained, grade.total_marks)
}

pub fn validate_fee_structure(fee: &FeeStructure) -> ValidationResult<()> {
    validate_name("name", &fee.name)?;
    positive_amount("fee amount", fee.amount)
}

pub fn validate_payment(payment: &Payment) -> ValidationResult<()> {
    positive_amount("payment amount", payment.amount)?;
    require("fee_structure_id", &payment.fee_structure_id)?;
    require("student_id", &payment.student_id)
}

pub fn validate_announcement(announcement: &Announcement) -> ValidationResult<()> {
    validate_name("title", &announcement.title)?;
    if announcement.target_audience.is_empty() {
        return Err(ValidationError::Required {
            field: "target_audience".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Uniqueness
// =============================================================================

/// Fails when `domain` is already used by another tenant (case-insensitive).
pub fn ensure_unique_domain(existing: &[Institution], domain: &str) -> ValidationResult<()> {
    if existing
        .iter()
        .any(|institution| institution.domain.eq_ignore_ascii_case(domain))
    {
        return Err(ValidationError::Duplicate {
            field: "domain".to_string(),
            value: domain.to_string(),
        });
    }
    Ok(())
}

/// Fails when the course code is taken within the same institution.
pub fn ensure_unique_course_code(existing: &[Course], course: &Course) -> ValidationResult<()> {
    let clash = existing.iter().any(|other| {
        other.id != course.id
            && other.institution_id == course.institution_id
            && other.code.eq_ignore_ascii_case(&course.code)
    });

    if clash {
        return Err(ValidationError::Duplicate {
            field: "course code".to_string(),
            value: course.code.clone(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::*;
    use crate::types::{Audience, InstitutionStatus, PaymentStatus, SubscriptionPlan};

    fn institution(domain: &str) -> Institution {
        Institution {
            id: format!("inst-{}", domain),
            name: "Springfield University".to_string(),
            domain: domain.to_string(),
            logo: None,
            primary_color: "#1d4ed8".to_string(),
            secondary_color: "#f59e0b".to_string(),
            address: None,
            phone: Some("+1 555 123 4567".to_string()),
            email: Some("admin@springfield.edu".to_string()),
            website: None,
            is_active: true,
            status: InstitutionStatus::Active,
            subscription_plan: SubscriptionPlan::Enterprise,
            subscription_ends_at: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn course(id: &str, code: &str, institution_id: &str) -> Course {
        Course {
            id: id.to_string(),
            code: code.to_string(),
            name: "Data Structures & Algorithms".to_string(),
            description: None,
            credits: 4,
            semester: 3,
            department: "Computer Science".to_string(),
            academic_year: "2023-2024".to_string(),
            is_active: true,
            institution_id: institution_id.to_string(),
            instructor_id: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("first.last@dept.school.edu"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("a@b"));
        assert!(!validate_email("@b.com"));
        assert!(!validate_email("a@.com"));
        assert!(!validate_email("a@b."));
        assert!(!validate_email("a b@c.com"));
        assert!(!validate_email("a@@b.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+14155551234"));
        assert!(validate_phone("123 456 7890"));
        assert!(validate_phone("7"));
        assert!(validate_phone("1234567890123456"));
        assert!(!validate_phone("12345678901234567"));
        assert!(!validate_phone("0123"));
        assert!(!validate_phone("+0123"));
        assert!(!validate_phone("+"));
        assert!(!validate_phone(""));
        assert!(!validate_phone("(555) 123-4567"));
        assert!(!validate_phone("12+34"));
    }

    #[test]
    fn test_validate_domain() {
        assert!(validate_domain("springfield.edu").is_ok());
        assert!(validate_domain("").is_err());
        assert!(validate_domain("Springfield.edu").is_err());
        assert!(validate_domain(".edu").is_err());
        assert!(validate_domain("a..edu").is_err());
    }

    #[test]
    fn test_validate_institution() {
        assert!(validate_institution(&institution("springfield.edu")).is_ok());

        let mut bad = institution("springfield.edu");
        bad.email = Some("admin".to_string());
        assert!(matches!(
            validate_institution(&bad),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_user() {
        assert!(validate_user(&student("stu-1", "inst-1")).is_ok());
        assert!(validate_user(&faculty("fac-1", "inst-1")).is_ok());

        let mut user = student("stu-1", "inst-1");
        if let RoleProfile::Student { semester, .. } = &mut user.profile {
            *semester = 0;
        }
        assert!(matches!(
            validate_user(&user),
            Err(ValidationError::OutOfRange { .. })
        ));

        let mut user = student("stu-1", "");
        user.email = "stu@school.edu".to_string();
        assert!(matches!(
            validate_user(&user),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_course() {
        assert!(validate_course(&course("c1", "CS301", "inst-1")).is_ok());

        let mut zero_credit = course("c1", "CS301", "inst-1");
        zero_credit.credits = 0;
        assert!(validate_course(&zero_credit).is_err());

        assert!(validate_course(&course("c1", " ", "inst-1")).is_err());
    }

    #[test]
    fn test_validate_grade_marks() {
        assert!(validate_grade_marks(18.0, 20.0).is_ok());
        assert!(validate_grade_marks(0.0, 0.0).is_ok());
        assert!(validate_grade_marks(21.0, 20.0).is_err());
        assert!(validate_grade_marks(-1.0, 20.0).is_err());
        assert!(validate_grade_marks(f64::NAN, 20.0).is_err());
        assert!(validate_grade(&grade(42.0, 50.0)).is_ok());
    }

    #[test]
    fn test_validate_amounts() {
        let fee = fee("fee-1", 0, date(2024, 2, 15));
        assert!(matches!(
            validate_fee_structure(&fee),
            Err(ValidationError::MustBePositive { .. })
        ));

        assert!(validate_payment(&payment("fee-1", 500, PaymentStatus::Completed)).is_ok());
        assert!(validate_payment(&payment("fee-1", -5, PaymentStatus::Pending)).is_err());
    }

    #[test]
    fn test_validate_announcement() {
        assert!(validate_announcement(&announcement(vec![Audience::All])).is_ok());
        assert!(matches!(
            validate_announcement(&announcement(vec![])),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_unique_domain() {
        let existing = vec![institution("springfield.edu")];
        assert!(ensure_unique_domain(&existing, "riverside.edu").is_ok());
        assert!(matches!(
            ensure_unique_domain(&existing, "SPRINGFIELD.edu"),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_unique_course_code_is_per_institution() {
        let existing = vec![course("c1", "CS301", "inst-1")];
        assert!(ensure_unique_course_code(&existing, &course("c2", "CS301", "inst-2")).is_ok());
        assert!(ensure_unique_course_code(&existing, &course("c1", "CS301", "inst-1")).is_ok());
        assert!(ensure_unique_course_code(&existing, &course("c3", "cs301", "inst-1")).is_err());
    }
}
