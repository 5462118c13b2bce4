//! # Domain Types
//!
//! Core domain types used throughout EduVerse.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  Institution    │   │      User       │   │     Course      │       │
//! │  │  (tenant)       │◄──│  RoleProfile    │   │  code, credits  │       │
//! │  │  domain, plan   │   │  (tagged union) │   │  semester       │       │
//! │  └─────────────────┘   └────────┬────────┘   └────────┬────────┘       │
//! │                                 │                     │                 │
//! │            ┌────────────────────┼─────────────────────┤                 │
//! │            ▼                    ▼                     ▼                 │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Enrollment    │   │ AttendanceRecord│   │      Grade      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  FeeStructure   │◄──│     Payment     │   │  Announcement   │       │
//! │  └─────────────────┘   └─────────────────┘   │  Notification   │       │
//! │                                               └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Role-Specific Fields
//! A user's role and the fields that only make sense for that role travel
//! together in [`RoleProfile`]. A student record cannot carry an employee id,
//! and only a super-admin has no institution.
//!
//! Enumerations serialize with the upper-case spellings the dashboards use
//! (`"STUDENT"`, `"BANK_TRANSFER"`, ...).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::grading::{calculate_percentage, generate_grade, LetterGrade};
use crate::money::Money;

/// Generates a fresh entity id (UUID v4).
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Institution
// =============================================================================

/// Subscription tier of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionPlan {
    Basic,
    Pro,
    Enterprise,
}

impl SubscriptionPlan {
    pub const ALL: [SubscriptionPlan; 3] = [
        SubscriptionPlan::Basic,
        SubscriptionPlan::Pro,
        SubscriptionPlan::Enterprise,
    ];

    /// List price per month. Enterprise contracts are negotiated, so `None`.
    pub const fn monthly_price(&self) -> Option<Money> {
        match self {
            SubscriptionPlan::Basic => Some(Money::from_rupees(999)),
            SubscriptionPlan::Pro => Some(Money::from_rupees(2_999)),
            SubscriptionPlan::Enterprise => None,
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionPlan::Basic => write!(f, "BASIC"),
            SubscriptionPlan::Pro => write!(f, "PRO"),
            SubscriptionPlan::Enterprise => write!(f, "ENTERPRISE"),
        }
    }
}

/// Lifecycle state of a tenant account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstitutionStatus {
    #[default]
    Active,
    Trial,
    Suspended,
}

/// A subscribing school or university (one tenant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Institution {
    pub id: String,
    pub name: String,
    /// Tenant domain, unique across the platform.
    pub domain: String,
    pub logo: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub status: InstitutionStatus,
    pub subscription_plan: SubscriptionPlan,
    #[ts(as = "Option<String>")]
    pub subscription_ends_at: Option<NaiveDate>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// User
// =============================================================================

/// The four account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    InstitutionAdmin,
    Faculty,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::SuperAdmin => write!(f, "SUPER_ADMIN"),
            Role::InstitutionAdmin => write!(f, "INSTITUTION_ADMIN"),
            Role::Faculty => write!(f, "FACULTY"),
            Role::Student => write!(f, "STUDENT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Role plus the fields that belong to that role only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleProfile {
    /// Platform operator; not bound to any tenant.
    SuperAdmin,
    InstitutionAdmin {
        institution_id: String,
    },
    Faculty {
        institution_id: String,
        employee_id: String,
        department: String,
        designation: String,
    },
    Student {
        institution_id: String,
        student_id: String,
        semester: u8,
        batch: String,
        department: Option<String>,
    },
}

impl RoleProfile {
    pub const fn role(&self) -> Role {
        match self {
            RoleProfile::SuperAdmin => Role::SuperAdmin,
            RoleProfile::InstitutionAdmin { .. } => Role::InstitutionAdmin,
            RoleProfile::Faculty { .. } => Role::Faculty,
            RoleProfile::Student { .. } => Role::Student,
        }
    }

    pub fn institution_id(&self) -> Option<&str> {
        match self {
            RoleProfile::SuperAdmin => None,
            RoleProfile::InstitutionAdmin { institution_id }
            | RoleProfile::Faculty { institution_id, .. }
            | RoleProfile::Student { institution_id, .. } => Some(institution_id),
        }
    }
}

/// An account on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[ts(as = "Option<String>")]
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub is_active: bool,
    pub profile: RoleProfile,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    #[inline]
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    #[inline]
    pub fn institution_id(&self) -> Option<&str> {
        self.profile.institution_id()
    }

    /// Department of a faculty member or student, if recorded.
    pub fn department(&self) -> Option<&str> {
        match &self.profile {
            RoleProfile::Faculty { department, .. } => Some(department),
            RoleProfile::Student { department, .. } => department.as_deref(),
            RoleProfile::SuperAdmin | RoleProfile::InstitutionAdmin { .. } => None,
        }
    }

    /// Current semester of a student.
    pub fn semester(&self) -> Option<u8> {
        match &self.profile {
            RoleProfile::Student { semester, .. } => Some(*semester),
            _ => None,
        }
    }

    /// Batch label of a student ("2023-2027").
    pub fn batch(&self) -> Option<&str> {
        match &self.profile {
            RoleProfile::Student { batch, .. } => Some(batch),
            _ => None,
        }
    }
}

// =============================================================================
// Course & Enrollment
// =============================================================================

/// A course offered by one institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Course {
    pub id: String,
    /// Catalogue code, unique within the institution ("CS301").
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: u8,
    pub semester: u8,
    pub department: String,
    pub academic_year: String,
    pub is_active: bool,
    pub institution_id: String,
    pub instructor_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    #[default]
    Active,
    Completed,
    Dropped,
}

/// Links one student to one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Enrollment {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    #[ts(as = "String")]
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
}

// =============================================================================
// Attendance
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

/// One student's attendance in one course on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AttendanceRecord {
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub student_id: String,
    pub course_id: String,
    #[ts(as = "String")]
    pub marked_at: DateTime<Utc>,
    pub marked_by: Option<String>,
}

// =============================================================================
// Grade
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamType {
    Quiz,
    Assignment,
    Midterm,
    Final,
    Project,
}

/// Marks for one assessment. The letter is always derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Grade {
    pub id: String,
    pub exam_type: ExamType,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub student_id: String,
    pub course_id: String,
    #[ts(as = "String")]
    pub exam_date: NaiveDate,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Grade {
    /// Whole percentage of the marks, `0` when total marks are zero.
    #[inline]
    pub fn percentage(&self) -> i64 {
        calculate_percentage(self.marks_obtained, self.total_marks)
    }

    #[inline]
    pub fn letter(&self) -> LetterGrade {
        generate_grade(self.percentage() as f64)
    }
}

// =============================================================================
// Fees & Payments
// =============================================================================

/// A fee an institution charges (tuition, hostel, lab...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeeStructure {
    pub id: String,
    pub name: String,
    pub amount: Money,
    #[ts(as = "String")]
    pub due_date: NaiveDate,
    pub description: Option<String>,
    pub is_recurring: bool,
    /// Restricts the fee to one semester; `None` applies to all.
    pub semester: Option<u8>,
    /// Restricts the fee to one batch; `None` applies to all.
    pub batch: Option<String>,
    pub institution_id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl FeeStructure {
    /// Whether this fee is charged to the given student.
    pub fn applies_to(&self, student: &User) -> bool {
        let RoleProfile::Student {
            institution_id,
            semester,
            batch,
            ..
        } = &student.profile
        else {
            return false;
        };

        institution_id == &self.institution_id
            && self.semester.map_or(true, |s| s == *semester)
            && self.batch.as_deref().map_or(true, |b| b == batch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Online,
    Upi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// A student's payment towards one fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Payment {
    pub id: String,
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub student_id: String,
    pub fee_structure_id: String,
    pub institution_id: String,
    #[ts(as = "Option<String>")]
    pub paid_at: Option<DateTime<Utc>>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Only settled payments reduce a balance or count as revenue.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}

// =============================================================================
// Announcements & Notifications
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Audience {
    All,
    Students,
    Faculty,
    Admins,
}

impl Audience {
    pub const fn includes(&self, role: Role) -> bool {
        match self {
            Audience::All => true,
            Audience::Students => matches!(role, Role::Student),
            Audience::Faculty => matches!(role, Role::Faculty),
            Audience::Admins => matches!(role, Role::InstitutionAdmin | Role::SuperAdmin),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub is_urgent: bool,
    /// Never empty.
    pub target_audience: Vec<Audience>,
    pub semester: Option<u8>,
    pub batch: Option<String>,
    pub department: Option<String>,
    pub institution_id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Announcement {
    /// Whether the announcement targets this user.
    ///
    /// Semester, batch and department narrow the audience further when set;
    /// they only apply to users that carry the matching field.
    pub fn is_visible_to(&self, user: &User) -> bool {
        let same_tenant = user.institution_id() == Some(self.institution_id.as_str());
        if user.role() != Role::SuperAdmin && !same_tenant {
            return false;
        }

        let role = user.role();
        if !self.target_audience.iter().any(|a| a.includes(role)) {
            return false;
        }

        let semester_ok = match (self.semester, user.semester()) {
            (Some(wanted), Some(actual)) => wanted == actual,
            _ => true,
        };
        let batch_ok = match (self.batch.as_deref(), user.batch()) {
            (Some(wanted), Some(actual)) => wanted == actual,
            _ => true,
        };
        let department_ok = match (self.department.as_deref(), user.department()) {
            (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual),
            _ => true,
        };

        semester_ok && batch_ok && department_ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Announcement,
    GradeUpdated,
    AttendanceMarked,
    FeeDue,
    AssignmentDue,
    General,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub is_read: bool,
    pub sent_by_id: String,
    pub user_id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Test Fixtures
// =============================================================================

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn student(id: &str, institution_id: &str) -> User {
        User {
            id: id.to_string(),
            email: format!("{}@school.edu", id),
            name: "John Doe".to_string(),
            avatar: None,
            phone: None,
            address: None,
            date_of_birth: Some(date(2004, 5, 20)),
            gender: Some(Gender::Male),
            is_active: true,
            profile: RoleProfile::Student {
                institution_id: institution_id.to_string(),
                student_id: "ST20240001".to_string(),
                semester: 3,
                batch: "2023-2027".to_string(),
                department: Some("Computer Science".to_string()),
            },
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    pub fn faculty(id: &str, institution_id: &str) -> User {
        User {
            id: id.to_string(),
            email: format!("{}@school.edu", id),
            name: "Sarah Johnson".to_string(),
            avatar: None,
            phone: Some("+14155551234".to_string()),
            address: None,
            date_of_birth: None,
            gender: Some(Gender::Female),
            is_active: true,
            profile: RoleProfile::Faculty {
                institution_id: institution_id.to_string(),
                employee_id: "SPUCOM001".to_string(),
                department: "Computer Science".to_string(),
                designation: "Associate Professor".to_string(),
            },
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    pub fn attendance(student_id: &str, day: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: format!("att-{}-{}", student_id, day),
            date: date(2024, 1, day),
            status,
            student_id: student_id.to_string(),
            course_id: "course-1".to_string(),
            marked_at: timestamp(),
            marked_by: None,
        }
    }

    pub fn grade(marks: f64, total: f64) -> Grade {
        Grade {
            id: new_entity_id(),
            exam_type: ExamType::Quiz,
            marks_obtained: marks,
            total_marks: total,
            student_id: "stu-1".to_string(),
            course_id: "course-1".to_string(),
            exam_date: date(2024, 1, 10),
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    pub fn fee(id: &str, rupees: i64, due: NaiveDate) -> FeeStructure {
        FeeStructure {
            id: id.to_string(),
            name: "Tuition".to_string(),
            amount: Money::from_rupees(rupees),
            due_date: due,
            description: None,
            is_recurring: true,
            semester: None,
            batch: None,
            institution_id: "inst-1".to_string(),
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    pub fn payment(fee_id: &str, rupees: i64, status: PaymentStatus) -> Payment {
        Payment {
            id: new_entity_id(),
            amount: Money::from_rupees(rupees),
            payment_method: PaymentMethod::Upi,
            status,
            transaction_id: None,
            student_id: "stu-1".to_string(),
            fee_structure_id: fee_id.to_string(),
            institution_id: "inst-1".to_string(),
            paid_at: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    pub fn announcement(audience: Vec<Audience>) -> Announcement {
        Announcement {
            id: new_entity_id(),
            title: "Mid-Semester Examinations".to_string(),
            content: "Exams run February 20-28.".to_string(),
            is_urgent: true,
            target_audience: audience,
            semester: None,
            batch: None,
            department: None,
            institution_id: "inst-1".to_string(),
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
