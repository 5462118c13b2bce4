//! # Campus Snapshot
//!
//! The complete entity set of the platform as one serialisable value.
//!
//! ## File Format
//! ```text
//! {
//!   "institutions":   [ ... ],
//!   "users":          [ ... ],     ← profile carries "role"
//!   "courses":        [ ... ],
//!   "enrollments":    [ ... ],
//!   "attendance":     [ ... ],
//!   "grades":         [ ... ],
//!   "fee_structures": [ ... ],
//!   "payments":       [ ... ],
//!   "announcements":  [ ... ],
//!   "notifications":  [ ... ]
//! }
//! ```
//! Missing arrays load as empty.
//!
//! ## Integrity
//! Every insert goes through the same checks, whether it comes from a file
//! or from the repository API:
//!
//! ```text
//!   record ──► eduverse-core validator ──► id unused ──► references exist
//!                                                            │
//!                                                            ▼
//!                         unique keys respected ◄── roles and tenants match
//!                                  │
//!                                  ▼
//!                               stored
//! ```
//! Enrollments, attendance, grades and payments must name a STUDENT of the
//! course's (or fee's) institution, and a course instructor must be FACULTY
//! of the course's institution.
//! A loaded file is replayed insert by insert, so a file that breaks an
//! invariant is rejected as a whole.

use std::path::Path;

use eduverse_core::types::{
    Announcement, AttendanceRecord, Course, Enrollment, FeeStructure, Grade, Institution,
    Notification, Payment, Role, User,
};
use eduverse_core::validation::{
    ensure_unique_course_code, ensure_unique_domain, validate_announcement, validate_course,
    validate_fee_structure, validate_grade, validate_institution, validate_payment, validate_user,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{from_validation, DataError, DataResult};

/// Entity collections of the whole platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub institutions: Vec<Institution>,
    pub users: Vec<User>,
    pub courses: Vec<Course>,
    pub enrollments: Vec<Enrollment>,
    pub attendance: Vec<AttendanceRecord>,
    pub grades: Vec<Grade>,
    pub fee_structures: Vec<FeeStructure>,
    pub payments: Vec<Payment>,
    pub announcements: Vec<Announcement>,
    pub notifications: Vec<Notification>,
}

/// Entity name and primary key, for uniqueness and reference checks.
trait Keyed {
    const ENTITY: &'static str;
    fn key(&self) -> &str;
}

macro_rules! keyed {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Keyed for $ty {
                const ENTITY: &'static str = $name;
                fn key(&self) -> &str {
                    &self.id
                }
            }
        )*
    };
}

keyed! {
    Institution => "Institution",
    User => "User",
    Course => "Course",
    Enrollment => "Enrollment",
    AttendanceRecord => "AttendanceRecord",
    Grade => "Grade",
    FeeStructure => "FeeStructure",
    Payment => "Payment",
    Announcement => "Announcement",
    Notification => "Notification",
}

fn ensure_new_id<T: Keyed>(existing: &[T], id: &str) -> DataResult<()> {
    if existing.iter().any(|item| item.key() == id) {
        return Err(DataError::duplicate(format!("{} id", T::ENTITY), id));
    }
    Ok(())
}

fn find_existing<'a, T: Keyed>(existing: &'a [T], id: &str) -> DataResult<&'a T> {
    existing
        .iter()
        .find(|item| item.key() == id)
        .ok_or_else(|| DataError::missing_reference(T::ENTITY, id))
}

fn ensure_exists<T: Keyed>(existing: &[T], id: &str) -> DataResult<()> {
    find_existing(existing, id).map(|_| ())
}

/// The referenced user must exist and hold `role`.
fn find_user_with_role<'a>(users: &'a [User], id: &str, role: Role) -> DataResult<&'a User> {
    let user = find_existing(users, id)?;
    if user.role() != role {
        return Err(DataError::wrong_role(id, role, user.role()));
    }
    Ok(user)
}

/// `user` must belong to `institution_id`, the tenant owning `entity`.
fn ensure_same_tenant(user: &User, entity: &str, institution_id: &str) -> DataResult<()> {
    if user.institution_id() == Some(institution_id) {
        Ok(())
    } else {
        Err(DataError::cross_tenant(&user.id, entity, institution_id))
    }
}

impl Snapshot {
    // =========================================================================
    // File I/O
    // =========================================================================

    /// Parses snapshot JSON and checks every invariant.
    pub fn from_json(json: &str) -> DataResult<Self> {
        let raw: Snapshot = serde_json::from_str(json)?;
        raw.verified()
    }

    pub fn to_json_pretty(&self) -> DataResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads and verifies a snapshot file.
    pub fn load(path: &Path) -> DataResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&contents)?;
        info!(
            path = %path.display(),
            institutions = snapshot.institutions.len(),
            users = snapshot.users.len(),
            "Loaded campus snapshot"
        );
        Ok(snapshot)
    }

    /// Writes the snapshot as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> DataResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        info!(path = %path.display(), "Saved campus snapshot");
        Ok(())
    }

    /// Rebuilds the snapshot insert by insert, failing on the first record
    /// that breaks an invariant.
    pub fn verified(self) -> DataResult<Self> {
        let mut checked = Snapshot::default();

        for item in self.institutions {
            checked.insert_institution(item)?;
        }
        for item in self.users {
            checked.insert_user(item)?;
        }
        for item in self.courses {
            checked.insert_course(item)?;
        }
        for item in self.enrollments {
            checked.insert_enrollment(item)?;
        }
        for item in self.attendance {
            checked.insert_attendance(item)?;
        }
        for item in self.grades {
            checked.insert_grade(item)?;
        }
        for item in self.fee_structures {
            checked.insert_fee_structure(item)?;
        }
        for item in self.payments {
            checked.insert_payment(item)?;
        }
        for item in self.announcements {
            checked.insert_announcement(item)?;
        }
        for item in self.notifications {
            checked.insert_notification(item)?;
        }

        debug!("Snapshot passed integrity checks");
        Ok(checked)
    }

    // =========================================================================
    // Checked Inserts
    // =========================================================================

    pub fn insert_institution(&mut self, institution: Institution) -> DataResult<()> {
        validate_institution(&institution)?;
        ensure_new_id(&self.institutions, &institution.id)?;
        ensure_unique_domain(&self.institutions, &institution.domain).map_err(from_validation)?;

        self.institutions.push(institution);
        Ok(())
    }

    pub fn insert_user(&mut self, user: User) -> DataResult<()> {
        validate_user(&user)?;
        ensure_new_id(&self.users, &user.id)?;

        if self
            .users
            .iter()
            .any(|other| other.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(DataError::duplicate("email", &user.email));
        }
        if let Some(institution_id) = user.institution_id() {
            ensure_exists(&self.institutions, institution_id)?;
        }

        self.users.push(user);
        Ok(())
    }

    pub fn insert_course(&mut self, course: Course) -> DataResult<()> {
        validate_course(&course)?;
        ensure_new_id(&self.courses, &course.id)?;
        ensure_exists(&self.institutions, &course.institution_id)?;
        if let Some(instructor_id) = &course.instructor_id {
            let instructor = find_user_with_role(&self.users, instructor_id, Role::Faculty)?;
            ensure_same_tenant(instructor, &course.id, &course.institution_id)?;
        }
        ensure_unique_course_code(&self.courses, &course).map_err(from_validation)?;

        self.courses.push(course);
        Ok(())
    }

    /// The student's institution must own the course a record points at.
    fn ensure_student_in_course(&self, student_id: &str, course_id: &str) -> DataResult<()> {
        let student = find_user_with_role(&self.users, student_id, Role::Student)?;
        let course = find_existing(&self.courses, course_id)?;
        ensure_same_tenant(student, &course.id, &course.institution_id)
    }

    pub fn insert_enrollment(&mut self, enrollment: Enrollment) -> DataResult<()> {
        ensure_new_id(&self.enrollments, &enrollment.id)?;
        self.ensure_student_in_course(&enrollment.student_id, &enrollment.course_id)?;

        let already = self.enrollments.iter().any(|e| {
            e.student_id == enrollment.student_id && e.course_id == enrollment.course_id
        });
        if already {
            return Err(DataError::duplicate(
                "enrollment",
                format!("{}/{}", enrollment.student_id, enrollment.course_id),
            ));
        }

        self.enrollments.push(enrollment);
        Ok(())
    }

    /// One record per student, course and day.
    pub fn insert_attendance(&mut self, record: AttendanceRecord) -> DataResult<()> {
        ensure_new_id(&self.attendance, &record.id)?;
        self.ensure_student_in_course(&record.student_id, &record.course_id)?;

        let already = self.attendance.iter().any(|r| {
            r.student_id == record.student_id
                && r.course_id == record.course_id
                && r.date == record.date
        });
        if already {
            return Err(DataError::duplicate(
                "attendance",
                format!("{}/{}/{}", record.student_id, record.course_id, record.date),
            ));
        }

        self.attendance.push(record);
        Ok(())
    }

    pub fn insert_grade(&mut self, grade: Grade) -> DataResult<()> {
        validate_grade(&grade)?;
        ensure_new_id(&self.grades, &grade.id)?;
        self.ensure_student_in_course(&grade.student_id, &grade.course_id)?;

        self.grades.push(grade);
        Ok(())
    }

    pub fn insert_fee_structure(&mut self, fee: FeeStructure) -> DataResult<()> {
        validate_fee_structure(&fee)?;
        ensure_new_id(&self.fee_structures, &fee.id)?;
        ensure_exists(&self.institutions, &fee.institution_id)?;

        self.fee_structures.push(fee);
        Ok(())
    }

    pub fn insert_payment(&mut self, payment: Payment) -> DataResult<()> {
        validate_payment(&payment)?;
        ensure_new_id(&self.payments, &payment.id)?;
        let fee = find_existing(&self.fee_structures, &payment.fee_structure_id)?;
        let student = find_user_with_role(&self.users, &payment.student_id, Role::Student)?;
        ensure_same_tenant(student, &fee.id, &fee.institution_id)?;
        if payment.institution_id != fee.institution_id {
            return Err(DataError::cross_tenant(&payment.id, &fee.id, &fee.institution_id));
        }

        self.payments.push(payment);
        Ok(())
    }

    pub fn insert_announcement(&mut self, announcement: Announcement) -> DataResult<()> {
        validate_announcement(&announcement)?;
        ensure_new_id(&self.announcements, &announcement.id)?;
        ensure_exists(&self.institutions, &announcement.institution_id)?;

        self.announcements.push(announcement);
        Ok(())
    }

    pub fn insert_notification(&mut self, notification: Notification) -> DataResult<()> {
        ensure_new_id(&self.notifications, &notification.id)?;
        ensure_exists(&self.users, &notification.user_id)?;

        self.notifications.push(notification);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::*;
    use eduverse_core::types::AttendanceStatus;

    #[test]
    fn test_demo_snapshot_is_valid() {
        let snapshot = demo_snapshot();
        let verified = snapshot.clone().verified().unwrap();
        assert_eq!(verified, snapshot);
    }

    #[test]
    fn test_duplicate_domain_rejected() {
        let mut snapshot = demo_snapshot();
        let mut copy = institution("inst-9", "Other College");
        copy.domain = "springfield.edu".to_string();
        assert!(matches!(
            snapshot.insert_institution(copy),
            Err(DataError::UniqueViolation { .. })
        ));
    }

    #[test]
    fn test_course_code_unique_within_institution() {
        let mut snapshot = demo_snapshot();
        let clash = course("course-x", "cs301", "inst-1", None);
        assert!(matches!(
            snapshot.insert_course(clash),
            Err(DataError::UniqueViolation { .. })
        ));
    }

    #[test]
    fn test_attendance_once_per_day() {
        let mut snapshot = demo_snapshot();
        let again = attendance("att-again", "stu-1", "course-1", 2, AttendanceStatus::Absent);
        assert!(matches!(
            snapshot.insert_attendance(again),
            Err(DataError::UniqueViolation { .. })
        ));
    }

    #[test]
    fn test_payment_needs_existing_fee() {
        let mut snapshot = demo_snapshot();
        let orphan = payment("pay-x", "missing-fee", 100);
        assert!(matches!(
            snapshot.insert_payment(orphan),
            Err(DataError::ReferenceViolation { .. })
        ));
    }

    #[test]
    fn test_enrollment_requires_student_role() {
        let mut snapshot = demo_snapshot();
        let err = snapshot
            .insert_enrollment(enrollment("fac-1", "course-2"))
            .unwrap_err();
        assert!(matches!(err, DataError::ReferenceViolation { .. }));
        assert!(err.to_string().contains("FACULTY"));

        assert!(snapshot.insert_enrollment(enrollment("admin-1", "course-2")).is_err());
        assert!(snapshot.insert_enrollment(enrollment("stu-3", "course-2")).is_ok());
    }

    #[test]
    fn test_attendance_and_grades_require_student_role() {
        let mut snapshot = demo_snapshot();
        let marked = attendance("att-x", "fac-2", "course-1", 20, AttendanceStatus::Present);
        assert!(matches!(
            snapshot.insert_attendance(marked),
            Err(DataError::ReferenceViolation { .. })
        ));
        assert!(matches!(
            snapshot.insert_grade(grade("grade-x", "root", "course-1", 10.0, 20.0)),
            Err(DataError::ReferenceViolation { .. })
        ));
    }

    #[test]
    fn test_records_stay_inside_one_tenant() {
        let mut snapshot = demo_snapshot();
        snapshot
            .insert_course(course("course-r1", "PH101", "inst-2", None))
            .unwrap();

        let err = snapshot
            .insert_enrollment(enrollment("stu-1", "course-r1"))
            .unwrap_err();
        assert!(err.to_string().contains("inst-2"));
        let marked = attendance("att-r", "stu-1", "course-r1", 3, AttendanceStatus::Present);
        assert!(snapshot.insert_attendance(marked).is_err());
        assert!(snapshot
            .insert_grade(grade("grade-r", "stu-1", "course-r1", 5.0, 10.0))
            .is_err());
    }

    #[test]
    fn test_payment_tenant_and_payer_checked() {
        let mut snapshot = demo_snapshot();
        let mut other_fee = fee("fee-r", "Lab Fee", 5_000, day(2024, 2, 1));
        other_fee.institution_id = "inst-2".to_string();
        snapshot.insert_fee_structure(other_fee).unwrap();

        let mut foreign = payment("pay-r", "fee-r", 5_000);
        foreign.institution_id = "inst-2".to_string();
        assert!(matches!(
            snapshot.insert_payment(foreign),
            Err(DataError::ReferenceViolation { .. })
        ));

        let mut mislabelled = payment("pay-m", "fee-hostel", 1_000);
        mislabelled.institution_id = "inst-2".to_string();
        assert!(snapshot.insert_payment(mislabelled).is_err());

        let mut by_faculty = payment("pay-f", "fee-hostel", 1_000);
        by_faculty.student_id = "fac-1".to_string();
        assert!(snapshot.insert_payment(by_faculty).is_err());
    }

    #[test]
    fn test_instructor_must_be_faculty_of_the_tenant() {
        let mut snapshot = demo_snapshot();
        let taught_by_student = course("course-s", "CS399", "inst-1", Some("stu-1"));
        assert!(matches!(
            snapshot.insert_course(taught_by_student),
            Err(DataError::ReferenceViolation { .. })
        ));

        let borrowed = course("course-b", "CS101", "inst-2", Some("fac-1"));
        assert!(snapshot.insert_course(borrowed).is_err());

        let own = course("course-o", "CS399", "inst-1", Some("fac-2"));
        assert!(snapshot.insert_course(own).is_ok());
    }

    #[test]
    fn test_invalid_grade_rejected() {
        let mut snapshot = demo_snapshot();
        let mut bad = grade("grade-x", "stu-1", "course-1", 10.0, 20.0);
        bad.marks_obtained = 25.0;
        assert!(matches!(
            snapshot.insert_grade(bad),
            Err(DataError::Validation(_))
        ));
    }

    #[test]
    fn test_json_round_trip_and_missing_arrays() {
        let snapshot = demo_snapshot();
        let json = snapshot.to_json_pretty().unwrap();
        assert_eq!(Snapshot::from_json(&json).unwrap(), snapshot);

        let partial = Snapshot::from_json(r#"{ "institutions": [] }"#).unwrap();
        assert!(partial.users.is_empty());
    }

    #[test]
    fn test_file_breaking_invariant_is_rejected() {
        let mut snapshot = demo_snapshot();
        let duplicate = snapshot.users[0].clone();
        snapshot.users.push(duplicate);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(Snapshot::from_json(&json).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("eduverse-snapshot-{}", uuid::Uuid::new_v4()));
        let path = dir.join("campus.json");

        let snapshot = demo_snapshot();
        snapshot.save(&path).unwrap();
        assert_eq!(Snapshot::load(&path).unwrap(), snapshot);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
