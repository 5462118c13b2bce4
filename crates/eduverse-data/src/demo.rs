//! # Demo Campus
//!
//! A small, fully consistent platform used by the `seed` binary, local
//! development and tests.
//!
//! ## Contents
//! ```text
//! Platform
//! ├── Springfield University  (ENTERPRISE, ACTIVE)   ← populated tenant
//! │   ├── admin-1             institution admin
//! │   ├── fac-1 .. fac-3      Computer Science ×2, Mathematics
//! │   ├── stu-1 .. stu-3      semester 3, batch 2023-2027
//! │   ├── CS301 CS302 CS303 MT301
//! │   ├── 10 days of attendance (Jan 2-11, 2024) per enrollment
//! │   ├── Tuition ₹1,00,000 + Hostel ₹25,000
//! │   └── announcements, notifications
//! ├── Riverside High School   (PRO, ACTIVE)
//! ├── Tech Academy            (BASIC, TRIAL)
//! └── Green Valley School     (PRO, ACTIVE)
//! ```

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use eduverse_core::identifiers::{generate_employee_id, generate_student_id};
use eduverse_core::types::{
    Announcement, AttendanceRecord, AttendanceStatus, Audience, Course, Enrollment,
    EnrollmentStatus, ExamType, FeeStructure, Gender, Grade, Institution, InstitutionStatus,
    Notification, NotificationKind, Payment, PaymentMethod, PaymentStatus, RoleProfile,
    SubscriptionPlan, User,
};
use eduverse_core::Money;

/// Tenant that carries all demo people and courses.
pub const DEMO_INSTITUTION_ID: &str = "inst-1";

/// Batch of every demo student.
pub const DEMO_BATCH: &str = "2023-2027";

/// Roll-number prefix when none is configured.
pub const DEFAULT_STUDENT_ID_PREFIX: &str = "ST";

/// Admission year encoded in demo roll numbers.
const DEMO_ADMISSION_YEAR: i32 = 2023;

/// One attendance letter per day starting Jan 2, 2024.
/// P present, A absent, L late, E excused.
const ATTENDANCE_PATTERNS: &[(&str, &str, &str)] = &[
    ("stu-1", "course-1", "PPPPLPPAPP"),
    ("stu-1", "course-2", "PPPPPPPPPE"),
    ("stu-1", "course-3", "PPAPPLAPPP"),
    ("stu-1", "course-4", "PPPPAPPPLP"),
    ("stu-2", "course-1", "PPPPPPPPPP"),
    ("stu-2", "course-2", "PAPAPPPPPP"),
    ("stu-3", "course-1", "PAAPPAPPPP"),
    ("stu-3", "course-4", "PPPPPPPLPP"),
];

/// First day covered by [`ATTENDANCE_PATTERNS`].
const FIRST_CLASS_DAY: u32 = 2;

// =============================================================================
// Date Helpers
// =============================================================================

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn created() -> DateTime<Utc> {
    at(2023, 7, 1, 9)
}

// =============================================================================
// Entity Builders
// =============================================================================

pub fn institution(id: &str, name: &str) -> Institution {
    let slug: String = name
        .split_whitespace()
        .next()
        .unwrap_or("campus")
        .to_lowercase();

    Institution {
        id: id.to_string(),
        name: name.to_string(),
        domain: format!("{}.edu", slug),
        logo: None,
        primary_color: "#1d4ed8".to_string(),
        secondary_color: "#f59e0b".to_string(),
        address: None,
        phone: None,
        email: Some(format!("admin@{}.edu", slug)),
        website: Some(format!("https://{}.edu", slug)),
        is_active: true,
        status: InstitutionStatus::Active,
        subscription_plan: SubscriptionPlan::Basic,
        subscription_ends_at: None,
        created_at: created(),
        updated_at: created(),
    }
}

fn person(id: &str, name: &str, profile: RoleProfile) -> User {
    let login = name
        .split_whitespace()
        .last()
        .unwrap_or(id)
        .to_lowercase()
        .replace('.', "");

    User {
        id: id.to_string(),
        email: format!("{}.{}@springfield.edu", login, id),
        name: name.to_string(),
        avatar: None,
        phone: None,
        address: None,
        date_of_birth: None,
        gender: None,
        is_active: true,
        profile,
        created_at: created(),
        updated_at: created(),
    }
}

pub fn faculty(id: &str, name: &str, department: &str, sequence: u32) -> User {
    person(
        id,
        name,
        RoleProfile::Faculty {
            institution_id: DEMO_INSTITUTION_ID.to_string(),
            employee_id: generate_employee_id("SPU", department, sequence),
            department: department.to_string(),
            designation: "Professor".to_string(),
        },
    )
}

pub fn student(id: &str, name: &str, department: &str, sequence: u32) -> User {
    student_with_prefix(id, name, department, DEFAULT_STUDENT_ID_PREFIX, sequence)
}

/// A demo student whose roll number starts with `prefix`.
pub fn student_with_prefix(
    id: &str,
    name: &str,
    department: &str,
    prefix: &str,
    sequence: u32,
) -> User {
    let mut user = person(
        id,
        name,
        RoleProfile::Student {
            institution_id: DEMO_INSTITUTION_ID.to_string(),
            student_id: generate_student_id(prefix, DEMO_ADMISSION_YEAR, sequence),
            semester: 3,
            batch: DEMO_BATCH.to_string(),
            department: Some(department.to_string()),
        },
    );
    user.date_of_birth = Some(day(2004, 5, 20));
    user
}

pub fn course(id: &str, code: &str, institution_id: &str, instructor_id: Option<&str>) -> Course {
    Course {
        id: id.to_string(),
        code: code.to_string(),
        name: code.to_string(),
        description: None,
        credits: 3,
        semester: 3,
        department: "Computer Science".to_string(),
        academic_year: "2023-2024".to_string(),
        is_active: true,
        institution_id: institution_id.to_string(),
        instructor_id: instructor_id.map(str::to_string),
        created_at: created(),
        updated_at: created(),
    }
}

pub fn enrollment(student_id: &str, course_id: &str) -> Enrollment {
    Enrollment {
        id: format!("enr-{}-{}", student_id, course_id),
        student_id: student_id.to_string(),
        course_id: course_id.to_string(),
        enrolled_at: created(),
        status: EnrollmentStatus::Active,
    }
}

/// Attendance on day `jan_day` of January 2024.
pub fn attendance(
    id: &str,
    student_id: &str,
    course_id: &str,
    jan_day: u32,
    status: AttendanceStatus,
) -> AttendanceRecord {
    AttendanceRecord {
        id: id.to_string(),
        date: day(2024, 1, jan_day),
        status,
        student_id: student_id.to_string(),
        course_id: course_id.to_string(),
        marked_at: at(2024, 1, jan_day, 10),
        marked_by: None,
    }
}

pub fn grade(id: &str, student_id: &str, course_id: &str, marks: f64, total: f64) -> Grade {
    Grade {
        id: id.to_string(),
        exam_type: ExamType::Quiz,
        marks_obtained: marks,
        total_marks: total,
        student_id: student_id.to_string(),
        course_id: course_id.to_string(),
        exam_date: day(2024, 1, 10),
        created_at: at(2024, 1, 10, 12),
        updated_at: at(2024, 1, 10, 12),
    }
}

pub fn fee(id: &str, name: &str, rupees: i64, due: NaiveDate) -> FeeStructure {
    FeeStructure {
        id: id.to_string(),
        name: name.to_string(),
        amount: Money::from_rupees(rupees),
        due_date: due,
        description: None,
        is_recurring: true,
        semester: Some(3),
        batch: None,
        institution_id: DEMO_INSTITUTION_ID.to_string(),
        created_at: created(),
        updated_at: created(),
    }
}

/// A completed payment by `stu-1`.
pub fn payment(id: &str, fee_structure_id: &str, rupees: i64) -> Payment {
    Payment {
        id: id.to_string(),
        amount: Money::from_rupees(rupees),
        payment_method: PaymentMethod::Upi,
        status: PaymentStatus::Completed,
        transaction_id: Some(format!("TXN-{}", id.to_uppercase())),
        student_id: "stu-1".to_string(),
        fee_structure_id: fee_structure_id.to_string(),
        institution_id: DEMO_INSTITUTION_ID.to_string(),
        paid_at: Some(at(2024, 1, 5, 11)),
        created_at: at(2024, 1, 5, 11),
        updated_at: at(2024, 1, 5, 11),
    }
}

pub fn announcement(
    id: &str,
    title: &str,
    audience: Vec<Audience>,
    posted: DateTime<Utc>,
) -> Announcement {
    Announcement {
        id: id.to_string(),
        title: title.to_string(),
        content: String::new(),
        is_urgent: false,
        target_audience: audience,
        semester: None,
        batch: None,
        department: None,
        institution_id: DEMO_INSTITUTION_ID.to_string(),
        created_at: posted,
        updated_at: posted,
    }
}

pub fn notification(
    id: &str,
    user_id: &str,
    kind: NotificationKind,
    is_read: bool,
) -> Notification {
    Notification {
        id: id.to_string(),
        title: format!("{:?}", kind),
        message: String::new(),
        kind,
        is_read,
        sent_by_id: "admin-1".to_string(),
        user_id: user_id.to_string(),
        created_at: at(2024, 1, 12, 8),
    }
}

fn status_for(letter: char) -> AttendanceStatus {
    match letter {
        'A' => AttendanceStatus::Absent,
        'L' => AttendanceStatus::Late,
        'E' => AttendanceStatus::Excused,
        _ => AttendanceStatus::Present,
    }
}

// =============================================================================
// Demo Snapshot
// =============================================================================

/// Builds the demo platform described in the module docs.
pub fn demo_snapshot() -> crate::Snapshot {
    demo_snapshot_with_prefix(DEFAULT_STUDENT_ID_PREFIX)
}

/// The demo platform with student roll numbers starting with `prefix`.
pub fn demo_snapshot_with_prefix(prefix: &str) -> crate::Snapshot {
    let mut springfield = institution("inst-1", "Springfield University");
    springfield.subscription_plan = SubscriptionPlan::Enterprise;
    springfield.phone = Some("+1 555 123 4567".to_string());
    springfield.created_at = at(2023, 1, 15, 9);

    let mut riverside = institution("inst-2", "Riverside High School");
    riverside.subscription_plan = SubscriptionPlan::Pro;
    riverside.created_at = at(2023, 3, 20, 9);

    let mut tech = institution("inst-3", "Tech Academy");
    tech.subscription_plan = SubscriptionPlan::Basic;
    tech.status = InstitutionStatus::Trial;
    tech.subscription_ends_at = Some(day(2024, 2, 10));
    tech.created_at = at(2024, 1, 10, 9);

    let mut green = institution("inst-4", "Green Valley School");
    green.subscription_plan = SubscriptionPlan::Pro;
    green.created_at = at(2023, 9, 5, 9);

    let super_admin = person("root", "Platform Operator", RoleProfile::SuperAdmin);
    let admin = person(
        "admin-1",
        "Priya Raman",
        RoleProfile::InstitutionAdmin {
            institution_id: DEMO_INSTITUTION_ID.to_string(),
        },
    );

    let mut john = student_with_prefix("stu-1", "John Doe", "Computer Science", prefix, 1);
    john.gender = Some(Gender::Male);
    john.phone = Some("+91 98765 43210".to_string());

    let users = vec![
        super_admin,
        admin,
        faculty("fac-1", "Dr. Smith", "Computer Science", 1),
        faculty("fac-2", "Prof. Johnson", "Computer Science", 2),
        faculty("fac-3", "Prof. Wilson", "Mathematics", 1),
        john,
        student_with_prefix("stu-2", "Jane Smith", "Computer Science", prefix, 2),
        student_with_prefix("stu-3", "Arjun Mehta", "Mathematics", prefix, 3),
    ];

    let mut dsa = course("course-1", "CS301", DEMO_INSTITUTION_ID, Some("fac-1"));
    dsa.name = "Data Structures & Algorithms".to_string();
    dsa.credits = 4;
    let mut dbms = course("course-2", "CS302", DEMO_INSTITUTION_ID, Some("fac-2"));
    dbms.name = "Database Management Systems".to_string();
    let mut networks = course("course-3", "CS303", DEMO_INSTITUTION_ID, Some("fac-1"));
    networks.name = "Computer Networks".to_string();
    let mut discrete = course("course-4", "MT301", DEMO_INSTITUTION_ID, Some("fac-3"));
    discrete.name = "Discrete Mathematics".to_string();
    discrete.department = "Mathematics".to_string();
    discrete.credits = 4;

    let enrollments = ATTENDANCE_PATTERNS
        .iter()
        .map(|(student_id, course_id, _)| enrollment(student_id, course_id))
        .collect();

    let attendance = ATTENDANCE_PATTERNS
        .iter()
        .flat_map(|(student_id, course_id, pattern)| {
            pattern.chars().zip(FIRST_CLASS_DAY..).map(move |(letter, jan_day)| {
                attendance(
                    &format!("att-{}-{}-{}", student_id, course_id, jan_day),
                    student_id,
                    course_id,
                    jan_day,
                    status_for(letter),
                )
            })
        })
        .collect();

    let mut midterm = grade("grade-3", "stu-1", "course-3", 42.0, 50.0);
    midterm.exam_type = ExamType::Midterm;
    midterm.exam_date = day(2024, 1, 5);
    let mut assignment = grade("grade-2", "stu-1", "course-2", 28.0, 30.0);
    assignment.exam_type = ExamType::Assignment;
    assignment.exam_date = day(2024, 1, 8);

    let grades = vec![
        grade("grade-1", "stu-1", "course-1", 18.0, 20.0),
        assignment,
        midterm,
        grade("grade-4", "stu-1", "course-4", 17.0, 20.0),
        grade("grade-5", "stu-2", "course-1", 15.0, 20.0),
        grade("grade-6", "stu-2", "course-2", 25.0, 30.0),
        grade("grade-7", "stu-3", "course-1", 12.0, 20.0),
        grade("grade-8", "stu-3", "course-4", 19.0, 20.0),
    ];

    let mut failed = payment("pay-2", "fee-tuition", 25_000);
    failed.status = PaymentStatus::Failed;
    failed.paid_at = None;
    let mut jane_tuition = payment("pay-3", "fee-tuition", 100_000);
    jane_tuition.student_id = "stu-2".to_string();
    jane_tuition.payment_method = PaymentMethod::BankTransfer;
    let mut jane_hostel = payment("pay-4", "fee-hostel", 25_000);
    jane_hostel.student_id = "stu-2".to_string();

    let mut exams = announcement(
        "ann-1",
        "Mid-Semester Examinations",
        vec![Audience::All],
        at(2024, 1, 12, 9),
    );
    exams.is_urgent = true;
    exams.content = "Mid-semester exams will be conducted from February 20-28, 2024.".to_string();
    let mut library = announcement(
        "ann-2",
        "Library Hours Extended",
        vec![Audience::Students],
        at(2024, 1, 10, 9),
    );
    library.content = "Library will remain open until 10 PM during exam period.".to_string();
    let mut projects = announcement(
        "ann-3",
        "Project Submission Deadline",
        vec![Audience::Students],
        at(2024, 1, 8, 9),
    );
    projects.is_urgent = true;
    projects.semester = Some(7);
    let staff = announcement(
        "ann-4",
        "Faculty Meeting",
        vec![Audience::Faculty, Audience::Admins],
        at(2024, 1, 9, 9),
    );

    crate::Snapshot {
        institutions: vec![springfield, riverside, tech, green],
        users,
        courses: vec![dsa, dbms, networks, discrete],
        enrollments,
        attendance,
        grades,
        fee_structures: vec![
            fee("fee-tuition", "Tuition Fee", 100_000, day(2024, 2, 15)),
            fee("fee-hostel", "Hostel Fee", 25_000, day(2024, 3, 1)),
        ],
        payments: vec![
            payment("pay-1", "fee-tuition", 75_000),
            failed,
            jane_tuition,
            jane_hostel,
        ],
        announcements: vec![exams, library, projects, staff],
        notifications: vec![
            notification("note-1", "stu-1", NotificationKind::FeeDue, false),
            notification("note-2", "stu-1", NotificationKind::GradeUpdated, true),
            notification("note-3", "stu-1", NotificationKind::Announcement, false),
            notification("note-4", "fac-1", NotificationKind::General, false),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll_numbers(snapshot: &crate::Snapshot) -> Vec<String> {
        snapshot
            .users
            .iter()
            .filter_map(|u| match &u.profile {
                RoleProfile::Student { student_id, .. } => Some(student_id.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_roll_numbers_follow_prefix() {
        assert_eq!(
            roll_numbers(&demo_snapshot()),
            vec!["ST20230001", "ST20230002", "ST20230003"]
        );

        let snapshot = demo_snapshot_with_prefix("SPU");
        assert_eq!(roll_numbers(&snapshot)[0], "SPU20230001");
        assert!(snapshot.verified().is_ok());
    }
}
