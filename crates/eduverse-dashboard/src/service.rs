//! # Dashboard Service
//!
//! Builds the four role dashboards from repository records.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       DashboardService<R>                               │
//! │                                                                         │
//! │   student_dashboard("stu-1", as_of)                                    │
//! │        │                                                                │
//! │        ├── repo.get_user            ──► role check (STUDENT)           │
//! │        ├── repo.list_enrollments    ──► courses                        │
//! │        ├── repo.list_attendance     ──► attendance_stats(policy)       │
//! │        ├── repo.list_grades         ──► grade_summary                  │
//! │        ├── repo.list_fee_structures ┐                                  │
//! │        ├── repo.list_payments       ┴─► fee_progress(as_of)            │
//! │        └── repo.list_announcements  ──► is_visible_to                  │
//! │                                                                         │
//! │   The service owns no state besides the repository, the attendance     │
//! │   policy and the display currency; every call reads fresh records.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use eduverse_core::grading::{average_rate, generate_grade};
use eduverse_core::stats::{
    attendance_stats, fee_progress, grade_summary, AttendancePolicy, DashboardStats,
};
use eduverse_core::types::{
    EnrollmentStatus, InstitutionStatus, Role, RoleProfile, SubscriptionPlan, User,
};
use eduverse_core::{CoreError, Money, DEFAULT_CURRENCY};
use eduverse_data::{CampusRepository, DataError};
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::error::DashboardResult;
use crate::views::{
    AdminDashboard, DepartmentSummary, FacultyDashboard, FeeAmounts, InstitutionQuery,
    InstitutionRow, PlanCount, StudentCourse, StudentDashboard, SuperAdminDashboard, TaughtCourse,
};

/// Order of the plan breakdown on the super-admin dashboard.
const PLAN_ORDER: [SubscriptionPlan; 3] = [
    SubscriptionPlan::Enterprise,
    SubscriptionPlan::Pro,
    SubscriptionPlan::Basic,
];

/// Role dashboards over a [`CampusRepository`].
///
/// ## Usage
/// ```rust,ignore
/// let repo = InMemoryRepository::new(demo::demo_snapshot())?;
/// let service = DashboardService::from_config(repo, &config);
///
/// let view = service.student_dashboard("stu-1", today).await?;
/// println!("{}% attendance", view.overall_attendance);
/// ```
#[derive(Debug, Clone)]
pub struct DashboardService<R> {
    repo: R,
    policy: AttendancePolicy,
    /// ISO 4217 code for the formatted amounts.
    currency: String,
}

impl<R: CampusRepository> DashboardService<R> {
    /// Creates a service with the default attendance policy, showing INR.
    pub fn new(repo: R) -> Self {
        Self::with_policy(repo, AttendancePolicy::default())
    }

    pub fn with_policy(repo: R, policy: AttendancePolicy) -> Self {
        DashboardService {
            repo,
            policy,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn from_config(repo: R, config: &DashboardConfig) -> Self {
        Self::with_policy(repo, config.attendance_policy()).with_currency(config.currency())
    }

    /// Shows formatted amounts in `code` instead.
    pub fn with_currency(mut self, code: &str) -> Self {
        self.currency = code.trim().to_ascii_uppercase();
        self
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn policy(&self) -> AttendancePolicy {
        self.policy
    }

    // =========================================================================
    // Super-admin
    // =========================================================================

    /// Platform totals plus the tenant table filtered by `query`.
    pub async fn super_admin_dashboard(
        &self,
        query: &InstitutionQuery,
    ) -> DashboardResult<SuperAdminDashboard> {
        let rows = self.institution_rows().await?;

        let total_users: usize = rows.iter().map(|r| r.users).sum();
        let total_students: usize = rows.iter().map(|r| r.students).sum();
        let active_institutions = rows
            .iter()
            .filter(|r| r.status == InstitutionStatus::Active)
            .count();

        let monthly_recurring_revenue: Money = rows
            .iter()
            .filter(|r| r.status == InstitutionStatus::Active)
            .filter_map(|r| r.monthly_price)
            .sum();

        let plans = PLAN_ORDER
            .iter()
            .map(|plan| PlanCount {
                plan: *plan,
                institutions: rows.iter().filter(|r| r.plan == *plan).count(),
            })
            .collect();

        let total_institutions = rows.len();
        let institutions = filter_rows(rows, query);

        info!(
            total_institutions,
            shown = institutions.len(),
            mrr = %monthly_recurring_revenue,
            "Built super-admin dashboard"
        );

        let monthly_recurring_revenue_display =
            monthly_recurring_revenue.format_code(&self.currency);

        Ok(SuperAdminDashboard {
            total_institutions,
            active_institutions,
            total_users,
            total_students,
            monthly_recurring_revenue,
            monthly_recurring_revenue_display,
            plans,
            institutions,
        })
    }

    /// Tenant table rows matching `query`, by name.
    pub async fn search_institutions(
        &self,
        query: &InstitutionQuery,
    ) -> DashboardResult<Vec<InstitutionRow>> {
        let rows = filter_rows(self.institution_rows().await?, query);
        debug!(
            search = ?query.search,
            status = ?query.status,
            matches = rows.len(),
            "Searched institutions"
        );
        Ok(rows)
    }

    async fn institution_rows(&self) -> DashboardResult<Vec<InstitutionRow>> {
        let institutions = self.repo.list_institutions().await?;

        let mut rows = Vec::with_capacity(institutions.len());
        for institution in institutions {
            let users = self.repo.list_users(&institution.id).await?;
            let students = users.iter().filter(|u| u.role() == Role::Student).count();

            rows.push(InstitutionRow {
                monthly_price: institution.subscription_plan.monthly_price(),
                users: users.len(),
                students,
                plan: institution.subscription_plan,
                status: institution.status,
                id: institution.id,
                name: institution.name,
                domain: institution.domain,
            });
        }

        Ok(rows)
    }

    // =========================================================================
    // Institution admin
    // =========================================================================

    /// Headline figures and department breakdown of one tenant.
    ///
    /// Pending fees sum every student's outstanding balance on the fees that
    /// apply to them, as of `as_of`.
    pub async fn institution_admin_dashboard(
        &self,
        institution_id: &str,
        as_of: NaiveDate,
    ) -> DashboardResult<AdminDashboard> {
        let institution = self
            .repo
            .get_institution(institution_id)
            .await?
            .ok_or_else(|| DataError::not_found("Institution", institution_id))?;

        let users = self.repo.list_users(institution_id).await?;
        let courses = self.repo.list_courses(institution_id).await?;
        let fees = self.repo.list_fee_structures(institution_id).await?;
        let payments = self.repo.list_payments(institution_id).await?;

        let students: Vec<&User> = users.iter().filter(|u| u.role() == Role::Student).collect();
        let faculty: Vec<&User> = users.iter().filter(|u| u.role() == Role::Faculty).collect();

        let total_revenue: Money = payments
            .iter()
            .filter(|p| p.is_settled())
            .map(|p| p.amount)
            .sum();

        let pending_fees: Money = students
            .iter()
            .map(|student| {
                let owed: Vec<_> = fees.iter().filter(|f| f.applies_to(student)).cloned().collect();
                let paid: Vec<_> = payments
                    .iter()
                    .filter(|p| p.student_id == student.id)
                    .cloned()
                    .collect();
                fee_progress(&owed, &paid, as_of).pending
            })
            .sum();

        let mut attendance = Vec::new();
        for course in &courses {
            attendance.extend(self.repo.list_attendance_for_course(&course.id).await?);
        }
        let attendance_rate = attendance_stats(&attendance, &self.policy).percentage;

        let mut departments: BTreeMap<&str, DepartmentSummary> = BTreeMap::new();
        for student in &students {
            if let Some(department) = student.department() {
                department_entry(&mut departments, department).students += 1;
            }
        }
        for member in &faculty {
            if let Some(department) = member.department() {
                department_entry(&mut departments, department).faculty += 1;
            }
        }
        for course in &courses {
            department_entry(&mut departments, &course.department).courses += 1;
        }

        let stats = DashboardStats {
            total_students: students.len(),
            total_faculty: faculty.len(),
            total_courses: courses.len(),
            total_revenue,
            attendance_rate,
            pending_fees,
        };

        info!(
            institution_id = %institution_id,
            students = stats.total_students,
            revenue = %stats.total_revenue,
            "Built institution dashboard"
        );

        Ok(AdminDashboard {
            institution_id: institution.id,
            institution_name: institution.name,
            total_revenue_display: stats.total_revenue.format_code(&self.currency),
            pending_fees_display: stats.pending_fees.format_code(&self.currency),
            stats,
            departments: departments.into_values().collect(),
        })
    }

    // =========================================================================
    // Faculty
    // =========================================================================

    /// Courses a faculty member teaches, with enrolment and attendance.
    pub async fn faculty_dashboard(&self, faculty_id: &str) -> DashboardResult<FacultyDashboard> {
        let user = self.require_user(faculty_id, Role::Faculty).await?;
        let institution_id = user
            .institution_id()
            .ok_or_else(|| CoreError::NoInstitution(user.id.clone()))?;

        let taught: Vec<_> = self
            .repo
            .list_courses(institution_id)
            .await?
            .into_iter()
            .filter(|c| c.instructor_id.as_deref() == Some(faculty_id))
            .collect();

        let mut students = HashSet::new();
        let mut courses = Vec::with_capacity(taught.len());
        for course in taught {
            let enrolled: Vec<_> = self
                .repo
                .list_enrollments_for_course(&course.id)
                .await?
                .into_iter()
                .filter(|e| e.status == EnrollmentStatus::Active)
                .collect();
            students.extend(enrolled.iter().map(|e| e.student_id.clone()));

            let records = self.repo.list_attendance_for_course(&course.id).await?;

            courses.push(TaughtCourse {
                attendance: attendance_stats(&records, &self.policy),
                enrolled: enrolled.len(),
                credits: course.credits,
                course_id: course.id,
                code: course.code,
                name: course.name,
            });
        }

        let average_attendance = average_rate(
            courses
                .iter()
                .filter(|c| c.attendance.total > 0)
                .map(|c| c.attendance.percentage),
        );

        debug!(faculty_id = %faculty_id, courses = courses.len(), "Built faculty dashboard");

        Ok(FacultyDashboard {
            faculty_id: user.id.clone(),
            department: user.department().unwrap_or_default().to_string(),
            name: user.name,
            courses,
            total_students: students.len(),
            average_attendance,
        })
    }

    // =========================================================================
    // Student
    // =========================================================================

    /// Everything a student sees on their home page, as of `as_of`.
    pub async fn student_dashboard(
        &self,
        student_id: &str,
        as_of: NaiveDate,
    ) -> DashboardResult<StudentDashboard> {
        let user = self.require_user(student_id, Role::Student).await?;
        let RoleProfile::Student {
            institution_id,
            student_id: roll_number,
            semester,
            ..
        } = &user.profile
        else {
            return Err(role_mismatch(&user, Role::Student).into());
        };

        let enrollments = self.repo.list_enrollments_for_student(student_id).await?;
        let attendance = self.repo.list_attendance_for_student(student_id).await?;
        let grades = self.repo.list_grades_for_student(student_id).await?;

        let mut instructors: HashMap<String, Option<String>> = HashMap::new();
        let mut courses = Vec::with_capacity(enrollments.len());
        let mut listed_attendance = Vec::new();
        let mut listed_grades = Vec::new();
        for enrollment in enrollments.iter().filter(|e| e.status != EnrollmentStatus::Dropped) {
            let Some(course) = self.repo.get_course(&enrollment.course_id).await? else {
                continue;
            };

            let instructor = match &course.instructor_id {
                Some(id) => match instructors.get(id) {
                    Some(name) => name.clone(),
                    None => {
                        let name = self.repo.get_user(id).await?.map(|u| u.name);
                        instructors.insert(id.clone(), name.clone());
                        name
                    }
                },
                None => None,
            };

            let course_attendance: Vec<_> = attendance
                .iter()
                .filter(|a| a.course_id == course.id)
                .cloned()
                .collect();
            let course_grades: Vec<_> = grades
                .iter()
                .filter(|g| g.course_id == course.id)
                .cloned()
                .collect();

            courses.push(StudentCourse {
                attendance: attendance_stats(&course_attendance, &self.policy),
                grade: grade_summary(&course_grades),
                credits: course.credits,
                instructor,
                course_id: course.id,
                code: course.code,
                name: course.name,
            });
            listed_attendance.extend(course_attendance);
            listed_grades.extend(course_grades);
        }

        // overall figures cover the listed courses only, never dropped ones
        let total_credits: u32 = courses.iter().map(|c| u32::from(c.credits)).sum();
        let overall_attendance = attendance_stats(&listed_attendance, &self.policy).percentage;
        let overall_grade =
            generate_grade(grade_summary(&listed_grades).average_percentage as f64);

        let fees: Vec<_> = self
            .repo
            .list_fee_structures(institution_id)
            .await?
            .into_iter()
            .filter(|f| f.applies_to(&user))
            .collect();
        let payments = self.repo.list_payments_for_student(student_id).await?;
        let fees = fee_progress(&fees, &payments, as_of);
        let fee_amounts = FeeAmounts::new(&fees, &self.currency);

        let mut announcements: Vec<_> = self
            .repo
            .list_announcements(institution_id)
            .await?
            .into_iter()
            .filter(|a| a.is_visible_to(&user))
            .collect();
        announcements.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let unread_notifications = self
            .repo
            .list_notifications(student_id)
            .await?
            .iter()
            .filter(|n| !n.is_read)
            .count();

        debug!(
            student_id = %student_id,
            courses = courses.len(),
            attendance = overall_attendance,
            fee_status = ?fees.status,
            "Built student dashboard"
        );

        Ok(StudentDashboard {
            student_id: user.id.clone(),
            name: user.name.clone(),
            roll_number: roll_number.clone(),
            semester: *semester,
            courses,
            total_credits,
            overall_attendance,
            overall_grade,
            fees,
            fee_amounts,
            announcements,
            unread_notifications,
            as_of,
        })
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn require_user(&self, id: &str, expected: Role) -> DashboardResult<User> {
        let user = self
            .repo
            .get_user(id)
            .await?
            .ok_or_else(|| DataError::not_found("User", id))?;

        if user.role() != expected {
            return Err(role_mismatch(&user, expected).into());
        }

        Ok(user)
    }
}

fn role_mismatch(user: &User, expected: Role) -> CoreError {
    CoreError::RoleMismatch {
        user_id: user.id.clone(),
        expected: expected.to_string(),
        actual: user.role().to_string(),
    }
}

fn filter_rows(rows: Vec<InstitutionRow>, query: &InstitutionQuery) -> Vec<InstitutionRow> {
    let mut rows: Vec<_> = rows
        .into_iter()
        .filter(|row| query.matches_row(row))
        .collect();
    rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    rows
}

fn department_entry<'m, 'a>(
    departments: &'m mut BTreeMap<&'a str, DepartmentSummary>,
    name: &'a str,
) -> &'m mut DepartmentSummary {
    departments.entry(name).or_insert_with(|| DepartmentSummary {
        department: name.to_string(),
        students: 0,
        faculty: 0,
        courses: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduverse_core::stats::FeeStatus;
    use eduverse_core::LetterGrade;
    use eduverse_data::demo::{day, demo_snapshot};
    use eduverse_data::InMemoryRepository;

    fn service() -> DashboardService<InMemoryRepository> {
        DashboardService::new(InMemoryRepository::new(demo_snapshot()).unwrap())
    }

    #[tokio::test]
    async fn test_super_admin_totals() {
        let view = service()
            .super_admin_dashboard(&InstitutionQuery::default())
            .await
            .unwrap();

        assert_eq!(view.total_institutions, 4);
        assert_eq!(view.active_institutions, 3);
        assert_eq!(view.total_users, 7);
        assert_eq!(view.total_students, 3);
        // two ACTIVE Pro tenants; the Basic one is on trial
        assert_eq!(view.monthly_recurring_revenue, Money::from_rupees(5_998));
        assert_eq!(view.monthly_recurring_revenue_display, "₹5,998.00");

        let counts: Vec<_> = view.plans.iter().map(|p| (p.plan, p.institutions)).collect();
        assert_eq!(
            counts,
            vec![
                (SubscriptionPlan::Enterprise, 1),
                (SubscriptionPlan::Pro, 2),
                (SubscriptionPlan::Basic, 1),
            ]
        );

        let names: Vec<_> = view.institutions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Green Valley School",
                "Riverside High School",
                "Springfield University",
                "Tech Academy",
            ]
        );
    }

    #[tokio::test]
    async fn test_super_admin_filter_keeps_totals() {
        let query = InstitutionQuery::search("school").with_status(InstitutionStatus::Active);
        let view = service().super_admin_dashboard(&query).await.unwrap();

        assert_eq!(view.total_institutions, 4);
        let ids: Vec<_> = view.institutions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["inst-4", "inst-2"]);
    }

    #[tokio::test]
    async fn test_institution_admin_dashboard() {
        let view = service()
            .institution_admin_dashboard("inst-1", day(2024, 1, 15))
            .await
            .unwrap();

        assert_eq!(view.institution_name, "Springfield University");
        assert_eq!(view.stats.total_students, 3);
        assert_eq!(view.stats.total_faculty, 3);
        assert_eq!(view.stats.total_courses, 4);
        // the failed payment does not count
        assert_eq!(view.stats.total_revenue, Money::from_rupees(200_000));
        assert_eq!(view.stats.pending_fees, Money::from_rupees(175_000));
        assert_eq!(view.total_revenue_display, "₹2,00,000.00");
        assert_eq!(view.pending_fees_display, "₹1,75,000.00");
        // 70 attended of 79 counted
        assert_eq!(view.stats.attendance_rate, 89);

        assert_eq!(
            view.departments,
            vec![
                DepartmentSummary {
                    department: "Computer Science".to_string(),
                    students: 2,
                    faculty: 2,
                    courses: 3,
                },
                DepartmentSummary {
                    department: "Mathematics".to_string(),
                    students: 1,
                    faculty: 1,
                    courses: 1,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_institution_admin_unknown_tenant() {
        let err = service()
            .institution_admin_dashboard("inst-404", day(2024, 1, 15))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_faculty_dashboard() {
        let view = service().faculty_dashboard("fac-1").await.unwrap();

        assert_eq!(view.department, "Computer Science");
        let rates: Vec<_> = view
            .courses
            .iter()
            .map(|c| (c.code.as_str(), c.enrolled, c.attendance.percentage))
            .collect();
        assert_eq!(rates, vec![("CS301", 3, 87), ("CS303", 1, 80)]);
        assert_eq!(view.total_students, 3);
        assert_eq!(view.average_attendance, 84);
    }

    #[tokio::test]
    async fn test_faculty_dashboard_rejects_student() {
        let err = service().faculty_dashboard("stu-1").await.unwrap_err();
        assert_eq!(err.to_string(), "User stu-1 has role STUDENT, expected FACULTY");
    }

    #[tokio::test]
    async fn test_student_dashboard() {
        let view = service()
            .student_dashboard("stu-1", day(2024, 1, 15))
            .await
            .unwrap();

        assert_eq!(view.roll_number, "ST20230001");
        assert_eq!(view.semester, 3);
        assert_eq!(view.total_credits, 14);

        let per_course: Vec<_> = view
            .courses
            .iter()
            .map(|c| (c.code.as_str(), c.attendance.percentage, c.grade.letter))
            .collect();
        assert_eq!(
            per_course,
            vec![
                ("CS301", 90, LetterGrade::APlus),
                ("CS302", 100, LetterGrade::APlus),
                ("CS303", 80, LetterGrade::AMinus),
                ("MT301", 90, LetterGrade::A),
            ]
        );
        assert_eq!(view.courses[0].instructor.as_deref(), Some("Dr. Smith"));
        assert_eq!(view.overall_attendance, 90);
        // 105 of 120 marks
        assert_eq!(view.overall_grade, LetterGrade::A);

        assert_eq!(view.fees.status, FeeStatus::Partial);
        assert_eq!(view.fees.paid, Money::from_rupees(75_000));
        assert_eq!(view.fees.total, Money::from_rupees(125_000));
        assert_eq!(view.fees.next_due_date, Some(day(2024, 2, 15)));
        assert_eq!(view.fee_amounts.pending, "₹50,000.00");

        let titles: Vec<_> = view.announcements.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(titles, vec!["ann-1", "ann-2"]);
        assert_eq!(view.unread_notifications, 2);
    }

    #[tokio::test]
    async fn test_student_fees_turn_overdue() {
        let view = service()
            .student_dashboard("stu-1", day(2024, 2, 20))
            .await
            .unwrap();
        assert_eq!(view.fees.status, FeeStatus::Overdue);
        assert_eq!(view.fees.next_due_date, Some(day(2024, 3, 1)));
    }

    #[tokio::test]
    async fn test_strict_policy_lowers_rates() {
        let strict = AttendancePolicy {
            late_counts_as_present: false,
            exclude_excused: false,
        };
        let repo = InMemoryRepository::new(demo_snapshot()).unwrap();
        let service = DashboardService::with_policy(repo, strict);

        let view = service.student_dashboard("stu-1", day(2024, 1, 15)).await.unwrap();
        // CS302 has one EXCUSED day, CS301 one LATE day
        assert_eq!(view.courses[0].attendance.percentage, 80);
        assert_eq!(view.courses[1].attendance.percentage, 90);
    }

    #[tokio::test]
    async fn test_dropped_course_leaves_overall_figures() {
        let mut snapshot = demo_snapshot();
        let networks = snapshot
            .enrollments
            .iter_mut()
            .find(|e| e.student_id == "stu-1" && e.course_id == "course-3")
            .unwrap();
        networks.status = EnrollmentStatus::Dropped;
        let service = DashboardService::new(InMemoryRepository::new(snapshot).unwrap());

        let view = service.student_dashboard("stu-1", day(2024, 1, 15)).await.unwrap();

        let codes: Vec<_> = view.courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["CS301", "CS302", "MT301"]);
        assert_eq!(view.total_credits, 11);
        // 27 of 29 counted days; CS303 had 8 of 10
        assert_eq!(view.overall_attendance, 93);
        // 63 of 70 marks; the CS303 midterm is left out
        assert_eq!(view.overall_grade, LetterGrade::APlus);
    }

    #[tokio::test]
    async fn test_configured_currency_formats_amounts() {
        let config = DashboardConfig::from_toml("[tenant]\ncurrency = \"usd\"\n").unwrap();
        let repo = InMemoryRepository::new(demo_snapshot()).unwrap();
        let service = DashboardService::from_config(repo, &config);
        assert_eq!(service.currency(), "USD");

        let platform = service
            .super_admin_dashboard(&InstitutionQuery::default())
            .await
            .unwrap();
        assert_eq!(platform.monthly_recurring_revenue_display, "$5,998.00");

        let admin = service
            .institution_admin_dashboard("inst-1", day(2024, 1, 15))
            .await
            .unwrap();
        assert_eq!(admin.total_revenue_display, "$2,00,000.00");

        let student = service.student_dashboard("stu-1", day(2024, 1, 15)).await.unwrap();
        assert_eq!(student.fee_amounts.paid, "$75,000.00");
        assert_eq!(student.fee_amounts.total, "$1,25,000.00");
    }

    #[tokio::test]
    async fn test_unknown_student() {
        let err = service()
            .student_dashboard("stu-404", day(2024, 1, 15))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
