//! # In-Memory Repository
//!
//! [`CampusRepository`] over a [`Snapshot`] held behind a tokio `RwLock`.
//!
//! ## Concurrency
//! ```text
//!   dashboard A ──read──┐
//!   dashboard B ──read──┼──► RwLock<Snapshot> ◄──write── insert_* / mark read
//!   CSV export  ──read──┘
//! ```
//! Reads clone what they return, so no guard outlives a call.

use std::path::Path;
use std::sync::Arc;

use eduverse_core::types::{
    Announcement, AttendanceRecord, Course, Enrollment, FeeStructure, Grade, Institution,
    Notification, Payment, User,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::CampusRepository;
use crate::error::{DataError, DataResult};
use crate::snapshot::Snapshot;

/// Repository holding the whole platform in memory.
///
/// ## Usage
/// ```rust,ignore
/// let repo = InMemoryRepository::load(Path::new("campus.json"))?;
/// let courses = repo.list_courses("inst-1").await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<RwLock<Snapshot>>,
}

impl InMemoryRepository {
    /// Wraps a snapshot after checking every invariant.
    pub fn new(snapshot: Snapshot) -> DataResult<Self> {
        Ok(InMemoryRepository {
            state: Arc::new(RwLock::new(snapshot.verified()?)),
        })
    }

    /// Loads and verifies a snapshot file.
    pub fn load(path: &Path) -> DataResult<Self> {
        let snapshot = Snapshot::load(path)?;
        Ok(InMemoryRepository {
            state: Arc::new(RwLock::new(snapshot)),
        })
    }

    /// Writes the current state to a snapshot file.
    pub async fn save(&self, path: &Path) -> DataResult<()> {
        self.state.read().await.save(path)
    }

    async fn filtered<T, F>(&self, pick: F) -> Vec<T>
    where
        F: FnOnce(&Snapshot) -> Vec<T>,
    {
        let state = self.state.read().await;
        pick(&*state)
    }
}

impl CampusRepository for InMemoryRepository {
    async fn list_institutions(&self) -> DataResult<Vec<Institution>> {
        Ok(self.filtered(|s| s.institutions.clone()).await)
    }

    async fn get_institution(&self, id: &str) -> DataResult<Option<Institution>> {
        let state = self.state.read().await;
        Ok(state.institutions.iter().find(|i| i.id == id).cloned())
    }

    async fn get_user(&self, id: &str) -> DataResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self, institution_id: &str) -> DataResult<Vec<User>> {
        let users = self
            .filtered(|s| {
                s.users
                    .iter()
                    .filter(|u| u.institution_id() == Some(institution_id))
                    .cloned()
                    .collect()
            })
            .await;

        debug!(institution_id = %institution_id, count = users.len(), "Listed users");
        Ok(users)
    }

    async fn get_course(&self, id: &str) -> DataResult<Option<Course>> {
        let state = self.state.read().await;
        Ok(state.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn list_courses(&self, institution_id: &str) -> DataResult<Vec<Course>> {
        let courses = self
            .filtered(|s| {
                s.courses
                    .iter()
                    .filter(|c| c.institution_id == institution_id)
                    .cloned()
                    .collect()
            })
            .await;

        debug!(institution_id = %institution_id, count = courses.len(), "Listed courses");
        Ok(courses)
    }

    async fn list_enrollments_for_course(&self, course_id: &str) -> DataResult<Vec<Enrollment>> {
        Ok(self
            .filtered(|s| {
                s.enrollments
                    .iter()
                    .filter(|e| e.course_id == course_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn list_enrollments_for_student(&self, student_id: &str) -> DataResult<Vec<Enrollment>> {
        Ok(self
            .filtered(|s| {
                s.enrollments
                    .iter()
                    .filter(|e| e.student_id == student_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn list_attendance_for_course(
        &self,
        course_id: &str,
    ) -> DataResult<Vec<AttendanceRecord>> {
        Ok(self
            .filtered(|s| {
                s.attendance
                    .iter()
                    .filter(|r| r.course_id == course_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn list_attendance_for_student(
        &self,
        student_id: &str,
    ) -> DataResult<Vec<AttendanceRecord>> {
        Ok(self
            .filtered(|s| {
                s.attendance
                    .iter()
                    .filter(|r| r.student_id == student_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn list_grades_for_student(&self, student_id: &str) -> DataResult<Vec<Grade>> {
        Ok(self
            .filtered(|s| {
                s.grades
                    .iter()
                    .filter(|g| g.student_id == student_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn list_fee_structures(&self, institution_id: &str) -> DataResult<Vec<FeeStructure>> {
        Ok(self
            .filtered(|s| {
                s.fee_structures
                    .iter()
                    .filter(|f| f.institution_id == institution_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn list_payments(&self, institution_id: &str) -> DataResult<Vec<Payment>> {
        Ok(self
            .filtered(|s| {
                s.payments
                    .iter()
                    .filter(|p| p.institution_id == institution_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn list_payments_for_student(&self, student_id: &str) -> DataResult<Vec<Payment>> {
        Ok(self
            .filtered(|s| {
                s.payments
                    .iter()
                    .filter(|p| p.student_id == student_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn list_announcements(&self, institution_id: &str) -> DataResult<Vec<Announcement>> {
        Ok(self
            .filtered(|s| {
                s.announcements
                    .iter()
                    .filter(|a| a.institution_id == institution_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn list_notifications(&self, user_id: &str) -> DataResult<Vec<Notification>> {
        Ok(self
            .filtered(|s| {
                s.notifications
                    .iter()
                    .filter(|n| n.user_id == user_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn mark_notification_read(&self, id: &str) -> DataResult<()> {
        let mut state = self.state.write().await;
        let notification = state
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| DataError::not_found("Notification", id))?;

        notification.is_read = true;
        debug!(notification_id = %id, "Marked notification read");
        Ok(())
    }

    async fn insert_institution(&self, institution: Institution) -> DataResult<()> {
        let id = institution.id.clone();
        self.state.write().await.insert_institution(institution)?;
        info!(institution_id = %id, "Inserted institution");
        Ok(())
    }

    async fn insert_user(&self, user: User) -> DataResult<()> {
        let id = user.id.clone();
        let role = user.role();
        self.state.write().await.insert_user(user)?;
        info!(user_id = %id, role = %role, "Inserted user");
        Ok(())
    }

    async fn insert_course(&self, course: Course) -> DataResult<()> {
        let code = course.code.clone();
        self.state.write().await.insert_course(course)?;
        info!(code = %code, "Inserted course");
        Ok(())
    }

    async fn insert_enrollment(&self, enrollment: Enrollment) -> DataResult<()> {
        self.state.write().await.insert_enrollment(enrollment)
    }

    async fn insert_attendance(&self, record: AttendanceRecord) -> DataResult<()> {
        self.state.write().await.insert_attendance(record)
    }

    async fn insert_grade(&self, grade: Grade) -> DataResult<()> {
        self.state.write().await.insert_grade(grade)
    }

    async fn insert_fee_structure(&self, fee: FeeStructure) -> DataResult<()> {
        self.state.write().await.insert_fee_structure(fee)
    }

    async fn insert_payment(&self, payment: Payment) -> DataResult<()> {
        let id = payment.id.clone();
        let amount = payment.amount;
        self.state.write().await.insert_payment(payment)?;
        info!(payment_id = %id, amount = %amount, "Recorded payment");
        Ok(())
    }

    async fn insert_announcement(&self, announcement: Announcement) -> DataResult<()> {
        self.state.write().await.insert_announcement(announcement)
    }

    async fn insert_notification(&self, notification: Notification) -> DataResult<()> {
        self.state.write().await.insert_notification(notification)
    }

    async fn snapshot(&self) -> DataResult<Snapshot> {
        Ok(self.state.read().await.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::*;
    use eduverse_core::types::AttendanceStatus;

    fn repo() -> InMemoryRepository {
        InMemoryRepository::new(demo_snapshot()).unwrap()
    }

    #[tokio::test]
    async fn test_lookups() {
        let repo = repo();

        let john = repo.get_user("stu-1").await.unwrap().unwrap();
        assert_eq!(john.name, "John Doe");
        assert!(repo.get_user("nobody").await.unwrap().is_none());

        let course = repo.get_course("course-1").await.unwrap().unwrap();
        assert_eq!(course.code, "CS301");
    }

    #[tokio::test]
    async fn test_scoped_lists() {
        let repo = repo();

        assert_eq!(repo.list_institutions().await.unwrap().len(), 4);
        assert_eq!(repo.list_courses("inst-1").await.unwrap().len(), 4);
        assert!(repo.list_courses("inst-2").await.unwrap().is_empty());

        // super-admin has no institution and is never listed
        let users = repo.list_users("inst-1").await.unwrap();
        assert_eq!(users.len(), 7);

        assert_eq!(repo.list_enrollments_for_student("stu-1").await.unwrap().len(), 4);
        assert_eq!(repo.list_enrollments_for_course("course-1").await.unwrap().len(), 3);
        assert_eq!(repo.list_attendance_for_student("stu-1").await.unwrap().len(), 40);
        assert_eq!(repo.list_attendance_for_course("course-3").await.unwrap().len(), 10);
        assert_eq!(repo.list_grades_for_student("stu-1").await.unwrap().len(), 4);
        assert_eq!(repo.list_payments_for_student("stu-1").await.unwrap().len(), 2);
        assert_eq!(repo.list_payments("inst-1").await.unwrap().len(), 4);
        assert_eq!(repo.list_fee_structures("inst-1").await.unwrap().len(), 2);
        assert_eq!(repo.list_announcements("inst-1").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_insert_enforces_rules() {
        let repo = repo();

        let record = attendance("att-new", "stu-2", "course-2", 15, AttendanceStatus::Present);
        repo.insert_attendance(record.clone()).await.unwrap();

        let mut again = record;
        again.id = "att-new-2".to_string();
        assert!(matches!(
            repo.insert_attendance(again).await,
            Err(DataError::UniqueViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_mark_notification_read() {
        let repo = repo();

        repo.mark_notification_read("note-1").await.unwrap();
        repo.mark_notification_read("note-1").await.unwrap();

        let notes = repo.list_notifications("stu-1").await.unwrap();
        assert!(notes.iter().find(|n| n.id == "note-1").unwrap().is_read);

        assert!(matches!(
            repo.mark_notification_read("missing").await,
            Err(DataError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_readers_and_writer() {
        let repo = repo();

        let mut handles = Vec::new();
        for day in 15..20 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                let record = attendance(
                    &format!("att-c-{}", day),
                    "stu-3",
                    "course-1",
                    day,
                    AttendanceStatus::Present,
                );
                repo.insert_attendance(record).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.list_attendance_for_student("stu-3").await.unwrap().len(), 25);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let repo = repo();
        let path = std::env::temp_dir()
            .join(format!("eduverse-repo-{}.json", uuid::Uuid::new_v4()));

        repo.save(&path).await.unwrap();
        let loaded = InMemoryRepository::load(&path).unwrap();
        assert_eq!(
            loaded.snapshot().await.unwrap(),
            repo.snapshot().await.unwrap()
        );

        std::fs::remove_file(&path).unwrap();
    }
}
