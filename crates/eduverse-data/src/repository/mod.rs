//! # Repository Module
//!
//! Data access for EduVerse, behind one trait.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  DashboardService<R: CampusRepository>                                 │
//! │       │                                                                 │
//! │       │  repo.list_courses("inst-1")                                   │
//! │       ▼                                                                 │
//! │  CampusRepository (trait)                                              │
//! │  ├── get_* (&self, id)           → Option<Entity>                      │
//! │  ├── list_* (&self, scope)       → Vec<Entity>                         │
//! │  └── insert_* (&self, entity)    → checked write                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InMemoryRepository (RwLock<Snapshot>)                                 │
//! │                                                                         │
//! │  A database-backed implementation only has to satisfy the trait.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`InMemoryRepository`] - snapshot held in memory, loadable from JSON

use std::future::Future;

use eduverse_core::types::{
    Announcement, AttendanceRecord, Course, Enrollment, FeeStructure, Grade, Institution,
    Notification, Payment, User,
};

use crate::error::DataResult;
use crate::snapshot::Snapshot;

pub mod memory;

pub use memory::InMemoryRepository;

/// Read and write access to campus entities.
///
/// Lookups by id return `Ok(None)` when nothing matches; listing calls return
/// an empty vector. Every insert enforces the entity rules and unique keys
/// of [`Snapshot`].
pub trait CampusRepository: Send + Sync {
    // -------------------------------------------------------------------------
    // Tenants & People
    // -------------------------------------------------------------------------

    fn list_institutions(&self) -> impl Future<Output = DataResult<Vec<Institution>>> + Send;

    fn get_institution(
        &self,
        id: &str,
    ) -> impl Future<Output = DataResult<Option<Institution>>> + Send;

    fn get_user(&self, id: &str) -> impl Future<Output = DataResult<Option<User>>> + Send;

    /// Users attached to one institution (super-admins are never included).
    fn list_users(
        &self,
        institution_id: &str,
    ) -> impl Future<Output = DataResult<Vec<User>>> + Send;

    // -------------------------------------------------------------------------
    // Courses
    // -------------------------------------------------------------------------

    fn get_course(&self, id: &str) -> impl Future<Output = DataResult<Option<Course>>> + Send;

    fn list_courses(
        &self,
        institution_id: &str,
    ) -> impl Future<Output = DataResult<Vec<Course>>> + Send;

    fn list_enrollments_for_course(
        &self,
        course_id: &str,
    ) -> impl Future<Output = DataResult<Vec<Enrollment>>> + Send;

    fn list_enrollments_for_student(
        &self,
        student_id: &str,
    ) -> impl Future<Output = DataResult<Vec<Enrollment>>> + Send;

    // -------------------------------------------------------------------------
    // Academic Records
    // -------------------------------------------------------------------------

    fn list_attendance_for_course(
        &self,
        course_id: &str,
    ) -> impl Future<Output = DataResult<Vec<AttendanceRecord>>> + Send;

    fn list_attendance_for_student(
        &self,
        student_id: &str,
    ) -> impl Future<Output = DataResult<Vec<AttendanceRecord>>> + Send;

    fn list_grades_for_student(
        &self,
        student_id: &str,
    ) -> impl Future<Output = DataResult<Vec<Grade>>> + Send;

    // -------------------------------------------------------------------------
    // Fees
    // -------------------------------------------------------------------------

    fn list_fee_structures(
        &self,
        institution_id: &str,
    ) -> impl Future<Output = DataResult<Vec<FeeStructure>>> + Send;

    fn list_payments(
        &self,
        institution_id: &str,
    ) -> impl Future<Output = DataResult<Vec<Payment>>> + Send;

    fn list_payments_for_student(
        &self,
        student_id: &str,
    ) -> impl Future<Output = DataResult<Vec<Payment>>> + Send;

    // -------------------------------------------------------------------------
    // Communication
    // -------------------------------------------------------------------------

    fn list_announcements(
        &self,
        institution_id: &str,
    ) -> impl Future<Output = DataResult<Vec<Announcement>>> + Send;

    fn list_notifications(
        &self,
        user_id: &str,
    ) -> impl Future<Output = DataResult<Vec<Notification>>> + Send;

    /// Marks a notification read. Marking it twice is not an error.
    fn mark_notification_read(&self, id: &str) -> impl Future<Output = DataResult<()>> + Send;

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    fn insert_institution(
        &self,
        institution: Institution,
    ) -> impl Future<Output = DataResult<()>> + Send;

    fn insert_user(&self, user: User) -> impl Future<Output = DataResult<()>> + Send;

    fn insert_course(&self, course: Course) -> impl Future<Output = DataResult<()>> + Send;

    fn insert_enrollment(
        &self,
        enrollment: Enrollment,
    ) -> impl Future<Output = DataResult<()>> + Send;

    fn insert_attendance(
        &self,
        record: AttendanceRecord,
    ) -> impl Future<Output = DataResult<()>> + Send;

    fn insert_grade(&self, grade: Grade) -> impl Future<Output = DataResult<()>> + Send;

    fn insert_fee_structure(
        &self,
        fee: FeeStructure,
    ) -> impl Future<Output = DataResult<()>> + Send;

    fn insert_payment(&self, payment: Payment) -> impl Future<Output = DataResult<()>> + Send;

    fn insert_announcement(
        &self,
        announcement: Announcement,
    ) -> impl Future<Output = DataResult<()>> + Send;

    fn insert_notification(
        &self,
        notification: Notification,
    ) -> impl Future<Output = DataResult<()>> + Send;

    /// A point-in-time copy of every entity.
    fn snapshot(&self) -> impl Future<Output = DataResult<Snapshot>> + Send;
}
