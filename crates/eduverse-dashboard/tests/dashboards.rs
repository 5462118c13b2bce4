//! End-to-end checks: config, repository file, dashboards, search debounce
//! and CSV export working together.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use eduverse_core::types::{AttendanceStatus, InstitutionStatus};
use eduverse_core::Money;
use eduverse_dashboard::{
    open_repository, save_csv, DashboardConfig, DashboardService, Debouncer, InstitutionQuery,
};
use eduverse_data::demo::{attendance, day, demo_snapshot};
use eduverse_data::{CampusRepository, InMemoryRepository};

fn scratch_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("eduverse-{}-{}", label, uuid::Uuid::new_v4()))
}

#[tokio::test]
async fn test_dashboards_from_saved_snapshot() {
    let dir = scratch_dir("snapshot");
    let snapshot_path = dir.join("campus.json");
    InMemoryRepository::new(demo_snapshot())
        .unwrap()
        .save(&snapshot_path)
        .await
        .unwrap();

    let config = DashboardConfig::from_toml(&format!(
        "[data]\nsnapshot_path = {:?}\n\n[attendance]\nlate_counts_as_present = false\n",
        snapshot_path.display().to_string()
    ))
    .unwrap();

    let service = DashboardService::from_config(open_repository(&config).unwrap(), &config);
    assert!(!service.policy().late_counts_as_present);

    let student = service.student_dashboard("stu-1", day(2024, 1, 15)).await.unwrap();
    // CS301 has one LATE day, no longer counted
    assert_eq!(student.courses[0].attendance.percentage, 80);
    assert_eq!(student.fees.pending, Money::from_rupees(50_000));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_new_attendance_shows_up_in_dashboards() {
    let service = DashboardService::new(InMemoryRepository::new(demo_snapshot()).unwrap());

    let before = service.faculty_dashboard("fac-1").await.unwrap();
    assert_eq!(before.courses[1].attendance.total, 10);

    service
        .repository()
        .insert_attendance(attendance("att-new", "stu-1", "course-3", 12, AttendanceStatus::Absent))
        .await
        .unwrap();

    let after = service.faculty_dashboard("fac-1").await.unwrap();
    assert_eq!(after.courses[1].attendance.total, 11);
    // 8 of 11
    assert_eq!(after.courses[1].attendance.percentage, 73);

    // the same day twice is rejected
    let again = attendance("att-dup", "stu-1", "course-3", 12, AttendanceStatus::Present);
    let duplicate = service.repository().insert_attendance(again).await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_tenant_settings_reach_the_dashboards() {
    let config = DashboardConfig::from_toml(
        "[tenant]\ncurrency = \"EUR\"\nstudent_id_prefix = \"SPU\"\n",
    )
    .unwrap();
    let service = DashboardService::from_config(open_repository(&config).unwrap(), &config);

    let student = service.student_dashboard("stu-2", day(2024, 1, 15)).await.unwrap();
    assert_eq!(student.roll_number, "SPU20230002");
    assert_eq!(student.fee_amounts.paid, "€1,25,000.00");
}

#[tokio::test(start_paused = true)]
async fn test_debounced_institution_search() {
    let config = DashboardConfig::default();
    let repo = open_repository(&config).unwrap();
    let service = Arc::new(DashboardService::from_config(repo, &config));

    let queries = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&queries);
    let debouncer = Debouncer::new(config.debounce_window(), move |term: String| {
        sink.lock().unwrap().push(term);
    });

    for term in ["r", "ri", "riv"] {
        debouncer.call(term.to_string()).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    tokio::time::sleep(config.debounce_window()).await;

    let terms = queries.lock().unwrap().clone();
    assert_eq!(terms, vec!["riv".to_string()]);

    let query = InstitutionQuery::search(terms[0].clone()).with_status(InstitutionStatus::Active);
    let rows = service.search_institutions(&query).await.unwrap();
    let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["inst-2"]);
}

#[tokio::test]
async fn test_export_faculty_courses() {
    let dir = scratch_dir("exports");
    let mut config = DashboardConfig::default();
    config.export.output_dir = dir.clone();

    let service = DashboardService::from_config(open_repository(&config).unwrap(), &config);
    let view = service.faculty_dashboard("fac-1").await.unwrap();

    let path = save_csv(&config.export.output_dir, "fac-1-courses", &view.courses).unwrap();
    let csv = std::fs::read_to_string(&path).unwrap();
    let mut lines = csv.lines();

    assert_eq!(
        lines.next(),
        Some("course_id,code,name,credits,enrolled,attendance")
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("\"course-1\",\"CS301\",\"Data Structures & Algorithms\",4,3,"));
    assert!(first.contains("\"percentage\":87"));
    assert_eq!(lines.count(), 1);

    std::fs::remove_dir_all(&dir).unwrap();
}
