//! # Seed Data Generator
//!
//! Writes the demo campus to a snapshot file for development.
//!
//! ## Usage
//! ```bash
//! # Demo campus only
//! cargo run -p eduverse-data --bin seed
//!
//! # Demo campus plus 200 generated students
//! cargo run -p eduverse-data --bin seed -- --students 200
//!
//! # Specify output path
//! cargo run -p eduverse-data --bin seed -- --out ./data/campus.json
//!
//! # Roll numbers like SPU20230001 instead of ST20230001
//! cargo run -p eduverse-data --bin seed -- --prefix SPU
//! ```
//!
//! Generated students join Springfield University in semester 3, get
//! sequential roll numbers after the demo students, and are enrolled in
//! CS301 with one week of attendance.

use std::env;
use std::path::PathBuf;

use eduverse_core::types::AttendanceStatus;
use eduverse_data::demo::{
    self, attendance, enrollment, student_with_prefix, DEFAULT_STUDENT_ID_PREFIX,
};
use eduverse_data::{CampusRepository, InMemoryRepository};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// First names for generated students
const FIRST_NAMES: &[&str] = &[
    "Aarav", "Diya", "Kabir", "Meera", "Rohan", "Sara", "Vivaan", "Isha", "Arjun", "Anaya",
    "Noah", "Emma", "Liam", "Olivia", "Ethan", "Ava",
];

/// Last names for generated students
const LAST_NAMES: &[&str] = &[
    "Sharma", "Patel", "Iyer", "Khan", "Reddy", "Das", "Brown", "Garcia", "Miller", "Wilson",
];

/// Departments generated students are spread across
const DEPARTMENTS: &[&str] = &["Computer Science", "Mathematics"];

/// Demo students already use roll numbers 1-3
const FIRST_GENERATED_SEQUENCE: u32 = 4;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,eduverse=debug")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut students: u32 = 0;
    let mut out = PathBuf::from("./eduverse_demo.json");
    let mut prefix = DEFAULT_STUDENT_ID_PREFIX.to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--students" | "-s" => {
                if i + 1 < args.len() {
                    students = args[i + 1].parse().unwrap_or_else(|_| {
                        warn!(value = %args[i + 1], "Invalid --students value, using 0");
                        0
                    });
                    i += 1;
                }
            }
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--prefix" | "-p" => {
                if i + 1 < args.len() {
                    match args[i + 1].trim() {
                        "" => warn!("Empty --prefix value, keeping the default"),
                        value => prefix = value.to_string(),
                    }
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("EduVerse Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --students <N>  Extra students to generate (default: 0)");
                println!(
                    "  -o, --out <PATH>    Snapshot file path (default: ./eduverse_demo.json)"
                );
                println!("  -p, --prefix <STR>  Roll-number prefix (default: ST)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let repo = InMemoryRepository::new(demo::demo_snapshot_with_prefix(&prefix))?;
    info!(prefix = %prefix, "Demo campus built");

    for n in 0..students {
        let sequence = FIRST_GENERATED_SEQUENCE + n;
        let id = format!("stu-{}", sequence);
        let name = format!(
            "{} {}",
            FIRST_NAMES[n as usize % FIRST_NAMES.len()],
            LAST_NAMES[n as usize % LAST_NAMES.len()]
        );
        let department = DEPARTMENTS[n as usize % DEPARTMENTS.len()];

        repo.insert_user(student_with_prefix(&id, &name, department, &prefix, sequence))
            .await?;
        repo.insert_enrollment(enrollment(&id, "course-1")).await?;

        for jan_day in 2..=6 {
            let status = if (n + jan_day) % 7 == 0 {
                AttendanceStatus::Absent
            } else {
                AttendanceStatus::Present
            };
            repo.insert_attendance(attendance(
                &format!("att-{}-course-1-{}", id, jan_day),
                &id,
                "course-1",
                jan_day,
                status,
            ))
            .await?;
        }
    }

    repo.save(&out).await?;

    let snapshot = repo.snapshot().await?;
    println!("✓ Wrote {}", out.display());
    println!("  Institutions: {}", snapshot.institutions.len());
    println!("  Users:        {}", snapshot.users.len());
    println!("  Courses:      {}", snapshot.courses.len());
    println!("  Attendance:   {}", snapshot.attendance.len());

    Ok(())
}
