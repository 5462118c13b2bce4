//! # Identifier Generators
//!
//! Human-readable roll numbers and employee codes.
//!
//! ```text
//!   Student:   ST 2024 0001        Employee:  SPU CSE 007
//!              ── ──── ────                   ─── ─── ───
//!              │   │    └ sequence, 4 digits   │   │   └ sequence, 3 digits
//!              │   └ intake year, 4 digits     │   └ department, 3 letters
//!              └ institution prefix            └ institution prefix
//! ```
//!
//! Fixed widths mean a plain string sort orders ids by sequence within one
//! prefix and year. Uniqueness is enforced by whoever stores the ids.

/// Builds a student id: prefix + 4-digit year + 4-digit sequence.
///
/// Sequences above 9999 are printed in full rather than truncated.
///
/// ## Example
/// ```rust
/// use eduverse_core::identifiers::generate_student_id;
///
/// assert_eq!(generate_student_id("ST", 2024, 1), "ST20240001");
/// ```
pub fn generate_student_id(prefix: &str, year: i32, sequence: u32) -> String {
    format!("{}{:04}{:04}", prefix, year, sequence)
}

/// Builds an employee id: prefix + department code + 3-digit sequence.
///
/// The department code is the first three characters of the department name,
/// upper-cased. Names shorter than three characters are used whole.
///
/// ## Example
/// ```rust
/// use eduverse_core::identifiers::generate_employee_id;
///
/// assert_eq!(generate_employee_id("SPU", "Computer Science", 7), "SPUCOM007");
/// assert_eq!(generate_employee_id("SPU", "IT", 12), "SPUIT012");
/// ```
pub fn generate_employee_id(prefix: &str, department: &str, sequence: u32) -> String {
    let dept_code: String = department.chars().take(3).collect::<String>().to_uppercase();
    format!("{}{}{:03}", prefix, dept_code, sequence)
}
