//! # CSV Export
//!
//! Turns a list of uniform records into comma-separated text.
//!
//! ```text
//!   [{ "name": "John, Jr.", "semester": 3 }, ...]
//!                       │
//!                       ▼
//!   name,semester                 ← keys of the first record, in order
//!   "John, Jr.",3                 ← every value JSON-encoded
//! ```
//!
//! JSON string encoding does the quoting: a value with a comma or quote ends
//! up inside `"..."` with `\"` escapes. `null` and missing fields become
//! `""`. Writing the text to disk is left to the caller.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ExportError;

/// Quoted empty string emitted for null or missing fields.
const EMPTY_FIELD: &str = "\"\"";

/// Renders rows as CSV text. An empty slice gives an empty string.
///
/// ## Errors
/// - [`ExportError::NotARecord`] when a row does not serialize to an object
/// - [`ExportError::Serialize`] when serialization itself fails
///
/// ## Example
/// ```rust
/// use eduverse_core::export::to_csv;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Row { course: &'static str, attendance: u32 }
///
/// let csv = to_csv(&[Row { course: "Data Structures, II", attendance: 87 }]).unwrap();
/// assert_eq!(csv, "course,attendance\n\"Data Structures, II\",87");
/// ```
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String, ExportError> {
    let records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| to_record(index, row))
        .collect::<Result<Vec<_>, _>>()?;

    let Some(first) = records.first() else {
        return Ok(String::new());
    };

    let headers: Vec<&String> = first.keys().collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| h.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );

    for record in &records {
        let cells = headers
            .iter()
            .map(|header| encode_cell(record.get(header.as_str())))
            .collect::<Result<Vec<_>, _>>()?;
        lines.push(cells.join(","));
    }

    Ok(lines.join("\n"))
}

fn to_record<T: Serialize>(index: usize, row: &T) -> Result<Map<String, Value>, ExportError> {
    match serde_json::to_value(row)? {
        Value::Object(map) => Ok(map),
        _ => Err(ExportError::NotARecord { index }),
    }
}

fn encode_cell(value: Option<&Value>) -> Result<String, ExportError> {
    match value {
        None | Some(Value::Null) => Ok(EMPTY_FIELD.to_string()),
        Some(value) => Ok(serde_json::to_string(value)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_follows_first_record_key_order() {
        let rows = vec![
            json!({ "zeta": 1, "alpha": 2, "mid": 3 }),
            json!({ "alpha": 5, "mid": 6, "zeta": 4 }),
        ];
        let csv = to_csv(&rows).unwrap();
        assert_eq!(csv, "zeta,alpha,mid\n1,2,3\n4,5,6");
    }

    #[test]
    fn test_values_are_json_encoded() {
        let rows = vec![json!({ "name": "Doe, \"JD\" John", "active": true })];
        let csv = to_csv(&rows).unwrap();
        assert_eq!(csv, "name,active\n\"Doe, \\\"JD\\\" John\",true");
    }

    #[test]
    fn test_null_and_missing_fields_are_empty() {
        let rows = vec![
            json!({ "id": "s1", "phone": null, "semester": 0 }),
            json!({ "id": "s2" }),
        ];
        let csv = to_csv(&rows).unwrap();
        assert_eq!(csv, "id,phone,semester\n\"s1\",\"\",0\n\"s2\",\"\",\"\"");
    }

    #[test]
    fn test_extra_fields_in_later_rows_are_dropped() {
        let rows = vec![json!({ "a": 1 }), json!({ "a": 2, "b": 3 })];
        assert_eq!(to_csv(&rows).unwrap(), "a\n1\n2");
    }

    #[test]
    fn test_empty_input() {
        let rows: Vec<Value> = Vec::new();
        assert_eq!(to_csv(&rows).unwrap(), "");
    }

    #[test]
    fn test_non_record_row_is_rejected() {
        let rows = vec![json!({ "a": 1 }), json!(42)];
        assert!(matches!(
            to_csv(&rows),
            Err(ExportError::NotARecord { index: 1 })
        ));
    }

    #[test]
    fn test_struct_rows_use_declaration_order() {
        #[derive(Serialize)]
        struct Row {
            student: String,
            percentage: i64,
            grade: &'static str,
        }

        let rows = vec![Row {
            student: "Jane Smith".to_string(),
            percentage: 91,
            grade: "A+",
        }];
        assert_eq!(
            to_csv(&rows).unwrap(),
            "student,percentage,grade\n\"Jane Smith\",91,\"A+\""
        );
    }
}
