//! # CSV Files
//!
//! Writes dashboard tables to `{filename}.csv` under the configured export
//! directory. The text comes from [`eduverse_core::export::to_csv`].

use std::path::{Path, PathBuf};

use eduverse_core::export::to_csv;
use serde::Serialize;
use tracing::info;

use crate::error::{DashboardError, DashboardResult};

/// Serializes `rows` and writes them to `dir/{filename}.csv`, creating `dir`
/// if needed. An existing file is replaced.
///
/// Returns the path written.
pub fn save_csv<T: Serialize>(dir: &Path, filename: &str, rows: &[T]) -> DashboardResult<PathBuf> {
    let filename = filename.trim();
    if filename.is_empty() || filename.contains(['/', '\\']) || filename == ".." {
        return Err(DashboardError::Io(format!(
            "invalid export file name: '{}'",
            filename
        )));
    }

    let csv = to_csv(rows)?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.csv", filename));
    std::fs::write(&path, csv)?;

    info!(?path, rows = rows.len(), "Exported CSV");
    Ok(path)
}
