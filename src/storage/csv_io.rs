//! CSV file I/O with atomic writes
//!
//! Rows travel as header-keyed maps so record types can pick out the
//! columns they know about and ignore the rest.

use std::collections::HashMap;
use std::fs::{self, File};
use std::path::Path;

use csv::{Reader, Writer};

use crate::error::BankbookError;

/// Read a CSV file into one map per row, keyed by the header names.
///
/// A missing file is treated as an empty table, the same way an empty
/// container round-trips through storage.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<HashMap<String, String>>, BankbookError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = Reader::from_path(path)
        .map_err(|e| BankbookError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| BankbookError::Storage(format!("Failed to read {}: {}", path.display(), e)))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            BankbookError::Storage(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let row: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(record.iter().map(|field| field.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Write a CSV file atomically (write to temp, then rename).
pub fn write_rows_atomic<P: AsRef<Path>>(
    path: P,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<(), BankbookError> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            BankbookError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Create temp file in same directory (important for atomic rename)
    let temp_path = path.with_extension("csv.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| BankbookError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = Writer::from_writer(file);
    writer
        .write_record(headers)
        .map_err(|e| BankbookError::Storage(format!("Failed to write header row: {}", e)))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| BankbookError::Storage(format!("Failed to write row: {}", e)))?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| BankbookError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|e| BankbookError::Storage(format!("Failed to sync data: {}", e)))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| {
        // Try to clean up temp file if rename fails
        let _ = fs::remove_file(&temp_path);
        BankbookError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
