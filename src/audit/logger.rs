//! Audit logger for the append-only action log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{BankbookError, BankbookResult};

use super::entry::AuditEntry;

/// Writes audit entries to the log file, one JSON object per line
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry and flush
    ///
    /// Callers treat a failed append as non-fatal; a broken audit log must
    /// never abort the user's action.
    pub fn log(&self, entry: &AuditEntry) -> BankbookResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| BankbookError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| BankbookError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| BankbookError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| BankbookError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all entries in chronological order (oldest first)
    pub fn read_all(&self) -> BankbookResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| BankbookError::Io(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                BankbookError::Io(format!(
                    "Failed to read audit log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                BankbookError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::AuditAction;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("audit.log");
        (AuditLogger::new(log_path), temp_dir)
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();

        let entry = AuditEntry::new(AuditAction::Create, "account", 1, "courant");
        logger.log(&entry).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Create);
        assert_eq!(entries[0].detail, "courant");
    }

    #[test]
    fn test_entries_append_in_order() {
        let (logger, _temp) = create_test_logger();

        for i in 0..5 {
            let entry = AuditEntry::new(AuditAction::Paste, "operation", i, format!("batch-{}", i));
            logger.log(&entry).unwrap();
        }

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].detail, "batch-0");
        assert_eq!(entries[4].detail, "batch-4");
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();

        assert!(!logger.exists());
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_survives_reopen() {
        let (logger, temp) = create_test_logger();

        let entry = AuditEntry::new(AuditAction::Save, "statement", 1, "courant/2024-01-31");
        logger.log(&entry).unwrap();

        let logger2 = AuditLogger::new(temp.path().join("audit.log"));
        let entries = logger2.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Save);
    }
}
