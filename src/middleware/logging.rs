//! Action logging
//!
//! Appends one human-readable line per user action to the audit file.
//! Writing is best effort: failures go to the operator log and the request
//! carries on.

use chrono::{DateTime, SecondsFormat, Utc};
use log::error;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::storage::filesystem::{append_line, ensure_parent_dir};

/// Subject recorded when nobody is logged in
pub const ANONYMOUS_SUBJECT: &str = "anonimo";

/// One line of the audit trail
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub subject: String,
}

impl LogEntry {
    pub fn new(action: &str, subject: Option<&str>) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.to_string(),
            subject: subject
                .filter(|s| !s.is_empty())
                .unwrap_or(ANONYMOUS_SUBJECT)
                .to_string(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.action,
            self.subject
        )
    }
}

/// Append-only writer for the action log file
#[derive(Debug)]
pub struct ActionLogger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ActionLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `action` performed by `subject` (or by an anonymous visitor).
    ///
    /// Never fails; write errors are only reported through `log::error!`.
    pub async fn log(&self, action: &str, subject: Option<&str>) {
        let entry = LogEntry::new(action, subject);
        let _guard = self.write_lock.lock().await;

        let result = match ensure_parent_dir(&self.path).await {
            Ok(()) => append_line(&self.path, &entry.to_string()).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            error!("Failed to record action {}: {}", entry.action, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn entry_formats_as_bracketed_iso_line() {
        let entry = LogEntry {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
            action: "LOGIN".into(),
            subject: "ana@x.es".into(),
        };
        assert_eq!(entry.to_string(), "[2024-03-09T14:05:07.000Z] LOGIN: ana@x.es");
    }

    #[test]
    fn missing_or_empty_subject_is_anonymous() {
        assert_eq!(LogEntry::new("VISITA_HOME", None).subject, ANONYMOUS_SUBJECT);
        assert_eq!(LogEntry::new("VISITA_HOME", Some("")).subject, ANONYMOUS_SUBJECT);
    }

    #[tokio::test]
    async fn appends_lines_creating_directory_and_file() {
        let td = TempDir::new().unwrap();
        let logger = ActionLogger::new(td.path().join("data").join("logs.txt"));

        logger.log("VISITA_HOME", None).await;
        logger.log("LOGIN", Some("ana@x.es")).await;

        let contents = std::fs::read_to_string(logger.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] VISITA_HOME: anonimo"));
        assert!(lines[1].ends_with("] LOGIN: ana@x.es"));
    }

    #[tokio::test]
    async fn write_failure_does_not_propagate() {
        let td = TempDir::new().unwrap();
        let blocked = td.path().join("logs.txt");
        std::fs::create_dir_all(&blocked).unwrap();

        let logger = ActionLogger::new(&blocked);
        // Completes without panicking even though the target is a directory
        logger.log("VISITA_HOME", None).await;

        assert!(blocked.is_dir());
    }
}
