//! File system operations
//!
//! Async helpers shared by the record store and the action logger.

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::StorageError;

/// Create a directory and its parents if missing
pub async fn create_directory(path: &Path) -> Result<(), StorageError> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| StorageError::io(path, e))
}

/// Create the directory containing `file` if missing
pub async fn ensure_parent_dir(file: &Path) -> Result<(), StorageError> {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_directory(parent).await,
        _ => Ok(()),
    }
}

/// Replace `path` with `contents` by writing a sibling temp file and renaming it.
///
/// Readers see either the old document or the new one, never a partial write.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let temp_path = temp_path_for(path);

    fs::write(&temp_path, contents)
        .await
        .map_err(|e| StorageError::io(&temp_path, e))?;

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(StorageError::io(path, e));
    }

    Ok(())
}

/// Append a single line to `path`, creating the file if needed
pub async fn append_line(path: &Path, line: &str) -> Result<(), StorageError> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| StorageError::io(path, e))?;

    let mut buffer = String::with_capacity(line.len() + 1);
    buffer.push_str(line);
    buffer.push('\n');

    file.write_all(buffer.as_bytes())
        .await
        .map_err(|e| StorageError::io(path, e))?;
    file.flush().await.map_err(|e| StorageError::io(path, e))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn ensure_parent_dir_is_idempotent() {
        let td = TempDir::new().unwrap();
        let file = td.path().join("a").join("b").join("records.json");

        ensure_parent_dir(&file).await.unwrap();
        ensure_parent_dir(&file).await.unwrap();

        assert!(td.path().join("a").join("b").is_dir());
    }

    #[tokio::test]
    async fn write_atomic_replaces_contents_and_leaves_no_temp_file() {
        let td = TempDir::new().unwrap();
        let file = td.path().join("doc.json");

        write_atomic(&file, b"[1]").await.unwrap();
        write_atomic(&file, b"[1,2]").await.unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "[1,2]");
        assert!(!td.path().join("doc.json.tmp").exists());
    }

    #[tokio::test]
    async fn append_line_adds_newline_terminated_lines() {
        let td = TempDir::new().unwrap();
        let file = td.path().join("log.txt");

        append_line(&file, "first").await.unwrap();
        append_line(&file, "second").await.unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "first\nsecond\n");
    }

    #[tokio::test]
    async fn append_line_reports_the_failing_path() {
        let td = TempDir::new().unwrap();
        // A directory cannot be opened for appending
        let err = append_line(td.path(), "line").await.unwrap_err();
        assert!(err.to_string().contains(&td.path().display().to_string()));
    }
}
