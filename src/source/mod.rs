//! Export file discovery and loading
//!
//! Large conversations are split across `message_1.json`, `message_2.json`,
//! ... inside the export directory. Each file carries the participant list
//! and a slice of the message sequence; loading merges them back into one
//! payload. The core assumes time-ordered input, so merged messages are
//! sorted by raw timestamp here.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::RawExport;
use crate::error::AppError;

/// Discover export files. A file path is used as-is; a directory is scanned
/// recursively for `message_*.json`.
pub(crate) fn find_export_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let pattern = format!("{}/**/message_*.json", path.display());
    let mut files = Vec::new();
    if let Ok(entries) = glob::glob(&pattern) {
        for entry in entries.flatten() {
            files.push(entry);
        }
    }
    files.sort();
    files
}

fn parse_export_file(path: &Path) -> Result<RawExport, AppError> {
    let content = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| AppError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Parse every discovered file and merge into a single payload: participant
/// union in first-seen order, messages sorted by raw timestamp (stable, so
/// equal stamps keep file order).
pub(crate) fn load_export(files: &[PathBuf]) -> Result<RawExport, AppError> {
    let exports = files
        .par_iter()
        .map(|path| parse_export_file(path))
        .collect::<Result<Vec<_>, _>>()?;

    let mut merged = RawExport::default();
    for export in exports {
        for name in export.participants {
            if !merged.participants.contains(&name) {
                merged.participants.push(name);
            }
        }
        merged.messages.extend(export.messages);
    }

    merged
        .messages
        .sort_by_key(|m| m.timestamp.unwrap_or(i64::MIN));

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn discovers_message_files_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "message_2.json", "{}");
        write(dir.path(), "message_1.json", "{}");
        write(dir.path(), "other.json", "{}");
        let files = find_export_files(dir.path());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["message_1.json", "message_2.json"]);
    }

    #[test]
    fn single_file_path_is_used_directly() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "export.json", "{}");
        assert_eq!(find_export_files(&path), vec![path]);
    }

    #[test]
    fn merges_participants_and_sorts_messages() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(
            dir.path(),
            "message_1.json",
            r#"{"participants": ["Anna Svensson", "Bo Lund"],
                "messages": [{"senderName": "Bo Lund", "type": "text",
                              "text": "senare", "timestamp": 2000000}]}"#,
        );
        let b = write(
            dir.path(),
            "message_2.json",
            r#"{"participants": ["Anna Svensson", "Bo Lund"],
                "messages": [{"senderName": "Anna Svensson", "type": "text",
                              "text": "tidigare", "timestamp": 1000000}]}"#,
        );
        let export = load_export(&[a, b]).unwrap();
        assert_eq!(export.participants, vec!["Anna Svensson", "Bo Lund"]);
        let stamps: Vec<_> = export.messages.iter().map(|m| m.timestamp.unwrap()).collect();
        assert_eq!(stamps, vec![1_000_000, 2_000_000]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_export(&[PathBuf::from("/no/such/file.json")]).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.json"));
    }

    #[test]
    fn invalid_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "message_1.json", "not json");
        let err = load_export(&[path]).unwrap_err();
        assert!(err.to_string().contains("message_1.json"));
    }
}
