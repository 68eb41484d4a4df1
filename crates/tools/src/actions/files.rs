//! Filesystem actions: deletion and filename search.

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::task;
use walkdir::{DirEntry, WalkDir};

use crate::error::{ActionError, ActionResult};

/// Most matches a search reports before stopping.
pub const SEARCH_RESULT_LIMIT: usize = 50;

/// Delete a file or directory. A missing path is a normal answer, not
/// a fault.
pub async fn delete_path(path: &str) -> ActionResult<String> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(ActionError::InvalidArgument(
            "path cannot be empty".to_string(),
        ));
    }

    let target = Path::new(trimmed);
    if target.is_dir() {
        fs::remove_dir_all(target).await?;
        Ok(format!("Directory removed: {trimmed}"))
    } else if target.is_file() {
        fs::remove_file(target).await?;
        Ok(format!("File removed: {trimmed}"))
    } else {
        Ok("Path not found.".to_string())
    }
}

/// Case-insensitive filename search under `root`. Hidden directories are
/// skipped; the walk stops at `limit` matches.
pub async fn search_files(pattern: &str, root: PathBuf, limit: usize) -> ActionResult<String> {
    let display_pattern = pattern.trim().to_string();
    if display_pattern.is_empty() {
        return Err(ActionError::InvalidArgument(
            "search pattern cannot be empty".to_string(),
        ));
    }
    let needle = display_pattern.to_lowercase();

    task::spawn_blocking(move || {
        let mut matches = Vec::new();
        let walker = WalkDir::new(&root).follow_links(false).into_iter();

        for entry in walker.filter_entry(|entry| !is_hidden(entry)) {
            let Ok(entry) = entry else { continue };
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_lowercase();
            if name.contains(&needle) {
                matches.push(entry.path().display().to_string());
                if matches.len() >= limit {
                    break;
                }
            }
        }

        if matches.is_empty() {
            Ok(format!("No files matching '{display_pattern}' found."))
        } else {
            let mut lines = vec![format!("Found {} file(s):", matches.len())];
            lines.extend(matches);
            Ok(lines.join("\n"))
        }
    })
    .await
    .map_err(|e| ActionError::OperationFailed(e.to_string()))?
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    async fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.unwrap();
        }
        fs::write(path, "x").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("scratch.txt");
        touch(&file).await;

        let message = delete_path(file.to_str().unwrap()).await.unwrap();
        assert!(message.starts_with("File removed:"));
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn test_delete_directory_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sub");
        touch(&nested.join("inner.txt")).await;

        let message = delete_path(nested.to_str().unwrap()).await.unwrap();
        assert!(message.starts_with("Directory removed:"));
        assert!(!nested.exists());
    }

    #[tokio::test]
    async fn test_delete_missing_path_is_a_message() {
        let message = delete_path("/tmp/deskhand-nonexistent-e5c1").await.unwrap();
        assert_eq!(message, "Path not found.");
    }

    #[tokio::test]
    async fn test_search_skips_hidden_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("notes.txt")).await;
        touch(&dir.path().join("sub/more-notes.txt")).await;
        touch(&dir.path().join(".cache/secret-notes.txt")).await;

        let report = search_files("notes", dir.path().to_path_buf(), SEARCH_RESULT_LIMIT)
            .await
            .unwrap();
        assert!(report.starts_with("Found 2 file(s):"));
        assert!(report.contains("notes.txt"));
        assert!(!report.contains("secret-notes"));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("README.md")).await;

        let report = search_files("readme", dir.path().to_path_buf(), SEARCH_RESULT_LIMIT)
            .await
            .unwrap();
        assert!(report.contains("README.md"));
    }

    #[tokio::test]
    async fn test_search_respects_limit() {
        let dir = tempfile::tempdir().unwrap();
        for index in 0..5 {
            touch(&dir.path().join(format!("match-{index}.log"))).await;
        }

        let report = search_files("match", dir.path().to_path_buf(), 3)
            .await
            .unwrap();
        assert!(report.starts_with("Found 3 file(s):"));
    }

    #[tokio::test]
    async fn test_search_reports_no_matches() {
        let dir = tempfile::tempdir().unwrap();

        let report = search_files("ghost", dir.path().to_path_buf(), SEARCH_RESULT_LIMIT)
            .await
            .unwrap();
        assert_eq!(report, "No files matching 'ghost' found.");
    }

    #[tokio::test]
    async fn test_empty_pattern_rejected() {
        let err = search_files("  ", PathBuf::from("/tmp"), SEARCH_RESULT_LIMIT)
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::InvalidArgument(_)));
    }
}
