use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Transcript not found: {0}")]
    NotFound(String),
}

/// Flat-text chat transcripts, one file per saved conversation.
pub struct TranscriptStore {
    base_path: PathBuf,
}

impl TranscriptStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub async fn initialize(&self) -> Result<(), TranscriptError> {
        fs::create_dir_all(&self.base_path).await?;
        tracing::info!("Transcript store initialized at {:?}", self.base_path);
        Ok(())
    }

    /// Name used when the user saves without giving one.
    pub fn default_name() -> String {
        format!("chat_{}", Utc::now().format("%Y%m%d_%H%M%S"))
    }

    /// Save transcript lines under `name`. The name is sanitized to a
    /// filesystem-safe form; the sanitized name is returned.
    pub async fn save(&self, name: &str, lines: &[String]) -> Result<String, TranscriptError> {
        let name = sanitize_name(name);
        let path = self.transcript_path(&name);

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        let mut content = lines.join("\n");
        content.push('\n');

        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &path).await?;

        tracing::debug!("Saved transcript: {}", name);
        Ok(name)
    }

    pub async fn load(&self, name: &str) -> Result<Vec<String>, TranscriptError> {
        let name = sanitize_name(name);
        let path = self.transcript_path(&name);

        if !path.exists() {
            return Err(TranscriptError::NotFound(name));
        }

        let content = fs::read_to_string(&path).await?;
        let lines = content
            .lines()
            .map(|line| line.to_string())
            .collect::<Vec<_>>();

        tracing::info!("Loaded transcript: {}", name);
        Ok(lines)
    }

    pub async fn delete(&self, name: &str) -> Result<(), TranscriptError> {
        let name = sanitize_name(name);
        let path = self.transcript_path(&name);

        if !path.exists() {
            return Err(TranscriptError::NotFound(name));
        }

        fs::remove_file(&path).await?;
        tracing::info!("Deleted transcript: {}", name);
        Ok(())
    }

    /// Saved transcript names, sorted.
    pub async fn list(&self) -> Result<Vec<String>, TranscriptError> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.base_path).await?;

        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry.file_name().to_str() {
                if let Some(stem) = name.strip_suffix(".txt") {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    fn transcript_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.txt", name))
    }
}

/// Keep transcript names inside the store directory: anything outside
/// alphanumerics, dash, underscore and dot collapses to underscore.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(['_', '.']).is_empty() {
        TranscriptStore::default_name()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transcript_lifecycle() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(temp_dir.path());

        store.initialize().await.unwrap();

        let lines = vec!["You: hi".to_string(), "Assistant: hello".to_string()];
        let name = store.save("monday", &lines).await.unwrap();
        assert_eq!(name, "monday");

        let loaded = store.load("monday").await.unwrap();
        assert_eq!(loaded, lines);

        let names = store.list().await.unwrap();
        assert_eq!(names, vec!["monday".to_string()]);
    }

    #[tokio::test]
    async fn test_load_missing_transcript() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(temp_dir.path());
        store.initialize().await.unwrap();

        let err = store.load("nope").await.unwrap_err();
        assert!(matches!(err, TranscriptError::NotFound(name) if name == "nope"));
    }

    #[tokio::test]
    async fn test_list_is_sorted_and_ignores_other_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(temp_dir.path());
        store.initialize().await.unwrap();

        store.save("beta", &["b".to_string()]).await.unwrap();
        store.save("alpha", &["a".to_string()]).await.unwrap();
        fs::write(temp_dir.path().join("stray.json"), "{}")
            .await
            .unwrap();

        let names = store.list().await.unwrap();
        assert_eq!(names, vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[tokio::test]
    async fn test_names_are_sanitized() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(temp_dir.path());
        store.initialize().await.unwrap();

        let name = store
            .save("../escape attempt", &["x".to_string()])
            .await
            .unwrap();
        assert_eq!(name, ".._escape_attempt");
        assert!(temp_dir.path().join(".._escape_attempt.txt").exists());

        // Round-trips through the same sanitizer.
        let loaded = store.load("../escape attempt").await.unwrap();
        assert_eq!(loaded, vec!["x".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_removes_saved_transcript() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(temp_dir.path());
        store.initialize().await.unwrap();

        store.save("gone", &["x".to_string()]).await.unwrap();
        store.delete("gone").await.unwrap();

        assert!(matches!(
            store.load("gone").await.unwrap_err(),
            TranscriptError::NotFound(_)
        ));
        assert!(matches!(
            store.delete("gone").await.unwrap_err(),
            TranscriptError::NotFound(_)
        ));
    }

    #[test]
    fn test_default_name_shape() {
        let name = TranscriptStore::default_name();
        assert!(name.starts_with("chat_"));
        assert_eq!(name.len(), "chat_20260825_120000".len());
    }
}
