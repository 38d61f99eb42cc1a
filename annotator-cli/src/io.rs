//! File I/O for native CLI

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use annotator_core::DownloadSink;

/// Load a text file, returning (title, content)
pub fn load_file(path: &Path) -> Result<(String, String)> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;

    let content = fs::read_to_string(&canonical)
        .with_context(|| format!("Failed to read file: {}", canonical.display()))?;

    let title = canonical
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Untitled".to_string());

    Ok((title, content))
}

/// Create `dir` if needed and return it
pub fn ensure_dir(dir: PathBuf) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    Ok(dir)
}

/// Get the ~/.annotator directory path, creating it if needed
pub fn annotator_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    ensure_dir(home.join(".annotator"))
}

/// Writes exported documents into a directory
pub struct FileSink {
    dir: PathBuf,
    last_written: Option<PathBuf>,
}

impl FileSink {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            last_written: None,
        }
    }

    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }
}

impl DownloadSink for FileSink {
    fn send(&mut self, content: &str, filename: &str) -> Result<()> {
        let path = self.dir.join(filename);
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = content.len(), "wrote export");
        self.last_written = Some(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotator_core::{CandidateSelection, Session};

    #[test]
    fn test_file_sink_writes_annotations_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path().to_path_buf());

        let mut session = Session::default();
        session.set_label("INGREDIENT");
        session.save_candidate(Some(CandidateSelection::new(10, 15, " fresh ")));
        assert!(session.finalize(&mut sink));

        let written = fs::read_to_string(dir.path().join("annotations.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"annotations": [[10, 15, "INGREDIENT", "fresh"]]})
        );
        assert_eq!(sink.last_written(), Some(dir.path().join("annotations.json").as_path()));
        assert!(session.store.is_empty());
    }

    #[test]
    fn test_failed_write_keeps_annotations() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path().join("missing"));

        let mut session = Session::default();
        session.save_candidate(Some(CandidateSelection::new(0, 5, "Lemon")));
        assert!(!session.finalize(&mut sink));
        assert_eq!(session.store.len(), 1);
        assert!(session
            .status_message
            .as_deref()
            .unwrap_or_default()
            .starts_with("Export failed"));
    }

    #[test]
    fn test_load_file_uses_file_name_as_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipe.txt");
        fs::write(&path, "Lemon Herb").unwrap();

        let (title, content) = load_file(&path).unwrap();
        assert_eq!(title, "recipe.txt");
        assert_eq!(content, "Lemon Herb");
        assert!(load_file(&dir.path().join("nope.txt")).is_err());
    }
}
