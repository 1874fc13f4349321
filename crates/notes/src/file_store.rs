//! File-based note store: the whole collection as one JSON array.
//!
//! Storage location defaults to `data/notes.json`. The file is read fully on
//! every load and rewritten fully on every save. Saves go through a sibling
//! temp file and a rename, so a reader never observes a half-written
//! collection.

use async_trait::async_trait;
use studyagent_core::error::NotesError;
use studyagent_core::note::{Note, NoteStore};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A JSON-file-backed note collection.
pub struct FileNoteStore {
    path: PathBuf,
}

impl FileNoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "notes.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl NoteStore for FileNoteStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self) -> Result<Vec<Note>, NotesError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "Notes file does not exist");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(NotesError::Storage(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        debug!(path = %self.path.display(), "Loading notes");
        serde_json::from_str(&content).map_err(|e| {
            NotesError::Corrupted(format!("{}: {e}", self.path.display()))
        })
    }

    async fn save(&self, notes: &[Note]) -> Result<(), NotesError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                NotesError::Storage(format!("Failed to create notes directory: {e}"))
            })?;
        }

        let content = serde_json::to_string_pretty(notes)
            .map_err(|e| NotesError::Storage(format!("Failed to serialize notes: {e}")))?;

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| NotesError::Storage(format!("Failed to write notes file: {e}")))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| NotesError::Storage(format!("Failed to replace notes file: {e}")))?;

        debug!(path = %self.path.display(), count = notes.len(), "Saved notes");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[tokio::test]
    async fn missing_file_is_empty_collection() {
        let dir = TempDir::new().unwrap();
        let store = FileNoteStore::new(dir.path().join("absent.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn loads_notes_without_embeddings() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"[{{"id":"1","text":"Ownership moves values"}},{{"id":"2","text":"Borrows are references","embedding":[0.5,0.5]}}]"#
        )
        .unwrap();

        let store = FileNoteStore::new(tmp.path());
        let notes = store.load().await.unwrap();
        assert_eq!(notes.len(), 2);
        assert!(notes[0].embedding.is_none());
        assert_eq!(notes[1].embedding, Some(vec![0.5, 0.5]));
    }

    #[tokio::test]
    async fn corrupted_file_is_error() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "this is not json").unwrap();

        let store = FileNoteStore::new(tmp.path());
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, NotesError::Corrupted(_)));
    }

    #[tokio::test]
    async fn save_creates_parent_and_roundtrips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("notes.json");
        let store = FileNoteStore::new(&path);

        let mut note = Note::new("n1", "Lifetimes bound references");
        note.embedding = Some(vec![0.25, -0.5]);
        store.save(&[note.clone()]).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Lifetimes bound references"));
        assert!(!store.temp_path().exists());

        let reloaded = FileNoteStore::new(&path).load().await.unwrap();
        assert_eq!(reloaded, vec![note]);
    }

    #[tokio::test]
    async fn save_replaces_whole_collection() {
        let dir = TempDir::new().unwrap();
        let store = FileNoteStore::new(dir.path().join("notes.json"));

        store
            .save(&[Note::new("a", "first"), Note::new("b", "second")])
            .await
            .unwrap();
        store.save(&[Note::new("c", "third")]).await.unwrap();

        let notes = store.load().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, "c");
    }
}
