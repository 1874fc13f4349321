//! In-memory note store: useful for testing and embedding-less runs.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use studyagent_core::error::NotesError;
use studyagent_core::note::{Note, NoteStore};
use tokio::sync::RwLock;

/// Holds the collection in a Vec. Nothing survives the process.
pub struct InMemoryNoteStore {
    notes: Arc<RwLock<Vec<Note>>>,
    saves: AtomicUsize,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::with_notes(Vec::new())
    }

    /// Seed the store with an existing collection.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: Arc::new(RwLock::new(notes)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Snapshot of the current collection.
    pub async fn notes(&self) -> Vec<Note> {
        self.notes.read().await.clone()
    }

    /// How many times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn load(&self) -> Result<Vec<Note>, NotesError> {
        Ok(self.notes.read().await.clone())
    }

    async fn save(&self, notes: &[Note]) -> Result<(), NotesError> {
        *self.notes.write().await = notes.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_by_default() {
        let store = InMemoryNoteStore::new();
        assert!(store.load().await.unwrap().is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn save_replaces_and_counts() {
        let store = InMemoryNoteStore::with_notes(vec![Note::new("a", "alpha")]);
        store
            .save(&[Note::new("b", "beta"), Note::new("c", "gamma")])
            .await
            .unwrap();

        let notes = store.notes().await;
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, "b");
        assert_eq!(store.save_count(), 1);
    }
}
