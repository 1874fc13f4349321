//! Note trait and records: the persisted study notes the agent can search.
//!
//! The note collection is an external dataset. The agent only reads it and
//! annotates it with cached embeddings; it never adds or removes notes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::NotesError;

/// A single stored note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique ID for this note
    pub id: String,

    /// The note text
    pub text: String,

    /// Cached embedding of `text`, filled in lazily on first retrieval
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Note {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            embedding: None,
        }
    }

    /// Whether the note still needs an embedding computed.
    ///
    /// An empty vector counts as missing.
    pub fn needs_embedding(&self) -> bool {
        self.embedding.as_ref().is_none_or(|e| e.is_empty())
    }
}

/// A note ranked against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredNote {
    pub id: String,
    pub text: String,
    /// Cosine similarity to the query
    pub score: f32,
}

/// Whole-collection note storage.
///
/// The collection is always read fully and rewritten fully. Implementations
/// are not required to be safe against concurrent writers; callers serialize
/// access.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// The store name (e.g., "file", "in_memory").
    fn name(&self) -> &str;

    /// Load every note. A missing collection is an empty collection.
    async fn load(&self) -> std::result::Result<Vec<Note>, NotesError>;

    /// Replace the stored collection with `notes`.
    async fn save(&self, notes: &[Note]) -> std::result::Result<(), NotesError>;
}
