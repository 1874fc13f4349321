//! Note retriever: lazy embedding cache plus top-k similarity search.

use std::sync::Arc;
use studyagent_core::error::NotesError;
use studyagent_core::note::{Note, NoteStore, ScoredNote};
use studyagent_core::provider::{EmbeddingRequest, Provider};
use tracing::{debug, info};

use crate::vector::rank_notes;

/// Searches a note collection by embedding similarity.
///
/// Embeddings are computed only for notes that lack one, in a single batch,
/// and written back to the store before any ranking happens.
pub struct NoteRetriever {
    store: Arc<dyn NoteStore>,
    embedder: Arc<dyn Provider>,
    embedding_model: String,
}

impl NoteRetriever {
    pub fn new(
        store: Arc<dyn NoteStore>,
        embedder: Arc<dyn Provider>,
        embedding_model: impl Into<String>,
    ) -> Self {
        Self {
            store,
            embedder,
            embedding_model: embedding_model.into(),
        }
    }

    pub fn store(&self) -> &Arc<dyn NoteStore> {
        &self.store
    }

    /// Return up to `k` notes ranked by similarity to `query`, best first.
    ///
    /// An empty collection returns no results and never touches the embedder.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredNote>, NotesError> {
        let mut notes = self.store.load().await?;
        if notes.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        self.ensure_embeddings(&mut notes).await?;

        let query_embedding = self
            .embed_batch(vec![query.to_string()])
            .await?
            .pop()
            .unwrap_or_default();

        let results = rank_notes(&notes, &query_embedding, k);
        debug!(query, count = results.len(), "Ranked notes");
        Ok(results)
    }

    /// Embed every note that is missing an embedding and persist the result.
    ///
    /// Returns how many notes were embedded.
    pub async fn index(&self) -> Result<usize, NotesError> {
        let mut notes = self.store.load().await?;
        self.ensure_embeddings(&mut notes).await
    }

    /// Fill in missing embeddings in `notes`, saving the collection once if
    /// anything changed. Vectors are attached only after the whole batch
    /// succeeded.
    async fn ensure_embeddings(&self, notes: &mut [Note]) -> Result<usize, NotesError> {
        let pending: Vec<usize> = notes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.needs_embedding())
            .map(|(i, _)| i)
            .collect();

        if pending.is_empty() {
            return Ok(0);
        }

        let texts = pending.iter().map(|&i| notes[i].text.clone()).collect();
        let vectors = self.embed_batch(texts).await?;

        for (&i, vector) in pending.iter().zip(vectors) {
            notes[i].embedding = Some(vector);
        }

        self.store.save(notes).await?;
        info!(count = pending.len(), store = self.store.name(), "Cached note embeddings");
        Ok(pending.len())
    }

    async fn embed_batch(&self, inputs: Vec<String>) -> Result<Vec<Vec<f32>>, NotesError> {
        let expected = inputs.len();
        let response = self
            .embedder
            .embed(EmbeddingRequest {
                model: self.embedding_model.clone(),
                inputs,
            })
            .await
            .map_err(|e| NotesError::EmbeddingFailed(e.to_string()))?;

        if response.embeddings.len() != expected {
            return Err(NotesError::EmbeddingFailed(format!(
                "expected {expected} vectors, got {}",
                response.embeddings.len()
            )));
        }
        Ok(response.embeddings)
    }
}
