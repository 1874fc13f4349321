//! Note retrieval for the study agent.
//!
//! Notes live in a [`NoteStore`](studyagent_core::NoteStore). The
//! [`NoteRetriever`] fills in missing embeddings on demand, persists them
//! once, and ranks notes against a query by cosine similarity.

pub mod file_store;
pub mod in_memory;
pub mod retriever;
pub mod vector;

pub use file_store::FileNoteStore;
pub use in_memory::InMemoryNoteStore;
pub use retriever::NoteRetriever;
pub use vector::{cosine_similarity, rank_notes};
