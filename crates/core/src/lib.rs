//! # Study Agent Core
//!
//! Domain types, traits, and error definitions for the plan/execute study
//! agent. This crate has **no I/O**. It defines the domain model that all
//! other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator is defined as a trait here. Implementations live in
//! their respective crates. This enables:
//! - Swapping backends via configuration
//! - Easy testing with scripted stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod evidence;
pub mod message;
pub mod note;
pub mod provider;
pub mod step;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{NotesError, ProviderError, ToolError};
pub use evidence::Evidence;
pub use message::{Message, Role};
pub use note::{Note, NoteStore, ScoredNote};
pub use provider::{Provider, ProviderRequest, ProviderResponse};
pub use step::Step;
pub use tool::{ComputeEngine, Encyclopedia, EncyclopediaPage, SearchHit, WebSearch};
