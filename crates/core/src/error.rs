//! Error types for the study agent domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.
//!
//! None of these are fatal to an agent run: every stage has a local
//! fallback. They exist so collaborators can report *why* they fell back.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool request failed: {tool_name}: {reason}")]
    RequestFailed { tool_name: String, reason: String },

    #[error("Tool returned status {status}: {tool_name}")]
    BadStatus { tool_name: String, status: u16 },

    #[error("Unexpected response from {tool_name}: {reason}")]
    InvalidResponse { tool_name: String, reason: String },
}

#[derive(Debug, Error)]
pub enum NotesError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Corrupted notes collection: {0}")]
    Corrupted(String),

    #[error("Embedding generation failed: {0}")]
    EmbeddingFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = ToolError::BadStatus {
            tool_name: "wikipedia".into(),
            status: 404,
        };
        assert!(err.to_string().contains("wikipedia"));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn notes_error_boxes_for_the_cli() {
        let err: Box<dyn std::error::Error> =
            NotesError::EmbeddingFailed("expected 3 vectors, got 2".into()).into();
        assert!(err.to_string().contains("expected 3 vectors"));
    }
}
