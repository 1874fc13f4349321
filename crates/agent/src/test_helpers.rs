//! Shared test helpers for agent tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use studyagent_core::error::ProviderError;
use studyagent_core::message::Message;
use studyagent_core::note::Note;
use studyagent_core::provider::{
    EmbeddingRequest, EmbeddingResponse, Provider, ProviderRequest, ProviderResponse, Usage,
};
use studyagent_core::tool::{ComputeEngine, Encyclopedia, EncyclopediaPage, SearchHit, WebSearch};
use studyagent_notes::{InMemoryNoteStore, NoteRetriever};
use studyagent_tools::ToolGateway;

pub const WIKI_URL: &str = "https://en.wikipedia.org/wiki/Paris";

/// A mock provider that returns a sequence of scripted replies.
///
/// Each call to `complete` returns the next entry in the queue.
/// Panics if more calls are made than replies provided.
pub struct SequentialMockProvider {
    replies: Vec<Result<String, ProviderError>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl SequentialMockProvider {
    pub fn new(replies: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            replies,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let n = requests.len();
        requests.push(request);

        match self.replies.get(n) {
            Some(reply) => reply.clone().map(|t| make_text_response(&t)),
            None => panic!(
                "SequentialMockProvider: no more responses (call #{n}, have {})",
                self.replies.len()
            ),
        }
    }
}

type Script = Box<dyn Fn(&str) -> String + Send + Sync>;

/// A mock provider that picks its reply from the prompt text.
pub struct ScriptedProvider {
    script: Option<Script>,
}

impl ScriptedProvider {
    pub fn new(script: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self {
            script: Some(Box::new(script)),
        }
    }

    /// Every call fails with a network error.
    pub fn failing() -> Self {
        Self { script: None }
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let Some(script) = &self.script else {
            return Err(ProviderError::Network("connection refused".into()));
        };
        let prompt = request
            .messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        Ok(make_text_response(&script(prompt)))
    }
}

pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

pub struct FakeSearch;

#[async_trait]
impl WebSearch for FakeSearch {
    fn name(&self) -> &str {
        "fake_search"
    }

    async fn search(&self, query: &str) -> Vec<SearchHit> {
        vec![
            SearchHit {
                url: "https://a.example".into(),
                snippet: format!("First result for {query}"),
            },
            SearchHit {
                url: "https://b.example".into(),
                snippet: format!("Second result for {query}"),
            },
        ]
    }
}

pub struct FakeWiki;

#[async_trait]
impl Encyclopedia for FakeWiki {
    fn name(&self) -> &str {
        "fake_wiki"
    }

    async fn lookup(&self, _query: &str) -> EncyclopediaPage {
        EncyclopediaPage {
            url: WIKI_URL.into(),
            summary: "Paris is the capital and largest city of France.".into(),
        }
    }
}

pub struct FakeCompute;

#[async_trait]
impl ComputeEngine for FakeCompute {
    fn name(&self) -> &str {
        "fake_compute"
    }

    async fn compute(&self, _query: &str) -> String {
        "42".into()
    }
}

/// Embeds every text as the same unit vector.
pub struct FlatEmbedder;

#[async_trait]
impl Provider for FlatEmbedder {
    fn name(&self) -> &str {
        "flat_embedder"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::NotConfigured("completion".into()))
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, ProviderError> {
        Ok(EmbeddingResponse {
            embeddings: request.inputs.iter().map(|_| vec![1.0, 0.0]).collect(),
            model: request.model,
            usage: None,
        })
    }
}

/// A gateway wired to deterministic in-process tools.
pub fn fake_gateway() -> Arc<ToolGateway> {
    let notes = InMemoryNoteStore::with_notes(vec![
        Note::new("1", "Paris has been the French capital since 987."),
        Note::new("2", "The Seine runs through Paris."),
    ]);
    let retriever = NoteRetriever::new(Arc::new(notes), Arc::new(FlatEmbedder), "embed");
    Arc::new(ToolGateway::new(
        Arc::new(FakeSearch),
        Arc::new(FakeWiki),
        Arc::new(FakeCompute),
        Arc::new(retriever),
    ))
}
