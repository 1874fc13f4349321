//! Tool gateway: maps a plan step to the collaborator that serves it.
//!
//! | step      | collaborator     | evidence                              |
//! |-----------|------------------|---------------------------------------|
//! | Search    | web search       | one item per hit                      |
//! | Wikipedia | encyclopedia     | one item, the page summary            |
//! | Math      | compute engine   | one item labelled `WolframAlpha`      |
//! | Notes     | note retriever   | one `notes:<id>` item per ranked note |
//! | others    | none             | nothing                               |
//!
//! The gateway never fails. Collaborators own their fallbacks, and a note
//! retrieval error is logged and produces no evidence.

use std::sync::Arc;
use studyagent_config::AppConfig;
use studyagent_core::evidence::{Evidence, WOLFRAM_SOURCE};
use studyagent_core::note::NoteStore;
use studyagent_core::provider::Provider;
use studyagent_core::step::Step;
use studyagent_core::tool::{ComputeEngine, Encyclopedia, WebSearch};
use studyagent_notes::{FileNoteStore, NoteRetriever};
use tracing::{debug, warn};

use crate::{TavilySearch, WikipediaLookup, WolframCompute};

pub struct ToolGateway {
    search: Arc<dyn WebSearch>,
    encyclopedia: Arc<dyn Encyclopedia>,
    compute: Arc<dyn ComputeEngine>,
    notes: Arc<NoteRetriever>,
    notes_top_k: usize,
}

impl ToolGateway {
    pub fn new(
        search: Arc<dyn WebSearch>,
        encyclopedia: Arc<dyn Encyclopedia>,
        compute: Arc<dyn ComputeEngine>,
        notes: Arc<NoteRetriever>,
    ) -> Self {
        Self {
            search,
            encyclopedia,
            compute,
            notes,
            notes_top_k: 4,
        }
    }

    pub fn with_notes_top_k(mut self, k: usize) -> Self {
        self.notes_top_k = k;
        self
    }

    /// Wire the HTTP tools and a file-backed note retriever from config.
    ///
    /// `embedder` computes note and query embeddings.
    pub fn from_config(config: &AppConfig, embedder: Arc<dyn Provider>) -> Self {
        let tools = &config.tools;
        let store: Arc<dyn NoteStore> = Arc::new(FileNoteStore::new(&config.notes.path));
        let retriever = NoteRetriever::new(store, embedder, &config.notes.embedding_model);

        Self::new(
            Arc::new(TavilySearch::new(
                tools.tavily_api_key.clone(),
                tools.search_max_results,
                tools.request_timeout_secs,
            )),
            Arc::new(WikipediaLookup::new(&tools.wikipedia_url, tools.request_timeout_secs)),
            Arc::new(WolframCompute::new(
                tools.wolfram_app_id.clone(),
                tools.request_timeout_secs,
            )),
            Arc::new(retriever),
        )
        .with_notes_top_k(config.agent.notes_top_k)
    }

    pub fn notes(&self) -> &Arc<NoteRetriever> {
        &self.notes
    }

    /// Run `step` against `query` and return the evidence it produced.
    pub async fn run(&self, step: &Step, query: &str) -> Vec<Evidence> {
        let evidence = match step {
            Step::Search => self
                .search
                .search(query)
                .await
                .into_iter()
                .map(|hit| Evidence::new(hit.url, hit.snippet))
                .collect(),
            Step::Wikipedia => {
                let page = self.encyclopedia.lookup(query).await;
                vec![Evidence::new(page.url, page.summary)]
            }
            Step::Math => {
                let result = self.compute.compute(query).await;
                vec![Evidence::new(WOLFRAM_SOURCE, result)]
            }
            Step::Notes => match self.notes.search(query, self.notes_top_k).await {
                Ok(hits) => hits
                    .into_iter()
                    .map(|n| Evidence::from_note(&n.id, n.text))
                    .collect(),
                Err(e) => {
                    warn!(error = %e, "Note retrieval failed");
                    Vec::new()
                }
            },
            Step::Answer | Step::Unknown(_) => Vec::new(),
        };

        debug!(step = %step, count = evidence.len(), "Tool step finished");
        evidence
    }
}
