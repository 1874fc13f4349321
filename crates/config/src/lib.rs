//! Configuration loading, validation, and management for the study agent.
//!
//! Loads configuration from `~/.studyagent/config.toml` (or an explicit
//! path) with environment variable overrides. Validates all settings at
//! startup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.studyagent/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the default provider (can be overridden per-provider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default LLM provider
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Default chat model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Agent loop tuning
    #[serde(default)]
    pub agent: AgentConfig,

    /// Note retrieval configuration
    #[serde(default)]
    pub notes: NotesConfig,

    /// Tool collaborator configuration
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_provider() -> String {
    "openai".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.default_model)
            .field("agent", &self.agent)
            .field("notes", &self.notes)
            .field("tools", &self.tools)
            .field("providers", &self.providers)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .finish()
    }
}

impl std::fmt::Debug for ToolsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolsConfig")
            .field("tavily_api_key", &redact(&self.tavily_api_key))
            .field("wolfram_app_id", &redact(&self.wolfram_app_id))
            .field("search_max_results", &self.search_max_results)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("wikipedia_url", &self.wikipedia_url)
            .finish()
    }
}

/// Plan/execute loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Hard cap on Execute passes before the answer is forced
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Maximum steps the planner is asked for
    #[serde(default = "default_max_plan_steps")]
    pub max_plan_steps: usize,

    /// Notes returned per Notes step
    #[serde(default = "default_notes_top_k")]
    pub notes_top_k: usize,

    /// Maximum sources listed under the answer
    #[serde(default = "default_max_citations")]
    pub max_citations: usize,

    #[serde(default = "default_plan_temperature")]
    pub plan_temperature: f32,

    #[serde(default = "default_aggregate_temperature")]
    pub aggregate_temperature: f32,

    #[serde(default)]
    pub reflect_temperature: f32,

    #[serde(default = "default_answer_temperature")]
    pub answer_temperature: f32,
}

fn default_max_iterations() -> u32 {
    8
}
fn default_max_plan_steps() -> usize {
    3
}
fn default_notes_top_k() -> usize {
    4
}
fn default_max_citations() -> usize {
    5
}
fn default_plan_temperature() -> f32 {
    0.1
}
fn default_aggregate_temperature() -> f32 {
    0.3
}
fn default_answer_temperature() -> f32 {
    0.4
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            max_plan_steps: default_max_plan_steps(),
            notes_top_k: default_notes_top_k(),
            max_citations: default_max_citations(),
            plan_temperature: default_plan_temperature(),
            aggregate_temperature: default_aggregate_temperature(),
            reflect_temperature: 0.0,
            answer_temperature: default_answer_temperature(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// JSON file holding the note collection
    #[serde(default = "default_notes_path")]
    pub path: PathBuf,

    /// Embedding model used for notes and queries
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

fn default_notes_path() -> PathBuf {
    PathBuf::from("data").join("notes.json")
}
fn default_embedding_model() -> String {
    "text-embedding-3-small".into()
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            path: default_notes_path(),
            embedding_model: default_embedding_model(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Tavily web search key (search is skipped when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tavily_api_key: Option<String>,

    /// WolframAlpha AppID (math is skipped when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wolfram_app_id: Option<String>,

    #[serde(default = "default_search_max_results")]
    pub search_max_results: u32,

    /// Per-request timeout for tool HTTP calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_wikipedia_url")]
    pub wikipedia_url: String,
}

fn default_search_max_results() -> u32 {
    5
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_wikipedia_url() -> String {
    "https://en.wikipedia.org".into()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            tavily_api_key: None,
            wolfram_app_id: None,
            search_max_results: default_search_max_results(),
            request_timeout_secs: default_request_timeout_secs(),
            wikipedia_url: default_wikipedia_url(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.studyagent/config.toml),
    /// then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        Self::load_with_env(&config_path)
    }

    /// Load configuration from `path`, then apply environment overrides.
    ///
    /// Environment variables:
    /// - `STUDYAGENT_API_KEY`, then `OPENAI_API_KEY` (when no key is configured)
    /// - `STUDYAGENT_PROVIDER`, `STUDYAGENT_MODEL`
    /// - `TAVILY_API_KEY`, `WOLFRAM_APPID` (when not configured)
    /// - `STUDYAGENT_NOTES_PATH`
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.api_key.is_none() {
            self.api_key = lookup("STUDYAGENT_API_KEY").or_else(|| lookup("OPENAI_API_KEY"));
        }

        if let Some(provider) = lookup("STUDYAGENT_PROVIDER") {
            self.default_provider = provider;
        }

        if let Some(model) = lookup("STUDYAGENT_MODEL") {
            self.default_model = model;
        }

        if self.tools.tavily_api_key.is_none() {
            self.tools.tavily_api_key = lookup("TAVILY_API_KEY");
        }

        if self.tools.wolfram_app_id.is_none() {
            self.tools.wolfram_app_id = lookup("WOLFRAM_APPID");
        }

        if let Some(path) = lookup("STUDYAGENT_NOTES_PATH") {
            self.notes.path = PathBuf::from(path);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".studyagent")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let temperatures = [
            ("plan_temperature", self.agent.plan_temperature),
            ("aggregate_temperature", self.agent.aggregate_temperature),
            ("reflect_temperature", self.agent.reflect_temperature),
            ("answer_temperature", self.agent.answer_temperature),
        ];
        for (name, value) in temperatures {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "agent.{name} must be between 0.0 and 2.0"
                )));
            }
        }

        if self.agent.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_iterations must be > 0".into(),
            ));
        }

        if self.agent.max_plan_steps == 0 || self.agent.notes_top_k == 0 || self.agent.max_citations == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_plan_steps, agent.notes_top_k and agent.max_citations must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// A copy with every secret replaced, safe to print.
    pub fn redacted(&self) -> Self {
        let mask = |s: &Option<String>| s.as_ref().map(|_| "[REDACTED]".to_string());
        let mut config = self.clone();
        config.api_key = mask(&self.api_key);
        config.tools.tavily_api_key = mask(&self.tools.tavily_api_key);
        config.tools.wolfram_app_id = mask(&self.tools.wolfram_app_id);
        for provider in config.providers.values_mut() {
            provider.api_key = mask(&provider.api_key);
        }
        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_provider: default_provider(),
            default_model: default_model(),
            agent: AgentConfig::default(),
            notes: NotesConfig::default(),
            tools: ToolsConfig::default(),
            providers: HashMap::new(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
