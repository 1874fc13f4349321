//! Subcommand implementations and the wiring they share.

pub mod ask;
pub mod chat;
pub mod config_cmd;
pub mod notes;

use std::path::Path;
use std::sync::Arc;
use studyagent_agent::PlanExecuteAgent;
use studyagent_config::AppConfig;
use studyagent_core::provider::Provider;
use studyagent_tools::ToolGateway;

/// Load config from `path` (or the default location) with environment
/// overrides applied.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(p) => AppConfig::load_with_env(p),
        None => AppConfig::load(),
    };
    config.map_err(|e| format!("Failed to load config: {e}").into())
}

/// The configured LLM provider, used both for reasoning and embeddings.
pub fn provider(config: &AppConfig) -> Result<Arc<dyn Provider>, Box<dyn std::error::Error>> {
    // Local servers don't need a key
    if !config.has_api_key() && config.default_provider != "ollama" {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    STUDYAGENT_API_KEY=sk-...");
        eprintln!("    OPENAI_API_KEY=sk-...");
        eprintln!();
        eprintln!("  Or add `api_key` to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let router = studyagent_providers::build_from_config(config);
    router
        .default()
        .ok_or_else(|| "No default provider configured".into())
}

/// Model for reasoning calls: the provider's own default, else the global one.
pub fn model(config: &AppConfig) -> String {
    config
        .providers
        .get(&config.default_provider)
        .and_then(|p| p.default_model.clone())
        .unwrap_or_else(|| config.default_model.clone())
}

pub fn build_agent(config: &AppConfig) -> Result<PlanExecuteAgent, Box<dyn std::error::Error>> {
    let provider = provider(config)?;
    let gateway = Arc::new(ToolGateway::from_config(config, provider.clone()));
    Ok(PlanExecuteAgent::new(provider, model(config), gateway).with_config(config.agent.clone()))
}
