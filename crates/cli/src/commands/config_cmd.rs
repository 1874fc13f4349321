//! `studyagent config`: show the effective configuration.

use studyagent_config::AppConfig;

pub fn show(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("# {}", AppConfig::config_dir().join("config.toml").display());
    print!("{}", render(config)?);
    Ok(())
}

/// The configuration as TOML with every secret masked.
fn render(config: &AppConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&config.redacted())
}
