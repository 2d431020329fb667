use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use gemini_voice_core::config::{default_config_path, load_config};
use gemini_voice_core::{CredentialSource, EnvCredentials};
use gemini_voice_types::models::CREDENTIAL_NAME;

pub async fn show_config(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "API:".cyan().bold());
    println!("  Base URL: {}", config.api.base_url);
    println!("  Version: {}", config.api.api_version);
    println!("  Timeout: {}s", config.api.timeout_secs);

    println!("{}", "Defaults:".cyan().bold());
    println!("  Prompt: {}", config.defaults.prompt.as_deref().unwrap_or("-"));
    println!("  Model: {}", config.defaults.model_name);
    println!("  Voice: {}", config.defaults.voice_name);
    println!("  Grounding: {}", config.defaults.enable_grounding);

    println!("{}", "Batch:".cyan().bold());
    println!("  Profile: {}", config.profile);
    println!("  Continue on fail: {}", config.continue_on_fail);
    println!("  Speech config: {}", config.send_speech_config);
    println!("  Credentials file: {}", config.credentials_file.as_deref().unwrap_or("-"));

    match EnvCredentials::default().get(CREDENTIAL_NAME).await {
        Some(credentials) => println!("  Env API key: {}", credentials.masked_key().green()),
        None => println!("  Env API key: {}", "not set".yellow()),
    }
    Ok(())
}

pub fn show_config_path() -> Result<()> {
    let path = default_config_path()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;

    if path.exists() {
        println!("{} {}", path.display(), "(exists)".green());
    } else {
        println!("{} {}", path.display(), "(not found, defaults in use)".yellow());
    }
    Ok(())
}
