use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gemini_voice_core::adapters::snippet;
use gemini_voice_core::config::load_config;
use gemini_voice_core::{
    BatchDriver, CredentialChain, EnvCredentials, FileCredentials, GeminiRestClient,
    ItemParameters, StaticCredentials,
};
use gemini_voice_types::{BatchConfig, OutputRecord};

use crate::batch_files::{read_items, write_outputs};
use crate::cli::{ConfigCommands, RunArgs};
use crate::config_commands;

const PREVIEW_CHARS: usize = 40;

pub async fn handle_config_command(config_path: Option<&Path>, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show { json } => config_commands::show_config(config_path, json).await,
        ConfigCommands::Path => config_commands::show_config_path(),
    }
}

pub async fn run_batch(config_path: Option<&Path>, args: RunArgs) -> Result<()> {
    let mut config = load_config(config_path)?;
    apply_run_args(&mut config, &args);

    let items = read_items(&args.input)?;
    println!(
        "{} Loaded {} item(s) from {}",
        "→".cyan(),
        items.len(),
        args.input.display()
    );

    tracing::debug!(
        "Run config | Profile: {} | Model: {} | Voice: {} | Grounding: {} | Speech config: {} | Continue on fail: {}",
        config.profile,
        config.defaults.model_name,
        config.defaults.voice_name,
        config.defaults.enable_grounding,
        config.send_speech_config,
        config.continue_on_fail
    );

    let credentials = build_credentials(&config, args.api_key.as_deref())?;
    let client = GeminiRestClient::new(&config.api)?;
    let parameters = ItemParameters::new(items, config.defaults.clone());

    let driver = BatchDriver::new(Arc::new(client), Arc::new(credentials))
        .profile(config.profile)
        .send_speech_config(config.send_speech_config)
        .continue_on_fail(config.continue_on_fail);

    let records = match driver.run(&parameters).await {
        Ok(records) => records,
        Err(err) => {
            println!("{} {}", "✗".red(), err);
            if let Some(details) = err.source.details() {
                println!("  {}", details.dimmed());
            }
            anyhow::bail!("Batch aborted at item {}", err.item_index);
        },
    };

    let written = write_outputs(&args.output_dir, &records)?;
    print_summary(&records);
    println!(
        "{} Wrote {} file(s) to {}",
        "✓".green(),
        written.len(),
        args.output_dir.display()
    );
    Ok(())
}

/// CLI flags override config file defaults.
fn apply_run_args(config: &mut BatchConfig, args: &RunArgs) {
    if let Some(prompt) = &args.prompt {
        config.defaults.prompt = Some(prompt.clone());
    }
    if let Some(model) = &args.model {
        config.defaults.model_name = model.clone();
    }
    if let Some(voice) = &args.voice {
        config.defaults.voice_name = voice.clone();
    }
    if args.grounding {
        config.defaults.enable_grounding = true;
    }
    if let Some(mode) = args.mode {
        config.profile = mode.into();
    }
    if args.speech_config {
        config.send_speech_config = true;
    }
    if args.continue_on_fail {
        config.continue_on_fail = true;
    }
}

/// Explicit key first, then the credentials file, then the environment.
pub fn build_credentials(config: &BatchConfig, api_key: Option<&str>) -> Result<CredentialChain> {
    let mut chain = CredentialChain::new();
    if let Some(key) = api_key {
        chain = chain.push(Arc::new(StaticCredentials::new(key)));
    }
    if let Some(file) = &config.credentials_file {
        let path = PathBuf::from(file);
        let credentials = FileCredentials::load(&path)
            .with_context(|| format!("Failed to load credentials from {}", path.display()))?;
        chain = chain.push(Arc::new(credentials));
    }
    Ok(chain.push(Arc::new(EnvCredentials::default())))
}

fn print_summary(records: &[OutputRecord]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Item", "Status", "Response", "Audio", "Warning"]);

    for record in records {
        let (status, response) = if record.is_error() {
            (Cell::new("Failed").fg(Color::Red), preview(record, "error"))
        } else if record.json.contains_key("aiTextResponse") {
            (Cell::new("OK").fg(Color::Green), preview(record, "aiTextResponse"))
        } else {
            (Cell::new("OK").fg(Color::Green), preview(record, "text"))
        };
        let audio = record
            .audio()
            .map(|a| format!("{} ({} bytes)", a.mime_type, a.file_size))
            .unwrap_or_else(|| "-".to_string());
        let warning = if record.warning().is_some() {
            Cell::new("yes").fg(Color::Yellow)
        } else {
            Cell::new("-")
        };

        table.add_row(vec![
            Cell::new(record.item_index()),
            status,
            Cell::new(response),
            Cell::new(audio),
            warning,
        ]);
    }

    println!("{table}");

    let failed = records.iter().filter(|r| r.is_error()).count();
    if failed > 0 {
        println!("{} {} of {} item(s) failed", "⚠".yellow(), failed, records.len());
    }
}

fn preview(record: &OutputRecord, key: &str) -> String {
    let text = record.json.get(key).and_then(|v| v.as_str()).unwrap_or_default();
    snippet(text, PREVIEW_CHARS)
}
