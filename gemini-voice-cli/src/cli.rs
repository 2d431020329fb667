use clap::{Args, Parser, Subcommand, ValueEnum};
use gemini_voice_types::OutputProfile;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gemini-voice",
    about = "Gemini Voice - batch text and audio generation",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Path to config file (default: ~/.gemini-voice/config.json)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run a batch of prompts from a .json or .jsonl file")]
    Run(RunArgs),

    #[command(subcommand, about = "Inspect configuration")]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[arg(help = "Input file: JSON array of items, or one JSON item per line (.jsonl)")]
    pub input: PathBuf,

    #[arg(short, long, default_value = "output", help = "Directory for output.json and audio files")]
    pub output_dir: PathBuf,

    #[arg(long, help = "Default prompt for items without a 'prompt' field")]
    pub prompt: Option<String>,

    #[arg(short, long, help = "Default model for items without a 'modelName' field")]
    pub model: Option<String>,

    #[arg(short, long, help = "Default voice for items without a 'voiceName' field")]
    pub voice: Option<String>,

    #[arg(short, long, help = "Enable Google Search grounding by default")]
    pub grounding: bool,

    #[arg(long, value_enum, help = "Output mode (default: from config, else chatbot)")]
    pub mode: Option<Mode>,

    #[arg(long, help = "Send the voice to the model as speechConfig instead of only logging it")]
    pub speech_config: bool,

    #[arg(long, help = "Record failed items as error records instead of aborting")]
    pub continue_on_fail: bool,

    #[arg(long, help = "Gemini API key (overrides credential file and environment)")]
    pub api_key: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Show effective configuration")]
    Show {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Print the default config file path")]
    Path,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Text response plus optional audio attachment
    Chatbot,
    /// Audio only, fixed model; items without audio fail
    Tts,
}

impl From<Mode> for OutputProfile {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Chatbot => Self::Chatbot,
            Mode::Tts => Self::Tts,
        }
    }
}
