//! CLI module for Plancraft
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP API server
//! - `generate` - Generate a business plan and print it as Markdown
//! - `extract` - Extract business entities from text
//! - `idea` - Suggest business ideas from the built-in catalog
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! plancraft serve
//!
//! # Generate a plan without calling a model
//! plancraft generate --name FitLoop --description "Home workouts" --offline
//!
//! # Pull financial projections out of a draft
//! plancraft extract financials --file draft.md
//! ```

pub mod completions;
pub mod config;
pub mod extract;
pub mod generate;
pub mod idea;
pub mod output;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::{LogFormat, LoggingConfig, PlanConfig, ProviderKind};
use crate::extract::EntityKind;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Plancraft - business plan generation
#[derive(Parser, Debug)]
#[command(
    name = "plancraft",
    version,
    about = "Resilient business plan generation and entity extraction"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Generate a business plan
    Generate(GenerateArgs),
    /// Extract entities from text
    Extract(ExtractArgs),
    /// Suggest business ideas
    Idea(IdeaArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "plancraft.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "PLANCRAFT_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "PLANCRAFT_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PLANCRAFT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Serve template content only, without a completion provider
    #[arg(long)]
    pub offline: bool,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Business name (a catalog idea is used when name and description are omitted)
    #[arg(short, long, requires = "description")]
    pub name: Option<String>,

    /// Business description
    #[arg(short, long, requires = "name")]
    pub description: Option<String>,

    /// Request the enhanced quality tier
    #[arg(long)]
    pub enhanced: bool,

    /// Treat the caller as authenticated (required for --enhanced)
    #[arg(long)]
    pub authenticated: bool,

    /// Use template content only, without a completion provider
    #[arg(long)]
    pub offline: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,

    /// Path to configuration file
    #[arg(short, long, default_value = "plancraft.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Entity kind (competitors, financials, market_segments, strengths, weaknesses)
    pub kind: EntityKind,

    /// Text to analyse (reads --file or stdin when omitted)
    pub text: Option<String>,

    /// Read text from a file
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct IdeaArgs {
    /// Number of ideas to suggest
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,

    /// Number of recent picks excluded from each draw
    #[arg(long, default_value = "3")]
    pub history: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "plancraft.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load the config file if it exists, then apply environment overrides.
pub fn load_config(path: &Path) -> Result<PlanConfig, Box<dyn std::error::Error>> {
    let config = if path.exists() {
        PlanConfig::load(Some(path))?
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        PlanConfig::default()
    };
    Ok(config.with_env_overrides())
}

/// Switch to the offline provider. Without a provider there is nothing to
/// back off from, so retries run immediately.
pub fn apply_offline(config: &mut PlanConfig) {
    config.provider.kind = ProviderKind::Offline;
    config.generation.retry_delay_ms = 0;
}

/// Initialize tracing based on configuration.
///
/// Events go to stderr so command output on stdout stays clean.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directives()));

    if config.preview_limit().is_some() {
        eprintln!("WARNING: Prompt previews are enabled and will be logged at debug level.");
        eprintln!("         Business descriptions may be confidential. Use only for debugging.");
    }

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}
