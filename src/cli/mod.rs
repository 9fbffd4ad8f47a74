//! CLI argument parsing and command routing

use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};

use crate::{
    adapters::Matcher,
    config::AdapterConfig,
    error::Result,
    messages::Message,
    registry::AdapterRegistry,
};

/// promptfold: turn chat conversations into model-specific prompts
#[derive(Debug, Parser)]
#[command(name = "promptfold")]
#[command(about = "Fold chat conversations into model-specific prompt text", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Adapter config file (TOML, or JSON with a `.json` extension)
    #[arg(long, global = true, env = "PROMPTFOLD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a conversation for a model
    Render {
        /// Model name used to pick the adapter
        #[arg(short, long)]
        model: String,

        /// JSON array of `{role, content}` messages; reads stdin if omitted
        #[arg(long)]
        messages: Option<PathBuf>,

        /// Print adapter name, prompt and stop markers as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which adapter handles a model name
    Resolve {
        /// Model name to resolve
        model: String,
    },

    /// List adapters in precedence order
    List,
}

impl Cli {
    /// Parse CLI arguments from environment
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build the registry from `--config` or the default config path
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be parsed or declares an
    /// invalid adapter
    pub fn load_registry(&self) -> Result<AdapterRegistry> {
        let config = match &self.config {
            Some(path) => AdapterConfig::load_from_path(path)?,
            None => AdapterConfig::load()?,
        };
        config.into_registry()
    }
}

fn read_messages(path: Option<&Path>) -> Result<Vec<Message>> {
    let raw = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&raw)?)
}

fn describe_matcher(matcher: &Matcher) -> String {
    match matcher {
        Matcher::Any => "*".to_string(),
        Matcher::Exact(name) => format!("= {name}"),
        Matcher::Contains(needles) => format!("~ {}", needles.join(" | ")),
    }
}

/// Execute `command` against `registry`, writing results to `out`
///
/// # Errors
///
/// Returns an error if messages cannot be read, the model cannot be
/// resolved, or the conversation cannot be folded
pub fn run(command: &Commands, registry: &AdapterRegistry, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Render {
            model,
            messages,
            json,
        } => {
            let messages = read_messages(messages.as_deref())?;
            let prompt = registry.format(model, &messages)?;
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&prompt)?)?;
            } else {
                write!(out, "{}", prompt.text)?;
            }
        }
        Commands::Resolve { model } => {
            let adapter = registry.resolve(model)?;
            writeln!(out, "{}", adapter.name())?;
        }
        Commands::List => {
            for adapter in registry.iter() {
                writeln!(
                    out,
                    "{}\t{}",
                    adapter.name(),
                    describe_matcher(adapter.matcher())
                )?;
            }
        }
    }
    Ok(())
}
