//! gvkreg CLI - Inspect and watch generic adapter registrations

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "gvkreg")]
#[command(version)]
#[command(about = "Generic adapter registry for external frameworks")]
#[command(long_about = r#"
gvkreg loads external framework entries (kind references such as
"MyJob.v1.batch.example.com") and reports which Group-Version-Kinds
have a generic adapter configured.

Example usage:
  gvkreg validate --config gvkreg.toml
  gvkreg list --format json
  gvkreg lookup Job.v1.batch
  gvkreg watch --config /etc/gvkreg/frameworks.toml
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file and report rejected entries
    Validate {
        /// Path to the config file (TOML, or JSON by extension)
        #[arg(short, long, default_value = "gvkreg.toml")]
        config: PathBuf,
    },

    /// List all registered adapters
    List {
        /// Path to the config file (TOML, or JSON by extension)
        #[arg(short, long, default_value = "gvkreg.toml")]
        config: PathBuf,
    },

    /// Check whether an adapter is registered for a kind reference
    Lookup {
        /// Kind reference, e.g. Job.v1.batch or Pod.v1.
        kind: String,

        /// Path to the config file (TOML, or JSON by extension)
        #[arg(short, long, default_value = "gvkreg.toml")]
        config: PathBuf,
    },

    /// Keep the registry loaded and reload it whenever the config file changes
    Watch {
        /// Path to the config file (TOML, or JSON by extension)
        #[arg(short, long, default_value = "gvkreg.toml")]
        config: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Text
    }
}

pub fn emit_success(output_mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if output_mode == OutputMode::Json {
        let envelope = serde_json::json!({
            "ok": true,
            "command": command,
            "data": data,
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Validate { config } => commands::run_validate(cli.format, &config),
        Commands::List { config } => commands::run_list(cli.format, &config),
        Commands::Lookup { kind, config } => commands::run_lookup(cli.format, &config, &kind),
        Commands::Watch { config } => commands::run_watch(&config),
    }
}
