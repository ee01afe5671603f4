//! Greenleaf CLI - Drive the checkout flow from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Replay a session of JSON-lines intents
//! gl-cli run --script session.jsonl
//!
//! # Pipe intents in and get JSON views back
//! cat session.jsonl | gl-cli run --json
//!
//! # Check one delivery field
//! gl-cli check-field --field phone --value "+91 9876543210"
//! ```
//!
//! # Commands
//!
//! - `run` - Dispatch intents and print each rendered view
//! - `check-field` - Sanitize and validate a single field
//!
//! Configuration is read from `GREENLEAF_*` environment variables (and a
//! `.env` file if present).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use greenleaf_core::FieldName;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod config;
mod terminal;

use commands::CliError;
use config::CliConfig;
use terminal::OutputFormat;

#[derive(Parser)]
#[command(name = "gl-cli")]
#[command(author, version, about = "Greenleaf checkout tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a checkout session from JSON-lines intents
    Run {
        /// Intent script (reads stdin when omitted)
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Print views and order messages as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Validate a single delivery field
    CheckField {
        /// Field to check (`name`, `address`, `phone`)
        #[arg(short, long)]
        field: FieldName,

        /// Raw input
        #[arg(short, long)]
        value: String,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    // Defaults to info for our crates if RUST_LOG is not set; stdout is
    // reserved for views and order links
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "greenleaf_cli=info,greenleaf_core=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::from_env()?;

    match cli.command {
        Commands::Run { script, json } => {
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            commands::run::run(&config, script.as_deref(), format)?;
        }
        Commands::CheckField { field, value } => {
            commands::check_field::check_field(&config, field, &value)?;
        }
    }
    Ok(())
}
