//! Drive a checkout session from a script of intents.
//!
//! # Usage
//!
//! ```bash
//! # Read intents from a file
//! gl-cli run --script session.jsonl
//!
//! # Read intents from stdin and print views as JSON lines
//! cat session.jsonl | gl-cli run --json
//! ```
//!
//! Each non-blank line is one JSON intent; lines starting with `#` are
//! comments. Rejected or malformed intents are logged and the session
//! continues.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use greenleaf_core::{CheckoutFlow, Intent, Outcome};
use tracing::{info, warn};

use super::CliError;
use crate::config::CliConfig;
use crate::terminal::{LinkChannel, OutputFormat, TerminalRenderer};

/// Counts reported at the end of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub applied: usize,
    pub rejected: usize,
    pub orders: usize,
}

/// Run a session against stdout, reading from `script` or stdin.
///
/// # Errors
///
/// Returns `CliError::Io` if the script cannot be opened or read.
pub fn run(
    config: &CliConfig,
    script: Option<&Path>,
    format: OutputFormat,
) -> Result<RunSummary, CliError> {
    let input: Box<dyn BufRead> = match script {
        Some(path) => {
            info!(path = %path.display(), "Reading intents from script");
            Box::new(BufReader::new(File::open(path)?))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let checkout = config.checkout.clone();
    let renderer = TerminalRenderer::new(io::stdout(), format, checkout.currency_symbol.clone());
    let channel = LinkChannel::new(io::stdout(), format);
    let mut flow = CheckoutFlow::new(checkout, channel, renderer);

    let summary = execute(input, &mut flow)?;
    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        orders = summary.orders,
        "Session finished"
    );
    Ok(summary)
}

/// Dispatch every intent in `input` to `flow`.
///
/// # Errors
///
/// Returns `CliError::Io` if reading `input` fails.
pub fn execute<I, W>(
    input: I,
    flow: &mut CheckoutFlow<LinkChannel<W>, TerminalRenderer<W>>,
) -> Result<RunSummary, CliError>
where
    I: BufRead,
    W: Write,
{
    let mut summary = RunSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let intent = match Intent::from_json(trimmed) {
            Ok(intent) => intent,
            Err(e) => {
                warn!(line = line_no, error = %e, "Malformed intent");
                summary.rejected += 1;
                continue;
            }
        };

        match flow.dispatch(intent) {
            Ok(outcome) => {
                if matches!(outcome, Outcome::Submitted(_)) {
                    summary.orders += 1;
                }
                summary.applied += 1;
            }
            Err(e) => {
                warn!(line = line_no, "{e}");
                summary.rejected += 1;
            }
        }
    }

    Ok(summary)
}
