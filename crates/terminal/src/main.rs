//! tsbank terminal client.
//!
//! Usage:
//! ```bash
//! tsbank-terminal
//! tsbank-terminal --account destino
//! tsbank-terminal --log-level debug
//! ```

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use tsbank_core::SystemClock;
use tsbank_ledger::LedgerService;
use tsbank_observability::{LogFormat, LogTarget, ObservabilityConfig};
use tsbank_terminal::Session;

/// Interactive banking terminal over an in-memory ledger.
#[derive(Parser)]
#[command(name = "tsbank-terminal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log in as this account and skip the login screen
    #[arg(long)]
    account: Option<String>,

    /// Log filter used when RUST_LOG is unset (logs go to stderr)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tsbank_observability::init_with(&ObservabilityConfig {
        format: LogFormat::Pretty,
        target: LogTarget::Stderr,
        default_filter: cli.log_level,
    });

    let stdin = io::stdin();
    let session = Session::new(
        LedgerService::seeded(),
        Box::new(SystemClock),
        stdin.lock(),
        io::stdout(),
    );
    let mut session = match cli.account {
        Some(account) => session
            .logged_in(&account)
            .with_context(|| format!("cannot log in as '{account}'"))?,
        None => session,
    };

    session.run().context("terminal I/O failed")?;
    Ok(())
}
