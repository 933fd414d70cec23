use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wallet_ledger::{bin_utils::Service, response::Response};

/// Replays wallet invocations from a CSV file and prints the final wallets.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// CSV file, one invocation per row: function name, then parameters
    input: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open `{}`", args.input.display()))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        response_printer: Box::new(|line, response: &Response| {
            if !response.is_ok() {
                eprintln!("Error at line {line}: {}", response.payload)
            }
        }),
    };
    service.run()
}
