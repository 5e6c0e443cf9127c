//! `dropln-cli`: schema migrations, development tokens and config checks.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match commands::Cli::parse().execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
