//! Development token minting.

use chrono::Duration;
use clap::Args;
use serde::Serialize;

use crate::output::{OutputFormat, Printer};
use dropln_auth::jwt::JwtEncoder;
use dropln_core::config::AppConfig;
use dropln_core::error::AppError;
use dropln_core::types::OwnerId;

/// Arguments for the token command
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Owner ID to put in the `sub` claim
    #[arg(long)]
    pub owner: String,

    /// Lifetime in minutes (defaults to auth.dev_token_ttl_minutes)
    #[arg(long)]
    pub ttl_minutes: Option<u64>,
}

#[derive(Debug, Serialize)]
struct IssuedToken {
    owner: String,
    token: String,
    ttl_minutes: u64,
}

/// Execute the token command
pub fn execute(args: &TokenArgs, config: &AppConfig, printer: &Printer) -> Result<(), AppError> {
    let owner = OwnerId::new(args.owner.clone())?;
    let ttl_minutes = args.ttl_minutes.unwrap_or(config.auth.dev_token_ttl_minutes);

    let encoder = JwtEncoder::new(&config.auth)?;
    let token = encoder.issue(&owner, token_lifetime(ttl_minutes)?)?;

    match printer.format() {
        OutputFormat::Text => println!("{token}"),
        OutputFormat::Json => printer.item(&IssuedToken {
            owner: owner.into_inner(),
            token,
            ttl_minutes,
        }),
    }
    Ok(())
}

fn token_lifetime(ttl_minutes: u64) -> Result<Duration, AppError> {
    i64::try_from(ttl_minutes)
        .ok()
        .and_then(Duration::try_minutes)
        .filter(|ttl| *ttl > Duration::zero())
        .ok_or_else(|| {
            AppError::invalid_input(format!("Token lifetime of {ttl_minutes} minutes is out of range"))
        })
}
