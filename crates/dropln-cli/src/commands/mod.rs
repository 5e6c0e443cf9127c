//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod token;

use clap::{Parser, Subcommand};

use crate::output::{OutputFormat, Printer};
use dropln_core::config::AppConfig;
use dropln_core::error::AppError;

/// Dropln administration: migrations, dev tokens, config
#[derive(Debug, Parser)]
#[command(name = "dropln", version, about, long_about = None)]
pub struct Cli {
    /// Path to the base configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay (`config/{env}.toml`)
    #[arg(short, long, env = "DROPLN_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Mint a development bearer token
    Token(token::TokenArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let settings = AppConfig::load_from(&self.config, &self.env)?;
        let printer = Printer::new(self.format);
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &settings, &printer).await,
            Commands::Token(args) => token::execute(args, &settings, &printer),
            Commands::Config(args) => config::execute(args, &settings, &self.config, &printer),
        }
    }
}
