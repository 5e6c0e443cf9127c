//! Configuration inspection commands.

use clap::{Args, Subcommand};

use crate::output::Printer;
use dropln_core::config::AppConfig;
use dropln_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Summarize the configuration
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    printer: &Printer,
) -> Result<(), AppError> {
    let redacted = config.redacted();
    match &args.command {
        ConfigCommand::Show => printer.item(&redacted),
        ConfigCommand::Validate => {
            printer.success(&format!("{config_path} loaded"));
            printer.field("listen", &redacted.server.bind_address());
            printer.field("database", &redacted.database.url);
            printer.field("object store", &format!("{:?}", redacted.storage.provider));
            printer.field("upload limit", &redacted.storage.max_upload_size_bytes.to_string());
            printer.field("token algorithm", &format!("{:?}", redacted.auth.algorithm));
        }
    }
    Ok(())
}
