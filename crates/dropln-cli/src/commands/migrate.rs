//! Schema migration commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::Printer;
use dropln_core::config::AppConfig;
use dropln_core::error::AppError;
use dropln_database::{connection, migration};

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Apply pending migrations to the configured database
    Run,
    /// Check that the configured database answers
    Check,
    /// List the migrations compiled into this binary
    List,
}

#[derive(Debug, Serialize)]
struct EmbeddedMigration {
    version: i64,
    description: String,
}

/// Execute migration commands
pub async fn execute(
    args: &MigrateArgs,
    config: &AppConfig,
    printer: &Printer,
) -> Result<(), AppError> {
    if let MigrateCommand::List = args.command {
        let migrations: Vec<EmbeddedMigration> = migration::embedded()
            .into_iter()
            .map(|(version, description)| EmbeddedMigration {
                version,
                description,
            })
            .collect();
        printer.item(&migrations);
        return Ok(());
    }

    let pool = connection::connect(&config.database).await?;
    let result = match args.command {
        MigrateCommand::Run => migration::run_migrations(&pool)
            .await
            .map(|_| printer.success("files schema is up to date")),
        MigrateCommand::Check => connection::ping(&pool)
            .await
            .map(|_| printer.success("Database is reachable")),
        MigrateCommand::List => Ok(()),
    };
    pool.close().await;
    result
}
