//! Text and JSON output for CLI commands.

use serde::Serialize;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Writes command results to stdout in one format.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Print a serializable value. Text mode renders it as indented JSON
    /// too, since every item the CLI prints is a config or a small record.
    pub fn item<T: Serialize>(&self, item: &T) {
        let rendered = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(item),
            OutputFormat::Json => serde_json::to_string(item),
        };
        match rendered {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("error: cannot render output: {e}"),
        }
    }

    /// Print a confirmation line (text mode only).
    pub fn success(&self, msg: &str) {
        if self.format == OutputFormat::Text {
            println!("ok: {msg}");
        }
    }

    /// Print an aligned `key: value` line (text mode only).
    pub fn field(&self, key: &str, value: &str) {
        if self.format == OutputFormat::Text {
            println!("  {:<18}{value}", format!("{key}:"));
        }
    }
}

/// Report a failed command on stderr.
pub fn print_error(msg: &str) {
    eprintln!("error: {msg}");
}
