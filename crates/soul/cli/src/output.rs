//! Output formatting utilities

use colored::*;
use serde_json::Value;
use soul_registry::RegistryError;
use soul_types::IdentityRecord;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON on stdout
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Print a query result.
pub fn emit(format: OutputFormat, value: Value, text: impl FnOnce() -> String) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Text => println!("{}", text()),
    }
    Ok(())
}

/// Print the outcome of a committed mutation.
pub fn emit_success(
    format: OutputFormat,
    value: Value,
    message: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Text => print_success(&message()),
    }
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a failed command to stderr, with the registry error code if any.
pub fn print_failure(error: &anyhow::Error) {
    match error.downcast_ref::<RegistryError>() {
        Some(registry_error) => eprintln!(
            "{} {} {}",
            "✗".red(),
            registry_error,
            format!("[{}]", registry_error.kind()).dimmed()
        ),
        None => eprintln!("{} {:#}", "✗".red(), error),
    }
}

/// Multi-line text rendering of an identity record.
pub fn format_record(name: &str, record: &IdentityRecord) -> String {
    format!(
        "{}\n  token:      {}\n  owner:      {}\n  soul:       {}\n  payment:    {}\n  registered: {}\n  expires:    {}",
        name.bold(),
        record.token_id,
        record.owner,
        record.soul_hash,
        record.payment_address,
        record.registered_at.to_rfc3339(),
        record.expires_at.to_rfc3339(),
    )
}
