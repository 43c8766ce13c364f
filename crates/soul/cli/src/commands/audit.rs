//! Audit feed commands

use clap::Subcommand;
use colored::*;
use serde_json::json;
use soul_registry::AuditEvent;

use crate::output::{emit, OutputFormat};
use crate::session::Session;

/// Audit subcommands
#[derive(Subcommand)]
pub enum AuditCommands {
    /// List committed audit events
    Events {
        /// Only events after this sequence number
        #[arg(long, default_value = "0")]
        since: u64,
    },

    /// Recompute the audit hash chain and cross-table invariants
    Verify,
}

/// Execute an audit command
pub fn execute(command: AuditCommands, session: &Session) -> anyhow::Result<()> {
    match command {
        AuditCommands::Events { since } => {
            let events = session.registry.events_since(since)?;
            match session.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&events)?),
                OutputFormat::Text if events.is_empty() => println!("{}", "No events".dimmed()),
                OutputFormat::Text => events.iter().for_each(print_event),
            }
            Ok(())
        }

        AuditCommands::Verify => {
            session.registry.verify_audit()?;
            session.registry.check_invariants()?;
            let events = session.registry.events_since(0)?;
            let head = events.last().map(|e| hex::encode(e.hash)).unwrap_or_default();
            emit(
                session.format,
                json!({ "ok": true, "events": events.len(), "head": head }),
                || format!("{} audit chain intact ({} events)", "✓".green(), events.len()),
            )
        }
    }
}

fn print_event(event: &AuditEvent) {
    let payload = serde_json::to_string(&event.kind).unwrap_or_default();
    println!(
        "{:>5} {} {} {}",
        event.seq.to_string().dimmed(),
        event.at.format("%Y-%m-%d %H:%M:%S"),
        event.kind.label().blue(),
        payload.dimmed()
    );
}
