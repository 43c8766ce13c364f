//! soulctl - command-line operator tool for the Soul Registry
//!
//! Every invocation loads the registry from a JSON state file, applies one
//! call, and writes the state back only if the call succeeded:
//! - Register, renew, and resolve agent names
//! - Move name tokens between holders
//! - Manage operators, the circuit breaker, and the treasury
//! - Read and verify the audit feed

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use soul_types::Principal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;
mod session;

use commands::{admin, audit, names, tokens};
use session::Session;

/// soulctl application
#[derive(Parser)]
#[command(name = "soulctl")]
#[command(about = "Soul Registry - agent name registry operator CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Registry configuration file (TOML)
    #[arg(short, long, env = "SOULCTL_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Registry state file (JSON snapshot)
    #[arg(short, long, env = "SOULCTL_STATE", default_value = "soul-state.json", global = true)]
    state: PathBuf,

    /// Principal making the call
    #[arg(long, env = "SOULCTL_CALLER", global = true)]
    caller: Option<Principal>,

    /// Call time (RFC 3339), defaults to the wall clock
    #[arg(long, value_parser = parse_time, global = true)]
    now: Option<DateTime<Utc>>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Create a fresh state file
    Init(admin::InitArgs),

    #[command(flatten)]
    Names(names::NameCommands),

    #[command(flatten)]
    Tokens(tokens::TokenCommands),

    #[command(flatten)]
    Admin(admin::AdminCommands),

    #[command(flatten)]
    Audit(audit::AuditCommands),
}

fn parse_time(input: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(input)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable.
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_failure(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let format = output::OutputFormat::from_flag(cli.json);
    let open = || Session::open(cli.config.as_deref(), &cli.state, cli.caller, cli.now, format);

    match cli.command {
        Commands::Init(args) => admin::init(args, cli.config.as_deref(), &cli.state, format),
        Commands::Names(command) => names::execute(command, &mut open()?),
        Commands::Tokens(command) => tokens::execute(command, &mut open()?),
        Commands::Admin(command) => admin::execute(command, &mut open()?),
        Commands::Audit(command) => audit::execute(command, &open()?),
    }
}
