//! Bootstrap, role, breaker, and treasury commands

use std::path::Path;

use anyhow::{bail, Context};
use clap::{Args, Subcommand};
use serde_json::json;
use soul_registry::{RegistryConfig, SoulRegistry};
use soul_types::{Amount, Principal};
use tracing::info;

use crate::output::{emit, emit_success, OutputFormat};
use crate::session::{write_snapshot, Session};

/// Arguments for `init`
#[derive(Args)]
pub struct InitArgs {
    /// Admin principal, overrides the config file
    #[arg(long)]
    admin: Option<Principal>,

    /// Operator to flag at bootstrap (repeatable)
    #[arg(long = "operator")]
    operators: Vec<Principal>,

    /// Start with the circuit breaker engaged
    #[arg(long)]
    paused: bool,

    /// Overwrite an existing state file
    #[arg(long)]
    force: bool,
}

/// Admin subcommands
#[derive(Subcommand)]
pub enum AdminCommands {
    /// Flag or unflag an operator (admin)
    SetOperator {
        operator: Principal,

        /// Remove the operator flag instead of setting it
        #[arg(long)]
        disable: bool,
    },

    /// Engage the circuit breaker (admin)
    Pause,

    /// Release the circuit breaker (admin)
    Unpause,

    /// Credit the treasury
    Deposit { amount: u64 },

    /// Pay out of the treasury (admin)
    Withdraw { recipient: Principal, amount: u64 },

    /// Hand the admin role to another principal (admin)
    TransferAdmin { new_admin: Principal },

    /// Show admin, breaker, and treasury state
    Status,
}

/// Create a fresh state file from config and flags.
pub fn init(
    args: InitArgs,
    config_path: Option<&Path>,
    state_path: &Path,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if state_path.exists() && !args.force {
        bail!(
            "state file {} already exists (use --force to overwrite)",
            state_path.display()
        );
    }

    let mut config = match config_path {
        Some(path) => {
            RegistryConfig::load(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => RegistryConfig::default(),
    };
    if let Some(admin) = args.admin {
        config.admin = admin;
    }
    config.operators.extend(args.operators);
    config.start_paused |= args.paused;

    let registry = SoulRegistry::new(config)?;
    write_snapshot(state_path, &registry.snapshot()?)?;
    info!(path = %state_path.display(), "State file initialized");

    let admin = registry.admin()?;
    emit_success(
        format,
        json!({ "state": state_path, "admin": admin, "paused": registry.is_paused()? }),
        || format!("Initialized {} with admin {admin}", state_path.display()),
    )
}

/// Execute an admin command
pub fn execute(command: AdminCommands, session: &mut Session) -> anyhow::Result<()> {
    let format = session.format;
    match command {
        AdminCommands::SetOperator { operator, disable } => {
            let ctx = session.ctx()?;
            let enabled = !disable;
            session.registry.set_operator(&ctx, operator, enabled)?;
            session.save()?;
            emit_success(
                format,
                json!({ "operator": operator, "enabled": enabled }),
                || {
                    if enabled {
                        format!("Flagged {operator} as operator")
                    } else {
                        format!("Removed operator flag from {operator}")
                    }
                },
            )
        }

        AdminCommands::Pause => {
            let ctx = session.ctx()?;
            session.registry.pause(&ctx)?;
            session.save()?;
            emit_success(format, json!({ "paused": true }), || "Registry paused".into())
        }

        AdminCommands::Unpause => {
            let ctx = session.ctx()?;
            session.registry.unpause(&ctx)?;
            session.save()?;
            emit_success(format, json!({ "paused": false }), || {
                "Registry unpaused".into()
            })
        }

        AdminCommands::Deposit { amount } => {
            let ctx = session.ctx()?;
            let balance = session.registry.deposit(&ctx, Amount(amount))?;
            session.save()?;
            emit_success(
                format,
                json!({ "amount": amount, "balance": balance }),
                || format!("Deposited {amount}, treasury holds {balance}"),
            )
        }

        AdminCommands::Withdraw { recipient, amount } => {
            let ctx = session.ctx()?;
            let balance = session
                .registry
                .withdraw(&ctx, recipient, Amount(amount))?;
            session.save()?;
            emit_success(
                format,
                json!({ "recipient": recipient, "amount": amount, "balance": balance }),
                || format!("Withdrew {amount} to {recipient}, treasury holds {balance}"),
            )
        }

        AdminCommands::TransferAdmin { new_admin } => {
            let ctx = session.ctx()?;
            session.registry.transfer_admin(&ctx, new_admin)?;
            session.save()?;
            emit_success(format, json!({ "admin": new_admin }), || {
                format!("Admin role handed to {new_admin}")
            })
        }

        AdminCommands::Status => {
            let registry = &session.registry;
            let snapshot = registry.snapshot()?;
            emit(
                format,
                json!({
                    "admin": snapshot.admin,
                    "operators": snapshot.operators,
                    "paused": snapshot.paused,
                    "treasury": snapshot.treasury,
                    "names": snapshot.identities.len(),
                    "next_token_id": snapshot.next_token_id,
                    "audit_events": snapshot.audit.len(),
                }),
                || {
                    format!(
                        "admin:     {}\noperators: {}\npaused:    {}\ntreasury:  {}\nnames:     {}\nnext id:   {}",
                        snapshot.admin,
                        snapshot.operators.len(),
                        snapshot.paused,
                        snapshot.treasury,
                        snapshot.identities.len(),
                        snapshot.next_token_id,
                    )
                },
            )
        }
    }
}
