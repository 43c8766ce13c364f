//! Name token commands

use clap::Subcommand;
use serde_json::json;
use soul_types::{Principal, TokenId};

use crate::output::{emit, emit_success};
use crate::session::Session;

/// Token subcommands
#[derive(Subcommand)]
pub enum TokenCommands {
    /// Move a name token (holder or approved spender)
    Transfer {
        token: u64,

        /// New holder
        #[arg(long)]
        to: Principal,

        /// Current holder, defaults to the caller
        #[arg(long)]
        from: Option<Principal>,
    },

    /// Approve a spender for one transfer (holder); the zero address clears it
    Approve { token: u64, spender: Principal },

    /// Show the holder of a token
    OwnerOf { token: u64 },
}

/// Execute a token command
pub fn execute(command: TokenCommands, session: &mut Session) -> anyhow::Result<()> {
    let format = session.format;
    match command {
        TokenCommands::Transfer { token, to, from } => {
            let ctx = session.ctx()?;
            let token = TokenId(token);
            let from = from.unwrap_or(ctx.caller);
            session.registry.transfer_token(&ctx, from, to, token)?;
            session.save()?;
            emit_success(
                format,
                json!({ "token_id": token, "from": from, "to": to }),
                || format!("Transferred token {token} from {from} to {to}"),
            )
        }

        TokenCommands::Approve { token, spender } => {
            let ctx = session.ctx()?;
            let token = TokenId(token);
            session.registry.approve_token(&ctx, spender, token)?;
            session.save()?;
            emit_success(
                format,
                json!({ "token_id": token, "spender": spender }),
                || {
                    if spender.is_zero() {
                        format!("Cleared approval on token {token}")
                    } else {
                        format!("Approved {spender} for token {token}")
                    }
                },
            )
        }

        TokenCommands::OwnerOf { token } => {
            let token = TokenId(token);
            let holder = session.registry.owner_of(token)?;
            emit(format, json!({ "token_id": token, "holder": holder }), || {
                holder.to_string()
            })
        }
    }
}
