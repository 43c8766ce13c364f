//! Name lifecycle and lookup commands

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use serde_json::json;
use soul_types::{Principal, SoulHash, TokenId};

use crate::output::{emit, emit_success, format_record};
use crate::session::Session;

/// Name subcommands
#[derive(Subcommand)]
pub enum NameCommands {
    /// Register a name for an owner (operator)
    Register {
        name: String,

        /// Owner of the new name token
        #[arg(long)]
        owner: Principal,

        #[command(flatten)]
        soul: SoulSource,

        /// Payment address, defaults to the owner
        #[arg(long)]
        payment: Option<Principal>,
    },

    /// Show the live record for a name
    Resolve { name: String },

    /// Extend a lease by one term (operator)
    Renew { name: String },

    /// Replace the soul hash of a name (operator)
    UpdateSoul {
        name: String,

        #[command(flatten)]
        soul: SoulSource,
    },

    /// Replace the payment address of a name (operator)
    UpdatePayment { name: String, address: Principal },

    /// Attach an opaque blob to a name (operator)
    StoreBlob {
        name: String,

        #[command(flatten)]
        source: BlobSource,
    },

    /// Print the blob stored for a name
    GetBlob {
        name: String,

        /// Write raw bytes to this file instead of printing hex
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check whether a name can be registered now
    Available { name: String },

    /// Registration fee for a name
    Price { name: String },

    /// Token id bound to a name
    NameToToken { name: String },

    /// Name bound to a token id
    TokenToName { token: u64 },
}

/// Soul hash given directly or as a manifest document to digest.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct SoulSource {
    /// Soul hash as hex
    #[arg(long)]
    soul_hash: Option<SoulHash>,

    /// Manifest document whose BLAKE3 digest becomes the soul hash
    #[arg(long)]
    soul_doc: Option<PathBuf>,
}

impl SoulSource {
    fn resolve(&self) -> anyhow::Result<SoulHash> {
        match (&self.soul_hash, &self.soul_doc) {
            (Some(hash), _) => Ok(*hash),
            (None, Some(path)) => {
                let document = std::fs::read(path)
                    .with_context(|| format!("reading soul document {}", path.display()))?;
                Ok(SoulHash::digest(&document))
            }
            (None, None) => anyhow::bail!("one of --soul-hash or --soul-doc is required"),
        }
    }
}

/// Blob bytes from a file or a hex string.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct BlobSource {
    /// Read blob bytes from a file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Blob bytes as hex
    #[arg(long)]
    hex: Option<String>,
}

impl BlobSource {
    fn bytes(&self) -> anyhow::Result<Vec<u8>> {
        match (&self.file, &self.hex) {
            (Some(path), _) => {
                std::fs::read(path).with_context(|| format!("reading blob {}", path.display()))
            }
            (None, Some(text)) => {
                let trimmed = text.strip_prefix("0x").unwrap_or(text);
                hex::decode(trimmed).context("decoding --hex")
            }
            (None, None) => anyhow::bail!("one of --file or --hex is required"),
        }
    }
}

/// Execute a name command
pub fn execute(command: NameCommands, session: &mut Session) -> anyhow::Result<()> {
    let format = session.format;
    match command {
        NameCommands::Register {
            name,
            owner,
            soul,
            payment,
        } => {
            let ctx = session.ctx()?;
            let token = session.registry.register(
                &ctx,
                &name,
                owner,
                soul.resolve()?,
                payment.unwrap_or(owner),
            )?;
            session.save()?;
            let record = session.registry.resolve(&name, ctx.now)?;
            emit_success(format, json!({ "name": name, "record": record }), || {
                format!(
                    "Registered {name} as token {token}, expires {}",
                    record.expires_at.to_rfc3339()
                )
            })
        }

        NameCommands::Resolve { name } => {
            let record = session.registry.resolve(&name, session.now())?;
            emit(format, json!({ "name": name, "record": record }), || {
                format_record(&name, &record)
            })
        }

        NameCommands::Renew { name } => {
            let ctx = session.ctx()?;
            let expires_at = session.registry.renew(&ctx, &name)?;
            session.save()?;
            emit_success(format, json!({ "name": name, "expires_at": expires_at }), || {
                format!("Renewed {name} until {}", expires_at.to_rfc3339())
            })
        }

        NameCommands::UpdateSoul { name, soul } => {
            let ctx = session.ctx()?;
            let soul_hash = soul.resolve()?;
            session.registry.update_soul(&ctx, &name, soul_hash)?;
            session.save()?;
            emit_success(format, json!({ "name": name, "soul_hash": soul_hash }), || {
                format!("Updated soul of {name} to {soul_hash}")
            })
        }

        NameCommands::UpdatePayment { name, address } => {
            let ctx = session.ctx()?;
            session
                .registry
                .update_payment_address(&ctx, &name, address)?;
            session.save()?;
            emit_success(
                format,
                json!({ "name": name, "payment_address": address }),
                || format!("Updated payment address of {name} to {address}"),
            )
        }

        NameCommands::StoreBlob { name, source } => {
            let ctx = session.ctx()?;
            let bytes = source.bytes()?;
            let len = bytes.len();
            session.registry.store_blob(&ctx, &name, bytes)?;
            session.save()?;
            emit_success(format, json!({ "name": name, "len": len }), || {
                format!("Stored {len} bytes for {name}")
            })
        }

        NameCommands::GetBlob { name, out } => {
            let bytes = session.registry.get_blob(&name)?;
            if let Some(path) = out {
                std::fs::write(&path, &bytes)
                    .with_context(|| format!("writing blob to {}", path.display()))?;
                return emit(
                    format,
                    json!({ "name": name, "len": bytes.len(), "path": path }),
                    || format!("Wrote {} bytes to {}", bytes.len(), path.display()),
                );
            }
            let encoded = hex::encode(&bytes);
            emit(format, json!({ "name": name, "hex": encoded }), || {
                encoded.clone()
            })
        }

        NameCommands::Available { name } => {
            let available = session.registry.is_available(&name, session.now())?;
            emit(format, json!({ "name": name, "available": available }), || {
                if available {
                    format!("{name} is available")
                } else {
                    format!("{name} is taken")
                }
            })
        }

        NameCommands::Price { name } => {
            let price = session.registry.get_price(&name)?;
            emit(format, json!({ "name": name, "price": price }), || {
                price.to_string()
            })
        }

        NameCommands::NameToToken { name } => {
            let token = session.registry.name_to_token(&name)?;
            emit(format, json!({ "name": name, "token_id": token }), || {
                token.to_string()
            })
        }

        NameCommands::TokenToName { token } => {
            let token = TokenId(token);
            let name = session.registry.token_to_name(token)?;
            emit(format, json!({ "name": name, "token_id": token }), || {
                name.clone()
            })
        }
    }
}
