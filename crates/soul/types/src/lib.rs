//! Core type definitions for the Soul Registry.
//!
//! This crate provides the shared value types. No business logic, just types.
//! Every registry crate depends on this crate.

pub mod context;
pub mod event;
pub mod hashes;
pub mod ids;
pub mod identity;
pub mod principal;

// Re-export primary types at crate root for ergonomic use.
pub use context::CallContext;
pub use event::AuditEventKind;
pub use hashes::{NameHash, SoulHash};
pub use identity::IdentityRecord;
pub use ids::{Amount, TokenId};
pub use principal::Principal;

use thiserror::Error;

/// Errors raised when parsing hex-encoded registry values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Decode an optionally `0x`-prefixed hex string into a fixed-size array.
pub(crate) fn decode_fixed<const N: usize>(input: &str) -> Result<[u8; N], ParseError> {
    let trimmed = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    let bytes = hex::decode(trimmed).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| ParseError::InvalidLength {
        expected: N,
        actual,
    })
}
