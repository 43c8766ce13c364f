//! Registry error types

use soul_types::{Amount, Principal, TokenId};
use thiserror::Error;

/// Name syntax errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("name too short: {len} bytes (minimum {min})")]
    TooShort { len: usize, min: usize },

    #[error("name too long: {len} bytes (maximum {max})")]
    TooLong { len: usize, max: usize },

    #[error("invalid character 0x{byte:02x} at position {position}")]
    InvalidCharacter { byte: u8, position: usize },

    #[error("name must not start with a hyphen")]
    LeadingHyphen,

    #[error("name must not end with a hyphen")]
    TrailingHyphen,
}

/// Fee lookup errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("no price tier for a name of {len} bytes")]
    InvalidLength { len: usize },
}

/// Role check failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("caller {0} is not an operator")]
    NotOperator(Principal),

    #[error("caller {0} is not the admin")]
    NotAdmin(Principal),
}

/// Null arguments rejected before any write.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("{field} must not be the zero address")]
    ZeroAddress { field: &'static str },

    #[error("{field} must not be the zero hash")]
    ZeroHash { field: &'static str },

    #[error("{field} must be non-zero")]
    ZeroAmount { field: &'static str },

    #[error("{field} is out of range")]
    Overflow { field: &'static str },
}

/// Token ledger errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("token {0} does not exist")]
    TokenNotFound(TokenId),

    #[error("token {0} already minted")]
    AlreadyMinted(TokenId),

    #[error("{claimed} does not hold token {token_id}")]
    NotHolder {
        token_id: TokenId,
        claimed: Principal,
    },

    #[error("{caller} may not move token {token_id}")]
    NotAuthorized {
        token_id: TokenId,
        caller: Principal,
    },

    #[error("cannot move token {0} to the zero address")]
    ZeroAddress(TokenId),

    #[error("token ids exhausted after {0}")]
    IdsExhausted(TokenId),
}

/// Audit chain errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuditError {
    #[error("audit chain integrity violation at seq {seq}: {reason}")]
    IntegrityViolation { seq: u64, reason: String },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Snapshot errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported snapshot schema version {found} (supported: {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("snapshot violates invariant: {0}")]
    Inconsistent(String),

    #[error("snapshot audit log rejected: {0}")]
    Audit(#[from] AuditError),
}

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("validation error: {0}")]
    Validation(#[from] NameError),

    #[error("pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AccessError),

    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("name not available: {0}")]
    NotAvailable(String),

    #[error("name not registered: {0}")]
    NotRegistered(String),

    #[error("token not found: {0}")]
    TokenNotFound(TokenId),

    #[error("registry is paused")]
    Paused,

    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Amount, available: Amount },

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("audit error: {0}")]
    Audit(#[from] AuditError),

    #[error("registry lock poisoned")]
    LockPoisoned,
}

impl RegistryError {
    /// Stable machine-readable code for off-system callers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(NameError::TooShort { .. }) => "validation.too_short",
            Self::Validation(NameError::TooLong { .. }) => "validation.too_long",
            Self::Validation(NameError::InvalidCharacter { .. }) => "validation.invalid_character",
            Self::Validation(NameError::LeadingHyphen) => "validation.leading_hyphen",
            Self::Validation(NameError::TrailingHyphen) => "validation.trailing_hyphen",
            Self::Pricing(PricingError::InvalidLength { .. }) => "pricing.invalid_length",
            Self::Unauthorized(AccessError::NotOperator(_)) => "unauthorized.not_operator",
            Self::Unauthorized(AccessError::NotAdmin(_)) => "unauthorized.not_admin",
            Self::InvalidArgument(ArgumentError::ZeroAddress { .. }) => {
                "invalid_argument.zero_address"
            }
            Self::InvalidArgument(ArgumentError::ZeroHash { .. }) => "invalid_argument.zero_hash",
            Self::InvalidArgument(ArgumentError::ZeroAmount { .. }) => {
                "invalid_argument.zero_amount"
            }
            Self::InvalidArgument(ArgumentError::Overflow { .. }) => "invalid_argument.overflow",
            Self::Ledger(LedgerError::TokenNotFound(_)) | Self::TokenNotFound(_) => {
                "token_not_found"
            }
            Self::Ledger(LedgerError::AlreadyMinted(_)) => "ledger.already_minted",
            Self::Ledger(LedgerError::NotHolder { .. }) => "ledger.not_holder",
            Self::Ledger(LedgerError::NotAuthorized { .. }) => "ledger.not_authorized",
            Self::Ledger(LedgerError::ZeroAddress(_)) => "ledger.zero_address",
            Self::Ledger(LedgerError::IdsExhausted(_)) => "ledger.ids_exhausted",
            Self::NotAvailable(_) => "not_available",
            Self::NotRegistered(_) => "not_registered",
            Self::Paused => "paused",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::Config(_) => "config",
            Self::Snapshot(_) => "snapshot",
            Self::Audit(_) => "audit",
            Self::LockPoisoned => "lock_poisoned",
        }
    }
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_distinguish_rejections() {
        assert_eq!(RegistryError::Paused.kind(), "paused");
        assert_eq!(
            RegistryError::NotAvailable("alice".into()).kind(),
            "not_available"
        );
        assert_eq!(
            RegistryError::from(AccessError::NotOperator(Principal::repeat(1))).kind(),
            "unauthorized.not_operator"
        );
        assert_eq!(
            RegistryError::from(NameError::LeadingHyphen).kind(),
            "validation.leading_hyphen"
        );
    }

    #[test]
    fn display_mentions_field() {
        let err = ArgumentError::ZeroAddress { field: "owner" };
        assert!(err.to_string().contains("owner"));
    }
}
