use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Amount, NameHash, Principal, SoulHash, TokenId};

/// Payload of one audit event.
///
/// Every committed mutation produces one or more of these, carrying the
/// affected name and the fields that changed. The sequence of events is the
/// canonical feed for external indexers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEventKind {
    NameRegistered {
        name: String,
        name_hash: NameHash,
        token_id: TokenId,
        owner: Principal,
        soul_hash: SoulHash,
        payment_address: Principal,
        expires_at: DateTime<Utc>,
    },
    /// An expired record was retired to make way for a new registration.
    NameReclaimed {
        name: String,
        retired_token: TokenId,
        previous_owner: Principal,
    },
    NameRenewed {
        name: String,
        token_id: TokenId,
        expires_at: DateTime<Utc>,
    },
    SoulUpdated {
        name: String,
        soul_hash: SoulHash,
    },
    PaymentAddressUpdated {
        name: String,
        payment_address: Principal,
    },
    /// Raw ledger movement of a token between two holders.
    TokenTransferred {
        token_id: TokenId,
        from: Principal,
        to: Principal,
    },
    TokenApproved {
        token_id: TokenId,
        holder: Principal,
        spender: Principal,
    },
    /// The live token moved, so the identity owner followed it.
    OwnershipTransferred {
        name: String,
        token_id: TokenId,
        from: Principal,
        to: Principal,
    },
    OperatorChanged {
        operator: Principal,
        enabled: bool,
    },
    BlobStored {
        name: String,
        len: usize,
    },
    Paused {
        by: Principal,
    },
    Unpaused {
        by: Principal,
    },
    AdminTransferred {
        from: Principal,
        to: Principal,
    },
    FundsReceived {
        from: Principal,
        amount: Amount,
    },
    FundsWithdrawn {
        recipient: Principal,
        amount: Amount,
    },
}

impl AuditEventKind {
    /// Stable label for logs and filters.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NameRegistered { .. } => "name_registered",
            Self::NameReclaimed { .. } => "name_reclaimed",
            Self::NameRenewed { .. } => "name_renewed",
            Self::SoulUpdated { .. } => "soul_updated",
            Self::PaymentAddressUpdated { .. } => "payment_address_updated",
            Self::TokenTransferred { .. } => "token_transferred",
            Self::TokenApproved { .. } => "token_approved",
            Self::OwnershipTransferred { .. } => "ownership_transferred",
            Self::OperatorChanged { .. } => "operator_changed",
            Self::BlobStored { .. } => "blob_stored",
            Self::Paused { .. } => "paused",
            Self::Unpaused { .. } => "unpaused",
            Self::AdminTransferred { .. } => "admin_transferred",
            Self::FundsReceived { .. } => "funds_received",
            Self::FundsWithdrawn { .. } => "funds_withdrawn",
        }
    }

    /// The name this event concerns, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::NameRegistered { name, .. }
            | Self::NameReclaimed { name, .. }
            | Self::NameRenewed { name, .. }
            | Self::SoulUpdated { name, .. }
            | Self::PaymentAddressUpdated { name, .. }
            | Self::OwnershipTransferred { name, .. }
            | Self::BlobStored { name, .. } => Some(name),
            _ => None,
        }
    }
}
