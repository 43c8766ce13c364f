//! Token ownership ledger.
//!
//! Tracks exactly one holder per existing token id plus a single approved
//! spender per token. Every holder change is reported once to an
//! [`OwnershipObserver`]; the ledger itself knows nothing about names.

use std::collections::BTreeMap;

use soul_types::{Principal, TokenId};
use tracing::debug;

use crate::error::LedgerError;

/// A change of holder for one token.
///
/// `from == None` is a mint, `to == None` is a burn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HolderChange {
    pub token_id: TokenId,
    pub from: Option<Principal>,
    pub to: Option<Principal>,
}

impl HolderChange {
    /// A genuine transfer between two holders, as opposed to a mint or burn.
    pub fn as_transfer(&self) -> Option<(Principal, Principal)> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

/// Receives every holder change committed by the ledger.
pub trait OwnershipObserver {
    fn holder_changed(&mut self, change: &HolderChange);
}

/// Observer that ignores notifications.
pub struct NoopObserver;

impl OwnershipObserver for NoopObserver {
    fn holder_changed(&mut self, _change: &HolderChange) {}
}

#[derive(Clone, Debug, Default)]
pub struct TokenLedger {
    holders: BTreeMap<TokenId, Principal>,
    approvals: BTreeMap<TokenId, Principal>,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holder_of(&self, token_id: &TokenId) -> Option<Principal> {
        self.holders.get(token_id).copied()
    }

    pub fn exists(&self, token_id: &TokenId) -> bool {
        self.holders.contains_key(token_id)
    }

    pub fn approved(&self, token_id: &TokenId) -> Option<Principal> {
        self.approvals.get(token_id).copied()
    }

    pub fn balance_of(&self, who: &Principal) -> usize {
        self.holders.values().filter(|holder| *holder == who).count()
    }

    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }

    pub fn holders(&self) -> impl Iterator<Item = (&TokenId, &Principal)> {
        self.holders.iter()
    }

    pub fn approvals(&self) -> impl Iterator<Item = (&TokenId, &Principal)> {
        self.approvals.iter()
    }

    pub fn mint(
        &mut self,
        to: Principal,
        token_id: TokenId,
        observer: &mut dyn OwnershipObserver,
    ) -> Result<(), LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress(token_id));
        }
        if token_id.is_none() || self.holders.contains_key(&token_id) {
            return Err(LedgerError::AlreadyMinted(token_id));
        }
        self.holders.insert(token_id, to);
        debug!(token = %token_id, to = %to, "Token minted");
        observer.holder_changed(&HolderChange {
            token_id,
            from: None,
            to: Some(to),
        });
        Ok(())
    }

    /// Move `token_id` from `from` to `to` on behalf of `caller`.
    ///
    /// `caller` must be the holder or the approved spender. The approval is
    /// cleared on success.
    pub fn transfer(
        &mut self,
        caller: &Principal,
        from: Principal,
        to: Principal,
        token_id: TokenId,
        observer: &mut dyn OwnershipObserver,
    ) -> Result<(), LedgerError> {
        let holder = self
            .holder_of(&token_id)
            .ok_or(LedgerError::TokenNotFound(token_id))?;
        if holder != from {
            return Err(LedgerError::NotHolder {
                token_id,
                claimed: from,
            });
        }
        if *caller != holder && self.approved(&token_id) != Some(*caller) {
            return Err(LedgerError::NotAuthorized {
                token_id,
                caller: *caller,
            });
        }
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress(token_id));
        }

        self.approvals.remove(&token_id);
        self.holders.insert(token_id, to);
        debug!(token = %token_id, from = %from, to = %to, "Token transferred");
        observer.holder_changed(&HolderChange {
            token_id,
            from: Some(from),
            to: Some(to),
        });
        Ok(())
    }

    /// Let `spender` move `token_id` once. Only the holder may approve.
    /// Approving the zero principal clears the approval.
    pub fn approve(
        &mut self,
        caller: &Principal,
        spender: Principal,
        token_id: TokenId,
    ) -> Result<Principal, LedgerError> {
        let holder = self
            .holder_of(&token_id)
            .ok_or(LedgerError::TokenNotFound(token_id))?;
        if *caller != holder {
            return Err(LedgerError::NotAuthorized {
                token_id,
                caller: *caller,
            });
        }
        if spender.is_zero() {
            self.approvals.remove(&token_id);
        } else {
            self.approvals.insert(token_id, spender);
        }
        Ok(holder)
    }

    pub fn burn(
        &mut self,
        token_id: TokenId,
        observer: &mut dyn OwnershipObserver,
    ) -> Result<Principal, LedgerError> {
        let holder = self
            .holders
            .remove(&token_id)
            .ok_or(LedgerError::TokenNotFound(token_id))?;
        self.approvals.remove(&token_id);
        debug!(token = %token_id, holder = %holder, "Token burned");
        observer.holder_changed(&HolderChange {
            token_id,
            from: Some(holder),
            to: None,
        });
        Ok(holder)
    }

    /// Rebuild a ledger from raw tables, as read from a snapshot.
    pub(crate) fn from_tables(
        holders: BTreeMap<TokenId, Principal>,
        approvals: BTreeMap<TokenId, Principal>,
    ) -> Self {
        Self { holders, approvals }
    }
}
