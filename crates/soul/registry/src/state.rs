//! The complete mutable state of one registry, guarded as a unit.

use soul_types::{AuditEventKind, TokenId};

use crate::access::AccessControl;
use crate::audit::AuditLog;
use crate::blob::EncryptedBlobStore;
use crate::breaker::CircuitBreaker;
use crate::error::SnapshotError;
use crate::ledger::TokenLedger;
use crate::store::IdentityStore;
use crate::sync::OwnershipSync;
use crate::treasury::Treasury;

#[derive(Clone, Debug)]
pub(crate) struct RegistryState {
    pub(crate) access: AccessControl,
    pub(crate) breaker: CircuitBreaker,
    pub(crate) store: IdentityStore,
    pub(crate) ledger: TokenLedger,
    pub(crate) blobs: EncryptedBlobStore,
    pub(crate) treasury: Treasury,
    pub(crate) audit: AuditLog,
    /// Next token id to mint. Never decreases.
    pub(crate) next_token_id: TokenId,
}

impl RegistryState {
    pub(crate) fn new(access: AccessControl, breaker: CircuitBreaker) -> Self {
        Self {
            access,
            breaker,
            store: IdentityStore::new(),
            ledger: TokenLedger::new(),
            blobs: EncryptedBlobStore::new(),
            treasury: Treasury::default(),
            audit: AuditLog::new(),
            next_token_id: TokenId::FIRST,
        }
    }

    /// Split borrow of the ledger and an observer that mirrors holder changes
    /// into the identity store.
    pub(crate) fn ledger_with_sync<'a>(
        &'a mut self,
        events: &'a mut Vec<AuditEventKind>,
    ) -> (&'a mut TokenLedger, OwnershipSync<'a>) {
        (&mut self.ledger, OwnershipSync::new(&mut self.store, events))
    }

    /// Cross-table consistency checks.
    ///
    /// Every record is bound to its live token through the reverse index, the
    /// live token's holder is the record owner, every minted token is bound to
    /// a name, and `next_token_id` exceeds every id in use.
    pub(crate) fn check_invariants(&self) -> Result<(), SnapshotError> {
        let inconsistent = |msg: String| Err(SnapshotError::Inconsistent(msg));

        if self.next_token_id.is_none() {
            return inconsistent("next token id is the sentinel".into());
        }

        for (hash, record) in self.store.records() {
            if record.token_id.is_none() {
                return inconsistent(format!("record {} has no token", hash.short_id()));
            }
            if record.token_id >= self.next_token_id {
                return inconsistent(format!(
                    "record {} token {} not below next id {}",
                    hash.short_id(),
                    record.token_id,
                    self.next_token_id
                ));
            }
            if self.store.name_of(hash).is_none() {
                return inconsistent(format!("record {} has no name string", hash.short_id()));
            }
            if self.store.hash_for_token(&record.token_id) != Some(hash) {
                return inconsistent(format!(
                    "token {} is not indexed to record {}",
                    record.token_id,
                    hash.short_id()
                ));
            }
            match self.ledger.holder_of(&record.token_id) {
                Some(holder) if holder == record.owner => {}
                Some(holder) => {
                    return inconsistent(format!(
                        "token {} held by {} but record owner is {}",
                        record.token_id, holder, record.owner
                    ))
                }
                None => {
                    return inconsistent(format!("token {} is not minted", record.token_id))
                }
            }
        }

        for (token_id, hash) in self.store.token_index() {
            if self.store.live_token_binding(token_id) != Some(*hash) {
                return inconsistent(format!(
                    "index entry {} -> {} is not a live binding",
                    token_id,
                    hash.short_id()
                ));
            }
        }

        for (token_id, _) in self.ledger.holders() {
            if self.store.hash_for_token(token_id).is_none() {
                return inconsistent(format!("minted token {token_id} is not bound to a name"));
            }
        }

        if self.access.admin().is_zero() {
            return inconsistent("admin is the zero address".into());
        }

        Ok(())
    }
}
