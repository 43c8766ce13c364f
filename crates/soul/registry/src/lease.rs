//! Register, renew and reclaim-on-expiry.
//!
//! Expiry is evaluated lazily against the caller-supplied `now`; nothing
//! sweeps expired records. An expired record stays in place until a later
//! registration of the same name reclaims it, or a renewal resurrects it
//! under its original token.

use chrono::{DateTime, Duration, Utc};
use soul_types::{AuditEventKind, IdentityRecord, NameHash, Principal, SoulHash, TokenId};
use tracing::{debug, info};

use crate::error::{ArgumentError, LedgerError, RegistryError, Result};
use crate::name;
use crate::state::RegistryState;

/// Lease rules with a fixed term.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaseLifecycle {
    term: Duration,
}

/// Arguments of a registration.
#[derive(Clone, Copy, Debug)]
pub struct Registration<'a> {
    pub name: &'a str,
    pub owner: Principal,
    pub soul_hash: SoulHash,
    pub payment_address: Principal,
}

impl LeaseLifecycle {
    pub fn new(term: Duration) -> Self {
        Self { term }
    }

    pub fn term(&self) -> Duration {
        self.term
    }

    /// Expiry of a lease starting at `start`.
    pub fn expiry_from(&self, start: DateTime<Utc>) -> std::result::Result<DateTime<Utc>, ArgumentError> {
        start
            .checked_add_signed(self.term)
            .ok_or(ArgumentError::Overflow {
                field: "expires_at",
            })
    }

    /// Expiry after renewing a lease that currently ends at `expires_at`.
    ///
    /// A lapsed lease restarts at `now`; it is never backdated.
    pub fn renewed_expiry(
        &self,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> std::result::Result<DateTime<Utc>, ArgumentError> {
        self.expiry_from(expires_at.max(now))
    }

    pub(crate) fn register(
        &self,
        state: &mut RegistryState,
        request: Registration<'_>,
        now: DateTime<Utc>,
        events: &mut Vec<AuditEventKind>,
    ) -> Result<TokenId> {
        let hash = name::validate(request.name)?;
        if !state.store.is_available(&hash, now) {
            return Err(RegistryError::NotAvailable(request.name.to_string()));
        }
        if request.owner.is_zero() {
            return Err(ArgumentError::ZeroAddress { field: "owner" }.into());
        }
        if request.payment_address.is_zero() {
            return Err(ArgumentError::ZeroAddress {
                field: "payment_address",
            }
            .into());
        }
        if request.soul_hash.is_zero() {
            return Err(ArgumentError::ZeroHash { field: "soul_hash" }.into());
        }
        let expires_at = self.expiry_from(now)?;
        let token_id = state.next_token_id;
        let following = token_id
            .next()
            .ok_or(LedgerError::IdsExhausted(token_id))?;
        if state.ledger.exists(&token_id) {
            return Err(LedgerError::AlreadyMinted(token_id).into());
        }

        // Nothing below can fail.
        if let Some(previous) = state.store.get(&hash).cloned() {
            self.reclaim(state, hash, request.name, &previous, events)?;
        }

        state.next_token_id = following;
        state.store.bind(
            hash,
            request.name,
            IdentityRecord {
                token_id,
                owner: request.owner,
                soul_hash: request.soul_hash,
                payment_address: request.payment_address,
                registered_at: now,
                expires_at,
            },
        );
        let (ledger, mut sync) = state.ledger_with_sync(events);
        ledger.mint(request.owner, token_id, &mut sync)?;

        info!(
            name = request.name,
            token = %token_id,
            owner = %request.owner,
            expires_at = %expires_at,
            "Name registered"
        );
        events.push(AuditEventKind::NameRegistered {
            name: request.name.to_string(),
            name_hash: hash,
            token_id,
            owner: request.owner,
            soul_hash: request.soul_hash,
            payment_address: request.payment_address,
            expires_at,
        });
        Ok(token_id)
    }

    /// Retire an expired record's token and blob.
    fn reclaim(
        &self,
        state: &mut RegistryState,
        hash: NameHash,
        name: &str,
        previous: &IdentityRecord,
        events: &mut Vec<AuditEventKind>,
    ) -> Result<()> {
        let retired = previous.token_id;
        state.store.retire_token(&retired);
        state.blobs.remove(&hash);
        if state.ledger.exists(&retired) {
            let (ledger, mut sync) = state.ledger_with_sync(events);
            ledger.burn(retired, &mut sync)?;
        }
        info!(name, retired = %retired, previous_owner = %previous.owner, "Expired name reclaimed");
        events.push(AuditEventKind::NameReclaimed {
            name: name.to_string(),
            retired_token: retired,
            previous_owner: previous.owner,
        });
        Ok(())
    }

    /// Extend the lease of an existing record, live or lapsed.
    pub(crate) fn renew(
        &self,
        state: &mut RegistryState,
        name: &str,
        now: DateTime<Utc>,
        events: &mut Vec<AuditEventKind>,
    ) -> Result<DateTime<Utc>> {
        let hash = NameHash::of(name);
        let record = state
            .store
            .get_mut(&hash)
            .ok_or_else(|| RegistryError::NotRegistered(name.to_string()))?;
        let expires_at = self.renewed_expiry(record.expires_at, now)?;
        let lapsed = record.is_reclaimable(now);
        record.expires_at = expires_at;
        let token_id = record.token_id;

        info!(name, token = %token_id, expires_at = %expires_at, lapsed, "Lease renewed");
        events.push(AuditEventKind::NameRenewed {
            name: name.to_string(),
            token_id,
            expires_at,
        });
        Ok(expires_at)
    }

    pub(crate) fn update_soul(
        &self,
        state: &mut RegistryState,
        name: &str,
        soul_hash: SoulHash,
        events: &mut Vec<AuditEventKind>,
    ) -> Result<()> {
        let record = existing(state, name)?;
        if soul_hash.is_zero() {
            return Err(ArgumentError::ZeroHash { field: "soul_hash" }.into());
        }
        record.soul_hash = soul_hash;
        debug!(name, soul_hash = %soul_hash, "Soul hash updated");
        events.push(AuditEventKind::SoulUpdated {
            name: name.to_string(),
            soul_hash,
        });
        Ok(())
    }

    pub(crate) fn update_payment_address(
        &self,
        state: &mut RegistryState,
        name: &str,
        payment_address: Principal,
        events: &mut Vec<AuditEventKind>,
    ) -> Result<()> {
        let record = existing(state, name)?;
        if payment_address.is_zero() {
            return Err(ArgumentError::ZeroAddress {
                field: "payment_address",
            }
            .into());
        }
        record.payment_address = payment_address;
        debug!(name, payment_address = %payment_address, "Payment address updated");
        events.push(AuditEventKind::PaymentAddressUpdated {
            name: name.to_string(),
            payment_address,
        });
        Ok(())
    }
}

/// The record for `name` regardless of liveness.
fn existing<'s>(state: &'s mut RegistryState, name: &str) -> Result<&'s mut IdentityRecord> {
    state
        .store
        .get_mut(&NameHash::of(name))
        .ok_or_else(|| RegistryError::NotRegistered(name.to_string()))
}
