//! The registry facade.
//!
//! Every mutating entry point takes the write lock for the whole call, runs
//! its gates in order (circuit breaker, then role check), applies the change
//! and commits the buffered audit events. Any failure aborts the call before
//! the first write, so a rejected call leaves no trace. Reads take the read
//! lock and bypass both gates.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use soul_types::{
    Amount, AuditEventKind, CallContext, IdentityRecord, NameHash, Principal, SoulHash, TokenId,
};
use tracing::{debug, info, warn};

use crate::access::AccessControl;
use crate::audit::AuditEvent;
use crate::breaker::CircuitBreaker;
use crate::config::{LeaseConfig, RegistryConfig};
use crate::error::{ArgumentError, RegistryError, Result};
use crate::lease::{LeaseLifecycle, Registration};
use crate::name;
use crate::pricing::PricingPolicy;
use crate::snapshot::RegistrySnapshot;
use crate::state::RegistryState;

type Events = Vec<AuditEventKind>;

pub struct SoulRegistry {
    lease: LeaseLifecycle,
    pricing: PricingPolicy,
    inner: RwLock<RegistryState>,
}

impl SoulRegistry {
    /// Bootstrap an empty registry.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        let mut access = AccessControl::new(config.admin)?;
        for operator in &config.operators {
            access.set_operator(*operator, true)?;
        }
        let state = RegistryState::new(access, CircuitBreaker::new(config.start_paused));
        info!(
            admin = %config.admin,
            operators = config.operators.len(),
            paused = config.start_paused,
            "Registry initialized"
        );
        Ok(Self::from_parts(&config, state))
    }

    /// Rebuild a registry from a snapshot.
    ///
    /// Roles and the pause flag come from the snapshot; the config supplies
    /// the lease term and price table. [`RegistrySnapshot::config`] gives
    /// back the terms the snapshot was taken under.
    pub fn restore(config: RegistryConfig, snapshot: RegistrySnapshot) -> Result<Self> {
        config.validate()?;
        let state = snapshot.into_state()?;
        info!(
            records = state.store.len(),
            next_token = %state.next_token_id,
            audit_head = state.audit.head_seq(),
            "Registry restored"
        );
        Ok(Self::from_parts(&config, state))
    }

    fn from_parts(config: &RegistryConfig, state: RegistryState) -> Self {
        Self {
            lease: LeaseLifecycle::new(config.lease.term()),
            pricing: config.pricing,
            inner: RwLock::new(state),
        }
    }

    pub fn snapshot(&self) -> Result<RegistrySnapshot> {
        let lease = LeaseConfig {
            term_days: self.lease.term().num_days(),
        };
        Ok(RegistrySnapshot::capture(&*self.read()?, lease, self.pricing))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RegistryState>> {
        self.inner.read().map_err(|_| RegistryError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RegistryState>> {
        self.inner.write().map_err(|_| RegistryError::LockPoisoned)
    }

    /// Run `op` under the write lock and commit its events on success.
    fn commit<T>(
        &self,
        ctx: &CallContext,
        gate: impl FnOnce(&RegistryState) -> Result<()>,
        op: impl FnOnce(&mut RegistryState, &mut Events) -> Result<T>,
    ) -> Result<T> {
        let mut state = self.write()?;
        gate(&*state)?;
        let mut events = Events::new();
        let value = op(&mut *state, &mut events)?;
        state.audit.commit(ctx.now, events);
        Ok(value)
    }

    /// Operator calls: breaker first, then the operator flag.
    fn operator_call<T>(
        &self,
        ctx: &CallContext,
        op: impl FnOnce(&mut RegistryState, &mut Events) -> Result<T>,
    ) -> Result<T> {
        self.commit(
            ctx,
            |state| {
                state.breaker.require_not_paused(&ctx.caller)?;
                state.access.require_operator(&ctx.caller)?;
                Ok(())
            },
            op,
        )
    }

    fn admin_call<T>(
        &self,
        ctx: &CallContext,
        op: impl FnOnce(&mut RegistryState, &mut Events) -> Result<T>,
    ) -> Result<T> {
        self.commit(
            ctx,
            |state| Ok(state.access.require_admin(&ctx.caller)?),
            op,
        )
    }

    fn open_call<T>(
        &self,
        ctx: &CallContext,
        op: impl FnOnce(&mut RegistryState, &mut Events) -> Result<T>,
    ) -> Result<T> {
        self.commit(ctx, |_| Ok(()), op)
    }

    // ------------------------------------------------------------------
    // Operator entry points
    // ------------------------------------------------------------------

    /// Register `name` on behalf of `owner`. Returns the freshly minted token.
    ///
    /// An expired record under the same name is reclaimed first: its token is
    /// burned and unindexed, and its blob is deleted.
    pub fn register(
        &self,
        ctx: &CallContext,
        name: &str,
        owner: Principal,
        soul_hash: SoulHash,
        payment_address: Principal,
    ) -> Result<TokenId> {
        let request = Registration {
            name,
            owner,
            soul_hash,
            payment_address,
        };
        self.operator_call(ctx, |state, events| {
            self.lease.register(state, request, ctx.now, events)
        })
    }

    /// Extend the lease on `name`. Returns the new expiry.
    pub fn renew(&self, ctx: &CallContext, name: &str) -> Result<DateTime<Utc>> {
        self.operator_call(ctx, |state, events| {
            self.lease.renew(state, name, ctx.now, events)
        })
    }

    pub fn update_soul(&self, ctx: &CallContext, name: &str, soul_hash: SoulHash) -> Result<()> {
        self.operator_call(ctx, |state, events| {
            self.lease.update_soul(state, name, soul_hash, events)
        })
    }

    pub fn update_payment_address(
        &self,
        ctx: &CallContext,
        name: &str,
        payment_address: Principal,
    ) -> Result<()> {
        self.operator_call(ctx, |state, events| {
            self.lease
                .update_payment_address(state, name, payment_address, events)
        })
    }

    /// Attach an opaque blob to `name`. Requires a record, not a live one.
    pub fn store_blob(&self, ctx: &CallContext, name: &str, bytes: Vec<u8>) -> Result<()> {
        self.operator_call(ctx, |state, events| {
            let hash = NameHash::of(name);
            if state.store.get(&hash).is_none() {
                return Err(RegistryError::NotRegistered(name.to_string()));
            }
            let len = bytes.len();
            state.blobs.put(hash, bytes);
            debug!(name, len, "Blob stored");
            events.push(AuditEventKind::BlobStored {
                name: name.to_string(),
                len,
            });
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Token entry points
    // ------------------------------------------------------------------

    /// Move a name token. The caller must hold it or be its approved spender.
    ///
    /// When the token is the live token of its name, the identity owner
    /// follows the new holder.
    pub fn transfer_token(
        &self,
        ctx: &CallContext,
        from: Principal,
        to: Principal,
        token_id: TokenId,
    ) -> Result<()> {
        self.open_call(ctx, |state, events| {
            let (ledger, mut sync) = state.ledger_with_sync(events);
            ledger.transfer(&ctx.caller, from, to, token_id, &mut sync)?;
            Ok(())
        })
    }

    /// Approve `spender` for one transfer of `token_id`. A zero spender clears
    /// the approval.
    pub fn approve_token(&self, ctx: &CallContext, spender: Principal, token_id: TokenId) -> Result<()> {
        self.open_call(ctx, |state, events| {
            let holder = state.ledger.approve(&ctx.caller, spender, token_id)?;
            events.push(AuditEventKind::TokenApproved {
                token_id,
                holder,
                spender,
            });
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Admin entry points
    // ------------------------------------------------------------------

    pub fn set_operator(&self, ctx: &CallContext, operator: Principal, enabled: bool) -> Result<()> {
        self.admin_call(ctx, |state, events| {
            let previous = state.access.set_operator(operator, enabled)?;
            info!(operator = %operator, enabled, previous, "Operator flag set");
            events.push(AuditEventKind::OperatorChanged { operator, enabled });
            Ok(())
        })
    }

    /// Engage the circuit breaker. Pausing a paused registry is a no-op.
    pub fn pause(&self, ctx: &CallContext) -> Result<()> {
        self.admin_call(ctx, |state, events| {
            if state.breaker.pause() {
                warn!(by = %ctx.caller, "Registry paused");
                events.push(AuditEventKind::Paused { by: ctx.caller });
            }
            Ok(())
        })
    }

    /// Release the circuit breaker. Unpausing a running registry is a no-op.
    pub fn unpause(&self, ctx: &CallContext) -> Result<()> {
        self.admin_call(ctx, |state, events| {
            if state.breaker.unpause() {
                info!(by = %ctx.caller, "Registry unpaused");
                events.push(AuditEventKind::Unpaused { by: ctx.caller });
            }
            Ok(())
        })
    }

    pub fn transfer_admin(&self, ctx: &CallContext, new_admin: Principal) -> Result<()> {
        self.admin_call(ctx, |state, events| {
            let previous = state.access.transfer_admin(new_admin)?;
            warn!(from = %previous, to = %new_admin, "Admin role transferred");
            events.push(AuditEventKind::AdminTransferred {
                from: previous,
                to: new_admin,
            });
            Ok(())
        })
    }

    /// Credit the treasury. Open to any caller. Returns the new balance.
    pub fn deposit(&self, ctx: &CallContext, amount: Amount) -> Result<Amount> {
        self.open_call(ctx, |state, events| {
            let balance = state.treasury.deposit(amount)?;
            debug!(from = %ctx.caller, amount = %amount, balance = %balance, "Funds received");
            events.push(AuditEventKind::FundsReceived {
                from: ctx.caller,
                amount,
            });
            Ok(balance)
        })
    }

    /// Pay out of the treasury. Returns the new balance.
    pub fn withdraw(&self, ctx: &CallContext, recipient: Principal, amount: Amount) -> Result<Amount> {
        self.admin_call(ctx, |state, events| {
            if recipient.is_zero() {
                return Err(ArgumentError::ZeroAddress { field: "recipient" }.into());
            }
            let balance = state.treasury.withdraw(amount)?;
            info!(recipient = %recipient, amount = %amount, balance = %balance, "Funds withdrawn");
            events.push(AuditEventKind::FundsWithdrawn { recipient, amount });
            Ok(balance)
        })
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// The live record for `name`.
    pub fn resolve(&self, name: &str, now: DateTime<Utc>) -> Result<IdentityRecord> {
        self.read()?
            .store
            .live(&NameHash::of(name), now)
            .cloned()
            .ok_or_else(|| RegistryError::NotRegistered(name.to_string()))
    }

    /// True iff `name` is well-formed and has no live record at `now`.
    pub fn is_available(&self, name: &str, now: DateTime<Utc>) -> Result<bool> {
        let hash = name::validate(name)?;
        Ok(self.read()?.store.is_available(&hash, now))
    }

    pub fn get_price(&self, name: &str) -> Result<Amount> {
        Ok(self.pricing.price_for(name)?)
    }

    /// Token id bound to `name`, live or lapsed.
    pub fn name_to_token(&self, name: &str) -> Result<TokenId> {
        self.read()?
            .store
            .get(&NameHash::of(name))
            .map(|record| record.token_id)
            .ok_or_else(|| RegistryError::NotRegistered(name.to_string()))
    }

    /// Name bound to `token_id`. Retired tokens are not found.
    pub fn token_to_name(&self, token_id: TokenId) -> Result<String> {
        let state = self.read()?;
        state
            .store
            .hash_for_token(&token_id)
            .and_then(|hash| state.store.name_of(hash))
            .map(str::to_string)
            .ok_or(RegistryError::TokenNotFound(token_id))
    }

    /// Stored blob for `name`, empty if none.
    pub fn get_blob(&self, name: &str) -> Result<Vec<u8>> {
        Ok(self.read()?.blobs.get(&NameHash::of(name)).to_vec())
    }

    pub fn owner_of(&self, token_id: TokenId) -> Result<Principal> {
        self.read()?
            .ledger
            .holder_of(&token_id)
            .ok_or(RegistryError::TokenNotFound(token_id))
    }

    pub fn approved(&self, token_id: TokenId) -> Result<Option<Principal>> {
        Ok(self.read()?.ledger.approved(&token_id))
    }

    pub fn balance_of(&self, who: &Principal) -> Result<usize> {
        Ok(self.read()?.ledger.balance_of(who))
    }

    pub fn admin(&self) -> Result<Principal> {
        Ok(self.read()?.access.admin())
    }

    pub fn is_operator(&self, who: &Principal) -> Result<bool> {
        Ok(self.read()?.access.is_operator(who))
    }

    pub fn is_paused(&self) -> Result<bool> {
        Ok(self.read()?.breaker.is_paused())
    }

    pub fn treasury_balance(&self) -> Result<Amount> {
        Ok(self.read()?.treasury.balance())
    }

    pub fn lease(&self) -> &LeaseLifecycle {
        &self.lease
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    /// Committed audit events with `seq > after`.
    pub fn events_since(&self, after: u64) -> Result<Vec<AuditEvent>> {
        Ok(self.read()?.audit.since(after).to_vec())
    }

    pub fn verify_audit(&self) -> Result<()> {
        Ok(self.read()?.audit.verify()?)
    }

    pub fn check_invariants(&self) -> Result<()> {
        Ok(self.read()?.check_invariants()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccessError;
    use chrono::{Duration, TimeZone};

    const ADMIN: Principal = Principal::repeat(0xad);
    const OPERATOR: Principal = Principal::repeat(0x0e);
    const ALICE: Principal = Principal::repeat(0xa1);
    const BOB: Principal = Principal::repeat(0xb0);

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    fn registry() -> SoulRegistry {
        let mut config = RegistryConfig::with_admin(ADMIN);
        config.operators.push(OPERATOR);
        SoulRegistry::new(config).unwrap()
    }

    fn op(now: DateTime<Utc>) -> CallContext {
        CallContext::new(OPERATOR, now)
    }

    fn admin(now: DateTime<Utc>) -> CallContext {
        CallContext::new(ADMIN, now)
    }

    fn register(registry: &SoulRegistry, name: &str, owner: Principal, now: DateTime<Utc>) -> Result<TokenId> {
        registry.register(&op(now), name, owner, SoulHash::digest(name.as_bytes()), owner)
    }

    #[test]
    fn gates_run_breaker_before_role() {
        let registry = registry();
        registry.pause(&admin(t0())).unwrap();

        let stranger = CallContext::new(ALICE, t0());
        let err = registry
            .register(&stranger, "alice", ALICE, SoulHash::digest(b"x"), ALICE)
            .unwrap_err();
        assert!(matches!(err, RegistryError::Paused));

        registry.unpause(&admin(t0())).unwrap();
        let err = registry
            .register(&stranger, "alice", ALICE, SoulHash::digest(b"x"), ALICE)
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Unauthorized(AccessError::NotOperator(_))
        ));
    }

    #[test]
    fn rejected_calls_leave_no_events() {
        let registry = registry();
        register(&registry, "alice", ALICE, t0()).unwrap();
        let head = registry.events_since(0).unwrap().len();

        assert!(register(&registry, "alice", BOB, t0()).is_err());
        assert!(register(&registry, "-bad", BOB, t0()).is_err());
        assert!(registry.renew(&op(t0()), "ghost").is_err());
        assert_eq!(registry.events_since(0).unwrap().len(), head);
    }

    #[test]
    fn reads_bypass_gates() {
        let registry = registry();
        register(&registry, "alice", ALICE, t0()).unwrap();
        registry.pause(&admin(t0())).unwrap();

        assert_eq!(registry.resolve("alice", t0()).unwrap().owner, ALICE);
        assert!(!registry.is_available("alice", t0()).unwrap());
        assert_eq!(registry.name_to_token("alice").unwrap(), TokenId::FIRST);
        assert_eq!(registry.token_to_name(TokenId::FIRST).unwrap(), "alice");
        assert_eq!(registry.get_price("abc").unwrap(), Amount(5000));
        assert!(registry.get_blob("alice").unwrap().is_empty());
    }

    #[test]
    fn resolve_hides_expired_records() {
        let registry = registry();
        register(&registry, "alice", ALICE, t0()).unwrap();
        let expiry = t0() + Duration::days(365);
        assert!(registry.resolve("alice", expiry).is_ok());
        assert!(matches!(
            registry.resolve("alice", expiry + Duration::seconds(1)),
            Err(RegistryError::NotRegistered(_))
        ));
        // Still bound to its token until reclaimed.
        assert_eq!(registry.name_to_token("alice").unwrap(), TokenId::FIRST);
    }

    #[test]
    fn transfer_syncs_owner_and_is_not_paused() {
        let registry = registry();
        let token = register(&registry, "alice", ALICE, t0()).unwrap();
        registry.pause(&admin(t0())).unwrap();

        registry
            .transfer_token(&CallContext::new(ALICE, t0()), ALICE, BOB, token)
            .unwrap();
        assert_eq!(registry.resolve("alice", t0()).unwrap().owner, BOB);
        assert_eq!(registry.owner_of(token).unwrap(), BOB);
        assert!(registry.check_invariants().is_ok());

        let labels: Vec<_> = registry
            .events_since(0)
            .unwrap()
            .iter()
            .map(|e| e.kind.label())
            .collect();
        assert_eq!(
            labels,
            vec!["name_registered", "paused", "token_transferred", "ownership_transferred"]
        );
    }

    #[test]
    fn approved_spender_can_transfer_once() {
        let registry = registry();
        let token = register(&registry, "alice", ALICE, t0()).unwrap();
        registry
            .approve_token(&CallContext::new(ALICE, t0()), BOB, token)
            .unwrap();
        assert_eq!(registry.approved(token).unwrap(), Some(BOB));

        registry
            .transfer_token(&CallContext::new(BOB, t0()), ALICE, BOB, token)
            .unwrap();
        assert_eq!(registry.approved(token).unwrap(), None);
        assert_eq!(registry.resolve("alice", t0()).unwrap().owner, BOB);
    }

    #[test]
    fn operator_management() {
        let registry = registry();
        assert!(registry.set_operator(&op(t0()), ALICE, true).is_err());

        registry.set_operator(&admin(t0()), ALICE, true).unwrap();
        assert!(registry.is_operator(&ALICE).unwrap());
        registry
            .register(
                &CallContext::new(ALICE, t0()),
                "alice",
                ALICE,
                SoulHash::digest(b"alice"),
                ALICE,
            )
            .unwrap();

        registry.set_operator(&admin(t0()), OPERATOR, false).unwrap();
        assert!(matches!(
            register(&registry, "bob", BOB, t0()),
            Err(RegistryError::Unauthorized(_))
        ));
        assert!(matches!(
            registry.set_operator(&admin(t0()), Principal::ZERO, true),
            Err(RegistryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn admin_handover() {
        let registry = registry();
        registry.transfer_admin(&admin(t0()), ALICE).unwrap();
        assert_eq!(registry.admin().unwrap(), ALICE);
        assert!(registry.pause(&admin(t0())).is_err());
        registry.pause(&CallContext::new(ALICE, t0())).unwrap();
        assert!(registry.is_paused().unwrap());
    }

    #[test]
    fn treasury_flow() {
        let registry = registry();
        let payer = CallContext::new(ALICE, t0());
        assert_eq!(registry.deposit(&payer, Amount(5000)).unwrap(), Amount(5000));
        assert!(matches!(
            registry.withdraw(&payer, BOB, Amount(1)),
            Err(RegistryError::Unauthorized(_))
        ));
        assert!(matches!(
            registry.withdraw(&admin(t0()), Principal::ZERO, Amount(1)),
            Err(RegistryError::InvalidArgument(_))
        ));
        assert!(matches!(
            registry.withdraw(&admin(t0()), BOB, Amount(6000)),
            Err(RegistryError::InsufficientFunds { .. })
        ));
        assert_eq!(
            registry.withdraw(&admin(t0()), BOB, Amount(2000)).unwrap(),
            Amount(3000)
        );
        assert_eq!(registry.treasury_balance().unwrap(), Amount(3000));
    }

    #[test]
    fn store_blob_requires_existence_only() {
        let registry = registry();
        assert!(matches!(
            registry.store_blob(&op(t0()), "alice", vec![1]),
            Err(RegistryError::NotRegistered(_))
        ));
        register(&registry, "alice", ALICE, t0()).unwrap();

        let lapsed = t0() + Duration::days(400);
        registry
            .store_blob(&op(lapsed), "alice", vec![1, 2, 3])
            .unwrap();
        assert_eq!(registry.get_blob("alice").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn snapshot_restore_continues_the_chain() {
        let registry = registry();
        register(&registry, "alice", ALICE, t0()).unwrap();
        let snapshot = registry.snapshot().unwrap();

        let restored = SoulRegistry::restore(RegistryConfig::with_admin(ADMIN), snapshot).unwrap();
        assert!(restored.is_operator(&OPERATOR).unwrap());
        let token = register(&restored, "bob", BOB, t0()).unwrap();
        assert_eq!(token, TokenId(2));
        assert!(restored.verify_audit().is_ok());
        assert_eq!(restored.events_since(1).unwrap().len(), 1);
    }

    #[test]
    fn snapshot_keeps_configured_terms() {
        let mut config = RegistryConfig::with_admin(ADMIN);
        config.operators.push(OPERATOR);
        config.lease.term_days = 30;
        config.pricing.short_tier = Amount(42);
        let registry = SoulRegistry::new(config).unwrap();
        let snapshot = registry.snapshot().unwrap();

        let restored = SoulRegistry::restore(snapshot.config(), snapshot).unwrap();
        assert_eq!(restored.lease().term(), Duration::days(30));
        assert_eq!(restored.get_price("abc").unwrap(), Amount(42));
        let token = register(&restored, "alice", ALICE, t0()).unwrap();
        assert_eq!(
            restored.resolve("alice", t0()).unwrap().expires_at,
            t0() + Duration::days(30)
        );
        assert_eq!(token, TokenId::FIRST);
    }

    #[test]
    fn oversized_lease_term_is_a_config_error() {
        let mut config = RegistryConfig::with_admin(ADMIN);
        config.lease.term_days = i64::MAX;
        assert!(matches!(
            SoulRegistry::new(config),
            Err(RegistryError::Config(_))
        ));
    }

    #[test]
    fn unrepresentable_expiry_leaves_the_registry_usable() {
        let registry = registry();
        let late = DateTime::<Utc>::MAX_UTC - Duration::days(1);
        let err = register(&registry, "alice", ALICE, late).unwrap_err();
        assert_eq!(err.kind(), "invalid_argument.overflow");

        assert!(!registry.is_paused().unwrap());
        assert!(registry.is_available("alice", t0()).unwrap());
        assert_eq!(register(&registry, "alice", ALICE, t0()).unwrap(), TokenId::FIRST);
    }

    #[test]
    fn exhausted_token_ids_fail_cleanly_after_restore() {
        let mut snapshot = registry().snapshot().unwrap();
        snapshot.next_token_id = TokenId(u64::MAX);
        let restored = SoulRegistry::restore(snapshot.config(), snapshot).unwrap();

        let err = register(&restored, "alice", ALICE, t0()).unwrap_err();
        assert_eq!(err.kind(), "ledger.ids_exhausted");
        assert!(restored.is_available("alice", t0()).unwrap());
        assert!(restored.check_invariants().is_ok());
        assert!(restored.events_since(0).unwrap().is_empty());
    }

    #[test]
    fn zero_payment_address_is_rejected() {
        let registry = registry();
        let err = registry
            .register(&op(t0()), "alice", ALICE, SoulHash::digest(b"x"), Principal::ZERO)
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_argument.zero_address");

        register(&registry, "alice", ALICE, t0()).unwrap();
        let err = registry
            .update_payment_address(&op(t0()), "alice", Principal::ZERO)
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_argument.zero_address");
        assert_eq!(registry.resolve("alice", t0()).unwrap().payment_address, ALICE);
    }
}
