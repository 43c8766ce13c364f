//! End-to-end test: name lifecycle through the public registry API.
//!
//! Verifies that:
//! - registration, expiry, and reclaim hand a name to a new owner under a new token
//! - renewal arithmetic never backdates a lapsed lease
//! - the circuit breaker blocks every operator call and leaves state intact
//! - stale tokens never reach the current registration

use chrono::{DateTime, Duration, TimeZone, Utc};
use soul_registry::{
    LedgerError, RegistryConfig, RegistryError, RegistrySnapshot, SoulRegistry,
};
use soul_types::{AuditEventKind, CallContext, Principal, SoulHash, TokenId};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const ADMIN: Principal = Principal::repeat(0xad);
const OPERATOR: Principal = Principal::repeat(0x0e);
const OWNER_A: Principal = Principal::repeat(0xaa);
const OWNER_B: Principal = Principal::repeat(0xbb);
const OWNER_C: Principal = Principal::repeat(0xcc);

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 9, 30, 0).unwrap()
}

fn registry() -> SoulRegistry {
    let mut config = RegistryConfig::with_admin(ADMIN);
    config.operators = vec![OPERATOR];
    SoulRegistry::new(config).unwrap()
}

fn as_operator(now: DateTime<Utc>) -> CallContext {
    CallContext::new(OPERATOR, now)
}

fn as_admin(now: DateTime<Utc>) -> CallContext {
    CallContext::new(ADMIN, now)
}

fn soul(tag: &str) -> SoulHash {
    SoulHash::digest(tag.as_bytes())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn register_expire_and_reclaim() {
    let registry = registry();
    let now = t0();

    let first = registry
        .register(&as_operator(now), "alice", OWNER_A, soul("h"), OWNER_A)
        .unwrap();
    let record = registry.resolve("alice", now).unwrap();
    assert_eq!(record.owner, OWNER_A);
    assert_eq!(record.registered_at, now);
    assert_eq!(record.expires_at, now + Duration::days(365));
    assert_eq!(registry.owner_of(first).unwrap(), OWNER_A);
    assert_eq!(registry.name_to_token("alice").unwrap(), first);
    assert_eq!(registry.token_to_name(first).unwrap(), "alice");

    let later = now + Duration::days(366);
    assert!(registry.is_available("alice", later).unwrap());
    assert!(matches!(
        registry.resolve("alice", later),
        Err(RegistryError::NotRegistered(_))
    ));

    let second = registry
        .register(&as_operator(later), "alice", OWNER_B, soul("h2"), OWNER_B)
        .unwrap();
    assert!(second > first);
    assert_eq!(registry.resolve("alice", later).unwrap().owner, OWNER_B);
    assert!(matches!(
        registry.token_to_name(first),
        Err(RegistryError::TokenNotFound(_))
    ));
    assert_eq!(registry.balance_of(&OWNER_A).unwrap(), 0);
    assert!(registry.check_invariants().is_ok());
    assert!(registry.verify_audit().is_ok());
}

#[test]
fn live_name_cannot_be_taken() {
    let registry = registry();
    registry
        .register(&as_operator(t0()), "alice", OWNER_A, soul("h"), OWNER_A)
        .unwrap();

    let last_live_instant = t0() + Duration::days(365);
    assert!(matches!(
        registry.register(&as_operator(last_live_instant), "alice", OWNER_B, soul("x"), OWNER_B),
        Err(RegistryError::NotAvailable(_))
    ));
    assert_eq!(registry.name_to_token("alice").unwrap(), TokenId::FIRST);
}

#[test]
fn renewal_arithmetic() {
    let registry = registry();
    let now = t0();
    registry
        .register(&as_operator(now), "agent-7", OWNER_A, soul("h"), OWNER_A)
        .unwrap();
    let expiry = now + Duration::days(365);

    let renewed = registry.renew(&as_operator(now + Duration::days(100)), "agent-7").unwrap();
    assert_eq!(renewed, expiry + Duration::days(365));

    // Lapsed by a long way: the new lease counts from now.
    let late = renewed + Duration::days(90);
    let revived = registry.renew(&as_operator(late), "agent-7").unwrap();
    assert_eq!(revived, late + Duration::days(365));
    assert_eq!(registry.name_to_token("agent-7").unwrap(), TokenId::FIRST);
    assert_eq!(registry.resolve("agent-7", late).unwrap().owner, OWNER_A);
}

#[test]
fn paused_registry_rejects_operator_calls() {
    let registry = registry();
    let now = t0();
    registry
        .register(&as_operator(now), "alice", OWNER_A, soul("h"), OWNER_A)
        .unwrap();
    let before = registry.snapshot().unwrap();

    registry.pause(&as_admin(now)).unwrap();
    let ctx = as_operator(now);
    let results = [
        registry
            .register(&ctx, "bobby", OWNER_B, soul("b"), OWNER_B)
            .map(|_| ()),
        registry.renew(&ctx, "alice").map(|_| ()),
        registry.update_soul(&ctx, "alice", soul("v2")),
        registry.update_payment_address(&ctx, "alice", OWNER_C),
        registry.store_blob(&ctx, "alice", vec![1, 2, 3]),
    ];
    for result in results {
        assert!(matches!(result, Err(RegistryError::Paused)));
    }

    registry.unpause(&as_admin(now)).unwrap();
    let after = registry.snapshot().unwrap();
    assert_eq!(before.identities, after.identities);
    assert_eq!(before.tokens, after.tokens);
    assert_eq!(before.blobs, after.blobs);

    registry.update_soul(&ctx, "alice", soul("v2")).unwrap();
    assert_eq!(registry.resolve("alice", now).unwrap().soul_hash, soul("v2"));
}

#[test]
fn live_token_transfer_moves_identity_owner() {
    let registry = registry();
    let now = t0();
    let token = registry
        .register(&as_operator(now), "alice", OWNER_A, soul("h"), OWNER_A)
        .unwrap();

    registry
        .transfer_token(&CallContext::new(OWNER_A, now), OWNER_A, OWNER_B, token)
        .unwrap();
    assert_eq!(registry.resolve("alice", now).unwrap().owner, OWNER_B);

    let ownership_events: Vec<_> = registry
        .events_since(0)
        .unwrap()
        .into_iter()
        .filter(|e| matches!(e.kind, AuditEventKind::OwnershipTransferred { .. }))
        .collect();
    assert_eq!(ownership_events.len(), 1);
}

#[test]
fn stale_token_never_touches_the_new_registration() {
    let registry = registry();
    let now = t0();
    let stale = registry
        .register(&as_operator(now), "alice", OWNER_A, soul("h"), OWNER_A)
        .unwrap();

    let later = now + Duration::days(400);
    let live = registry
        .register(&as_operator(later), "alice", OWNER_B, soul("h2"), OWNER_B)
        .unwrap();

    let err = registry
        .transfer_token(&CallContext::new(OWNER_A, later), OWNER_A, OWNER_C, stale)
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Ledger(LedgerError::TokenNotFound(id)) if id == stale
    ));
    assert_eq!(registry.resolve("alice", later).unwrap().owner, OWNER_B);
    assert_eq!(registry.owner_of(live).unwrap(), OWNER_B);
}

#[test]
fn state_survives_a_snapshot_roundtrip() {
    let registry = registry();
    let now = t0();
    registry
        .register(&as_operator(now), "alice", OWNER_A, soul("h"), OWNER_A)
        .unwrap();
    registry
        .store_blob(&as_operator(now), "alice", b"ciphertext".to_vec())
        .unwrap();
    registry.pause(&as_admin(now)).unwrap();

    let json = registry.snapshot().unwrap().to_json().unwrap();
    let snapshot = RegistrySnapshot::from_json(&json).unwrap();
    let restored = SoulRegistry::restore(RegistryConfig::with_admin(ADMIN), snapshot).unwrap();

    assert!(restored.is_paused().unwrap());
    assert_eq!(restored.get_blob("alice").unwrap(), b"ciphertext".to_vec());
    assert_eq!(
        restored.events_since(0).unwrap(),
        registry.events_since(0).unwrap()
    );
}
