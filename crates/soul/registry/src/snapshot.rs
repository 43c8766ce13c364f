//! Versioned registry snapshots.
//!
//! A snapshot is the complete registry state in table form. It is how state
//! survives a process restart or a redeployment: the new build restores the
//! snapshot, and restore refuses unknown schema versions and any snapshot
//! whose tables disagree with each other.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use soul_types::{Amount, IdentityRecord, NameHash, Principal, TokenId};

use crate::access::AccessControl;
use crate::audit::{AuditEvent, AuditLog};
use crate::blob::EncryptedBlobStore;
use crate::breaker::CircuitBreaker;
use crate::config::{LeaseConfig, RegistryConfig};
use crate::error::SnapshotError;
use crate::ledger::TokenLedger;
use crate::pricing::PricingPolicy;
use crate::state::RegistryState;
use crate::store::IdentityStore;
use crate::treasury::Treasury;

/// Current snapshot layout version.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityEntry {
    pub name: String,
    pub name_hash: NameHash,
    pub record: IdentityRecord,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenIndexEntry {
    pub token_id: TokenId,
    pub name_hash: NameHash,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    pub token_id: TokenId,
    pub holder: Principal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<Principal>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobEntry {
    pub name_hash: NameHash,
    #[serde(with = "hex::serde")]
    pub data: Vec<u8>,
}

/// Complete registry state at one point in the commit order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub schema_version: u32,
    pub admin: Principal,
    pub operators: Vec<Principal>,
    pub paused: bool,
    pub next_token_id: TokenId,
    pub treasury: Amount,
    /// Lease term in force when the snapshot was taken
    #[serde(default)]
    pub lease: LeaseConfig,
    /// Price table in force when the snapshot was taken
    #[serde(default)]
    pub pricing: PricingPolicy,
    pub identities: Vec<IdentityEntry>,
    pub token_index: Vec<TokenIndexEntry>,
    pub tokens: Vec<TokenEntry>,
    pub blobs: Vec<BlobEntry>,
    pub audit: Vec<AuditEvent>,
}

#[derive(Deserialize)]
struct SchemaProbe {
    schema_version: u32,
}

fn check_schema(found: u32) -> Result<(), SnapshotError> {
    if found == SCHEMA_VERSION {
        Ok(())
    } else {
        Err(SnapshotError::UnsupportedSchema {
            found,
            supported: SCHEMA_VERSION,
        })
    }
}

impl RegistrySnapshot {
    pub(crate) fn capture(state: &RegistryState, lease: LeaseConfig, pricing: PricingPolicy) -> Self {
        let identities = state
            .store
            .records()
            .map(|(hash, record)| IdentityEntry {
                name: state.store.name_of(hash).unwrap_or_default().to_string(),
                name_hash: *hash,
                record: record.clone(),
            })
            .collect();
        let token_index = state
            .store
            .token_index()
            .map(|(token_id, hash)| TokenIndexEntry {
                token_id: *token_id,
                name_hash: *hash,
            })
            .collect();
        let tokens = state
            .ledger
            .holders()
            .map(|(token_id, holder)| TokenEntry {
                token_id: *token_id,
                holder: *holder,
                approved: state.ledger.approved(token_id),
            })
            .collect();
        let blobs = state
            .blobs
            .iter()
            .map(|(hash, data)| BlobEntry {
                name_hash: *hash,
                data: data.clone(),
            })
            .collect();

        Self {
            schema_version: SCHEMA_VERSION,
            admin: state.access.admin(),
            operators: state.access.operators().copied().collect(),
            paused: state.breaker.is_paused(),
            next_token_id: state.next_token_id,
            treasury: state.treasury.balance(),
            lease,
            pricing,
            identities,
            token_index,
            tokens,
            blobs,
            audit: state.audit.events().to_vec(),
        }
    }

    /// Rebuild registry state, rejecting unknown versions and inconsistent
    /// tables.
    pub(crate) fn into_state(self) -> Result<RegistryState, SnapshotError> {
        check_schema(self.schema_version)?;

        let mut access = AccessControl::new(self.admin)
            .map_err(|e| SnapshotError::Inconsistent(e.to_string()))?;
        for operator in self.operators {
            access
                .set_operator(operator, true)
                .map_err(|e| SnapshotError::Inconsistent(e.to_string()))?;
        }

        let mut records = BTreeMap::new();
        let mut names = BTreeMap::new();
        for entry in self.identities {
            if NameHash::of(&entry.name) != entry.name_hash {
                return Err(SnapshotError::Inconsistent(format!(
                    "name {:?} does not hash to {}",
                    entry.name,
                    entry.name_hash.short_id()
                )));
            }
            if records.insert(entry.name_hash, entry.record).is_some() {
                return Err(SnapshotError::Inconsistent(format!(
                    "duplicate record for {}",
                    entry.name
                )));
            }
            names.insert(entry.name_hash, entry.name);
        }

        let mut token_index = BTreeMap::new();
        for entry in self.token_index {
            if token_index.insert(entry.token_id, entry.name_hash).is_some() {
                return Err(SnapshotError::Inconsistent(format!(
                    "duplicate index entry for token {}",
                    entry.token_id
                )));
            }
        }

        let mut holders = BTreeMap::new();
        let mut approvals = BTreeMap::new();
        for entry in self.tokens {
            if holders.insert(entry.token_id, entry.holder).is_some() {
                return Err(SnapshotError::Inconsistent(format!(
                    "duplicate ledger entry for token {}",
                    entry.token_id
                )));
            }
            if let Some(spender) = entry.approved {
                approvals.insert(entry.token_id, spender);
            }
        }

        let blobs = self
            .blobs
            .into_iter()
            .map(|entry| (entry.name_hash, entry.data))
            .collect();

        let state = RegistryState {
            access,
            breaker: CircuitBreaker::new(self.paused),
            store: IdentityStore::from_tables(records, names, token_index),
            ledger: TokenLedger::from_tables(holders, approvals),
            blobs: EncryptedBlobStore::from_table(blobs),
            treasury: Treasury::new(self.treasury),
            audit: AuditLog::from_events(self.audit)?,
            next_token_id: self.next_token_id,
        };
        state.check_invariants()?;
        Ok(state)
    }

    /// The configuration this snapshot was taken under.
    pub fn config(&self) -> RegistryConfig {
        RegistryConfig {
            admin: self.admin,
            operators: self.operators.clone(),
            start_paused: self.paused,
            lease: self.lease,
            pricing: self.pricing,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot, checking the schema version before the body.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let probe: SchemaProbe = serde_json::from_str(json)?;
        check_schema(probe.schema_version)?;
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lease::{LeaseLifecycle, Registration};
    use chrono::{Duration, TimeZone, Utc};
    use soul_types::SoulHash;

    const ADMIN: Principal = Principal::repeat(0xad);
    const OPERATOR: Principal = Principal::repeat(0x0e);
    const ALICE: Principal = Principal::repeat(0xa1);

    fn populated() -> RegistryState {
        let mut access = AccessControl::new(ADMIN).unwrap();
        access.set_operator(OPERATOR, true).unwrap();
        let mut state = RegistryState::new(access, CircuitBreaker::new(true));
        let lease = LeaseLifecycle::new(Duration::days(365));
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        let mut events = Vec::new();
        lease
            .register(
                &mut state,
                Registration {
                    name: "alice",
                    owner: ALICE,
                    soul_hash: SoulHash::digest(b"manifest"),
                    payment_address: ALICE,
                },
                now,
                &mut events,
            )
            .unwrap();
        state.blobs.put(NameHash::of("alice"), vec![0xde, 0xad]);
        state.treasury = Treasury::new(Amount(5000));
        state.audit.commit(now, events);
        state
    }

    fn capture(state: &RegistryState) -> RegistrySnapshot {
        RegistrySnapshot::capture(state, LeaseConfig { term_days: 90 }, PricingPolicy::default())
    }

    #[test]
    fn capture_then_restore_preserves_state() {
        let state = populated();
        let snapshot = capture(&state);
        let json = snapshot.to_json().unwrap();
        let parsed = RegistrySnapshot::from_json(&json).unwrap();
        assert_eq!(parsed, snapshot);

        let restored = parsed.into_state().unwrap();
        assert!(restored.breaker.is_paused());
        assert!(restored.access.is_operator(&OPERATOR));
        assert_eq!(restored.next_token_id, TokenId(2));
        assert_eq!(restored.blobs.get(&NameHash::of("alice")), &[0xde, 0xad]);
        assert_eq!(restored.treasury.balance(), Amount(5000));
        assert_eq!(restored.audit.len(), 1);
    }

    #[test]
    fn snapshot_carries_its_terms() {
        let snapshot = capture(&populated());
        let config = snapshot.config();
        assert_eq!(config.admin, ADMIN);
        assert_eq!(config.operators, vec![OPERATOR]);
        assert!(config.start_paused);
        assert_eq!(config.lease.term_days, 90);
        assert!(config.validate().is_ok());

        let mut value = serde_json::to_value(&snapshot).unwrap();
        let body = value.as_object_mut().unwrap();
        body.remove("lease");
        body.remove("pricing");
        let parsed = RegistrySnapshot::from_json(&value.to_string()).unwrap();
        assert_eq!(parsed.lease, LeaseConfig::default());
        assert_eq!(parsed.pricing, PricingPolicy::default());
    }

    #[test]
    fn unknown_schema_is_rejected() {
        let mut snapshot = capture(&populated());
        snapshot.schema_version = 2;
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(matches!(
            RegistrySnapshot::from_json(&json),
            Err(SnapshotError::UnsupportedSchema { found: 2, supported: 1 })
        ));
        assert!(matches!(
            snapshot.into_state(),
            Err(SnapshotError::UnsupportedSchema { .. })
        ));
    }

    #[test]
    fn tampered_tables_are_rejected() {
        let mut snapshot = capture(&populated());
        snapshot.tokens[0].holder = Principal::repeat(0x55);
        assert!(matches!(
            snapshot.into_state(),
            Err(SnapshotError::Inconsistent(_))
        ));

        let mut snapshot = capture(&populated());
        snapshot.identities[0].name = "mallory".into();
        assert!(matches!(
            snapshot.into_state(),
            Err(SnapshotError::Inconsistent(_))
        ));

        let mut snapshot = capture(&populated());
        snapshot.next_token_id = TokenId(1);
        assert!(snapshot.into_state().is_err());
    }

    #[test]
    fn tampered_audit_is_rejected() {
        let mut snapshot = capture(&populated());
        snapshot.audit[0].at += Duration::seconds(1);
        assert!(matches!(
            snapshot.into_state(),
            Err(SnapshotError::Audit(_))
        ));
    }
}
