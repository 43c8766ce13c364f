//! Append-only audit feed.
//!
//! Events are buffered per call and appended only when the call commits, so
//! the log order is the commit order. Each event carries a BLAKE3 hash over
//! its predecessor's hash and its own content, making the feed
//! tamper-evident for external indexers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use soul_types::AuditEventKind;
use tracing::info;

use crate::error::AuditError;

/// One committed audit event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// 1-based position in the log
    pub seq: u64,
    /// Call time of the committing call
    pub at: DateTime<Utc>,
    pub kind: AuditEventKind,
    #[serde(with = "hex32")]
    pub prev_hash: [u8; 32],
    #[serde(with = "hex32")]
    pub hash: [u8; 32],
}

impl AuditEvent {
    fn compute_hash(
        seq: u64,
        at: &DateTime<Utc>,
        kind: &AuditEventKind,
        prev_hash: &[u8; 32],
    ) -> [u8; 32] {
        // Event payloads hold only strings, integers and timestamps, so JSON
        // encoding cannot fail.
        let payload = serde_json::to_vec(kind).unwrap_or_default();

        let mut hasher = blake3::Hasher::new();
        hasher.update(b"soul-audit-v1:");
        hasher.update(&seq.to_le_bytes());
        hasher.update(&at.timestamp().to_le_bytes());
        hasher.update(&at.timestamp_subsec_nanos().to_le_bytes());
        hasher.update(prev_hash);
        hasher.update(&payload);
        *hasher.finalize().as_bytes()
    }
}

#[derive(Clone, Debug, Default)]
pub struct AuditLog {
    events: Vec<AuditEvent>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sequence number of the last committed event, 0 when empty.
    pub fn head_seq(&self) -> u64 {
        self.events.last().map_or(0, |e| e.seq)
    }

    pub fn head_hash(&self) -> [u8; 32] {
        self.events.last().map_or([0u8; 32], |e| e.hash)
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    /// Events with `seq > after`.
    pub fn since(&self, after: u64) -> &[AuditEvent] {
        let start = usize::try_from(after)
            .unwrap_or(usize::MAX)
            .min(self.events.len());
        &self.events[start..]
    }

    /// Append the events produced by one committed call.
    pub fn commit(&mut self, at: DateTime<Utc>, kinds: Vec<AuditEventKind>) {
        let mut staged = Vec::with_capacity(kinds.len());
        let mut prev_hash = self.head_hash();
        let mut seq = self.head_seq();
        for kind in kinds {
            seq += 1;
            let hash = AuditEvent::compute_hash(seq, &at, &kind, &prev_hash);
            staged.push(AuditEvent {
                seq,
                at,
                kind,
                prev_hash,
                hash,
            });
            prev_hash = hash;
        }
        for event in &staged {
            info!(seq = event.seq, event = event.kind.label(), name = event.kind.name().unwrap_or("-"), "Audit event");
        }
        self.events.extend(staged);
    }

    /// Recompute the hash chain from genesis.
    pub fn verify(&self) -> Result<(), AuditError> {
        let mut prev_hash = [0u8; 32];
        for (index, event) in self.events.iter().enumerate() {
            let expected_seq = index as u64 + 1;
            if event.seq != expected_seq {
                return Err(AuditError::IntegrityViolation {
                    seq: event.seq,
                    reason: format!("expected seq {expected_seq}"),
                });
            }
            if event.prev_hash != prev_hash {
                return Err(AuditError::IntegrityViolation {
                    seq: event.seq,
                    reason: "previous hash link mismatch".into(),
                });
            }
            let computed = AuditEvent::compute_hash(event.seq, &event.at, &event.kind, &prev_hash);
            if computed != event.hash {
                return Err(AuditError::IntegrityViolation {
                    seq: event.seq,
                    reason: "event hash mismatch".into(),
                });
            }
            prev_hash = event.hash;
        }
        Ok(())
    }

    pub(crate) fn from_events(events: Vec<AuditEvent>) -> Result<Self, AuditError> {
        let log = Self { events };
        log.verify()?;
        Ok(log)
    }
}

mod hex32 {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = hex::decode(&text).map_err(D::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| D::Error::custom("expected 32 bytes"))
    }
}
