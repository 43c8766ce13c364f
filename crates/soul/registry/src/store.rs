//! Hash-keyed identity storage.
//!
//! Three tables share the name-hash key space:
//! - `records`: name-hash to identity record (at most one per hash)
//! - `names`: name-hash to the exact original name string
//! - `token_index`: token id to the name-hash it currently represents
//!
//! Retired tokens are dropped from `token_index`, so a token is the *live*
//! token for its name exactly when the index and the record point at each
//! other.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use soul_types::{IdentityRecord, NameHash, TokenId};

#[derive(Clone, Debug, Default)]
pub struct IdentityStore {
    records: BTreeMap<NameHash, IdentityRecord>,
    names: BTreeMap<NameHash, String>,
    token_index: BTreeMap<TokenId, NameHash>,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hash: &NameHash) -> Option<&IdentityRecord> {
        self.records.get(hash)
    }

    pub fn get_mut(&mut self, hash: &NameHash) -> Option<&mut IdentityRecord> {
        self.records.get_mut(hash)
    }

    /// True iff no record exists for `hash` or the record has expired.
    pub fn is_available(&self, hash: &NameHash, now: DateTime<Utc>) -> bool {
        self.records
            .get(hash)
            .map_or(true, |record| record.is_reclaimable(now))
    }

    /// The record for `hash` if it is live at `now`.
    pub fn live(&self, hash: &NameHash, now: DateTime<Utc>) -> Option<&IdentityRecord> {
        self.records.get(hash).filter(|record| record.is_live(now))
    }

    pub fn name_of(&self, hash: &NameHash) -> Option<&str> {
        self.names.get(hash).map(String::as_str)
    }

    pub fn hash_for_token(&self, token_id: &TokenId) -> Option<&NameHash> {
        self.token_index.get(token_id)
    }

    /// Name-hash for `token_id` when it is the live token of its name.
    pub fn live_token_binding(&self, token_id: &TokenId) -> Option<NameHash> {
        let hash = self.token_index.get(token_id)?;
        let record = self.records.get(hash)?;
        (record.token_id == *token_id).then_some(*hash)
    }

    /// Bind `record` to `hash`, replacing any previous record wholesale.
    ///
    /// The caller retires the previous token first.
    pub fn bind(&mut self, hash: NameHash, name: &str, record: IdentityRecord) {
        self.token_index.insert(record.token_id, hash);
        self.names.entry(hash).or_insert_with(|| name.to_string());
        self.records.insert(hash, record);
    }

    /// Drop `token_id` from the reverse index. Returns the hash it pointed at.
    pub fn retire_token(&mut self, token_id: &TokenId) -> Option<NameHash> {
        self.token_index.remove(token_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = (&NameHash, &IdentityRecord)> {
        self.records.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = (&NameHash, &String)> {
        self.names.iter()
    }

    pub fn token_index(&self) -> impl Iterator<Item = (&TokenId, &NameHash)> {
        self.token_index.iter()
    }

    /// Rebuild a store from raw tables, as read from a snapshot.
    pub(crate) fn from_tables(
        records: BTreeMap<NameHash, IdentityRecord>,
        names: BTreeMap<NameHash, String>,
        token_index: BTreeMap<TokenId, NameHash>,
    ) -> Self {
        Self {
            records,
            names,
            token_index,
        }
    }
}
