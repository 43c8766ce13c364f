use std::collections::BTreeMap;

use soul_types::NameHash;

/// Opaque per-name byte blobs.
///
/// Keyed by name-hash and stored independently of identity liveness. The
/// bytes are never decrypted, parsed, or validated here.
#[derive(Clone, Debug, Default)]
pub struct EncryptedBlobStore {
    blobs: BTreeMap<NameHash, Vec<u8>>,
}

impl EncryptedBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the blob for `hash`. Returns the previous bytes, if any.
    pub fn put(&mut self, hash: NameHash, bytes: Vec<u8>) -> Option<Vec<u8>> {
        self.blobs.insert(hash, bytes)
    }

    /// Stored bytes, or an empty slice when nothing was stored.
    pub fn get(&self, hash: &NameHash) -> &[u8] {
        self.blobs.get(hash).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn remove(&mut self, hash: &NameHash) -> Option<Vec<u8>> {
        self.blobs.remove(hash)
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NameHash, &Vec<u8>)> {
        self.blobs.iter()
    }

    pub(crate) fn from_table(blobs: BTreeMap<NameHash, Vec<u8>>) -> Self {
        Self { blobs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_blob_reads_empty() {
        let store = EncryptedBlobStore::new();
        assert!(store.get(&NameHash::of("nobody")).is_empty());
    }

    #[test]
    fn put_replaces_and_remove_clears() {
        let mut store = EncryptedBlobStore::new();
        let hash = NameHash::of("alice");
        assert!(store.put(hash, vec![1, 2, 3]).is_none());
        assert_eq!(store.put(hash, vec![9]), Some(vec![1, 2, 3]));
        assert_eq!(store.get(&hash), &[9]);
        store.remove(&hash);
        assert!(store.get(&hash).is_empty());
        assert!(store.is_empty());
    }
}
