use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Principal, SoulHash, TokenId};

/// The full registration state for one name-hash.
///
/// At most one record exists per name-hash. A record is live while
/// `now <= expires_at`; an expired record stays in place until it is renewed
/// or reclaimed by a new registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub token_id: TokenId,
    pub owner: Principal,
    pub soul_hash: SoulHash,
    pub payment_address: Principal,
    pub registered_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl IdentityRecord {
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }

    /// Expired records may be reclaimed by a new registration.
    pub fn is_reclaimable(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
