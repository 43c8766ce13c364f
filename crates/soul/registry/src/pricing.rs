//! Advisory fee tiers keyed by name length.
//!
//! Settlement happens off-system; the schedule exists so any observer can
//! check the fee an operator should have collected for a name.

use serde::{Deserialize, Serialize};
use soul_types::Amount;

use crate::error::PricingError;
use crate::name::{MAX_NAME_LEN, MIN_NAME_LEN};

/// Fee schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Price for names up to `short_max_len` bytes
    pub short_tier: Amount,
    /// Price for every longer name
    pub standard_tier: Amount,
    /// Longest name length billed at the short tier
    pub short_max_len: usize,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            short_tier: Amount(5_000),
            standard_tier: Amount(1_000),
            short_max_len: 4,
        }
    }
}

impl PricingPolicy {
    /// Fee for `name`, looked up by byte length only.
    pub fn price_for(&self, name: &str) -> Result<Amount, PricingError> {
        self.price_for_len(name.len())
    }

    pub fn price_for_len(&self, len: usize) -> Result<Amount, PricingError> {
        if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
            return Err(PricingError::InvalidLength { len });
        }
        if len <= self.short_max_len {
            Ok(self.short_tier)
        } else {
            Ok(self.standard_tier)
        }
    }
}
