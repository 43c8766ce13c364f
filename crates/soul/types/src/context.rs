use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Principal;

/// Per-call context for mutating registry entry points.
///
/// `now` is sampled once by the caller for the whole call. The registry never
/// reads a clock of its own, so expiry decisions are deterministic for a
/// given context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub caller: Principal,
    pub now: DateTime<Utc>,
}

impl CallContext {
    pub fn new(caller: Principal, now: DateTime<Utc>) -> Self {
        Self { caller, now }
    }

    /// Context stamped with the current wall-clock time.
    pub fn at_wall_clock(caller: Principal) -> Self {
        Self::new(caller, Utc::now())
    }
}
