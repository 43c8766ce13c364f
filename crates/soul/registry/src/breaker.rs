use soul_types::Principal;
use tracing::warn;

use crate::error::RegistryError;

/// Global pause flag for operator-gated mutations.
///
/// Only the admin flips it and it never resets on its own. Admin calls and
/// reads ignore it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CircuitBreaker {
    paused: bool,
}

impl CircuitBreaker {
    pub fn new(paused: bool) -> Self {
        Self { paused }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn require_not_paused(&self, caller: &Principal) -> Result<(), RegistryError> {
        if self.paused {
            warn!(caller = %caller, "Rejected call while paused");
            return Err(RegistryError::Paused);
        }
        Ok(())
    }

    /// Returns true if the flag changed.
    pub fn pause(&mut self) -> bool {
        !std::mem::replace(&mut self.paused, true)
    }

    /// Returns true if the flag changed.
    pub fn unpause(&mut self) -> bool {
        std::mem::replace(&mut self.paused, false)
    }
}
