//! Two-tier role table: one admin, many flagged operators.
//!
//! The table is an explicit value owned by the registry state and consulted
//! on every gated call; there is no ambient role registry.

use std::collections::BTreeMap;

use soul_types::Principal;
use tracing::warn;

use crate::error::{AccessError, ArgumentError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessControl {
    admin: Principal,
    operators: BTreeMap<Principal, bool>,
}

impl AccessControl {
    pub fn new(admin: Principal) -> Result<Self, ArgumentError> {
        if admin.is_zero() {
            return Err(ArgumentError::ZeroAddress { field: "admin" });
        }
        Ok(Self {
            admin,
            operators: BTreeMap::new(),
        })
    }

    pub fn admin(&self) -> Principal {
        self.admin
    }

    pub fn is_admin(&self, who: &Principal) -> bool {
        &self.admin == who
    }

    pub fn is_operator(&self, who: &Principal) -> bool {
        self.operators.get(who).copied().unwrap_or(false)
    }

    /// Principals currently flagged as operators.
    pub fn operators(&self) -> impl Iterator<Item = &Principal> {
        self.operators
            .iter()
            .filter_map(|(who, enabled)| enabled.then_some(who))
    }

    pub fn require_operator(&self, caller: &Principal) -> Result<(), AccessError> {
        if self.is_operator(caller) {
            Ok(())
        } else {
            warn!(caller = %caller, "Rejected operator call");
            Err(AccessError::NotOperator(*caller))
        }
    }

    pub fn require_admin(&self, caller: &Principal) -> Result<(), AccessError> {
        if self.is_admin(caller) {
            Ok(())
        } else {
            warn!(caller = %caller, "Rejected admin call");
            Err(AccessError::NotAdmin(*caller))
        }
    }

    /// Flag or unflag an operator. Returns the previous flag.
    ///
    /// Callers check admin rights first; this only validates the principal.
    pub fn set_operator(
        &mut self,
        operator: Principal,
        enabled: bool,
    ) -> Result<bool, ArgumentError> {
        if operator.is_zero() {
            return Err(ArgumentError::ZeroAddress { field: "operator" });
        }
        let previous = if enabled {
            self.operators.insert(operator, true)
        } else {
            self.operators.remove(&operator)
        };
        Ok(previous.unwrap_or(false))
    }

    /// Hand the admin role to `new_admin`. Returns the previous admin.
    pub fn transfer_admin(&mut self, new_admin: Principal) -> Result<Principal, ArgumentError> {
        if new_admin.is_zero() {
            return Err(ArgumentError::ZeroAddress { field: "new_admin" });
        }
        Ok(std::mem::replace(&mut self.admin, new_admin))
    }
}
