//! Registry configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! admin = "0xadadadadadadadadadadadadadadadadadadadad"
//! operators = ["0x0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e"]
//! start_paused = false
//!
//! [lease]
//! term_days = 365
//!
//! [pricing]
//! short_tier = 5000
//! standard_tier = 1000
//! short_max_len = 4
//! ```

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use soul_types::Principal;

use crate::error::ConfigError;
use crate::name::{MAX_NAME_LEN, MIN_NAME_LEN};
use crate::pricing::PricingPolicy;

/// Lease term settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaseConfig {
    /// Length of one registration or renewal, in days
    pub term_days: i64,
}

impl Default for LeaseConfig {
    fn default() -> Self {
        Self { term_days: 365 }
    }
}

/// Longest accepted lease term, in days.
pub const MAX_TERM_DAYS: i64 = 36_500;

impl LeaseConfig {
    /// The lease term, clamped to `1..=MAX_TERM_DAYS` days.
    pub fn term(&self) -> Duration {
        Duration::days(self.term_days.clamp(1, MAX_TERM_DAYS))
    }
}

/// Bootstrap configuration for a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Initial admin principal
    pub admin: Principal,

    /// Principals flagged as operators at bootstrap
    pub operators: Vec<Principal>,

    /// Start with the circuit breaker engaged
    pub start_paused: bool,

    pub lease: LeaseConfig,

    pub pricing: PricingPolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            admin: Principal::ZERO,
            operators: Vec::new(),
            start_paused: false,
            lease: LeaseConfig::default(),
            pricing: PricingPolicy::default(),
        }
    }
}

impl RegistryConfig {
    /// Default settings with the given admin.
    pub fn with_admin(admin: Principal) -> Self {
        Self {
            admin,
            ..Self::default()
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.is_zero() {
            return Err(ConfigError::Invalid("admin must not be the zero address".into()));
        }
        if self.operators.iter().any(Principal::is_zero) {
            return Err(ConfigError::Invalid(
                "operators must not contain the zero address".into(),
            ));
        }
        if !(1..=MAX_TERM_DAYS).contains(&self.lease.term_days) {
            return Err(ConfigError::Invalid(format!(
                "lease term must be between 1 and {MAX_TERM_DAYS} days, got {}",
                self.lease.term_days
            )));
        }
        if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&self.pricing.short_max_len) {
            return Err(ConfigError::Invalid(format!(
                "short tier boundary {} outside [{MIN_NAME_LEN}, {MAX_NAME_LEN}]",
                self.pricing.short_max_len
            )));
        }
        Ok(())
    }
}
