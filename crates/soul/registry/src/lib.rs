//! Soul Registry - agent name registry core
//!
//! Maps human-readable agent names to identity records and keeps them
//! consistent with a token ledger:
//!
//! - **Names**: validated, hashed, and priced by length
//! - **Leases**: register, renew, and reclaim-on-expiry against a caller clock
//! - **Ownership**: the identity owner follows the holder of the name's live token
//! - **Control**: operator-gated mutation behind a global circuit breaker
//! - **Audit**: a hash-chained feed of every committed change
//!
//! ## Persistence
//!
//! State is in memory. [`SoulRegistry::snapshot`] and
//! [`SoulRegistry::restore`] move it through a versioned
//! [`RegistrySnapshot`], which is how the CLI persists between runs.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod access;
pub mod audit;
pub mod blob;
pub mod breaker;
pub mod config;
pub mod error;
pub mod lease;
pub mod ledger;
pub mod name;
pub mod pricing;
pub mod registry;
pub mod snapshot;
mod state;
pub mod store;
pub mod sync;
pub mod treasury;

// Re-exports
pub use access::AccessControl;
pub use audit::{AuditEvent, AuditLog};
pub use blob::EncryptedBlobStore;
pub use breaker::CircuitBreaker;
pub use config::{LeaseConfig, RegistryConfig, MAX_TERM_DAYS};
pub use error::{
    AccessError, ArgumentError, AuditError, ConfigError, LedgerError, NameError, PricingError,
    RegistryError, Result, SnapshotError,
};
pub use lease::{LeaseLifecycle, Registration};
pub use ledger::{HolderChange, NoopObserver, OwnershipObserver, TokenLedger};
pub use pricing::PricingPolicy;
pub use registry::SoulRegistry;
pub use snapshot::{RegistrySnapshot, SCHEMA_VERSION};
pub use store::IdentityStore;
pub use sync::OwnershipSync;
pub use treasury::Treasury;
