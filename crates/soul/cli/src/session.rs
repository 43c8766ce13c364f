//! State file handling.
//!
//! The registry lives in a JSON snapshot between invocations. Writes go to a
//! temporary file in the same directory and are renamed over the old state,
//! so an interrupted write never leaves a truncated file behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use soul_registry::{RegistryConfig, RegistrySnapshot, SoulRegistry};
use soul_types::{CallContext, Principal};
use tracing::{debug, warn};

use crate::output::OutputFormat;

/// One loaded registry plus the call settings of this invocation.
pub struct Session {
    pub registry: SoulRegistry,
    pub format: OutputFormat,
    state_path: PathBuf,
    caller: Option<Principal>,
    now: DateTime<Utc>,
}

impl Session {
    pub fn open(
        config_path: Option<&Path>,
        state_path: &Path,
        caller: Option<Principal>,
        now: Option<DateTime<Utc>>,
        format: OutputFormat,
    ) -> anyhow::Result<Self> {
        let snapshot = load_snapshot(state_path)?;
        let config = match config_path {
            Some(path) => {
                let config = RegistryConfig::load(path)
                    .with_context(|| format!("loading config {}", path.display()))?;
                if config.lease != snapshot.lease || config.pricing != snapshot.pricing {
                    warn!(
                        config = %path.display(),
                        stored_term_days = snapshot.lease.term_days,
                        term_days = config.lease.term_days,
                        "Config terms replace the terms stored in the state file"
                    );
                }
                config
            }
            None => snapshot.config(),
        };
        let registry = SoulRegistry::restore(config, snapshot)?;
        Ok(Self {
            registry,
            format,
            state_path: state_path.to_path_buf(),
            caller,
            now: now.unwrap_or_else(Utc::now),
        })
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Call context for a mutation. Mutations need an explicit caller.
    pub fn ctx(&self) -> anyhow::Result<CallContext> {
        match self.caller {
            Some(caller) => Ok(CallContext::new(caller, self.now)),
            None => bail!("this command needs --caller"),
        }
    }

    /// Persist the registry after a successful call.
    pub fn save(&self) -> anyhow::Result<()> {
        write_snapshot(&self.state_path, &self.registry.snapshot()?)
    }
}

pub fn load_snapshot(path: &Path) -> anyhow::Result<RegistrySnapshot> {
    let json = std::fs::read_to_string(path).with_context(|| {
        format!(
            "reading state file {} (run `soulctl init` first)",
            path.display()
        )
    })?;
    Ok(RegistrySnapshot::from_json(&json)?)
}

pub fn write_snapshot(path: &Path, snapshot: &RegistrySnapshot) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary state file in {}", dir.display()))?;
    file.write_all(snapshot.to_json()?.as_bytes())?;
    file.write_all(b"\n")?;
    file.persist(path)
        .with_context(|| format!("writing state file {}", path.display()))?;
    debug!(path = %path.display(), records = snapshot.identities.len(), "State saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let registry = SoulRegistry::new(RegistryConfig::with_admin(Principal::repeat(0xad))).unwrap();

        write_snapshot(&path, &registry.snapshot().unwrap()).unwrap();
        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.admin, Principal::repeat(0xad));
    }

    #[test]
    fn test_missing_state_mentions_init() {
        let err = load_snapshot(Path::new("/nonexistent/state.json")).unwrap_err();
        assert!(err.to_string().contains("soulctl init"));
    }
}
