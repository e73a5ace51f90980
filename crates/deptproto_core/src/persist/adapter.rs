//! Snapshot load/save over a [`KeyValueStore`].

use super::error::{CorruptStateError, PersistError, PersistResult};
use super::kv::KeyValueStore;
use crate::model::Snapshot;
use log::{error, info, warn};

/// Record key used when the caller does not configure one.
pub const DEFAULT_RECORD_KEY: &str = "dept-protocol-data";

/// Reads and writes the whole snapshot as one JSON record.
pub struct PersistenceAdapter<S: KeyValueStore> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    /// Creates an adapter writing under [`DEFAULT_RECORD_KEY`].
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_RECORD_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Reads the persisted snapshot.
    ///
    /// Returns `Ok(None)` when no record exists. Connection lists come back
    /// exactly as saved. Protocols whose department is missing are dropped.
    ///
    /// # Errors
    /// - `PersistError::Corrupt` when the record is not valid JSON of the
    ///   snapshot shape, has duplicate ids, or holds an id of `i64::MAX`.
    /// - `PersistError::Storage` when the backend read fails.
    pub fn load(&self) -> PersistResult<Option<Snapshot>> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(None);
        };

        let mut snapshot: Snapshot =
            serde_json::from_str(&raw).map_err(CorruptStateError::Unparsable)?;
        let orphaned = snapshot.drop_orphaned_protocols();
        if orphaned > 0 {
            warn!(
                "event=state_load module=persist status=repaired dropped_protocols={}",
                orphaned
            );
        }
        snapshot
            .check_integrity()
            .map_err(CorruptStateError::Invalid)?;

        info!(
            "event=state_load module=persist status=ok departments={} protocols={}",
            snapshot.departments.len(),
            snapshot.protocols.len()
        );
        Ok(Some(snapshot))
    }

    /// Writes `snapshot` under the configured key, replacing any prior value.
    pub fn save(&mut self, snapshot: &Snapshot) -> PersistResult<()> {
        let encoded = serde_json::to_string(snapshot).map_err(PersistError::Encode)?;
        self.backend.set(&self.key, &encoded)?;
        Ok(())
    }

    /// Overwrites persisted state with `seed`.
    pub fn reset_to_seed(&mut self, seed: &Snapshot) -> PersistResult<()> {
        self.save(seed)?;
        info!(
            "event=state_reset module=persist status=ok departments={} protocols={}",
            seed.departments.len(),
            seed.protocols.len()
        );
        Ok(())
    }

    /// Startup policy: loads the record, or writes and returns `seed` when the
    /// record is missing or corrupt.
    ///
    /// # Errors
    /// Only storage and encoding failures are returned; corruption is
    /// recovered here.
    pub fn load_or_seed(&mut self, seed: &Snapshot) -> PersistResult<Snapshot> {
        match self.load() {
            Ok(Some(snapshot)) => return Ok(snapshot),
            Ok(None) => {
                info!("event=state_load module=persist status=empty fallback=seed");
            }
            Err(PersistError::Corrupt(err)) => {
                error!(
                    "event=state_load module=persist status=corrupt fallback=seed error={}",
                    err
                );
            }
            Err(err) => return Err(err),
        }

        self.reset_to_seed(seed)?;
        Ok(seed.clone())
    }
}
