//! Reputation snapshot persistence.
//!
//! Writes go to a sibling temp file which is synced and then renamed over the
//! target, so a crash leaves either the previous snapshot or the new one.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use concord_core::errors::{ConcordResult, StorageError};
use concord_core::models::ReputationSnapshot;
use concord_core::traits::IReputationStore;
use tracing::{debug, instrument};

/// Pretty-printed JSON object `agent_id -> {accepted, total}`.
#[derive(Debug, Clone)]
pub struct JsonFileReputationStore {
    path: PathBuf,
}

impl JsonFileReputationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "reputation".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn corrupt(&self, reason: String) -> StorageError {
        StorageError::CorruptReputationStore {
            path: self.path.display().to_string(),
            reason,
        }
    }
}

impl IReputationStore for JsonFileReputationStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> ConcordResult<Option<ReputationSnapshot>> {
        if !self.path.exists() {
            debug!("no reputation store yet");
            return Ok(None);
        }

        let contents =
            fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        let snapshot: ReputationSnapshot =
            serde_json::from_str(&contents).map_err(|e| self.corrupt(e.to_string()))?;

        if let Some((agent, record)) = snapshot.iter().find(|(_, r)| !r.is_consistent()) {
            return Err(self
                .corrupt(format!(
                    "agent {agent}: accepted {} exceeds total {}",
                    record.accepted, record.total
                ))
                .into());
        }

        debug!(agents = snapshot.len(), "reputation store loaded");
        Ok(Some(snapshot))
    }

    #[instrument(skip(self, snapshot), fields(path = %self.path.display()))]
    fn save(&self, snapshot: &ReputationSnapshot) -> ConcordResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        }

        let contents = serde_json::to_string_pretty(snapshot)
            .map_err(|e| self.corrupt(format!("failed to serialize snapshot: {e}")))?;

        let temp_path = self.temp_path();
        let write_temp = || -> std::io::Result<()> {
            let mut file = File::create(&temp_path)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        };
        let replaced = write_temp()
            .map_err(|e| StorageError::io(&temp_path, e))
            .and_then(|()| {
                fs::rename(&temp_path, &self.path).map_err(|e| StorageError::io(&self.path, e))
            });
        if let Err(e) = replaced {
            // The previous snapshot is still in place; only the temp file needs cleanup.
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        sync_parent_dir(&self.path)?;

        debug!(agents = snapshot.len(), "reputation store saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Persist the rename itself by syncing the containing directory.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> Result<(), StorageError> {
    let dir = match path.parent().filter(|d| !d.as_os_str().is_empty()) {
        Some(dir) => dir,
        None => Path::new("."),
    };
    File::open(dir)
        .and_then(|d| d.sync_all())
        .map_err(|e| StorageError::io(dir, e))
}

/// Directory handles cannot be synced here; the rename is as durable as the platform makes it.
#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> Result<(), StorageError> {
    Ok(())
}

const MEMORY_LOCATION: &str = "<memory>";

/// Process-local store for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryReputationStore {
    snapshot: Mutex<Option<ReputationSnapshot>>,
    saves: Mutex<usize>,
    fail_saves: bool,
}

impl InMemoryReputationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot.
    pub fn with_snapshot(snapshot: ReputationSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            ..Default::default()
        }
    }

    /// A store whose every `save` fails with an I/O error.
    pub fn failing() -> Self {
        Self::new().with_failing_saves()
    }

    /// Make every subsequent `save` fail; loads still succeed.
    pub fn with_failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Last saved (or seeded) snapshot.
    pub fn snapshot(&self) -> Option<ReputationSnapshot> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IReputationStore for InMemoryReputationStore {
    fn load(&self) -> ConcordResult<Option<ReputationSnapshot>> {
        Ok(self.snapshot())
    }

    fn save(&self, snapshot: &ReputationSnapshot) -> ConcordResult<()> {
        if self.fail_saves {
            return Err(StorageError::io(
                MEMORY_LOCATION,
                std::io::Error::new(std::io::ErrorKind::Other, "save disabled"),
            )
            .into());
        }
        // A panic elsewhere while holding a lock leaves the data intact; keep using it.
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }

    fn location(&self) -> String {
        MEMORY_LOCATION.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_core::models::ReputationRecord;

    fn one_record() -> ReputationSnapshot {
        let mut snapshot = ReputationSnapshot::new();
        snapshot.insert("A".into(), ReputationRecord { accepted: 1, total: 1 });
        snapshot
    }

    #[test]
    fn poisoned_lock_still_records_saves() {
        let store = InMemoryReputationStore::new();
        std::thread::scope(|s| {
            let poisoned = s
                .spawn(|| {
                    let _held = store.snapshot.lock().unwrap();
                    panic!("writer died holding the lock");
                })
                .join();
            assert!(poisoned.is_err());
        });
        assert!(store.snapshot.is_poisoned());

        store.save(&one_record()).unwrap();
        assert_eq!(store.snapshot(), Some(one_record()));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn locations_name_the_backing_resource() {
        let store = JsonFileReputationStore::new("out/reputation.json");
        assert!(store.location().ends_with("reputation.json"));
        assert_eq!(InMemoryReputationStore::new().location(), "<memory>");
    }
}
