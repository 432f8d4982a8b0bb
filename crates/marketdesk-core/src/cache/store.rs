use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use tracing::debug;

use super::Snapshot;

/// Snapshot file name in the cache directory
const SNAPSHOT_FILE: &str = "snapshot.json";

/// Single-slot persistence for the daily snapshot.
///
/// `load` returns `Ok(None)` when nothing has been saved yet. A record that
/// exists but cannot be parsed is an `Err`; callers decide whether that is a
/// cache miss.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Option<Snapshot>>;

    /// Replace whatever is stored with `snapshot`.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Stores the snapshot as pretty-printed JSON in the cache directory.
pub struct FileSnapshotStore {
    cache_dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory: {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    pub fn path(&self) -> PathBuf {
        self.cache_dir.join(SNAPSHOT_FILE)
    }

    /// Remove the stored snapshot, if any.
    pub fn clear(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn write_atomic(path: &Path, contents: &str) -> Result<()> {
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)
            .with_context(|| format!("Failed to write snapshot file: {}", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace snapshot file: {}", path.display()))?;
        Ok(())
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path).context("Failed to read snapshot file")?;
        let snapshot: Snapshot =
            serde_json::from_str(&contents).context("Failed to parse snapshot file")?;

        debug!(captured_at = %snapshot.captured_at, "Loaded snapshot from disk");
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let contents = serde_json::to_string_pretty(snapshot)?;
        Self::write_atomic(&self.path(), &contents)
    }
}

/// Keeps the serialized snapshot in memory.
///
/// Holds JSON text rather than the value so the serialization path is the
/// same one the file store exercises.
#[derive(Default)]
pub struct MemorySnapshotStore {
    slot: Mutex<Option<String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with raw record text, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    pub fn with_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let store = Self::new();
        store.save(snapshot)?;
        Ok(store)
    }

    /// Current raw record text.
    pub fn raw(&self) -> Result<Option<String>> {
        Ok(self.lock_slot()?.clone())
    }

    fn lock_slot(&self) -> Result<MutexGuard<'_, Option<String>>> {
        self.slot
            .lock()
            .map_err(|_| anyhow::anyhow!("Snapshot slot lock poisoned"))
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        let slot = self.lock_slot()?;
        match slot.as_deref() {
            Some(raw) => Ok(Some(
                serde_json::from_str(raw).context("Failed to parse stored snapshot")?,
            )),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let raw = serde_json::to_string(snapshot)?;
        *self.lock_slot()? = Some(raw);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
