use {
    crate::domain::AssetRecord,
    anyhow::{Context, Result},
    serde::{Deserialize, Serialize},
    std::{
        fs::File,
        io::{BufReader, BufWriter, Write},
        path::{Path, PathBuf},
        sync::Mutex,
    },
};

/// The persisted blob: `{"assets": [...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub assets: Vec<AssetRecord>,
}

/// Durable storage for the asset snapshot. Only ever reads from or writes to
/// its backing store; never touches the engine state.
pub trait SnapshotStore: Send {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>>;
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let reader = BufReader::new(file);
        let snapshot = serde_json::from_reader(reader)
            .with_context(|| format!("Malformed snapshot in {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    /// Writes a sibling temp file then renames it over the target, so a crash
    /// mid-write never leaves a truncated snapshot behind.
    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp)
                .with_context(|| format!("Failed to create {}", tmp.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, snapshot)?;
            writer.flush()?;
        }
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to move snapshot into {}", self.path.display()))?;
        Ok(())
    }
}

/// Non-durable store (demo sessions and tests).
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Option<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: Mutex::new(Some(snapshot)),
        }
    }

    pub fn saved(&self) -> Option<Snapshot> {
        self.inner.lock().ok().and_then(|guard| guard.clone())
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.saved())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("snapshot lock poisoned"))?;
        *guard = Some(snapshot.clone());
        Ok(())
    }
}

impl<S: SnapshotStore + Sync> SnapshotStore for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<Snapshot>> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        (**self).save(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_record;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("coin_tracker_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn missing_file_loads_as_none() {
        let store = JsonFileStore::new(scratch_path("missing"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_round_trips_snapshot() {
        let path = scratch_path("round_trip");
        let store = JsonFileStore::new(&path);
        let snapshot = Snapshot {
            assets: vec![
                test_record("bitcoin", "Bitcoin", "BTC", 50_000.0, 1e12),
                test_record("ethereum", "Ethereum", "ETH", 3_000.0, 4e11),
            ],
        };

        store.save(&snapshot).unwrap();
        let loaded = store.load().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, Some(snapshot));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = scratch_path("malformed");
        std::fs::write(&path, b"{\"assets\": [ {\"id\": 3} ]}").unwrap();
        let result = JsonFileStore::new(&path).load();
        let _ = std::fs::remove_file(&path);

        assert!(result.is_err());
    }

    #[test]
    fn reads_original_blob_layout() {
        let path = scratch_path("layout");
        std::fs::write(
            &path,
            br#"{"assets":[{"id":"tether","name":"Tether","symbol":"USDT","logo":"x.png",
                "price":1.0,"change1h":0.01,"change24h":-0.05,"change7d":0.02,
                "marketCap":1.0e11,"volume24h":5.2e10,"circulatingSupply":1.0e11,"maxSupply":null}]}"#,
        )
        .unwrap();
        let loaded = JsonFileStore::new(&path).load().unwrap().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.assets[0].symbol, "USDT");
        assert_eq!(loaded.assets[0].logo_url.as_deref(), Some("x.png"));
        assert!(loaded.assets[0].trend_series.is_empty());
    }

    #[test]
    fn memory_store_keeps_last_save() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        let snapshot = Snapshot {
            assets: vec![test_record("bitcoin", "Bitcoin", "BTC", 1.0, 1.0)],
        };
        store.save(&snapshot).unwrap();
        assert_eq!(store.saved(), Some(snapshot));
    }
}
