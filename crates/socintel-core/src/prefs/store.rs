//! Key-value preference store with change notifications.
//!
//! Two storage areas exist, mirroring a browser's `local` and `sync`
//! areas: `local` lives under the XDG state dir, `sync` under the XDG
//! config dir so it can travel with dotfiles. The area is chosen by
//! configuration and passed in explicitly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::broadcast;

use super::{reconcile_document, PreferenceDocument};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Which storage area holds the preference blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageArea {
    Local,
    #[default]
    Sync,
}

impl StorageArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageArea::Local => "local",
            StorageArea::Sync => "sync",
        }
    }

    fn file_name(&self) -> &'static str {
        match self {
            StorageArea::Local => "storage-local.json",
            StorageArea::Sync => "storage-sync.json",
        }
    }
}

/// A top-level key whose stored value changed.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageChange {
    pub area: StorageArea,
    pub key: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage blob {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage blob {} is not a JSON object", .0.display())]
    NotAnObject(PathBuf),
    #[error("locating storage directory: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),
    #[error("serialize storage blob: {0}")]
    Serialize(#[source] serde_json::Error),
}

enum Backend {
    File(PathBuf),
    Memory(Mutex<Map<String, Value>>),
}

/// Handle to one storage area.
pub struct PreferenceStore {
    area: StorageArea,
    backend: Backend,
    changes: broadcast::Sender<StorageChange>,
    write_lock: tokio::sync::Mutex<()>,
}

impl PreferenceStore {
    fn with_backend(area: StorageArea, backend: Backend) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            area,
            backend,
            changes,
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Open the default file for `area` (`~/.local/state/socintel/storage-local.json`
    /// or `~/.config/socintel/storage-sync.json`), creating parent dirs.
    pub fn open_default(area: StorageArea) -> Result<Self, StoreError> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("socintel")?;
        let placed = match area {
            StorageArea::Local => xdg_dirs.place_state_file(area.file_name()),
            StorageArea::Sync => xdg_dirs.place_config_file(area.file_name()),
        };
        let path = placed.map_err(|source| StoreError::Io {
            path: PathBuf::from(area.file_name()),
            source,
        })?;
        Ok(Self::open_at(path, area))
    }

    /// File-backed store at an explicit path. The file is created on first write.
    pub fn open_at(path: impl AsRef<Path>, area: StorageArea) -> Self {
        Self::with_backend(area, Backend::File(path.as_ref().to_path_buf()))
    }

    /// In-memory store, used by tests and dry runs.
    pub fn open_memory(area: StorageArea) -> Self {
        Self::with_backend(area, Backend::Memory(Mutex::new(Map::new())))
    }

    pub fn area(&self) -> StorageArea {
        self.area
    }

    /// Receiver for change notifications emitted by [`PreferenceStore::set`].
    pub fn subscribe(&self) -> broadcast::Receiver<StorageChange> {
        self.changes.subscribe()
    }

    /// Every stored key and its raw JSON value. A missing file is empty.
    pub async fn get_all(&self) -> Result<Map<String, Value>, StoreError> {
        match &self.backend {
            Backend::Memory(map) => Ok(snapshot(map)),
            Backend::File(path) => read_blob(path).await,
        }
    }

    /// Merge `entries` into the stored blob and notify subscribers of every
    /// key whose value actually changed.
    pub async fn set(&self, entries: Map<String, Value>) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut current = match &self.backend {
            Backend::Memory(map) => snapshot(map),
            Backend::File(path) => match read_blob(path).await {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!("overwriting unreadable storage blob: {e}");
                    Map::new()
                }
            },
        };

        let mut changed = Vec::new();
        for (key, new_value) in entries {
            let old_value = current.insert(key.clone(), new_value.clone());
            if old_value.as_ref() != Some(&new_value) {
                changed.push(StorageChange {
                    area: self.area,
                    key,
                    old_value,
                    new_value: Some(new_value),
                });
            }
        }

        match &self.backend {
            Backend::Memory(map) => replace_map(map, current),
            Backend::File(path) => write_blob(path, &current).await?,
        }

        for change in changed {
            tracing::debug!(area = self.area.as_str(), key = %change.key, "storage changed");
            // No receivers is fine; nobody is listening yet.
            let _ = self.changes.send(change);
        }
        Ok(())
    }

    /// Load and reconcile preferences. On read failure, logs and returns
    /// the schema defaults so callers never see an empty document.
    pub async fn load_preferences(&self) -> PreferenceDocument {
        match self.get_all().await {
            Ok(raw) => reconcile_document(Some(&Value::Object(raw))),
            Err(e) => {
                tracing::error!("failed to load preferences: {e}");
                PreferenceDocument::default()
            }
        }
    }

    /// Reconcile `prefs` and write the result. Write failures are logged and
    /// swallowed; the reconciled document is returned either way.
    pub async fn save_preferences(&self, prefs: &Value) -> PreferenceDocument {
        let validated = reconcile_document(Some(prefs));
        let entries = match validated.to_value() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if let Err(e) = self.set(entries).await {
            tracing::error!("failed to save preferences: {e}");
        }
        validated
    }

    pub async fn save_document(&self, doc: &PreferenceDocument) -> PreferenceDocument {
        self.save_preferences(&doc.to_value()).await
    }
}

// Guards stay inside these helpers so no lock is held across an await.
fn snapshot(map: &Mutex<Map<String, Value>>) -> Map<String, Value> {
    map.lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

fn replace_map(map: &Mutex<Map<String, Value>>, blob: Map<String, Value>) {
    *map.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = blob;
}

async fn read_blob(path: &Path) -> Result<Map<String, Value>, StoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let value: Value = serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject(path.to_path_buf())),
    }
}

async fn write_blob(path: &Path, blob: &Map<String, Value>) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    let json = serde_json::to_vec_pretty(blob).map_err(StoreError::Serialize)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn set_notifies_only_changed_keys() {
        let store = PreferenceStore::open_memory(StorageArea::Local);
        let mut rx = store.subscribe();

        store.set(entries(json!({"a": 1, "b": 2}))).await.unwrap();
        store.set(entries(json!({"a": 1, "b": 3}))).await.unwrap();

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        let third = rx.recv().await.unwrap();
        assert_eq!(first.key, "a");
        assert_eq!(second.key, "b");
        assert_eq!(third.key, "b");
        assert_eq!(third.old_value, Some(json!(2)));
        assert_eq!(third.new_value, Some(json!(3)));
        assert_eq!(third.area, StorageArea::Local);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn set_merges_top_level_keys() {
        let store = PreferenceStore::open_memory(StorageArea::Sync);
        store.set(entries(json!({"a": 1}))).await.unwrap();
        store.set(entries(json!({"b": 2}))).await.unwrap();
        let all = store.get_all().await.unwrap();
        assert_eq!(Value::Object(all), json!({"a": 1, "b": 2}));
    }

    #[tokio::test]
    async fn file_store_missing_file_is_empty_and_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage-sync.json");
        let store = PreferenceStore::open_at(&path, StorageArea::Sync);
        assert!(store.get_all().await.unwrap().is_empty());

        store.set(entries(json!({"ip": {"active": false}}))).await.unwrap();
        let reopened = PreferenceStore::open_at(&path, StorageArea::Sync);
        assert_eq!(
            reopened.get_all().await.unwrap().get("ip"),
            Some(&json!({"active": false}))
        );
    }

    #[tokio::test]
    async fn load_falls_back_to_defaults_on_corrupt_blob() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage-local.json");
        std::fs::write(&path, b"{not json").unwrap();
        let store = PreferenceStore::open_at(&path, StorageArea::Local);

        assert!(matches!(store.get_all().await, Err(StoreError::Parse { .. })));
        assert_eq!(store.load_preferences().await, PreferenceDocument::default());
    }

    #[tokio::test]
    async fn save_reconciles_before_writing() {
        let store = PreferenceStore::open_memory(StorageArea::Sync);
        let saved = store
            .save_preferences(&json!({"ip": {"active": "nope"}, "junk": true}))
            .await;
        assert!(saved.ip.active);

        let raw = store.get_all().await.unwrap();
        assert!(raw.get("junk").is_none());
        assert_eq!(raw.len(), 3);
        assert_eq!(store.load_preferences().await, saved);
    }
}
