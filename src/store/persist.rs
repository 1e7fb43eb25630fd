//! Persistence of the selected chain.
//!
//! Only the selected chain survives a reload. The stored value uses the
//! envelope `{"state":{"selectedChain":"polygon"},"version":0}` under
//! [`STORAGE_KEY`].

use crate::domain::chain::Chain;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

pub const STORAGE_KEY: &str = "cross-chain-wallet-storage";
pub const STORAGE_VERSION: u32 = 0;

/// Key/value backend for persisted preferences.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    selected_chain: Chain,
}

/// Stored selected chain; `Ok(None)` when nothing was saved yet.
pub fn load_selected_chain(store: &dyn PreferenceStore) -> Result<Option<Chain>, StorageError> {
    let Some(raw) = store.load(STORAGE_KEY)? else {
        return Ok(None);
    };
    let envelope: Envelope =
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))?;
    Ok(Some(envelope.state.selected_chain))
}

pub fn save_selected_chain(store: &dyn PreferenceStore, chain: Chain) -> Result<(), StorageError> {
    let envelope = Envelope {
        state: PersistedState {
            selected_chain: chain,
        },
        version: STORAGE_VERSION,
    };
    let raw = serde_json::to_string(&envelope).map_err(|e| StorageError::Corrupt(e.to_string()))?;
    store.save(STORAGE_KEY, &raw)
}

// ─── Backends ────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value, for inspection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FilePreferences {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FilePreferences {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PreferenceStore for FilePreferences {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }
}

/// `window.localStorage`.
#[cfg(feature = "wasm")]
pub struct LocalStoragePreferences {
    storage: web_sys::Storage,
}

#[cfg(feature = "wasm")]
impl LocalStoragePreferences {
    pub fn new() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

#[cfg(feature = "wasm")]
impl PreferenceStore for LocalStoragePreferences {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }
}
