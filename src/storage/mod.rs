//! Session persistence
//!
//! Stores the serialized session record somewhere durable. Persistence is
//! best effort: failures (quota, private browsing, missing files, corrupt
//! JSON) are logged and swallowed, and the editor keeps working on its
//! in-memory session.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::Session;

pub const DEFAULT_STORAGE_KEY: &str = "md-annotator-session";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid session record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Where a store keeps its record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// A place to keep one serialized session
///
/// Implementors provide the fallible primitives; `load`, `save` and `clear`
/// wrap them with soft-fail behaviour.
pub trait SessionStore {
    fn read(&self) -> Result<Option<String>, StorageError>;
    fn write(&self, data: &str) -> Result<(), StorageError>;
    fn remove(&self) -> Result<(), StorageError>;

    /// Load the stored session, `None` if absent or unreadable
    fn load(&self) -> Option<Session> {
        let parsed = self.read().and_then(|raw| {
            raw.map(|raw| serde_json::from_str::<Session>(&raw))
                .transpose()
                .map_err(StorageError::from)
        });

        match parsed {
            Ok(session) => session,
            Err(err) => {
                log::warn!("failed to load session: {}", err);
                None
            }
        }
    }

    /// Save the session, logging any failure
    fn save(&self, session: &Session) {
        let result = serde_json::to_string(session)
            .map_err(StorageError::from)
            .and_then(|data| self.write(&data));

        if let Err(err) = result {
            log::warn!("failed to save session: {}", err);
        }
    }

    /// Forget the stored session, logging any failure
    fn clear(&self) {
        if let Err(err) = self.remove() {
            log::warn!("failed to clear session: {}", err);
        }
    }
}

/// In-memory store, for tests and non-browser hosts
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&self, data: &str) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = Some(data.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/<key>.json`
    pub fn in_dir(dir: impl Into<PathBuf>, config: &StorageConfig) -> Self {
        Self::new(dir.into().join(format!("{}.json", config.key)))
    }
}

impl SessionStore for FileStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, data: &str) -> Result<(), StorageError> {
        std::fs::write(&self.path, data)?;
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// Browser `localStorage`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            key: config.key.clone(),
        }
    }

    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn write(&self, data: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(&self.key, data)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(&self.key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }
}
