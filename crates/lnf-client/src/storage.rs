//! # Session Storage
//!
//! A small string key/value store holding the persisted session, in the
//! role browser local storage plays for the web client.
//!
//! ## Keys
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   "user"   →  {"id":4,"username":"sam","email":"sam@campus.edu"}        │
//! │   "token"  →  opaque bearer string (only when the backend issues one)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`FileStorage`] keeps the map in one JSON file and rewrites it on every
//! change. [`MemoryStorage`] is for tests and one-shot runs.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

/// Key of the persisted session profile.
pub const USER_KEY: &str = "user";

/// Key of the persisted bearer token.
pub const TOKEN_KEY: &str = "token";

/// String key/value persistence for the session.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

type Entries = BTreeMap<String, String>;

fn lock(entries: &Mutex<Entries>) -> ClientResult<std::sync::MutexGuard<'_, Entries>> {
    entries
        .lock()
        .map_err(|_| ClientError::Storage("session store lock poisoned".into()))
}

// =============================================================================
// File Storage
// =============================================================================

/// JSON-file backed store.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileStorage {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object
    /// of strings is also treated as empty and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> ClientResult<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str::<Entries>(&text).unwrap_or_else(|e| {
                warn!(?path, error = %e, "Session file is unreadable, starting empty");
                Entries::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, "No session file yet");
                Entries::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(FileStorage {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &Entries) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(entries)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = lock(&self.entries)?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut entries = lock(&self.entries)?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-process store that forgets everything on drop.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<Entries>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        lock(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        lock(&self.entries)?.remove(key);
        Ok(())
    }
}
