//! Admin session and pluggable token persistence

use crate::error::{ApiError, ApiResult};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tourbook_core::SessionConfig;
use tracing::{debug, warn};

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "adminToken";

/// Key/value persistence for the bearer token
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Read a value
    fn get(&self, key: &str) -> ApiResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> ApiResult<()>;

    /// Delete a value; deleting a missing key is not an error
    fn remove(&self, key: &str) -> ApiResult<()>;
}

/// Process-local token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> ApiResult<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ApiResult<()> {
        self.values.lock().remove(key);
        Ok(())
    }
}

/// Token store backed by a small JSON object on disk
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    /// Store at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ApiResult<BTreeMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(ApiError::storage),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(ApiError::storage(err)),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> ApiResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(ApiError::storage)?;
        }
        let bytes = serde_json::to_vec_pretty(values).map_err(ApiError::storage)?;
        fs::write(&self.path, bytes).map_err(ApiError::storage)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> ApiResult<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        let _guard = self.lock.lock();
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> ApiResult<()> {
        let _guard = self.lock.lock();
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

/// Authenticated operator session
///
/// Holds the bearer token in memory and mirrors it into a [`TokenStore`] so
/// that it survives restarts. Every admin call reads the token from here; a
/// 401 from any admin call clears it.
pub struct AdminSession {
    store: Arc<dyn TokenStore>,
    key: String,
    token: RwLock<Option<String>>,
}

impl AdminSession {
    /// Session persisted in `store` under [`DEFAULT_STORAGE_KEY`]
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Session persisted under a custom key
    pub fn with_key(store: Arc<dyn TokenStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            token: RwLock::new(None),
        }
    }

    /// Session that forgets everything on exit
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// File-backed session as configured
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::with_key(
            Arc::new(FileTokenStore::new(&config.token_file)),
            config.storage_key.clone(),
        )
    }

    /// Load a previously persisted token, returning whether one was found
    pub fn restore(&self) -> ApiResult<bool> {
        let stored = self
            .store
            .get(&self.key)?
            .filter(|token| !token.trim().is_empty());
        let found = stored.is_some();
        *self.token.write() = stored;
        debug!(found, "restored admin session");
        Ok(found)
    }

    /// Current bearer token
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Current bearer token, or [`ApiError::NotAuthenticated`]
    pub fn bearer(&self) -> ApiResult<String> {
        self.token().ok_or(ApiError::NotAuthenticated)
    }

    /// Whether a token is held
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Adopt a freshly issued token and persist it
    ///
    /// The in-memory token is set even when persisting fails, so the current
    /// process stays signed in.
    pub fn store_token(&self, token: impl Into<String>) -> ApiResult<()> {
        let token = token.into();
        *self.token.write() = Some(token.clone());
        self.store.set(&self.key, &token)
    }

    /// Forget the token, in memory first and then in the store
    pub fn clear(&self) -> ApiResult<()> {
        self.token.write().take();
        self.store.remove(&self.key).inspect_err(|err| {
            warn!(error = %err, "failed to remove persisted admin token");
        })
    }
}

impl fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSession")
            .field("store", &self.store)
            .field("key", &self.key)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
