//! Session storage for the bearer token.
//!
//! The token lives in a small key/value session store under
//! [`TOKEN_STORAGE_KEY`]. The store can be backed by a JSON file in the data
//! directory. When the file has no token, one is read from an environment
//! variable; that token is held in memory only and never written back.

use crate::constants::{SESSION_FILE_NAME, TOKEN_STORAGE_KEY};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Anything that can hand out the current bearer token.
pub trait TokenProvider: Send + Sync {
    /// The current token, or `None` when the user is not signed in
    fn token(&self) -> Option<String>;
}

/// Key/value session store, cheap to clone and share.
#[derive(Clone, Default)]
pub struct SessionStore {
    values: Arc<RwLock<HashMap<String, String>>>,
    env_token: Option<String>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Create an empty store with no backing file
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Create an in-memory store holding `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::in_memory();
        store.set(TOKEN_STORAGE_KEY, token);
        store
    }

    /// Load a store from a JSON file. A missing file yields an empty store bound to `path`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session file: {}", path.display()))?;
            serde_json::from_str::<HashMap<String, String>>(&content)
                .with_context(|| format!("Failed to parse session file: {}", path.display()))?
        } else {
            HashMap::new()
        };

        Ok(Self {
            values: Arc::new(RwLock::new(values)),
            env_token: None,
            path: Some(path),
        })
    }

    /// Open the default session file, falling back to `token_env` for the token.
    pub fn open_default(token_env: &str) -> Result<Self> {
        let store = match Self::get_session_file_path() {
            Ok(path) => Self::load_from_file(path)?,
            Err(_) => Self::in_memory(),
        };
        Ok(store.with_env_token(token_env))
    }

    /// Open the session file at `path`, falling back to `token_env` for the token.
    pub fn open<P: AsRef<Path>>(path: P, token_env: &str) -> Result<Self> {
        Ok(Self::load_from_file(path)?.with_env_token(token_env))
    }

    fn with_env_token(mut self, token_env: &str) -> Self {
        self.env_token = std::env::var(token_env).ok().filter(|token| !token.is_empty());
        self
    }

    /// Whether the current token came from the environment rather than the session file
    pub fn token_from_env(&self) -> bool {
        self.get(TOKEN_STORAGE_KEY).filter(|token| !token.is_empty()).is_none() && self.env_token.is_some()
    }

    /// Get the default session file path
    pub fn get_session_file_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("fleetdash").join(SESSION_FILE_NAME))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok().and_then(|values| values.get(key).cloned())
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.into());
        }
    }

    pub fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.write() {
            values.remove(key);
        }
    }

    /// Drop the stored token, signing the user out. An environment token is left alone.
    pub fn sign_out(&self) {
        self.remove(TOKEN_STORAGE_KEY);
    }

    /// Persist the store to its backing file, if it has one
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let snapshot = self
            .values
            .read()
            .map_err(|_| anyhow::anyhow!("Session store lock poisoned"))?
            .clone();
        let content = serde_json::to_string_pretty(&snapshot).context("Failed to serialize session")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create session directory: {}", parent.display()))?;
        }
        std::fs::write(path, content).with_context(|| format!("Failed to write session file: {}", path.display()))?;
        Ok(())
    }
}

impl TokenProvider for SessionStore {
    fn token(&self) -> Option<String> {
        self.get(TOKEN_STORAGE_KEY)
            .filter(|token| !token.is_empty())
            .or_else(|| self.env_token.clone())
    }
}
