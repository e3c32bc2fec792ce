//! Local key-value session storage.
//!
//! The session holds at least the signed-in user's id under [`USER_ID_KEY`].
//! It is read whenever a mutation needs an acting user.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::ClientError;

/// Key of the signed-in user's numeric id.
pub const USER_ID_KEY: &str = "userid";

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;

    async fn remove(&self, key: &str) -> Result<(), ClientError>;
}

/// Reads the acting user's id, failing before any network call when absent.
pub async fn acting_user_id(store: &dyn SessionStore) -> Result<i64, ClientError> {
    let raw = store
        .get(USER_ID_KEY)
        .await?
        .filter(|value| !value.trim().is_empty())
        .ok_or(ClientError::MissingUser)?;

    raw.trim()
        .parse::<i64>()
        .map_err(|_| ClientError::Session(format!("Stored user id is not a number: {raw}")))
}

/// In-memory session, used by tests and short-lived embedders.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session already signed in as `user_id`.
    pub fn signed_in(user_id: i64) -> Self {
        let mut entries = HashMap::new();
        entries.insert(USER_ID_KEY.to_string(), user_id.to_string());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Session persisted as a flat JSON object on disk.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, String>, ClientError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                ClientError::Session(format!("{} is corrupt: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn store(&self, entries: &HashMap<String, String>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| ClientError::Session(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, contents)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), keys = entries.len(), "Session saved");
        Ok(())
    }

    fn io_error(&self, e: std::io::Error) -> ClientError {
        ClientError::Session(format!("{}: {e}", self.path.display()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        let _guard = self.lock.read().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let _guard = self.lock.write().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.store(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), ClientError> {
        let _guard = self.lock.write().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.store(&entries).await?;
        }
        Ok(())
    }
}
