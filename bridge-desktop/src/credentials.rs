//! Credential Storage backed by a JSON document

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    storage::CredentialStore,
};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::debug;

/// File-backed credential store.
///
/// All values live in a single JSON object on disk; writes rewrite the
/// whole document under an in-process mutex. Sized for the small
/// per-service config this workspace stores (a token per provider).
pub struct JsonFileCredentialStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileCredentialStore {
    /// Create a store persisting to `path`. The file and its parent
    /// directories are created on first write.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Create a store under the user config directory
    /// (`<config>/userscript-sync/credentials.json`).
    pub fn in_config_dir() -> Result<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| BridgeError::NotAvailable("user config directory".to_string()))?;
        Ok(Self::new(
            base.join("userscript-sync").join("credentials.json"),
        ))
    }

    async fn read_map(&self) -> Result<HashMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                BridgeError::OperationFailed(format!("Corrupt credential file: {}", e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(BridgeError::Io(e)),
        }
    }

    async fn write_map(&self, map: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(BridgeError::Io)?;
        }

        let json = serde_json::to_vec_pretty(map).map_err(|e| {
            BridgeError::OperationFailed(format!("Failed to serialize credentials: {}", e))
        })?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(BridgeError::Io)
    }
}

#[async_trait]
impl CredentialStore for JsonFileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_map().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await?;
        debug!(key = key, "Stored credential");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        debug!(key = key, "Deleted credential");
        Ok(())
    }
}
