//! Storage Abstractions
//!
//! Platform-agnostic traits for credential persistence and read access to the
//! locally-installed script collection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A locally-installed userscript as seen by the sync layer.
///
/// Only the fields needed for remote reconciliation are carried here; the
/// full script record stays inside the host's script storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalScript {
    /// Stable local identifier for the script.
    pub uri: String,
    /// Last modification time as Unix seconds, when the host tracks it.
    pub modified_at: Option<i64>,
}

/// Key-value persistence for provider credentials and configuration.
///
/// Backs the per-service config of each storage provider (access tokens and
/// similar small string values). Keys are namespaced by the caller, e.g.
/// `googledrive/token`.
///
/// # Security
///
/// Implementations must not log stored values; callers treat every value as
/// a secret.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Retrieve a stored value, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Idempotent: removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check for a key without retrieving its value.
    async fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}

/// Read access to the locally-installed script collection.
///
/// Supplies the local leg of the sync reconciliation; this layer never
/// writes through it.
#[async_trait]
pub trait ScriptStore: Send + Sync {
    /// List all locally-installed scripts with their sync-relevant metadata.
    async fn local_scripts(&self) -> Result<Vec<LocalScript>>;
}
