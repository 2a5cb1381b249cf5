//! Remote storage service contract.
//!
//! One implementation exists per storage backend. The sync orchestrator
//! only ever talks to [`RemoteStorageService`]; everything provider-specific
//! (endpoints, payload shapes, authorization flows) stays behind it.

use async_trait::async_trait;
use bridge_traits::storage::LocalScript;
use bytes::Bytes;

use crate::error::Result;
use crate::filename::script_filename;

/// One remote file as seen by a storage service.
///
/// Instances are ephemeral: rebuilt from the provider listing on every
/// sync-data call and never cached between calls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteFileRef {
    /// Provider-assigned identifier; absent for not-yet-uploaded items.
    pub id: Option<String>,
    /// Byte length as reported by the provider.
    pub size: u64,
    /// Local identifier recovered from the remote filename.
    pub uri: Option<String>,
}

/// Descriptor of the remote metadata document.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteMeta {
    /// Provider-assigned identifier; absent when no metadata file exists yet.
    pub id: Option<String>,
    /// Byte length of the metadata file, 0 when absent.
    pub size: u64,
    /// The reserved metadata filename.
    pub name: String,
    /// Parsed metadata document, or the empty-object fallback.
    pub data: serde_json::Value,
}

/// Result of a sync-data call.
///
/// All three legs are derived from one reconciliation pass: the metadata
/// descriptor, the normalized remote script listing (in listing order), and
/// the local script collection.
#[derive(Debug)]
pub struct SyncData {
    pub meta: RemoteMeta,
    pub remote: Vec<RemoteFileRef>,
    pub local: Vec<LocalScript>,
}

/// Identifies a script being uploaded or updated.
#[derive(Debug, Clone, Default)]
pub struct ScriptItem {
    /// Provider-assigned id when the script already exists remotely.
    pub id: Option<String>,
    /// Local identifier.
    pub uri: String,
    /// Remote filename from an earlier listing, when known.
    pub remote_name: Option<String>,
}

/// Provider filename for an item: the previously-seen remote name when
/// available, otherwise derived from the local URI.
pub fn item_filename(item: &ScriptItem) -> String {
    item.remote_name
        .clone()
        .unwrap_or_else(|| script_filename(&item.uri))
}

/// Capability interface implemented by each remote storage backend.
///
/// All methods are non-blocking; no method retries on its own. The single
/// piece of state shared between concurrent calls is the stored access
/// token behind the service's `CredentialStore`.
#[async_trait]
pub trait RemoteStorageService: Send + Sync {
    /// Short service identifier (config namespace, log field).
    fn name(&self) -> &'static str;

    /// Human-readable service name.
    fn display_name(&self) -> &'static str;

    /// Re-read persisted state. Called after construction and after
    /// credential changes.
    async fn prepare(&self) -> Result<()> {
        Ok(())
    }

    /// Validate the stored access token against the provider.
    ///
    /// Returns the provider's token-introspection payload on success.
    async fn user(&self) -> Result<serde_json::Value>;

    /// Reconcile the remote listing with local state.
    ///
    /// Cleanup deletions discovered along the way (unrecognized names,
    /// duplicate metadata files, zero-size uploads) are detached: they do
    /// not delay the returned data and their failures are not surfaced.
    async fn sync_data(&self) -> Result<SyncData>;

    /// Start the interactive authorization flow by opening the provider's
    /// consent screen. Side effect only.
    async fn authorize(&self) -> Result<()>;

    /// Inspect a navigated URL for the provider's authorization redirect.
    ///
    /// When the URL matches, any access token in the fragment is persisted
    /// and a sync check is requested. Returns whether the URL matched, so
    /// the host can suppress its default navigation handling.
    async fn check_auth(&self, url: &str) -> Result<bool>;

    /// Clear stored credentials and re-run preparation. The provider-side
    /// token is not invalidated.
    async fn revoke(&self) -> Result<()>;

    /// Standalone listing. Services may only support listing implicitly as
    /// part of [`sync_data`](Self::sync_data).
    async fn list(&self) -> Result<Vec<RemoteFileRef>>;

    /// Fetch raw file content by id.
    ///
    /// Fails with a validation error, before any network call, when
    /// `file.id` is absent or empty.
    async fn get(&self, file: &RemoteFileRef) -> Result<Bytes>;

    /// Upload (`item.id` absent) or update (`item.id` present) a script
    /// file's content. Returns the provider's file descriptor.
    async fn put(&self, item: &ScriptItem, data: &str) -> Result<serde_json::Value>;

    /// Delete a remote file by id.
    async fn remove(&self, id: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_filename_prefers_remote_name() {
        let item = ScriptItem {
            id: Some("abc".to_string()),
            uri: "example.com/script".to_string(),
            remote_name: Some("usc-legacy-name".to_string()),
        };
        assert_eq!(item_filename(&item), "usc-legacy-name");
    }

    #[test]
    fn test_item_filename_derives_from_uri() {
        let item = ScriptItem {
            uri: "example.com/script".to_string(),
            ..Default::default()
        };
        assert_eq!(item_filename(&item), script_filename("example.com/script"));
    }
}
