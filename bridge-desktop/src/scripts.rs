//! Script Store over a local directory

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    storage::{LocalScript, ScriptStore},
};
use std::path::PathBuf;
use tracing::debug;

/// Filename suffix marking userscript files
const SCRIPT_SUFFIX: &str = ".user.js";

/// Lists `*.user.js` files under a root directory.
///
/// The file stem (the name without the `.user.js` suffix) is the script's
/// local URI; the filesystem mtime supplies `modified_at`. An absent root
/// directory is an empty collection, not an error.
pub struct DirectoryScriptStore {
    root: PathBuf,
}

impl DirectoryScriptStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn modified_secs(metadata: &std::fs::Metadata) -> Option<i64> {
        metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_secs() as i64)
    }
}

#[async_trait]
impl ScriptStore for DirectoryScriptStore {
    async fn local_scripts(&self) -> Result<Vec<LocalScript>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(BridgeError::Io(e)),
        };

        let mut scripts = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(BridgeError::Io)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let Some(stem) = name.strip_suffix(SCRIPT_SUFFIX) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }

            let modified_at = entry
                .metadata()
                .await
                .ok()
                .as_ref()
                .and_then(Self::modified_secs);

            scripts.push(LocalScript {
                uri: stem.to_string(),
                modified_at,
            });
        }

        // read_dir order is platform-dependent
        scripts.sort_by(|a, b| a.uri.cmp(&b.uri));

        debug!(root = %self.root.display(), count = scripts.len(), "Listed local scripts");
        Ok(scripts)
    }
}
