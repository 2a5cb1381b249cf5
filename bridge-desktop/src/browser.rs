//! System Browser Integration

use async_trait::async_trait;
use bridge_traits::{
    browser::TabOpener,
    error::{BridgeError, Result},
};
use tracing::info;

/// Opens URLs in the user's default browser.
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl SystemBrowser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TabOpener for SystemBrowser {
    async fn open_tab(&self, url: &str) -> Result<()> {
        let url = url.to_string();
        info!(url = %url, "Opening system browser");

        // open::that can block while the launcher runs; keep it off the
        // async runtime threads.
        tokio::task::spawn_blocking(move || open::that(&url))
            .await
            .map_err(|e| BridgeError::OperationFailed(format!("Browser task failed: {}", e)))?
            .map_err(|e| BridgeError::OperationFailed(format!("Failed to open browser: {}", e)))
    }
}
