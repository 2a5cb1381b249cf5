//! Browsing-Context Integration
//!
//! Provider adapters need to present interactive consent screens during
//! authorization. The host decides what "opening a tab" means: a browser
//! extension opens an actual tab, a desktop host launches the system
//! browser.

use async_trait::async_trait;

use crate::error::Result;

/// Opens a URL in a new browsing context.
#[async_trait]
pub trait TabOpener: Send + Sync {
    /// Open `url` in a new browsing context.
    ///
    /// Returns once the context has been requested; completion of whatever
    /// the user does there is observed elsewhere (e.g. via redirect capture).
    async fn open_tab(&self, url: &str) -> Result<()>;
}
