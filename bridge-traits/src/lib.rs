//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host.
//!
//! ## Overview
//!
//! This crate defines the contract between the sync core and host-specific
//! implementations. Each trait represents a capability the core requires but
//! that is provided differently per host (browser extension, desktop app,
//! headless CLI).
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Async HTTP operations with retry
//! - [`CredentialStore`](storage::CredentialStore) - Provider token/config persistence
//! - [`ScriptStore`](storage::ScriptStore) - Read access to locally-installed scripts
//! - [`TabOpener`](browser::TabOpener) - Opens OAuth consent URLs in a browsing context
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Host
//! implementations should convert their platform errors into `BridgeError`
//! with actionable messages.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so implementations can be shared
//! across async tasks behind `Arc`.

pub mod browser;
pub mod error;
pub mod http;
pub mod storage;

pub use error::BridgeError;

// Re-export commonly used types
pub use browser::TabOpener;
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use storage::{CredentialStore, LocalScript, ScriptStore};
