//! # Desktop Bridge Implementations
//!
//! Default implementations of the bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate provides production-ready implementations using
//! desktop-appropriate libraries:
//! - `HttpClient` using `reqwest`
//! - `CredentialStore` as a JSON document under the user config directory
//! - `ScriptStore` over a local directory of `*.user.js` files
//! - `TabOpener` delegating to the system browser
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{JsonFileCredentialStore, ReqwestHttpClient, SystemBrowser};
//!
//! let http_client = ReqwestHttpClient::new()?;
//! let credentials = JsonFileCredentialStore::in_config_dir()?;
//! let tabs = SystemBrowser::new();
//! ```

mod browser;
mod credentials;
mod http;
mod scripts;

pub use browser::SystemBrowser;
pub use credentials::JsonFileCredentialStore;
pub use http::ReqwestHttpClient;
pub use scripts::DirectoryScriptStore;
