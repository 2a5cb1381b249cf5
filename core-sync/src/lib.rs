//! # Sync Service Layer
//!
//! Provider-agnostic contract between the sync orchestrator and the remote
//! storage backends.
//!
//! ## Overview
//!
//! This crate defines:
//! - The [`RemoteStorageService`] capability trait each backend implements
//! - The data model exchanged across it ([`RemoteFileRef`], [`RemoteMeta`],
//!   [`SyncData`], [`ScriptItem`])
//! - The remote filename convention for script files and the reserved
//!   metadata filename ([`filename`])
//! - The [`ServiceError`] taxonomy shared by all backends
//! - Detached-task semantics for best-effort remote cleanup ([`task`])

pub mod error;
pub mod filename;
pub mod service;
pub mod task;

pub use error::{Result, ServiceError};
pub use filename::{
    is_script_filename, script_filename, uri_from_filename, META_FILENAME, SCRIPT_PREFIX,
};
pub use service::{
    item_filename, RemoteFileRef, RemoteMeta, RemoteStorageService, ScriptItem, SyncData,
};
pub use task::spawn_detached;
