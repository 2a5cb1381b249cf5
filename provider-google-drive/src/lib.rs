//! # Google Drive Backend
//!
//! Implements the `RemoteStorageService` trait over the Google Drive API
//! v3, scoped entirely to the application-private appDataFolder space.
//!
//! ## Overview
//!
//! This module provides:
//! - Script and metadata reconciliation over `files.list`
//! - Content fetch via `alt=media`
//! - Multipart/related uploads (create and update)
//! - OAuth 2.0 implicit-flow authorization with redirect capture
//! - Token validation against the tokeninfo endpoint

pub mod auth;
pub mod connector;
pub mod types;

pub use auth::{DriveConfig, RedirectCapture};
pub use connector::GoogleDriveService;
