//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the userscript sync core:
//! - Logging and tracing setup
//! - Event bus for adapter-to-orchestrator notifications
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the other core modules depend
//! on. It establishes the logging conventions and the event broadcasting
//! mechanism used throughout the workspace.

pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
pub use events::{EventBus, SyncEvent, DEFAULT_EVENT_BUFFER_SIZE};
pub use logging::{init_logging, LogFormat, LoggingConfig};
