//! # Event Bus System
//!
//! Decoupled communication between the provider adapters and the sync
//! orchestrator using `tokio::sync::broadcast`.
//!
//! Adapters cannot call into the orchestrator directly (it lives above them
//! in the dependency graph), so side effects such as "a new authorization
//! was captured, run a sync check" are published as events. Any number of
//! subscribers can listen independently; emitting with no subscribers is not
//! an error at the call sites (senders use `.ok()`).
//!
//! ## Usage
//!
//! ```no_run
//! use core_runtime::events::{EventBus, SyncEvent};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let event_bus = EventBus::new(100);
//! let mut stream = event_bus.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(event) = stream.recv().await {
//!         if matches!(event, SyncEvent::SyncCheckRequested { .. }) {
//!             // kick the sync engine
//!         }
//!     }
//! });
//!
//! event_bus
//!     .emit(SyncEvent::SyncCheckRequested { service: "googledrive".into() })
//!     .ok();
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
///
/// Subscribers that fall behind by more than this many events receive
/// `RecvError::Lagged` and keep going.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Events published by storage service adapters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum SyncEvent {
    /// An OAuth redirect carrying an access token was captured and the
    /// token persisted.
    AuthorizationCaptured {
        /// Service identifier (e.g. "googledrive").
        service: String,
    },
    /// A service asks the orchestrator to run a sync check.
    SyncCheckRequested {
        /// Service identifier.
        service: String,
    },
    /// A service's stored credentials were cleared.
    AccessRevoked {
        /// Service identifier.
        service: String,
    },
}

impl SyncEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &'static str {
        match self {
            SyncEvent::AuthorizationCaptured { .. } => "authorization captured",
            SyncEvent::SyncCheckRequested { .. } => "sync check requested",
            SyncEvent::AccessRevoked { .. } => "access revoked",
        }
    }

    /// The service the event originated from.
    pub fn service(&self) -> &str {
        match self {
            SyncEvent::AuthorizationCaptured { service }
            | SyncEvent::SyncCheckRequested { service }
            | SyncEvent::AccessRevoked { service } => service,
        }
    }
}

/// Central broadcast channel for [`SyncEvent`]s.
///
/// Cloning an `EventBus` yields a handle to the same channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SyncEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error if there are none.
    pub fn emit(&self, event: SyncEvent) -> Result<usize, SendError<SyncEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber receiving all future events.
    pub fn subscribe(&self) -> Receiver<SyncEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}
