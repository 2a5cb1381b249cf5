//! Detached background tasks.
//!
//! Cleanup work (orphan and duplicate deletions) is spawned and never
//! joined: its outcome is not part of any caller's success/failure
//! contract. Failures are logged and dropped.

use std::fmt::Display;
use std::future::Future;
use tracing::warn;

/// Spawn `fut` on the runtime without retaining its handle.
///
/// An `Err` outcome is logged under `label`; nothing else observes it.
pub fn spawn_detached<F, E>(label: &'static str, fut: F)
where
    F: Future<Output = std::result::Result<(), E>> + Send + 'static,
    E: Display,
{
    tokio::spawn(async move {
        if let Err(error) = fut.await {
            warn!(task = label, error = %error, "Detached task failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_detached_task_runs() {
        let (tx, rx) = oneshot::channel();

        spawn_detached("test.ok", async move {
            tx.send(()).ok();
            Ok::<(), ServiceError>(())
        });

        rx.await.expect("detached task should have run");
    }

    #[tokio::test]
    async fn test_detached_failure_is_swallowed() {
        let (tx, rx) = oneshot::channel();

        spawn_detached("test.fail", async move {
            tx.send(()).ok();
            Err::<(), _>(ServiceError::Validation("boom"))
        });

        // The failure is logged, not propagated; nothing panics.
        rx.await.expect("detached task should have run");
    }
}
