//! Debounced scheduling of engagement sweeps
//!
//! Scene edits arrive in bursts; the scheduler coalesces them with a
//! trailing-edge quiet window so a drag across the map costs one sweep,
//! not one per frame.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Scene events that request a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepTrigger {
    SceneReady,
    CombatantCreated,
    CombatantUpdated,
    CombatantDeleted,
    CombatantRefreshed,
    SizeChanged,
    TurnChanged,
}

/// Coalesces sweep requests behind a quiet window.
///
/// Every trigger restarts the window; the sweep callback runs once the
/// window passes with no further triggers. On shutdown a pending sweep
/// still runs before the worker exits.
pub struct SweepScheduler {
    tx: mpsc::UnboundedSender<SweepTrigger>,
    worker: JoinHandle<()>,
}

impl SweepScheduler {
    /// Spawn the scheduler worker. Must be called within a tokio runtime.
    pub fn spawn<F>(window: Duration, mut run_sweep: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<SweepTrigger>();

        let worker = tokio::spawn(async move {
            while let Some(trigger) = rx.recv().await {
                tracing::debug!("Sweep requested by {:?}", trigger);

                // Absorb the rest of the burst; each arrival restarts the window
                let mut closed = false;
                loop {
                    match tokio::time::timeout(window, rx.recv()).await {
                        Ok(Some(next)) => {
                            tracing::debug!("Sweep window restarted by {:?}", next);
                        }
                        Ok(None) => {
                            closed = true;
                            break;
                        }
                        Err(_) => break,
                    }
                }

                run_sweep();

                if closed {
                    return;
                }
            }
        });

        Self { tx, worker }
    }

    /// Request a sweep. Cheap and synchronous; safe to call from any hook.
    pub fn trigger(&self, trigger: SweepTrigger) {
        // Send only fails after shutdown, when there is nothing left to do
        let _ = self.tx.send(trigger);
    }

    /// Stop the worker, flushing any pending sweep first
    pub async fn shutdown(self) {
        drop(self.tx);
        let _ = self.worker.await;
    }
}
