//! Shutdown coordination.

use std::future::Future;

use tokio::sync::broadcast;

use crate::lifecycle::signals::ShutdownTrigger;

/// Coordinator for shutdown.
///
/// Provides a broadcast channel that carries the trigger to every waiter.
#[derive(Debug, Clone)]
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<ShutdownTrigger>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<ShutdownTrigger> {
        self.tx.subscribe()
    }

    /// A future that resolves with the trigger once shutdown is requested.
    ///
    /// Subscribes immediately, so a trigger sent after this call but before
    /// the future is first polled is not lost. If every coordinator is
    /// dropped the future resolves as [`ShutdownTrigger::Terminate`].
    pub fn signalled(&self) -> impl Future<Output = ShutdownTrigger> + Send + 'static {
        let mut rx = self.subscribe();
        async move { rx.recv().await.unwrap_or(ShutdownTrigger::Terminate) }
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self, trigger: ShutdownTrigger) {
        let _ = self.tx.send(trigger);
    }

    /// Get the number of active subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
