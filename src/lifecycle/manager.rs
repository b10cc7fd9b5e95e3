//! Lifecycle manager.
//!
//! Owns the process state machine. It does not take part in request
//! handling: it starts the server, waits for a shutdown trigger and ends
//! the process.

use std::future::Future;

use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::http::HttpServer;
use crate::lifecycle::signals::ShutdownTrigger;
use crate::lifecycle::startup::StartupReport;
use crate::lifecycle::state::{LifecycleError, LifecycleState};

/// Drives `Starting → Listening → ShuttingDown → Stopped`.
pub struct LifecycleManager {
    state: watch::Sender<LifecycleState>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        let (state, _) = watch::channel(LifecycleState::Starting);
        Self { state }
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.borrow()
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    /// Move to `next`, rejecting transitions the state machine forbids.
    pub fn transition(&self, next: LifecycleState) -> Result<(), LifecycleError> {
        let current = self.state();
        if !current.can_transition_to(next) {
            return Err(LifecycleError::IllegalTransition {
                from: current,
                to: next,
            });
        }

        tracing::debug!(from = %current, to = %next, "Lifecycle transition");
        self.state.send_replace(next);
        Ok(())
    }

    /// Serve on `listener` until `shutdown` resolves.
    ///
    /// The listener is already bound, so this enters `Listening` right away
    /// and logs the startup banner. When the trigger arrives the state moves
    /// to `ShuttingDown` and the trigger is returned. The server future is
    /// dropped at that point: connections still in flight are not drained.
    pub async fn serve_until<F>(
        &self,
        server: HttpServer,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<ShutdownTrigger, LifecycleError>
    where
        F: Future<Output = ShutdownTrigger>,
    {
        let report = StartupReport::new(server.config(), server.routes(), listener.local_addr()?);
        self.transition(LifecycleState::Listening)?;
        report.log();

        tokio::select! {
            result = server.run(listener) => {
                result?;
                Err(LifecycleError::ServerExited)
            }
            trigger = shutdown => {
                self.transition(LifecycleState::ShuttingDown)?;
                tracing::info!(signal = %trigger, "Shutdown signal received, closing server");
                Ok(trigger)
            }
        }
    }

    /// Mark the process stopped without exiting.
    pub fn finish(&self) -> Result<(), LifecycleError> {
        self.transition(LifecycleState::Stopped)?;
        tracing::info!("Server stopped");
        Ok(())
    }

    /// Mark the process stopped and exit immediately with status 0.
    pub fn terminate(&self) -> ! {
        if let Err(e) = self.finish() {
            tracing::warn!(error = %e, "Exiting from unexpected lifecycle state");
        }
        std::process::exit(0)
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::lifecycle::shutdown::Shutdown;
    use std::time::Duration;

    #[test]
    fn starts_in_starting_state() {
        assert_eq!(LifecycleManager::new().state(), LifecycleState::Starting);
    }

    #[test]
    fn rejects_illegal_transition() {
        let manager = LifecycleManager::new();
        let err = manager.transition(LifecycleState::Stopped).unwrap_err();

        assert!(matches!(
            err,
            LifecycleError::IllegalTransition {
                from: LifecycleState::Starting,
                to: LifecycleState::Stopped
            }
        ));
        assert_eq!(manager.state(), LifecycleState::Starting);
    }

    #[tokio::test]
    async fn serve_until_walks_the_state_machine() {
        let manager = LifecycleManager::new();
        let mut states = manager.subscribe();
        let shutdown = Shutdown::new();
        let signalled = shutdown.signalled();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server = HttpServer::new(ServerConfig::default());

        let trigger_later = {
            let shutdown = shutdown.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                shutdown.trigger(ShutdownTrigger::Terminate);
            }
        };

        let (result, ()) = tokio::join!(
            manager.serve_until(server, listener, signalled),
            trigger_later
        );

        assert_eq!(result.unwrap(), ShutdownTrigger::Terminate);
        assert_eq!(manager.state(), LifecycleState::ShuttingDown);
        assert!(states.has_changed().unwrap());
        assert_eq!(*states.borrow_and_update(), LifecycleState::ShuttingDown);

        manager.finish().unwrap();
        assert_eq!(manager.state(), LifecycleState::Stopped);
    }
}
