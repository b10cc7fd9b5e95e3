//! Process lifecycle state machine.
//!
//! # States
//! - Starting: configuration loaded, listener not yet bound
//! - Listening: accepting connections
//! - ShuttingDown: a termination signal arrived
//! - Stopped: about to exit
//!
//! # State Transitions
//! ```text
//! Starting → Listening → ShuttingDown → Stopped
//! Starting → ShuttingDown                (signal before the bind completed)
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Starting,
    Listening,
    ShuttingDown,
    Stopped,
}

impl LifecycleState {
    /// Whether moving from `self` to `next` is allowed.
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::*;
        matches!(
            (self, next),
            (Starting, Listening)
                | (Starting, ShuttingDown)
                | (Listening, ShuttingDown)
                | (ShuttingDown, Stopped)
        )
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Starting => "starting",
            LifecycleState::Listening => "listening",
            LifecycleState::ShuttingDown => "shutting_down",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Errors raised while starting, serving or stopping.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("illegal lifecycle transition from {from} to {to}")]
    IllegalTransition {
        from: LifecycleState,
        to: LifecycleState,
    },

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("server stopped accepting connections")]
    ServerExited,
}
