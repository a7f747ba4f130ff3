//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! ## Cancellation Effects
//!
//! Cancellation is initiated from the reducer via `UiEffect::CancelTask`.
//! The runtime executes these by calling `token.cancel()` on the provided token.

use fatigue_core::api::{FeedbackRequest, SessionId, SessionRequest};
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Send a validated session to the API.
    SubmitSession {
        task: TaskId,
        request: SessionRequest,
    },

    /// Poll for the result of a queued session.
    StartPoll { task: TaskId, session_id: SessionId },

    /// Send validated feedback for the active session.
    SubmitFeedback {
        task: TaskId,
        request: FeedbackRequest,
    },

    /// Cancel an in-flight task.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}
