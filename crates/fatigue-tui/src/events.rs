//! UI event types.
//!
//! Everything that can change `AppState` arrives as a `UiEvent`: terminal
//! input, the runtime's tick, and results of async work delivered through
//! the runtime inbox.

use crossterm::event::Event;
use fatigue_core::api::{AgentStatus, ApiResult, PredictionResult, QueueResponse, SessionId};
use serde_json::Value;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic heartbeat; drives timers and rendering.
    Tick,
    /// Raw terminal input.
    Terminal(Event),

    /// A spawned task registered its cancellation token.
    TaskStarted { kind: TaskKind, started: TaskStarted },
    /// A spawned task finished; `result` is only applied if the task is
    /// still the active one for its kind.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// `POST /predict` answered.
    SessionQueued(ApiResult<QueueResponse>),
    /// The poll loop for `session_id` ended.
    PollFinished {
        session_id: SessionId,
        result: ApiResult<PredictionResult>,
    },
    /// `POST /feedback` answered.
    FeedbackSent(ApiResult<Value>),
    /// Periodic agent status refresh.
    AgentStatusLoaded(ApiResult<AgentStatus>),
}
