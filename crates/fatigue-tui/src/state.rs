//! Application state composition.
//!
//! ## State Hierarchy
//!
//! ```text
//! AppState
//! ├── form: FormState            (session inputs, focus, validation error)
//! ├── session: SessionView       (Idle | Loading | Results | Error)
//! ├── feedback: FeedbackState    (draft, focus, notice)
//! ├── status_line: StatusLineState (agent indicator)
//! ├── pane: Pane                 (which panel receives keys)
//! ├── task_seq: TaskSeq          (async task id generator)
//! └── tasks: Tasks               (task lifecycle state)
//! ```
//!
//! The reducer in `update.rs` is the only writer.

use std::time::Duration;

use crate::common::{TaskSeq, Tasks};
use crate::features::feedback::FeedbackState;
use crate::features::form::FormState;
use crate::features::session::SessionView;
use crate::features::statusline::StatusLineState;

/// Panel receiving non-global keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Form,
    /// Only reachable while results are shown.
    Feedback,
}

pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Resolved API base URL, shown in the title bar.
    pub api_base_url: String,
    pub form: FormState,
    pub session: SessionView,
    pub feedback: FeedbackState,
    pub status_line: StatusLineState,
    pub pane: Pane,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
    /// How long the feedback success notice stays up.
    pub feedback_notice: Duration,
}

impl AppState {
    pub fn new(api_base_url: impl Into<String>, feedback_notice: Duration) -> Self {
        Self {
            should_quit: false,
            api_base_url: api_base_url.into(),
            form: FormState::default(),
            session: SessionView::Idle,
            feedback: FeedbackState::default(),
            status_line: StatusLineState::default(),
            pane: Pane::Form,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
            feedback_notice,
        }
    }

    /// The submit control is disabled while a submit or poll is in flight.
    pub fn is_predicting(&self) -> bool {
        self.tasks.is_predicting()
    }
}
