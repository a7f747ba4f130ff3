//! Session view state.

use fatigue_core::api::{PredictionResult, SessionId};
use fatigue_core::display::ResultDisplay;
use fatigue_core::feedback::ActiveSession;

/// The one visible session state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionView {
    /// Nothing submitted yet, or reset.
    #[default]
    Idle,
    /// Session queued; waiting for the poll loop.
    Loading { session_id: SessionId },
    /// Processed result, and the session feedback refers to.
    Results {
        display: ResultDisplay,
        active: ActiveSession,
    },
    /// Submit or poll failed.
    Error { message: String },
}

impl SessionView {
    pub fn results(result: &PredictionResult) -> Self {
        SessionView::Results {
            display: ResultDisplay::from_result(result),
            active: ActiveSession::from(result),
        }
    }

    /// Session feedback can be given for; only set while showing results.
    pub fn active_session(&self) -> Option<&ActiveSession> {
        match self {
            SessionView::Results { active, .. } => Some(active),
            _ => None,
        }
    }

    pub fn can_reset(&self) -> bool {
        matches!(self, SessionView::Results { .. } | SessionView::Error { .. })
    }

    pub fn is_loading_for(&self, id: SessionId) -> bool {
        matches!(self, SessionView::Loading { session_id } if *session_id == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionView::Idle => "idle",
            SessionView::Loading { .. } => "loading",
            SessionView::Results { .. } => "results",
            SessionView::Error { .. } => "error",
        }
    }
}
