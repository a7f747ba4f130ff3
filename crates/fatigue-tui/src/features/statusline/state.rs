//! Agent status indicator state.

use fatigue_core::api::{AgentStatus, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentIndicator {
    /// No answer yet.
    #[default]
    Checking,
    Active,
    Offline,
    ConnectionError,
}

impl AgentIndicator {
    pub fn text(self) -> &'static str {
        match self {
            AgentIndicator::Checking => "Checking agent...",
            AgentIndicator::Active => "Agent is Active",
            AgentIndicator::Offline => "Agents Offline",
            AgentIndicator::ConnectionError => "Connection Error",
        }
    }
}

/// Indicator plus the last metrics the agent reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusLineState {
    pub indicator: AgentIndicator,
    pub metrics: Option<AgentStatus>,
}

impl StatusLineState {
    /// Applies one refresh. A failure only changes the indicator; the next
    /// successful refresh restores it.
    pub fn apply(&mut self, result: ApiResult<AgentStatus>) {
        match result {
            Ok(status) => {
                self.indicator = if status.is_running {
                    AgentIndicator::Active
                } else {
                    AgentIndicator::Offline
                };
                self.metrics = Some(status);
            }
            Err(_) => self.indicator = AgentIndicator::ConnectionError,
        }
    }
}
