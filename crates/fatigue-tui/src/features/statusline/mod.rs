//! Status line feature slice.
//!
//! Shows the backend agent indicator, refreshed on a fixed interval by the
//! runtime independently of the session state.
//!
//! ## Module Structure
//!
//! - `state.rs`: `AgentIndicator` and the last reported metrics
//! - `render.rs`: title bar rendering

mod render;
mod state;

pub use render::render_status_line;
pub use state::{AgentIndicator, StatusLineState};
