//! Session view feature slice: Idle, Loading, Results and Error panels.
//!
//! ## Module Structure
//!
//! - `state.rs`: `SessionView`, the single visible session state
//! - `render.rs`: one render function per view, plus the risk gauge

mod render;
mod state;

pub use render::render_session;
pub use state::SessionView;
