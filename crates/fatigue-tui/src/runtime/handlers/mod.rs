//! Effect handlers for the TUI runtime.
//!
//! Handlers perform I/O and return the resulting `UiEvent`. They never touch
//! `AppState`; the runtime spawns them and forwards their events to the inbox.

pub mod feedback;
pub mod session;
pub mod status;

pub use feedback::*;
pub use session::*;
pub use status::*;

#[cfg(test)]
mod tests;
