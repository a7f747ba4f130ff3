//! Feature slices for the TUI (state/update/render per slice).

pub mod feedback;
pub mod form;
pub mod session;
pub mod statusline;
