//! CLI command handlers.

pub mod config;
pub mod dashboard;
pub mod feedback;
pub mod predict;
pub mod status;
