//! Core fatigue client library (API client, polling, display tables, config).

pub mod api;
pub mod config;
pub mod display;
pub mod feedback;
pub mod logging;
pub mod session;
