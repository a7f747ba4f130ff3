//! Full-screen TUI for the fatigue prediction agent.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use fatigue_core::api::ApiClient;
use fatigue_core::config::Config;
pub use features::{feedback, form, session, statusline};
pub use runtime::TuiRuntime;

/// Runs the interactive dashboard until the user quits.
///
/// # Errors
/// Returns an error when no terminal is attached, the API URL is invalid,
/// or terminal I/O fails.
pub async fn run_interactive(config: &Config, api_url_override: Option<&str>) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The dashboard requires a terminal.\n\
             Use `fatigue predict --player-name ...` for non-interactive predictions."
        );
    }

    let client = ApiClient::from_config(config, api_url_override)?;
    let mut runtime = TuiRuntime::new(config, client)?;
    runtime.run()
}
