//! Scripted prediction: submit a session, poll, print the result.

use anyhow::{Context, Result};
use fatigue_core::api::{ApiClient, PollOptions, SessionRequest, poll_for_result};
use fatigue_core::config::Config;
use fatigue_core::display::ResultDisplay;
use fatigue_core::session;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn run(config: &Config, api_url: Option<&str>, request: SessionRequest) -> Result<()> {
    session::validate(&request)?;

    let client = ApiClient::from_config(config, api_url)?;
    let queued = client
        .submit_session(&request)
        .await
        .context("submit session")?;
    info!(session_id = queued.session_id, player = %request.player_name, "session queued");
    eprintln!("Session #{} queued, waiting for result...", queued.session_id);

    let options = PollOptions::from(&config.polling);
    let result = poll_for_result(&client, queued.session_id, &options, &CancellationToken::new())
        .await
        .with_context(|| format!("poll session #{}", queued.session_id))?;

    print!("{}", format_result(&ResultDisplay::from_result(&result)));
    Ok(())
}

/// Plain-text rendering of the results card.
pub fn format_result(display: &ResultDisplay) -> String {
    format!(
        "Session {}\n\
         Fatigue score: {} / 100\n\
         Risk level:    {} {}\n\
         Action:        {} {}\n\
         Confidence:    {}\n\
         Processed at:  {}\n",
        display.session_label,
        display.score_label,
        display.risk_icon,
        display.risk_label,
        display.action.icon,
        display.action.label,
        display.confidence_label,
        display.processed_at,
    )
}
