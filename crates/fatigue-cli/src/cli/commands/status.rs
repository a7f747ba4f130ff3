//! One-shot agent status.

use anyhow::Result;
use fatigue_core::api::{AgentStatus, ApiClient};
use fatigue_core::config::Config;
use fatigue_core::display::confidence_percent;
use fatigue_tui::statusline::StatusLineState;

pub async fn run(config: &Config, api_url: Option<&str>) -> Result<()> {
    let client = ApiClient::from_config(config, api_url)?;
    let result = client.agent_status().await;

    let mut line = StatusLineState::default();
    line.apply(result.clone());
    println!("{}", line.indicator.text());

    let status = result?;
    print!("{}", format_metrics(&status));
    Ok(())
}

fn format_metrics(status: &AgentStatus) -> String {
    format!(
        "Processed:       {}\n\
         Queue size:      {}\n\
         Avg processing:  {:.1} ms\n\
         Avg fatigue:     {:.1}\n\
         Avg confidence:  {}%\n\
         Exploration:     {}\n\
         Review needed:   {}\n\
         Retrain runs:    {}\n",
        status.processed_count,
        status.queue_size,
        status.avg_processing_time_ms,
        status.avg_fatigue_score,
        confidence_percent(status.avg_confidence),
        status.exploration_count,
        status.review_needed_count,
        status.retrain_count,
    )
}
