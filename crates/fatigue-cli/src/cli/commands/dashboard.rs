//! Interactive dashboard command.

use anyhow::Result;
use fatigue_core::config::Config;

pub async fn run(config: &Config, api_url: Option<&str>) -> Result<()> {
    fatigue_tui::run_interactive(config, api_url).await
}
