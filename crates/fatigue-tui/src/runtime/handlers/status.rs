use std::time::Duration;

use fatigue_core::api::ApiClient;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::events::UiEvent;
use crate::runtime::inbox::UiEventSender;

/// Refreshes the agent status every `interval` until cancelled or the inbox
/// closes. The first refresh happens immediately.
pub async fn status_refresh_loop(
    client: ApiClient,
    interval: Duration,
    tx: UiEventSender,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let result = tokio::select! {
            () = cancel.cancelled() => break,
            result = client.agent_status() => result,
        };

        match &result {
            Ok(status) => debug!(
                running = status.is_running,
                processed = status.processed_count,
                queue = status.queue_size,
                avg_ms = status.avg_processing_time_ms,
                avg_score = status.avg_fatigue_score,
                avg_confidence = status.avg_confidence,
                exploration = status.exploration_count,
                review_needed = status.review_needed_count,
                retrain = status.retrain_count,
                "agent status"
            ),
            Err(err) => warn!(error = %err, "agent status refresh failed"),
        }

        if tx.send(UiEvent::AgentStatusLoaded(result)).is_err() {
            break;
        }
    }
}
